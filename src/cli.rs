use clap::Parser;
use std::path::PathBuf;

use crate::widgets::project_id::ProjectId;
use crate::widgets::stage_header::StageSizeMode;

const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"), "\n",
    "UI:     egui/eframe 0.33\n",
    "Target: ", std::env::consts::ARCH, "-", std::env::consts::OS
);

/// Stage header shell for the block editor
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// Start in full screen mode
    #[arg(short = 'F', long = "fullscreen")]
    pub fullscreen: bool,

    /// Player-only embedding (hides the stage size toggles)
    #[arg(short = 'P', long = "player-only")]
    pub player_only: bool,

    /// Show the branding link instead of the exit button in full screen
    #[arg(short = 'b', long = "branding")]
    pub branding: bool,

    /// Initial stage size (small|large, anything else means large)
    #[arg(short = 's', long = "stage-size", value_name = "MODE", value_parser = parse_stage_size)]
    pub stage_size: Option<StageSizeMode>,

    /// Project id handed in by the host page
    #[arg(long = "project-id", value_name = "ID", value_parser = parse_project_id)]
    pub project_id: Option<ProjectId>,

    /// Show developer controls (download project)
    #[arg(short = 'd', long = "dev-mode")]
    pub dev_mode: bool,

    /// JSON message catalog for localized labels
    #[arg(short = 'm', long = "messages", value_name = "FILE")]
    pub messages: Option<PathBuf>,

    /// Enable debug logging to file (default: stagebar.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Custom configuration directory (overrides default platform paths)
    #[arg(short = 'c', long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

fn parse_stage_size(s: &str) -> Result<StageSizeMode, String> {
    Ok(StageSizeMode::from_name(s))
}

fn parse_project_id(s: &str) -> Result<ProjectId, String> {
    s.parse::<ProjectId>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["stagebar"]);
        assert!(!args.fullscreen);
        assert!(args.stage_size.is_none());
        assert!(args.project_id.is_none());
        assert_eq!(args.verbosity, 0);
    }

    #[test]
    fn test_stage_size_and_project_id() {
        let args = Args::parse_from(["stagebar", "-s", "small", "--project-id", "1234", "-vv"]);
        assert_eq!(args.stage_size, Some(StageSizeMode::Small));
        assert_eq!(args.project_id, Some(ProjectId::Number(1234)));
        assert_eq!(args.verbosity, 2);

        let args = Args::parse_from(["stagebar", "--stage-size", "tiny", "--project-id", "draft"]);
        assert_eq!(args.stage_size, Some(StageSizeMode::Large));
        assert_eq!(args.project_id, Some(ProjectId::Text("draft".into())));
    }

    #[test]
    fn test_log_flag_without_path() {
        let args = Args::parse_from(["stagebar", "--log"]);
        assert_eq!(args.log_file, Some(None));
    }
}
