use stagebar::cli::Args;
use stagebar::config::{self, HeaderSettings, PathConfig, SessionOptions};
use stagebar::core::event_bus::{Event, EventBus};
use stagebar::core::gui_state::{Alert, GuiState, LoadingState, SAVE_SUCCESS_ALERT_ID};
use stagebar::main_events;
use stagebar::widgets::project_id::{ProjectId, ProjectIdUpdater, with_project_id_updates};
use stagebar::widgets::stage_header::{
    self, DefaultMessages, EngineHandle, MessageCatalog, MessageResolver, StageHeaderActions,
    StageViewState,
};

use clap::Parser;
use eframe::egui;
use log::{debug, error, info, warn};
use std::path::PathBuf;

/// Time the shell pretends a manual save takes
const SAVE_DURATION_SECS: f64 = 0.8;
/// How long the save success alert stays up
const SAVE_ALERT_SECS: f64 = 3.0;

/// Stage header panel: labels and the engine handle passed through to run controls
struct HeaderPanel {
    messages: Box<dyn MessageResolver>,
    engine: EngineHandle,
}

impl HeaderPanel {
    fn show(&self, ui: &mut egui::Ui, state: &StageViewState, actions: &StageHeaderActions) {
        let header = stage_header::project(state, self.messages.as_ref());
        stage_header::render(ui, &header, actions, &self.engine, |ui, _engine| {
            // Run controls belong to the engine; the shell only draws placeholders
            ui.label("⚑");
            ui.label("⏹");
        });
    }
}

struct StageShell {
    gui: GuiState,
    settings: HeaderSettings,
    settings_path: PathBuf,
    /// Settings plus CLI flags; never written back
    session: SessionOptions,
    event_bus: EventBus,
    actions: StageHeaderActions,
    header: ProjectIdUpdater<HeaderPanel>,
    /// Project id as the embedding host currently reports it
    host_project_id: Option<ProjectId>,
    host_project_id_text: String,
    save_started_at: Option<f64>,
    alert_shown_at: Option<f64>,
    fullscreen_dirty: bool,
}

impl StageShell {
    fn new(args: &Args, path_config: &PathConfig) -> Self {
        let settings_path = config::config_file(config::SETTINGS_FILE, path_config);
        let settings = HeaderSettings::load_or_default(&settings_path);
        let session = SessionOptions::resolve(&settings, args);

        let messages: Box<dyn MessageResolver> =
            match args.messages.as_ref().or(settings.messages_path.as_ref()) {
                Some(path) => match MessageCatalog::load(path) {
                    Ok(catalog) if catalog.is_empty() => {
                        warn!("Message catalog {} is empty, using default labels", path.display());
                        Box::new(DefaultMessages)
                    }
                    Ok(catalog) => {
                        info!("Loaded {} messages from {}", catalog.len(), path.display());
                        Box::new(catalog)
                    }
                    Err(e) => {
                        warn!("{:#}", e);
                        Box::new(DefaultMessages)
                    }
                },
                None => Box::new(DefaultMessages),
            };

        let mut gui = GuiState::default();
        gui.stage_size.stage_size = session.stage_size_mode;
        gui.mode.is_full_screen = args.fullscreen;
        gui.mode.is_player_only = args.player_only;
        gui.project_state.project_id = args.project_id.clone();
        if args.project_id.is_some() {
            gui.project_state.loading_state = LoadingState::ShowingWithId;
        }

        let event_bus = EventBus::new();
        let actions = StageHeaderActions::from_emitter(&event_bus.emitter());
        let panel = HeaderPanel { messages, engine: EngineHandle::detached() };
        let header = with_project_id_updates(panel, event_bus.emitter());

        Self {
            gui,
            settings,
            settings_path,
            session,
            actions,
            header,
            host_project_id: args.project_id.clone(),
            host_project_id_text: args.project_id.as_ref().map(ToString::to_string).unwrap_or_default(),
            event_bus,
            save_started_at: None,
            alert_shown_at: None,
            fullscreen_dirty: args.fullscreen,
        }
    }

    fn handle_events(&mut self, ctx: &egui::Context, now: f64) {
        for event in self.event_bus.poll() {
            let Some(result) = main_events::handle_app_event(&event, &mut self.gui) else {
                debug!("Unhandled event: {}", (*event).type_name());
                continue;
            };
            if let Some(fullscreen) = result.set_fullscreen {
                ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(fullscreen));
            }
            if result.persist_settings {
                self.settings.stage_size_mode = self.gui.stage_size.stage_size;
                self.save_settings();
            }
            if result.start_save {
                info!("Manual save requested");
                self.save_started_at = Some(now);
            }
            if result.download_project {
                // No exporter behind the shell, the request is only logged
                info!(
                    "Project download requested (project id: {:?}), nothing to export in the standalone shell",
                    self.gui.project_state.project_id
                );
            }
        }
    }

    /// Stand-in for the save pipeline: finish after a delay and raise the alert
    fn tick_save(&mut self, now: f64) {
        if let Some(started) = self.save_started_at
            && now - started >= SAVE_DURATION_SECS
        {
            self.save_started_at = None;
            self.gui.project_state.loading_state = LoadingState::ShowingWithId;
            self.gui.alerts.visible = true;
            self.gui.alerts.alerts_list.push(Alert::new(SAVE_SUCCESS_ALERT_ID));
            self.alert_shown_at = Some(now);
        }
        if let Some(shown) = self.alert_shown_at
            && now - shown >= SAVE_ALERT_SECS
        {
            self.alert_shown_at = None;
            self.gui.alerts.alerts_list.retain(|a| a.alert_id != SAVE_SUCCESS_ALERT_ID);
            self.gui.alerts.visible = !self.gui.alerts.alerts_list.is_empty();
        }
    }

    fn save_settings(&self) {
        if let Err(e) = self.settings.save(&self.settings_path) {
            error!("{:#}", e);
        }
    }

    fn render_host_panel(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Host project id:");
            if ui.text_edit_singleline(&mut self.host_project_id_text).lost_focus() {
                let text = self.host_project_id_text.trim();
                self.host_project_id = (!text.is_empty())
                    .then(|| text.parse::<ProjectId>().ok())
                    .flatten();
            }
            ui.separator();
            ui.checkbox(&mut self.gui.mode.is_player_only, "Player only");
            ui.checkbox(&mut self.session.show_branding, "Branding");
            if ui.button("Auto save").clicked() {
                self.gui.project_state.loading_state = LoadingState::AutoUpdating;
                self.save_started_at = Some(ui.input(|i| i.time));
            }
        });
        ui.separator();
        ui.monospace(format!(
            "store project id: {:?} | loading: {:?} | stage: {}",
            self.gui.project_state.project_id,
            self.gui.project_state.loading_state,
            self.gui.stage_size.stage_size
        ));
    }
}

impl eframe::App for StageShell {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);

        if self.fullscreen_dirty {
            ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(self.gui.mode.is_full_screen));
            self.fullscreen_dirty = false;
        }
        ctx.set_visuals(if self.settings.dark_mode { egui::Visuals::dark() } else { egui::Visuals::light() });

        self.tick_save(now);

        let state = StageViewState::select(&self.gui, self.session.show_branding, self.session.dev_mode);
        let actions = &self.actions;
        let host_project_id = self.host_project_id.clone();

        egui::TopBottomPanel::top("stage_header").show(ctx, |ui| {
            self.header.show(host_project_id.as_ref(), |panel| panel.show(ui, &state, actions));
        });

        if !state.is_full_screen {
            egui::TopBottomPanel::bottom("host_panel").show(ctx, |ui| self.render_host_panel(ui));
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(egui::Color32::from_gray(24)))
            .show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.label(format!("Stage ({})", state.stage_size_mode));
                });
            });

        self.handle_events(ctx, now);

        if self.save_started_at.is_some() || self.alert_shown_at.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.save_settings();
    }
}

fn init_logger(args: &Args, path_config: &PathConfig) {
    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    if let Some(log_path_opt) = &args.log_file {
        let log_path = log_path_opt
            .clone()
            .unwrap_or_else(|| config::data_file(config::LOG_FILE, path_config));

        match std::fs::File::create(&log_path) {
            Ok(file) => {
                env_logger::Builder::new()
                    .filter_level(log_level)
                    .filter_module("egui", log::LevelFilter::Info)
                    .format_timestamp_millis()
                    .target(env_logger::Target::Pipe(Box::new(file)))
                    .init();
                info!("Logging to file: {} (level: {:?})", log_path.display(), log_level);
                return;
            }
            Err(e) => eprintln!("Failed to create log file {}: {}", log_path.display(), e),
        }
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level.as_str()))
        .filter_module("egui", log::LevelFilter::Info)
        .format_timestamp_millis()
        .init();
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    let path_config = PathConfig::from_env_and_cli(args.config_dir.clone());
    let dirs_result = config::ensure_dirs(&path_config);

    init_logger(&args, &path_config);
    if let Err(e) = dirs_result {
        warn!("{:#}", e);
    }

    info!("Stagebar starting...");
    debug!("Command-line args: {:?}", args);
    info!("Config path: {}", config::config_file(config::SETTINGS_FILE, &path_config).display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 480.0])
            .with_title("Stagebar"),
        ..Default::default()
    };

    eframe::run_native(
        "stagebar",
        options,
        Box::new(move |_cc| Ok(Box::new(StageShell::new(&args, &path_config)))),
    )
}
