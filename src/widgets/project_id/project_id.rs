use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque project identifier handed in by the embedding host.
///
/// Only equality matters. Numbers and strings never compare equal,
/// so `Number(7)` and `Text("7")` are different ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectId {
    Number(i64),
    Text(String),
}

impl From<i64> for ProjectId {
    fn from(value: i64) -> Self {
        ProjectId::Number(value)
    }
}

impl From<&str> for ProjectId {
    fn from(value: &str) -> Self {
        ProjectId::Text(value.to_string())
    }
}

impl From<String> for ProjectId {
    fn from(value: String) -> Self {
        ProjectId::Text(value)
    }
}

impl FromStr for ProjectId {
    type Err = std::convert::Infallible;

    /// Canonical integers parse as a number, anything else stays text.
    /// "007" and "+7" are not canonical, so they keep their exact spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<i64>() {
            Ok(n) if n.to_string() == s => Ok(ProjectId::Number(n)),
            _ => Ok(ProjectId::Text(s.to_string())),
        }
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectId::Number(n) => write!(f, "{}", n),
            ProjectId::Text(s) => f.write_str(s),
        }
    }
}
