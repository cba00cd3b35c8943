//! Local fixture backend locations.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_dir() -> PathBuf {
    PathBuf::from("fixtures")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FixturesConfig {
    /// Directory holding one `<quiz-id>.json` file per quiz.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// Where submissions are appended as JSON lines. `None` keeps them in memory.
    #[serde(default)]
    pub submissions_dir: Option<PathBuf>,
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            submissions_dir: None,
        }
    }
}
