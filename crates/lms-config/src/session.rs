//! Session credentials.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Token handed to every backend call. Normally set through
    /// `LMS_SESSION__TOKEN` rather than a checked-in file.
    #[serde(default)]
    pub token: String,
}

impl SessionConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.token.trim().is_empty()
    }
}
