use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pricing locale code as used in the site's URLs, e.g. `us` or `gb`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Region(String);

impl Region {
    pub fn new(code: &str) -> Result<Self> {
        let code = code.trim().to_lowercase();
        if code.is_empty() {
            return Err(GameError::Validation("region code is empty".to_string()));
        }
        if !code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(GameError::Validation(format!(
                "region code {code:?} contains invalid characters"
            )));
        }
        Ok(Self(code))
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl FromStr for Region {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Region::new(s)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
