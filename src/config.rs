//! Chart configuration.

use serde::{Deserialize, Serialize};

use crate::model::Branch;
use crate::{Error, Result};

/// Knobs for building a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// First hour branch counted as daytime.
    /// Default: 卯.
    pub daytime_start: Branch,

    /// Last hour branch counted as daytime, inclusive.
    /// Default: 申.
    pub daytime_end: Branch,

    /// Use this Moon General instead of the lunar month's.
    pub moon_general: Option<Branch>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            daytime_start: Branch::Mao,
            daytime_end: Branch::Shen,
            moon_general: None,
        }
    }
}

impl ChartConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<()> {
        if self.daytime_start > self.daytime_end {
            return Err(Error::Config(format!(
                "daytime window must not wrap past 子, got {}..={}",
                self.daytime_start, self.daytime_end
            )));
        }
        if self.daytime_start == Branch::Zi && self.daytime_end == Branch::Hai {
            return Err(Error::Config("daytime window covers every hour".to_string()));
        }
        Ok(())
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("JSON parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Whether an hour branch falls in the daytime window.
    pub fn is_daytime(&self, hour: Branch) -> bool {
        (self.daytime_start..=self.daytime_end).contains(&hour)
    }
}
