use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::DomainError;

/// How often a goal is meant to be achieved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalPeriod {
    #[default]
    Daily,
    Weekly,
    Yearly,
}

impl GoalPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalPeriod::Daily => "daily",
            GoalPeriod::Weekly => "weekly",
            GoalPeriod::Yearly => "yearly",
        }
    }
}

impl fmt::Display for GoalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalPeriod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(GoalPeriod::Daily),
            "weekly" => Ok(GoalPeriod::Weekly),
            "yearly" => Ok(GoalPeriod::Yearly),
            other => Err(DomainError::InvalidInput(format!(
                "Unknown goal period: {other}"
            ))),
        }
    }
}
