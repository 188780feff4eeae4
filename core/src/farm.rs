//! Farm upgrade levels and what they buy.

use serde::{Deserialize, Serialize};

/// Highest level either upgrade track can reach.
pub const MAX_UPGRADE_LEVEL: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeTrack {
    /// Each level adds one extra growth day per day.
    Irrigation,
    /// Each level adds one unit per harvest.
    Yield,
}

impl UpgradeTrack {
    pub const ALL: [UpgradeTrack; 2] = [UpgradeTrack::Irrigation, UpgradeTrack::Yield];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Irrigation => "irrigation",
            Self::Yield      => "yield",
        }
    }
}

impl std::fmt::Display for UpgradeTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Farm {
    pub irrigation_level: u8,
    pub yield_level:      u8,
}

impl Farm {
    pub fn level(&self, track: UpgradeTrack) -> u8 {
        match track {
            UpgradeTrack::Irrigation => self.irrigation_level,
            UpgradeTrack::Yield      => self.yield_level,
        }
    }

    pub fn with_level(&self, track: UpgradeTrack, level: u8) -> Farm {
        let mut next = *self;
        match track {
            UpgradeTrack::Irrigation => next.irrigation_level = level,
            UpgradeTrack::Yield      => next.yield_level = level,
        }
        next
    }

    pub fn growth_bonus_days(&self) -> u32 {
        u32::from(self.irrigation_level)
    }

    pub fn yield_per_harvest(&self) -> u32 {
        1 + u32::from(self.yield_level)
    }
}
