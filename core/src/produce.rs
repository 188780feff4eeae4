//! The produce catalog.
//!
//! RULE: the catalog is closed. Adding a kind means appending a variant and
//! its constants here. Changing the nutrition of an existing kind changes
//! the meaning of every save file that holds it.

use crate::nutrition::Nutrition;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Produce {
    Rice,
    Beans,
    Vegetables,
}

impl Produce {
    /// Every kind, in catalog order. The first entry is the load fallback.
    pub const ALL: [Produce; 3] = [Produce::Rice, Produce::Beans, Produce::Vegetables];

    /// Stable string key used in snapshots and commands.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Rice       => "rice",
            Self::Beans      => "beans",
            Self::Vegetables => "vegetables",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Rice       => "Rice",
            Self::Beans      => "Beans",
            Self::Vegetables => "Vegetables",
        }
    }

    pub fn nutrition_per_unit(&self) -> Nutrition {
        match self {
            Self::Rice       => Nutrition::new(200, 4, 45, 1),
            Self::Beans      => Nutrition::new(120, 9, 20, 2),
            Self::Vegetables => Nutrition::new(50, 2, 10, 8),
        }
    }

    pub fn days_to_mature(&self) -> u32 {
        match self {
            Self::Rice       => 4,
            Self::Beans      => 3,
            Self::Vegetables => 2,
        }
    }

    /// Strict lookup by id.
    pub fn from_id(id: &str) -> Option<Produce> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }

    /// Lookup that never fails: unknown ids become the first catalog entry.
    pub fn from_id_or_fallback(id: &str) -> Produce {
        match Self::from_id(id) {
            Some(p) => p,
            None => {
                log::warn!("catalog: unknown produce id '{id}', substituting '{}'", Self::fallback().id());
                Self::fallback()
            }
        }
    }

    pub fn fallback() -> Produce {
        Self::ALL[0]
    }
}

impl std::fmt::Display for Produce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
