//! Four-component nutrition vector.
//!
//! Components are unsigned, so the "never negative" invariant is carried by
//! the type. Subtraction saturates at zero per component.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nutrition {
    pub cal: u32,
    pub protein: u32,
    pub carbs: u32,
    pub vitamins: u32,
}

impl Nutrition {
    pub const ZERO: Nutrition = Nutrition::new(0, 0, 0, 0);

    pub const fn new(cal: u32, protein: u32, carbs: u32, vitamins: u32) -> Self {
        Self { cal, protein, carbs, vitamins }
    }

    /// True when every component meets or exceeds the matching one in `need`.
    pub fn covers(&self, need: &Nutrition) -> bool {
        self.cal >= need.cal
            && self.protein >= need.protein
            && self.carbs >= need.carbs
            && self.vitamins >= need.vitamins
    }

    /// Componentwise shortfall against `need`, zero where covered.
    pub fn shortfall(&self, need: &Nutrition) -> Nutrition {
        *need - *self
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl Add for Nutrition {
    type Output = Nutrition;

    fn add(self, rhs: Nutrition) -> Nutrition {
        Nutrition {
            cal:      self.cal.saturating_add(rhs.cal),
            protein:  self.protein.saturating_add(rhs.protein),
            carbs:    self.carbs.saturating_add(rhs.carbs),
            vitamins: self.vitamins.saturating_add(rhs.vitamins),
        }
    }
}

impl Sub for Nutrition {
    type Output = Nutrition;

    fn sub(self, rhs: Nutrition) -> Nutrition {
        Nutrition {
            cal:      self.cal.saturating_sub(rhs.cal),
            protein:  self.protein.saturating_sub(rhs.protein),
            carbs:    self.carbs.saturating_sub(rhs.carbs),
            vitamins: self.vitamins.saturating_sub(rhs.vitamins),
        }
    }
}

impl Mul<u32> for Nutrition {
    type Output = Nutrition;

    fn mul(self, factor: u32) -> Nutrition {
        Nutrition {
            cal:      self.cal.saturating_mul(factor),
            protein:  self.protein.saturating_mul(factor),
            carbs:    self.carbs.saturating_mul(factor),
            vitamins: self.vitamins.saturating_mul(factor),
        }
    }
}

impl std::iter::Sum for Nutrition {
    fn sum<I: Iterator<Item = Nutrition>>(iter: I) -> Self {
        iter.fold(Nutrition::ZERO, |acc, n| acc + n)
    }
}

impl std::fmt::Display for Nutrition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} cal / {} protein / {} carbs / {} vitamins",
            self.cal, self.protein, self.carbs, self.vitamins
        )
    }
}
