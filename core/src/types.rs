//! Shared primitive types used across the entire simulation.

/// An in-game day. The first day of a new game is day 1.
pub type Day = u64;

/// Coins held by the player. Never negative.
pub type Money = u64;

/// A market price per unit of produce. Always at least 1.
pub type Price = u64;

/// A count of produce units.
pub type Quantity = u32;

/// Stable identifier for a play session.
pub type SessionId = String;

/// Number of plot slots on the farm grid.
pub const GRID_SIZE: usize = 12;

/// Number of households the player must feed.
pub const FAMILY_COUNT: usize = 4;
