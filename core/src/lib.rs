//! Homestead simulation kernel.
//!
//! A turn-based farm economy: grow crops on a twelve-tile grid, feed four
//! households, sell produce into a drifting market, and buy farm upgrades,
//! one day at a time. Everything below `session` is a pure function from
//! old values to new ones; the session owns the single replaceable
//! (GameState, Market) pair.

pub mod actions;
pub mod command;
pub mod config;
pub mod crop;
pub mod engine;
pub mod error;
pub mod event;
pub mod family;
pub mod farm;
pub mod market;
pub mod nutrition;
pub mod produce;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod storage;
pub mod store;
pub mod types;
pub mod upgrade;
