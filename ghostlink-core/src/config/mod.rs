//! Configuration
//!
//! Plain configuration structures. Nothing here is persisted by the
//! remote control itself; applications load them from wherever they like.

pub mod types;

pub use types::*;
