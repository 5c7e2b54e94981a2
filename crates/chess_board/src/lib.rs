//! Board state adapter for chess search engines.
//!
//! Move generation and rule legality come from the external cozy-chess
//! crate; this crate wraps it behind the [`Position`] trait so engines
//! stay independent of any particular rules implementation.

pub mod adapter;
pub mod cozy;
pub mod types;

pub use adapter::Position;
pub use cozy::CozyPosition;
pub use types::{Color, PieceCounts, PieceKind};
