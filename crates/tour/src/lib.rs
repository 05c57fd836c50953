//! Tour stops and the navigator that walks them.
//!
//! A [`TourConfig`] is the immutable, ordered list of stops shared by a
//! viewer session. A [`Navigator`] holds the only mutable piece, the current
//! stop index, and rejects out-of-range transitions silently.

pub mod controls;
pub mod navigator;
pub mod stop;

pub use controls::*;
pub use navigator::*;
pub use stop::*;
