//! 360° panorama viewer for the hotel route tour.
//!
//! The viewer owns the camera orientation and the graphics resources for the
//! stop a [`tour::Navigator`] currently points at. Everything platform
//! specific sits behind the traits in [`host`]; [`headless::HeadlessHost`]
//! implements them in memory.

pub mod camera;
pub mod config;
pub mod headless;
pub mod host;
pub mod input;
pub mod mesh;
pub mod orientation;
pub mod texture;
pub mod viewer;

pub use camera::*;
pub use config::*;
pub use host::*;
pub use input::*;
pub use orientation::*;
pub use viewer::*;
