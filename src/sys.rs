//! Geometry and the interfaces to the host desktop.

pub mod desktop;
pub mod geometry;
