//! Meridian engine crate.
//!
//! Owns the platform + GPU runtime pieces the viewer builds on: the wgpu
//! device/surface layer, the winit window runtime, platform-agnostic input,
//! frame timing, logging, and the 2D overlay renderers.

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod overlay;
pub mod paint;
pub mod render;
pub mod text;
