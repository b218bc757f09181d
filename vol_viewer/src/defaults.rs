//! # Default values
//!
//! Used as initial values.

use nalgebra::{point, Point3};

// Window
pub const WINDOW_TITLE: &str = "vol_viewer";
pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;

// Projection
pub const FIELD_OF_VIEW: f32 = 60.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 10.0;

// Scene
pub const LIGHT_POS: Point3<f32> = point![-2.0, 3.0, -2.0];

// Shader program, read at startup and on hot-reload
pub const SHADER_PATH: &str = "shaders/raycast.wgsl";
