mod orbit_camera;

pub use orbit_camera::{DragState, OrbitCamera};

/// Radians of orbit per pixel of pointer drag.
pub const ROTATE_SPEED: f32 = 0.01;
/// Distance units per pixel of pointer drag.
pub const ZOOM_SPEED: f32 = 0.01;
/// Radians per discrete key press.
pub const KEY_ROTATE_STEP: f32 = 0.1;
/// Distance units per discrete key press.
pub const KEY_ZOOM_STEP: f32 = 0.1;
/// Dolly distance never goes below this, so the camera cannot cross
/// the near plane or invert the projection.
pub const MIN_DISTANCE: f32 = 0.5;
