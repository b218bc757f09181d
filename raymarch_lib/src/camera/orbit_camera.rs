use nalgebra::{vector, Matrix4, Perspective3, Rotation3, Translation3, Vector2, Vector3};

use crate::common::{BoundBox, Viewport};

use super::{KEY_ROTATE_STEP, KEY_ZOOM_STEP, MIN_DISTANCE, ROTATE_SPEED, ZOOM_SPEED};

/// Which pointer gesture currently receives continuous deltas.
///
/// Motion handlers are called on every pointer move; the state only
/// gates which of them has an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Rotating,
    Zooming,
}

/// Orbit camera around the volume center.
///
/// Owns the viewport rectangle, the perspective parameters and the
/// model transform fitted to the loaded volume. All three matrices are
/// derived deterministically from the stored state.
pub struct OrbitCamera {
    viewport: Viewport,
    fov_y: f32, // degrees
    z_near: f32,
    z_far: f32,
    pitch: f32,
    yaw: f32,
    distance: f32,
    state: DragState,
    reference: Vector2<f32>, // last pointer position of the active gesture
    model: Matrix4<f32>,
}

const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

impl OrbitCamera {
    pub fn new() -> OrbitCamera {
        OrbitCamera {
            viewport: Viewport::default(),
            fov_y: 60.0,
            z_near: 0.1,
            z_far: 10.0,
            pitch: 0.0,
            yaw: 0.0,
            distance: 2.0,
            state: DragState::Idle,
            reference: vector![0.0, 0.0],
            model: Matrix4::identity(),
        }
    }

    /// Record the viewport rectangle. Degenerate sizes are coerced so
    /// the aspect ratio stays defined.
    pub fn set_viewport(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.viewport = Viewport::new(x, y, width, height);
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_projection(&mut self, fov_degrees: f32, z_near: f32, z_far: f32) {
        self.fov_y = fov_degrees;
        self.z_near = z_near;
        self.z_far = z_far;
    }

    /// Fit the model transform so the unit proxy cube exactly encloses
    /// `bounds`, normalized so the longest side is 1.
    pub fn update_model(&mut self, bounds: &BoundBox) {
        let dims = bounds.dims();
        let longest = bounds.longest_side();
        if longest <= 0.0 {
            self.model = Matrix4::identity();
            return;
        }
        self.model = Matrix4::new_nonuniform_scaling(&(dims / longest));
    }

    pub fn start_rotating(&mut self, x: f32, y: f32) {
        self.state = DragState::Rotating;
        self.reference = vector![x, y];
    }

    pub fn stop_rotating(&mut self, x: f32, y: f32) {
        if self.state == DragState::Rotating {
            self.state = DragState::Idle;
            self.reference = vector![x, y];
        }
    }

    pub fn start_zooming(&mut self, x: f32, y: f32) {
        self.state = DragState::Zooming;
        self.reference = vector![x, y];
    }

    pub fn stop_zooming(&mut self, x: f32, y: f32) {
        if self.state == DragState::Zooming {
            self.state = DragState::Idle;
            self.reference = vector![x, y];
        }
    }

    /// Apply a pitch delta from vertical pointer motion.
    ///
    /// No-op unless rotating; spurious motion events while idle must
    /// never disturb the orientation.
    pub fn rotate_x(&mut self, y: f32) {
        if self.state != DragState::Rotating {
            return;
        }
        let delta = y - self.reference.y;
        self.reference.y = y;
        self.pitch = (self.pitch - delta * ROTATE_SPEED).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Apply a yaw delta from horizontal pointer motion.
    pub fn rotate_y(&mut self, x: f32) {
        if self.state != DragState::Rotating {
            return;
        }
        let delta = x - self.reference.x;
        self.reference.x = x;
        self.yaw = (self.yaw + delta * ROTATE_SPEED).rem_euclid(std::f32::consts::TAU);
    }

    /// Dolly from vertical pointer motion, clamped to a strictly
    /// positive floor.
    pub fn safe_zoom(&mut self, y: f32) {
        if self.state != DragState::Zooming {
            return;
        }
        let delta = y - self.reference.y;
        self.reference.y = y;
        self.distance = f32::max(self.distance + delta * ZOOM_SPEED, MIN_DISTANCE);
    }

    /// Discrete keyboard dolly step, `direction` in {-1, +1}.
    pub fn zoom(&mut self, direction: i32) {
        let step = direction.signum() as f32 * KEY_ZOOM_STEP;
        self.distance = f32::max(self.distance + step, MIN_DISTANCE);
    }

    /// Discrete keyboard orbit step, `direction` in {-1, +1}.
    pub fn rotate(&mut self, direction: i32) {
        let step = direction.signum() as f32 * KEY_ROTATE_STEP;
        self.yaw = (self.yaw + step).rem_euclid(std::f32::consts::TAU);
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Perspective matrix, always reflecting the latest viewport
    /// aspect ratio.
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let aspect = self.viewport.aspect_ratio();
        Perspective3::new(aspect, self.fov_y.to_radians(), self.z_near, self.z_far)
            .to_homogeneous()
    }

    /// View matrix: dolly back, then pitch, then yaw. Rigid for any
    /// accumulated angles.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        let dolly = Translation3::new(0.0, 0.0, -self.distance).to_homogeneous();
        let pitch = Rotation3::from_axis_angle(&Vector3::x_axis(), self.pitch).to_homogeneous();
        let yaw = Rotation3::from_axis_angle(&Vector3::y_axis(), self.yaw).to_homogeneous();
        dolly * pitch * yaw
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        self.model
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        OrbitCamera::new()
    }
}

#[cfg(test)]
mod test {

    use nalgebra::{point, Matrix3};

    use super::*;

    fn rotation_part(m: &Matrix4<f32>) -> Matrix3<f32> {
        m.fixed_slice::<3, 3>(0, 0).into_owned()
    }

    #[test]
    fn projection_reflects_aspect() {
        let mut cam = OrbitCamera::new();
        cam.set_viewport(0.0, 0.0, 800.0, 600.0);
        cam.set_projection(60.0, 0.1, 10.0);

        let proj = cam.projection_matrix();

        // m11 = f / aspect, m22 = f
        let aspect = proj[(1, 1)] / proj[(0, 0)];
        assert!((aspect - 800.0 / 600.0).abs() < 1e-5);
    }

    #[test]
    fn zero_viewport_does_not_divide_by_zero() {
        let mut cam = OrbitCamera::new();
        cam.set_viewport(0.0, 0.0, 0.0, 0.0);

        let proj = cam.projection_matrix();

        assert!(proj.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn rotation_deltas_are_incremental() {
        let mut cam = OrbitCamera::new();
        cam.start_rotating(100.0, 100.0);
        cam.rotate_x(90.0);
        cam.rotate_y(110.0);

        // yaw grows with +10 px of horizontal motion,
        // pitch grows with -10 px of vertical motion
        assert!((cam.yaw() - 10.0 * ROTATE_SPEED).abs() < 1e-6);
        assert!((cam.pitch() - 10.0 * ROTATE_SPEED).abs() < 1e-6);

        // reference advanced: repeating the same position is a no-op
        cam.rotate_x(90.0);
        cam.rotate_y(110.0);
        assert!((cam.yaw() - 10.0 * ROTATE_SPEED).abs() < 1e-6);
        assert!((cam.pitch() - 10.0 * ROTATE_SPEED).abs() < 1e-6);
    }

    #[test]
    fn motion_while_idle_is_a_no_op() {
        let mut cam = OrbitCamera::new();
        let dist = cam.distance();

        cam.rotate_x(250.0);
        cam.rotate_y(-4000.0);
        cam.safe_zoom(1e6);

        assert_eq!(cam.pitch(), 0.0);
        assert_eq!(cam.yaw(), 0.0);
        assert_eq!(cam.distance(), dist);
        assert_eq!(cam.state(), DragState::Idle);
    }

    #[test]
    fn zoom_stays_strictly_positive() {
        let mut cam = OrbitCamera::new();

        cam.start_zooming(0.0, 0.0);
        cam.safe_zoom(-1e9);
        assert!(cam.distance() > 0.0);

        cam.safe_zoom(-1e9);
        for _ in 0..1000 {
            cam.zoom(-1);
        }
        assert!(cam.distance() > 0.0);
    }

    #[test]
    fn gesture_transitions() {
        let mut cam = OrbitCamera::new();
        assert_eq!(cam.state(), DragState::Idle);

        cam.start_rotating(1.0, 1.0);
        assert_eq!(cam.state(), DragState::Rotating);

        // zoom gesture may take over a rotation
        cam.start_zooming(1.0, 1.0);
        assert_eq!(cam.state(), DragState::Zooming);

        // releasing the rotate button while zooming changes nothing
        cam.stop_rotating(1.0, 1.0);
        assert_eq!(cam.state(), DragState::Zooming);

        cam.stop_zooming(1.0, 1.0);
        assert_eq!(cam.state(), DragState::Idle);
    }

    #[test]
    fn view_is_rigid_for_any_orbit() {
        let mut cam = OrbitCamera::new();
        cam.start_rotating(0.0, 0.0);
        cam.rotate_x(12345.0);
        cam.rotate_y(-9876.0);

        let rot = rotation_part(&cam.view_matrix());
        let identity = rot * rot.transpose();

        for (a, b) in identity.iter().zip(Matrix3::<f32>::identity().iter()) {
            assert!((a - b).abs() < 1e-5);
        }
    }

    #[test]
    fn model_encloses_volume_bounds() {
        let mut cam = OrbitCamera::new();
        let bounds =
            BoundBox::from_position_dims(point![0.0, 0.0, 0.0], vector![64.0, 64.0, 64.0]);
        cam.update_model(&bounds);

        let model = cam.model_matrix();
        // a cubic volume keeps the proxy a unit cube
        let corner = model.transform_point(&point![0.5, 0.5, 0.5]);
        assert_eq!(corner, point![0.5, 0.5, 0.5]);

        // non-cubic volume scales each side proportionally
        let bounds =
            BoundBox::from_position_dims(point![0.0, 0.0, 0.0], vector![32.0, 64.0, 16.0]);
        cam.update_model(&bounds);
        let corner = cam.model_matrix().transform_point(&point![0.5, 0.5, 0.5]);
        assert_eq!(corner, point![0.25, 0.5, 0.125]);
    }
}
