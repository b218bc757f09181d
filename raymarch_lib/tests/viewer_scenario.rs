//! End-to-end camera + transfer function scenario, no GPU required.

use nalgebra::{point, vector};
use raymarch_lib::{
    camera::{OrbitCamera, ROTATE_SPEED},
    transfer::Channel,
    volumetric, TransferFunction,
};

#[test]
fn interactive_session_scenario() {
    // viewport 800x600, fov 60, near 0.1, far 10
    let mut camera = OrbitCamera::new();
    camera.set_viewport(0.0, 0.0, 800.0, 600.0);
    camera.set_projection(60.0, 0.1, 10.0);

    let proj = camera.projection_matrix();
    let aspect = proj[(1, 1)] / proj[(0, 0)];
    assert!((aspect - 800.0 / 600.0).abs() < 1e-5);

    // drag from (100,100) to (110,90): yaw follows +10 px,
    // pitch follows the 10 px of upwards motion
    camera.start_rotating(100.0, 100.0);
    camera.rotate_x(90.0);
    camera.rotate_y(110.0);
    camera.stop_rotating(110.0, 90.0);

    assert!((camera.yaw() - 10.0 * ROTATE_SPEED).abs() < 1e-6);
    assert!((camera.pitch() - 10.0 * ROTATE_SPEED).abs() < 1e-6);

    // crossed slider edit resolves to min == max, never min > max
    let mut tf = TransferFunction::new();
    tf.set_min(Channel::R, 80);
    tf.set_max(Channel::R, 30);
    assert_eq!(tf.min(Channel::R), 0.3);
    assert_eq!(tf.max(Channel::R), 0.3);

    // a 64^3 volume fits the proxy cube exactly
    let volume = volumetric::solid_vol(vector![64, 64, 64], 128);
    camera.update_model(&volume.bound_box());

    let model = camera.model_matrix();
    assert_eq!(
        model.transform_point(&point![-0.5, -0.5, -0.5]),
        point![-0.5, -0.5, -0.5]
    );
    assert_eq!(
        model.transform_point(&point![0.5, 0.5, 0.5]),
        point![0.5, 0.5, 0.5]
    );

    // pathological zoom input still leaves a usable projection
    camera.start_zooming(0.0, 0.0);
    camera.safe_zoom(f32::MIN);
    camera.stop_zooming(0.0, 0.0);
    assert!(camera.distance() > 0.0);
    assert!(camera.view_matrix().iter().all(|v| v.is_finite()));
}
