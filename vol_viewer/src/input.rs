use anyhow::{Context, Result};
use nalgebra::{vector, Point3, Vector2};
use native_dialog::FileDialog;
use winit::{
    event::{ElementState, MouseButton},
    keyboard::KeyCode,
};

use raymarch_lib::transfer::{Channel, TransferFunction, SLIDER_MAX};

use crate::{gpu::GpuContext, session::Session};

/// Slider units per threshold key press.
const THRESHOLD_STEP: i64 = 5;
/// World units per light key press.
const LIGHT_STEP: f32 = 0.25;

/// Translates pointer and keyboard events into camera and session
/// calls.
///
/// Button presses only gate which gesture is active; motion deltas are
/// fed unconditionally and the camera ignores the ones that do not
/// apply. Threshold keys act on the currently selected channel.
pub struct InputController {
    cursor: Option<Vector2<f32>>,
    channel: Channel,
}

impl InputController {
    pub fn new() -> InputController {
        InputController {
            cursor: None,
            channel: Channel::R,
        }
    }

    pub fn handle_cursor_moved(&mut self, session: &mut Session, x: f32, y: f32) {
        self.cursor = Some(vector![x, y]);

        session.camera.rotate_x(y);
        session.camera.rotate_y(x);
        session.camera.safe_zoom(y);
        session.request_redraw();
    }

    pub fn handle_mouse_button(
        &mut self,
        session: &mut Session,
        button: MouseButton,
        state: ElementState,
    ) {
        let pos = match self.cursor {
            Some(p) => p,
            None => return,
        };

        match (button, state) {
            (MouseButton::Left, ElementState::Pressed) => {
                session.camera.start_rotating(pos.x, pos.y)
            }
            (MouseButton::Left, ElementState::Released) => {
                session.camera.stop_rotating(pos.x, pos.y)
            }
            (MouseButton::Right, ElementState::Pressed) => {
                session.camera.start_zooming(pos.x, pos.y)
            }
            (MouseButton::Right, ElementState::Released) => {
                session.camera.stop_zooming(pos.x, pos.y)
            }
            _ => (),
        }
        session.request_redraw();
    }

    /// Discrete key bindings. A failed shader reload is fatal and
    /// propagates; a failed volume load is reported and swallowed.
    pub fn handle_key_press(
        &mut self,
        session: &mut Session,
        gpu: &GpuContext,
        key: KeyCode,
    ) -> Result<()> {
        if apply_scene_key(
            key,
            &mut self.channel,
            &mut session.transfer,
            &mut session.light_pos,
        ) {
            session.request_redraw();
            return Ok(());
        }

        match key {
            KeyCode::ArrowUp | KeyCode::KeyW => session.camera.zoom(-1),
            KeyCode::ArrowDown | KeyCode::KeyS => session.camera.zoom(1),
            KeyCode::ArrowLeft | KeyCode::KeyA => session.camera.rotate(-1),
            KeyCode::ArrowRight | KeyCode::KeyD => session.camera.rotate(1),
            KeyCode::KeyR => {
                session
                    .reload_shaders(gpu)
                    .context("shader hot-reload failed")?;
            }
            KeyCode::KeyO => self.pick_volume(session, gpu),
            _ => return Ok(()),
        }
        session.request_redraw();
        Ok(())
    }

    fn pick_volume(&mut self, session: &mut Session, gpu: &GpuContext) {
        let picked = FileDialog::new()
            .set_location(".")
            .add_filter("Volume", &["vol"])
            .show_open_single_file();

        let path = match picked {
            Ok(Some(path)) => path,
            Ok(None) => return,
            Err(e) => {
                log::error!("file dialog failed: {e}");
                return;
            }
        };

        if let Err(msg) = session.load_volume(gpu, &path) {
            log::error!("cannot load volume {}: {msg}", path.display());
        }
    }
}

impl Default for InputController {
    fn default() -> Self {
        InputController::new()
    }
}

/// Threshold and light bindings: `1`/`2`/`3` select the channel,
/// `,`/`.` move its min threshold, `[`/`]` its max; `J`/`L`, `K`/`I`
/// and `M`/`U` nudge the light along x, y and z.
///
/// Returns whether the key was consumed.
fn apply_scene_key(
    key: KeyCode,
    channel: &mut Channel,
    transfer: &mut TransferFunction,
    light: &mut Point3<f32>,
) -> bool {
    match key {
        KeyCode::Digit1 => *channel = Channel::R,
        KeyCode::Digit2 => *channel = Channel::G,
        KeyCode::Digit3 => *channel = Channel::B,
        KeyCode::Comma => adjust_min(transfer, *channel, -THRESHOLD_STEP),
        KeyCode::Period => adjust_min(transfer, *channel, THRESHOLD_STEP),
        KeyCode::BracketLeft => adjust_max(transfer, *channel, -THRESHOLD_STEP),
        KeyCode::BracketRight => adjust_max(transfer, *channel, THRESHOLD_STEP),
        KeyCode::KeyJ => light.x -= LIGHT_STEP,
        KeyCode::KeyL => light.x += LIGHT_STEP,
        KeyCode::KeyK => light.y -= LIGHT_STEP,
        KeyCode::KeyI => light.y += LIGHT_STEP,
        KeyCode::KeyM => light.z -= LIGHT_STEP,
        KeyCode::KeyU => light.z += LIGHT_STEP,
        _ => return false,
    }
    true
}

fn adjust_min(transfer: &mut TransferFunction, channel: Channel, delta: i64) {
    let current = (transfer.min(channel) * SLIDER_MAX as f32).round() as i64;
    transfer.set_min(channel, (current + delta).clamp(0, SLIDER_MAX as i64) as u32);
}

fn adjust_max(transfer: &mut TransferFunction, channel: Channel, delta: i64) {
    let current = (transfer.max(channel) * SLIDER_MAX as f32).round() as i64;
    transfer.set_max(channel, (current + delta).clamp(0, SLIDER_MAX as i64) as u32);
}

#[cfg(test)]
mod test {

    use nalgebra::point;

    use super::*;

    fn scene() -> (Channel, TransferFunction, Point3<f32>) {
        (Channel::R, TransferFunction::new(), point![0.0, 0.0, 0.0])
    }

    #[test]
    fn threshold_keys_drive_the_selected_channel() {
        let (mut channel, mut tf, mut light) = scene();

        assert!(apply_scene_key(
            KeyCode::Digit2,
            &mut channel,
            &mut tf,
            &mut light
        ));
        assert!(apply_scene_key(
            KeyCode::Period,
            &mut channel,
            &mut tf,
            &mut light
        ));
        assert!(apply_scene_key(
            KeyCode::BracketLeft,
            &mut channel,
            &mut tf,
            &mut light
        ));

        assert_eq!(tf.min(Channel::G), 0.35);
        assert_eq!(tf.max(Channel::G), 0.65);

        // the other channels stay untouched
        assert_eq!(tf.min(Channel::R), 0.3);
        assert_eq!(tf.max(Channel::B), 0.7);
    }

    #[test]
    fn thresholds_stay_in_domain_and_ordered() {
        let (mut channel, mut tf, mut light) = scene();

        // hold the raise-min key far past the top of the domain
        for _ in 0..40 {
            apply_scene_key(KeyCode::Period, &mut channel, &mut tf, &mut light);
        }
        assert_eq!(tf.min(Channel::R), 1.0);
        assert_eq!(tf.max(Channel::R), 1.0);

        // then drag max all the way down
        for _ in 0..40 {
            apply_scene_key(KeyCode::BracketLeft, &mut channel, &mut tf, &mut light);
        }
        assert_eq!(tf.max(Channel::R), 0.0);
        assert!(tf.min(Channel::R) <= tf.max(Channel::R));
    }

    #[test]
    fn light_keys_nudge_each_axis() {
        let (mut channel, mut tf, mut light) = scene();

        apply_scene_key(KeyCode::KeyL, &mut channel, &mut tf, &mut light);
        apply_scene_key(KeyCode::KeyL, &mut channel, &mut tf, &mut light);
        apply_scene_key(KeyCode::KeyK, &mut channel, &mut tf, &mut light);
        apply_scene_key(KeyCode::KeyU, &mut channel, &mut tf, &mut light);

        assert_eq!(light, point![2.0 * LIGHT_STEP, -LIGHT_STEP, LIGHT_STEP]);
    }

    #[test]
    fn unrelated_keys_are_not_consumed() {
        let (mut channel, mut tf, mut light) = scene();

        assert!(!apply_scene_key(
            KeyCode::KeyW,
            &mut channel,
            &mut tf,
            &mut light
        ));
        assert_eq!(light, point![0.0, 0.0, 0.0]);
        assert_eq!(tf.thresholds(), TransferFunction::new().thresholds());
    }
}
