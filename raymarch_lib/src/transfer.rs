//! Per-channel intensity thresholds gating voxel visibility.
//!
//! Sliders hand in integers in `<0;100>`, stored normalized. Each
//! channel keeps `min <= max`: moving one bound across the other snaps
//! the other bound to match, so the last edit stays authoritative.

/// Color channel of the transfer function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    R = 0,
    G = 1,
    B = 2,
}

pub struct TransferFunction {
    min: [f32; 3],
    max: [f32; 3],
}

/// Slider domain of the UI collaborator.
pub const SLIDER_MAX: u32 = 100;

fn normalize(value: u32) -> f32 {
    u32::min(value, SLIDER_MAX) as f32 / SLIDER_MAX as f32
}

impl TransferFunction {
    /// Default visible band per channel.
    pub fn new() -> TransferFunction {
        TransferFunction {
            min: [0.3; 3],
            max: [0.7; 3],
        }
    }

    pub fn set_min(&mut self, channel: Channel, value: u32) {
        let ch = channel as usize;
        self.min[ch] = normalize(value);
        if self.min[ch] > self.max[ch] {
            self.max[ch] = self.min[ch];
        }
    }

    pub fn set_max(&mut self, channel: Channel, value: u32) {
        let ch = channel as usize;
        self.max[ch] = normalize(value);
        if self.max[ch] < self.min[ch] {
            self.min[ch] = self.max[ch];
        }
    }

    pub fn min(&self, channel: Channel) -> f32 {
        self.min[channel as usize]
    }

    pub fn max(&self, channel: Channel) -> f32 {
        self.max[channel as usize]
    }

    /// The six threshold scalars in uniform order:
    /// `[minT_R, maxT_R, minT_G, maxT_G, minT_B, maxT_B]`.
    pub fn thresholds(&self) -> [f32; 6] {
        [
            self.min[0], self.max[0], self.min[1], self.max[1], self.min[2], self.max[2],
        ]
    }
}

impl Default for TransferFunction {
    fn default() -> Self {
        TransferFunction::new()
    }
}
