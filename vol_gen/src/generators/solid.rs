use nalgebra::Vector3;

use crate::config::{Config, GeneratorConfig};

use super::SampleGenerator;

/// Generate solid volume
/// All interior sample values are the same, with an empty border
pub struct SolidGenerator {
    /// The sample value
    sample: u8,
    pad: u32,
    dims: Vector3<u32>,
}

impl SolidGenerator {
    pub fn from_config(config: &Config) -> SolidGenerator {
        let sample = match config.generator {
            GeneratorConfig::Solid { sample } => sample,
            _ => panic!("Bad generator config"),
        };

        // Border keeps the shape visible against the background
        let pad = config.dims.min() / 8;

        SolidGenerator {
            sample,
            pad,
            dims: config.dims,
        }
    }
}

impl SampleGenerator for SolidGenerator {
    fn sample_at(&self, coords: Vector3<u32>, _channel: u8) -> u8 {
        let pad_end = self.dims.map(|d| d.saturating_sub(self.pad));
        if coords.x < self.pad
            || coords.y < self.pad
            || coords.z < self.pad
            || coords.x >= pad_end.x
            || coords.y >= pad_end.y
            || coords.z >= pad_end.z
        {
            0
        } else {
            self.sample
        }
    }
}

#[cfg(test)]
mod test {

    use nalgebra::vector;

    use super::*;

    fn solid_config(sample: u8) -> Config {
        Config {
            dims: vector![32, 32, 32],
            cell_shape: vector![1.0, 1.0, 1.0],
            channels: 1,
            generator: GeneratorConfig::Solid { sample },
            file_name: "unused.vol".into(),
        }
    }

    #[test]
    fn interior_is_solid_border_is_empty() {
        let gen = SolidGenerator::from_config(&solid_config(128));

        assert_eq!(gen.sample_at(vector![16, 16, 16], 0), 128);
        assert_eq!(gen.sample_at(vector![0, 16, 16], 0), 0);
        assert_eq!(gen.sample_at(vector![16, 31, 16], 0), 0);
    }

    #[test]
    fn channel_does_not_change_the_sample() {
        let gen = SolidGenerator::from_config(&solid_config(7));

        assert_eq!(
            gen.sample_at(vector![16, 16, 16], 0),
            gen.sample_at(vector![16, 16, 16], 2)
        );
    }
}
