use nalgebra::{vector, Vector3};

use crate::config::{Config, GeneratorConfig};

use super::SampleGenerator;

/// One sphere in the volume, with a sample value per channel
struct SphereInfo {
    center: Vector3<f32>,
    radius: f32,
    samples: [u8; 3],
}

impl SphereInfo {
    fn contains(&self, coords: Vector3<f32>) -> bool {
        (coords - self.center).magnitude() <= self.radius
    }
}

/// Generate volume with a number of randomly placed spheres
pub struct SpheresGenerator {
    spheres: Vec<SphereInfo>,
}

impl SpheresGenerator {
    pub fn from_config(config: &Config) -> SpheresGenerator {
        let (count, radius) = match config.generator {
            GeneratorConfig::Spheres { count, radius } => (count, radius),
            _ => panic!("Bad generator config"),
        };

        let rng = fastrand::Rng::new();
        let dims = config.dims.cast::<f32>();
        let radius = radius as f32;

        let spheres = (0..count)
            .map(|_| {
                let center = vector![
                    rng.f32() * dims.x,
                    rng.f32() * dims.y,
                    rng.f32() * dims.z
                ];
                // Half to double the requested radius
                let radius = radius * (0.5 + 1.5 * rng.f32());
                let samples = match config.channels {
                    1 => {
                        let s = rng.u8(64..=u8::MAX);
                        [s, s, s]
                    }
                    _ => [
                        rng.u8(64..=u8::MAX),
                        rng.u8(64..=u8::MAX),
                        rng.u8(64..=u8::MAX),
                    ],
                };
                SphereInfo {
                    center,
                    radius,
                    samples,
                }
            })
            .collect();

        SpheresGenerator { spheres }
    }
}

impl SampleGenerator for SpheresGenerator {
    fn sample_at(&self, coords: Vector3<u32>, channel: u8) -> u8 {
        let coords = coords.cast::<f32>();
        for sphere in &self.spheres {
            if sphere.contains(coords) {
                return sphere.samples[channel as usize];
            }
        }
        0
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn sphere_samples_by_channel() {
        let gen = SpheresGenerator {
            spheres: vec![SphereInfo {
                center: vector![8.0, 8.0, 8.0],
                radius: 3.0,
                samples: [10, 20, 30],
            }],
        };

        assert_eq!(gen.sample_at(vector![8, 8, 8], 0), 10);
        assert_eq!(gen.sample_at(vector![8, 9, 8], 2), 30);
        assert_eq!(gen.sample_at(vector![0, 0, 0], 1), 0);
    }

    #[test]
    fn generates_requested_count() {
        let config = Config {
            dims: vector![16, 16, 16],
            cell_shape: vector![1.0, 1.0, 1.0],
            channels: 3,
            generator: GeneratorConfig::Spheres {
                count: 5,
                radius: 2,
            },
            file_name: "unused.vol".into(),
        };

        let gen = SpheresGenerator::from_config(&config);
        assert_eq!(gen.spheres.len(), 5);
    }
}
