use nalgebra::{point, Vector3};

use crate::common::BoundBox;

/// CPU-side volume, parsed and ready for texture upload.
///
/// Samples are `u8` intensities in linear order (x fastest), channel
/// interleaved for three-channel volumes.
pub struct VolumeData {
    size: Vector3<u32>,
    scale: Vector3<f32>, // shape of voxels
    channels: u8,
    samples: Vec<u8>,
}

impl VolumeData {
    pub fn new(
        size: Vector3<u32>,
        scale: Vector3<f32>,
        channels: u8,
        samples: Vec<u8>,
    ) -> Result<VolumeData, &'static str> {
        if size.x == 0 || size.y == 0 || size.z == 0 {
            return Err("Volume has zero dimension");
        }
        if channels != 1 && channels != 3 {
            return Err("Unsupported channel count");
        }
        if scale.x <= 0.0 || scale.y <= 0.0 || scale.z <= 0.0 {
            return Err("Voxel shape must be positive");
        }
        let expected = size.x as usize * size.y as usize * size.z as usize * channels as usize;
        if samples.len() != expected {
            return Err("Sample data length does not match header");
        }
        Ok(VolumeData {
            size,
            scale,
            channels,
            samples,
        })
    }

    pub fn size(&self) -> Vector3<u32> {
        self.size
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Bounds in world units, lower corner at the origin.
    pub fn bound_box(&self) -> BoundBox {
        let dims = self.size.map(|v| v as f32).component_mul(&self.scale);
        BoundBox::from_position_dims(point![0.0, 0.0, 0.0], dims)
    }

    /// Sample lookup, `None` outside the volume.
    ///
    /// For building and tests, mostly.
    pub fn sample_at(&self, x: u32, y: u32, z: u32, channel: u8) -> Option<u8> {
        if x >= self.size.x || y >= self.size.y || z >= self.size.z || channel >= self.channels {
            return None;
        }
        let voxel = (z * self.size.y * self.size.x + y * self.size.x + x) as usize;
        let index = voxel * self.channels as usize + channel as usize;
        self.samples.get(index).copied()
    }

    /// Expand samples to RGBA8 texels for 3D texture upload.
    ///
    /// Gray volumes replicate intensity across RGB; alpha is opaque,
    /// visibility is decided by the transfer function in the shader.
    pub fn texels(&self) -> Vec<u8> {
        let voxels = self.samples.len() / self.channels as usize;
        let mut texels = Vec::with_capacity(voxels * 4);
        match self.channels {
            1 => {
                for &s in &self.samples {
                    texels.extend_from_slice(&[s, s, s, u8::MAX]);
                }
            }
            3 => {
                for rgb in self.samples.chunks_exact(3) {
                    texels.extend_from_slice(&[rgb[0], rgb[1], rgb[2], u8::MAX]);
                }
            }
            _ => unreachable!("channel count validated in constructor"),
        }
        texels
    }
}

#[cfg(test)]
mod test {

    use nalgebra::vector;

    use super::*;

    #[test]
    fn rejects_malformed_volumes() {
        let scale = vector![1.0, 1.0, 1.0];

        assert!(VolumeData::new(vector![0, 1, 1], scale, 1, vec![]).is_err());
        assert!(VolumeData::new(vector![1, 1, 1], scale, 2, vec![0, 0]).is_err());
        assert!(VolumeData::new(vector![2, 1, 1], scale, 1, vec![0]).is_err());
        assert!(VolumeData::new(vector![1, 1, 1], vector![0.0, 1.0, 1.0], 1, vec![0]).is_err());
    }

    #[test]
    fn bound_box_scales_with_voxel_shape() {
        let vol = VolumeData::new(
            vector![4, 2, 1],
            vector![1.0, 2.0, 3.0],
            1,
            vec![0; 8],
        )
        .unwrap();

        let bbox = vol.bound_box();
        assert_eq!(bbox.lower, point![0.0, 0.0, 0.0]);
        assert_eq!(bbox.upper, point![4.0, 4.0, 3.0]);
    }

    #[test]
    fn gray_texels_replicate() {
        let vol = VolumeData::new(
            vector![2, 1, 1],
            vector![1.0, 1.0, 1.0],
            1,
            vec![10, 200],
        )
        .unwrap();

        assert_eq!(
            vol.texels(),
            vec![10, 10, 10, 255, 200, 200, 200, 255]
        );
    }

    #[test]
    fn rgb_texels_interleave() {
        let vol = VolumeData::new(
            vector![2, 1, 1],
            vector![1.0, 1.0, 1.0],
            3,
            vec![1, 2, 3, 4, 5, 6],
        )
        .unwrap();

        assert_eq!(vol.texels(), vec![1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn interleaved_sample_lookup() {
        let vol = VolumeData::new(
            vector![2, 1, 1],
            vector![1.0, 1.0, 1.0],
            3,
            vec![1, 2, 3, 4, 5, 6],
        )
        .unwrap();

        assert_eq!(vol.sample_at(0, 0, 0, 2), Some(3));
        assert_eq!(vol.sample_at(1, 0, 0, 0), Some(4));
        assert_eq!(vol.sample_at(1, 0, 0, 3), None);
    }
}
