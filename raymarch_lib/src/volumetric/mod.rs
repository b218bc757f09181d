pub mod parse;
mod texture;
mod volume;

pub use parse::from_file;
pub use texture::VolumeTexture;
pub use volume::VolumeData;

use nalgebra::{vector, Vector3};

/// Number of texel bytes per voxel after staging (RGBA8).
pub const TEXEL_BYTES: u32 = 4;

/// Single-channel volume filled with one sample value.
///
/// For tests, mostly.
pub fn solid_vol(dims: Vector3<u32>, sample: u8) -> VolumeData {
    let count = (dims.x * dims.y * dims.z) as usize;
    VolumeData::new(dims, vector![1.0, 1.0, 1.0], 1, vec![sample; count])
        .expect("solid volume is always well formed")
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn solid_volume_shape() {
        let vol = solid_vol(vector![4, 2, 3], 17);

        assert_eq!(vol.size(), vector![4, 2, 3]);
        assert_eq!(vol.channels(), 1);
        assert_eq!(vol.sample_at(3, 1, 2, 0), Some(17));
        assert_eq!(vol.sample_at(4, 1, 2, 0), None);
    }
}
