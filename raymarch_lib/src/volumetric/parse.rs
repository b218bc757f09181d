//! Parser for the native `.vol` format.
//!
//! Little endian, 25 byte header:
//! 1. resolution -- 3x 32bit ints (x,y,z)
//! 2. channel count -- 1x 8bit (1 or 3)
//! 3. voxel shape -- 3x 32bit floats
//! 4. data -- x*y*z*channels 8bit samples, linear order (x fastest),
//!    channel interleaved

use std::path::Path;

use nalgebra::{vector, Vector3};
use nom::{
    number::complete::{le_f32, le_u32, le_u8},
    sequence::tuple,
    IResult,
};

use super::VolumeData;

pub const HEADER_LEN: usize = 3 * 4 + 1 + 3 * 4;

struct ExtractedMeta {
    size: Vector3<u32>,
    channels: u8,
    scale: Vector3<f32>,
}

fn header_inner(s: &[u8]) -> IResult<&[u8], ExtractedMeta> {
    let mut header = tuple((
        tuple((le_u32, le_u32, le_u32)),
        le_u8,
        tuple((le_f32, le_f32, le_f32)),
    ));
    let (rest, (size, channels, scale)) = header(s)?;

    let meta = ExtractedMeta {
        size: vector![size.0, size.1, size.2],
        channels,
        scale: vector![scale.0, scale.1, scale.2],
    };
    Ok((rest, meta))
}

/// Parse a whole `.vol` file from memory.
pub fn parse_volume(data: &[u8]) -> Result<VolumeData, &'static str> {
    let (samples, meta) = match header_inner(data) {
        Ok(r) => r,
        Err(_) => return Err("Parse error"),
    };

    VolumeData::new(meta.size, meta.scale, meta.channels, samples.to_vec())
}

/// Read and parse a volume file.
///
/// Any failure leaves no partial state behind; callers keep their
/// previous volume on `Err`.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<VolumeData, &'static str> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err("Path does not lead to a file");
    }

    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(_) => return Err("Cannot read file"),
    };

    parse_volume(&bytes)
}
