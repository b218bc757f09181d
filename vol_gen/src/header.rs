use byteorder::{ByteOrder, LittleEndian};

use raymarch_lib::volumetric::parse::HEADER_LEN;

use crate::config::Config;

/// Emit the `.vol` header understood by `raymarch_lib`.
///
/// Little-endian, 25B: resolution (3x u32), channel count (u8),
/// cell shape (3x f32).
pub fn generate_header(cfg: &Config) -> Vec<u8> {
    let mut vec = vec![0; HEADER_LEN];
    let slice = &mut vec[..];

    LittleEndian::write_u32(&mut slice[0..4], cfg.dims.x);
    LittleEndian::write_u32(&mut slice[4..8], cfg.dims.y);
    LittleEndian::write_u32(&mut slice[8..12], cfg.dims.z);
    slice[12] = cfg.channels;
    LittleEndian::write_f32(&mut slice[13..17], cfg.cell_shape.x);
    LittleEndian::write_f32(&mut slice[17..21], cfg.cell_shape.y);
    LittleEndian::write_f32(&mut slice[21..25], cfg.cell_shape.z);

    vec
}

#[cfg(test)]
mod test {

    use nalgebra::vector;
    use raymarch_lib::volumetric::parse::parse_volume;

    use crate::config::GeneratorConfig;

    use super::*;

    #[test]
    fn header_round_trips_through_the_viewer_parser() {
        let cfg = Config {
            dims: vector![2, 2, 1],
            cell_shape: vector![1.0, 1.0, 2.0],
            channels: 1,
            generator: GeneratorConfig::Solid { sample: 9 },
            file_name: "test.vol".into(),
        };

        let mut bytes = generate_header(&cfg);
        bytes.extend_from_slice(&[9, 9, 9, 9]);

        let vol = parse_volume(&bytes).expect("generated header must parse");
        assert_eq!(vol.size(), vector![2, 2, 1]);
        assert_eq!(vol.channels(), 1);
        assert_eq!(vol.sample_at(0, 1, 0, 0), Some(9));
    }
}
