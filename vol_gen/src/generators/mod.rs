use std::{
    error::Error,
    io::{BufWriter, Write},
};

use indicatif::{ProgressBar, ProgressStyle};
use nalgebra::{vector, Vector3};

use crate::{
    config::{Config, GeneratorConfig},
    file::open_create_file,
    header::generate_header,
};

mod solid;
mod spheres;

/// Generates one sample at a time, at any location
pub trait SampleGenerator {
    fn sample_at(&self, coords: Vector3<u32>, channel: u8) -> u8;
}

fn get_sample_generator(config: &Config) -> Box<dyn SampleGenerator> {
    match config.generator {
        GeneratorConfig::Solid { .. } => Box::new(solid::SolidGenerator::from_config(config)),
        GeneratorConfig::Spheres { .. } => {
            Box::new(spheres::SpheresGenerator::from_config(config))
        }
    }
}

/// Samples in linear order, x fastest, channel interleaved.
fn write_samples<W: Write>(
    out: &mut W,
    gen: &dyn SampleGenerator,
    config: &Config,
    progress: &ProgressBar,
) -> Result<(), std::io::Error> {
    let dims = config.dims;
    for z in 0..dims.z {
        for y in 0..dims.y {
            for x in 0..dims.x {
                for channel in 0..config.channels {
                    let sample = gen.sample_at(vector![x, y, z], channel);
                    out.write_all(&[sample])?;
                }
            }
        }
        progress.inc(1);
    }
    Ok(())
}

pub fn generate_vol(config: Config) -> Result<(), Box<dyn Error>> {
    let gen = get_sample_generator(&config);

    let file = open_create_file(&config.file_name)?;
    let mut writer = BufWriter::new(file);

    let header = generate_header(&config);
    writer.write_all(&header)?;

    let progress = ProgressBar::new(config.dims.z as u64);
    progress.set_style(
        ProgressStyle::default_bar().template("{wide_bar} slice {pos}/{len} [{elapsed}]"),
    );

    write_samples(&mut writer, gen.as_ref(), &config, &progress)?;
    writer.flush()?;
    progress.finish();

    println!("Generating finished, result in {:#?}", config.file_name);
    Ok(())
}

#[cfg(test)]
mod test {

    use raymarch_lib::volumetric::parse::parse_volume;

    use super::*;

    #[test]
    fn generated_bytes_parse_in_the_viewer() {
        let config = Config {
            dims: vector![8, 8, 8],
            cell_shape: vector![1.0, 1.0, 1.0],
            channels: 1,
            generator: GeneratorConfig::Solid { sample: 42 },
            file_name: "unused.vol".into(),
        };
        let gen = get_sample_generator(&config);

        let mut bytes = generate_header(&config);
        write_samples(&mut bytes, gen.as_ref(), &config, &ProgressBar::hidden()).unwrap();

        let vol = parse_volume(&bytes).unwrap();
        assert_eq!(vol.size(), vector![8, 8, 8]);
        assert_eq!(vol.sample_at(4, 4, 4, 0), Some(42));
    }

    #[test]
    fn three_channel_volumes_interleave() {
        let config = Config {
            dims: vector![4, 4, 4],
            cell_shape: vector![1.0, 1.0, 1.0],
            channels: 3,
            generator: GeneratorConfig::Spheres {
                count: 2,
                radius: 1,
            },
            file_name: "unused.vol".into(),
        };
        let gen = get_sample_generator(&config);

        let mut bytes = generate_header(&config);
        write_samples(&mut bytes, gen.as_ref(), &config, &ProgressBar::hidden()).unwrap();

        let vol = parse_volume(&bytes).unwrap();
        assert_eq!(vol.channels(), 3);
        assert!(vol.sample_at(0, 0, 0, 2).is_some());
        assert!(vol.sample_at(0, 0, 0, 3).is_none());
    }

    #[test]
    fn unwritable_output_reports_failure() {
        let config = Config {
            dims: vector![2, 2, 2],
            cell_shape: vector![1.0, 1.0, 1.0],
            channels: 1,
            generator: GeneratorConfig::Solid { sample: 1 },
            file_name: "no_such_dir/out.vol".into(),
        };

        assert!(generate_vol(config).is_err());
    }
}
