use std::path::PathBuf;

use clap::ArgMatches;
use nalgebra::{vector, Vector3};

/// Parameters of the chosen generator
#[derive(Debug, Clone, Copy)]
pub enum GeneratorConfig {
    Solid { sample: u8 },
    Spheres { count: u32, radius: u32 },
}

/// Validated generation task
#[derive(Debug)]
pub struct Config {
    pub dims: Vector3<u32>,
    pub cell_shape: Vector3<f32>,
    pub channels: u8,
    pub generator: GeneratorConfig,
    pub file_name: PathBuf,
}

fn three_values<T: std::str::FromStr>(args: &ArgMatches, name: &str) -> Result<Vector3<T>, String> {
    let mut values = args
        .values_of(name)
        .ok_or_else(|| format!("Missing argument {name}"))?;
    let mut next = || -> Result<T, String> {
        values
            .next()
            .ok_or_else(|| format!("Argument {name} needs 3 values"))?
            .parse::<T>()
            .map_err(|_| format!("Bad value for {name}"))
    };
    Ok(vector![next()?, next()?, next()?])
}

impl Config {
    pub fn from_args(args: &ArgMatches) -> Result<Config, String> {
        let dims = three_values::<u32>(args, "dims")?;
        let cell_shape = three_values::<f32>(args, "shape")?;

        let channels: u8 = args
            .value_of("channels")
            .unwrap_or("1")
            .parse()
            .map_err(|_| "Bad channel count".to_string())?;

        let generator = match args.value_of("generator") {
            Some("solid") => {
                let sample = args
                    .value_of("sample")
                    .ok_or("Solid generator needs --sample")?
                    .parse::<u8>()
                    .map_err(|_| "Bad sample value")?;
                GeneratorConfig::Solid { sample }
            }
            Some("spheres") => {
                let count = args
                    .value_of("n-of-shapes")
                    .ok_or("Spheres generator needs --n-of-shapes")?
                    .parse::<u32>()
                    .map_err(|_| "Bad shape count")?;
                let radius = args
                    .value_of("object-size")
                    .ok_or("Spheres generator needs --object-size")?
                    .parse::<u32>()
                    .map_err(|_| "Bad object size")?;
                GeneratorConfig::Spheres { count, radius }
            }
            _ => return Err("Unknown generator".into()),
        };

        let file_name = args.value_of("output-file").unwrap_or("a.vol").into();

        Ok(Config {
            dims,
            cell_shape,
            channels,
            generator,
            file_name,
        })
    }
}
