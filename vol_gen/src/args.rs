//! Argument parsing and validation
//! Uses library `clap`

use clap::{Arg, Command, ValueHint};

// up to 32bit value
pub fn is_positive_number(num: &str) -> Result<(), String> {
    match num.parse::<u32>() {
        Ok(n) if n > 0 => Ok(()),
        Ok(_) => Err("Number must be greater than 0".into()),
        Err(_) => Err("Number required".into()),
    }
}

pub fn can_fit_u8(num: &str) -> Result<(), String> {
    match num.parse::<u8>() {
        Ok(_) => Ok(()),
        Err(_) => Err("Number does not fit in range <0;255>".into()),
    }
}

pub fn is_float_number(num: &str) -> Result<(), String> {
    match num.parse::<f32>() {
        Ok(n) if n > 0.0 => Ok(()),
        Ok(_) => Err("Number must be greater than 0.0".into()),
        Err(_) => Err("Number required".into()),
    }
}

const GENERATOR_NAMES: &[&str] = &["solid", "spheres"];
const CHANNEL_COUNTS: &[&str] = &["1", "3"];

pub fn get_command<'a>() -> Command<'a> {
    Command::new("Vol-gen")
        .version("0.1.0")
        .about("Volumetric data generator")
        .arg(
            Arg::new("dims")
                .help("Dimensions of volume")
                .long("dims")
                .short('d')
                .required(true)
                .number_of_values(3)
                .value_names(&["X", "Y", "Z"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("shape")
                .help("Shape of cell")
                .long("shape")
                .short('s')
                .number_of_values(3)
                .value_names(&["X", "Y", "Z"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .default_values(&["1", "1", "1"])
                .validator(is_float_number),
        )
        .arg(
            Arg::new("channels")
                .help("Channels per voxel")
                .long("channels")
                .short('c')
                .possible_values(CHANNEL_COUNTS)
                .default_value("1"),
        )
        .arg(
            Arg::new("generator")
                .help("Type of generator")
                .long("generator")
                .short('g')
                .required(true)
                .possible_values(GENERATOR_NAMES)
                .requires_ifs(&[
                    ("solid", "sample"),
                    ("spheres", "n-of-shapes"),
                    ("spheres", "object-size"),
                ]),
        )
        .arg(
            Arg::new("sample")
                .help("Sample value of solid volume")
                .long("sample")
                .takes_value(true)
                .validator(can_fit_u8),
        )
        .arg(
            Arg::new("n-of-shapes")
                .help("Number of spheres to place")
                .long("n-of-shapes")
                .short('n')
                .takes_value(true)
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("object-size")
                .help("Sphere radius, in voxels")
                .long("object-size")
                .takes_value(true)
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("output-file")
                .help("Name of output file")
                .long("output-file")
                .short('o')
                .default_value("a.vol")
                .value_hint(ValueHint::FilePath),
        )
}
