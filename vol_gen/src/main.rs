//! Test-volume generator
//!
//! Writes `.vol` files in the viewer's native format, for example:
//! `vol_gen -d=64,64,64 -g solid --sample 200 -o solid.vol`

use config::Config;

mod args;
mod config;
mod file;
mod generators;
mod header;

use crate::{args::get_command, generators::generate_vol};

pub fn main() {
    let cmd = get_command();
    let args = cmd.get_matches();

    let cfg = match Config::from_args(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    println!("Generating volume...");
    println!("{cfg:?}");

    if let Err(e) = generate_vol(cfg) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
