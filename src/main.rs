//! # Voxel Terrain Entry Point
//!
//! Generates a world from the configuration named on the command line and
//! reports what was built.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- config.json
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    match voxel_terrain::run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("voxel-terrain: {err}");
            ExitCode::FAILURE
        }
    }
}
