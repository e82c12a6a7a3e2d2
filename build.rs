//! Build script for the artistmix CLI.
//!
//! Copies the `.env.example` template into the user's local data directory
//! (`<data_local_dir>/artistmix/.env.example`) so a fresh install has a
//! configuration template right next to where the `.env` file is read from.

use std::{env, fs, path::PathBuf};

/// Copies the configuration template into the local data directory.
///
/// A missing template only produces a cargo warning. Failing to create the
/// target directory or to write the file aborts the build.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let template = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("artistmix");
    fs::create_dir_all(&out_dir)?;

    if template.is_file() {
        let contents = fs::read_to_string(&template)?;
        fs::write(out_dir.join(".env.example"), contents)?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            template.display()
        );
    }

    Ok(())
}
