// pregen.rs - conway-pregen <name> <cells-file> [out-dir]

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use conway::{logging, pregen};

fn main() -> Result<()> {
    logging::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (name, cells_file, out_dir) = match args.as_slice() {
        [name, cells] => (name, PathBuf::from(cells), PathBuf::from(".")),
        [name, cells, out] => (name, PathBuf::from(cells), PathBuf::from(out)),
        _ => bail!("usage: conway-pregen <name> <cells-file> [out-dir]"),
    };

    let raw = std::fs::read_to_string(&cells_file)
        .with_context(|| format!("reading {}", cells_file.display()))?;
    let written = pregen::write_rotations(&out_dir, name, &raw)
        .with_context(|| format!("writing rotations of `{name}`"))?;

    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}
