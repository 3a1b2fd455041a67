// pregen.rs - Writes a pattern in all four clockwise orientations
//
// `<name>` holds the 0 degree form, `<name>90`, `<name>180` and `<name>270`
// the rotated ones. The store reads these files like any other pattern.

use std::path::{Path, PathBuf};

use crate::codec::{decode_raw_cells, encode_bits};
use crate::error::{LifeError, Result};
use crate::transform::{Angle, Orientation, transform};

fn file_name(name: &str, angle: Angle) -> String {
    match angle {
        Angle::Deg0 => name.to_string(),
        _ => format!("{name}{}", angle.degrees()),
    }
}

/// Decodes `raw_cells` and writes the four orientations into `dir`.
/// Returns the written paths in angle order.
pub fn write_rotations(dir: &Path, name: &str, raw_cells: &str) -> Result<Vec<PathBuf>> {
    let canonical = decode_raw_cells(raw_cells);

    let mut written = Vec::with_capacity(Angle::ALL.len());
    for angle in Angle::ALL {
        let oriented = transform(&canonical, Orientation { angle, ..Default::default() });
        let header = format!("{name}: {} degrees Rotated", angle.degrees());
        let path = dir.join(file_name(name, angle));

        std::fs::write(&path, encode_bits(&header, &oriented)).map_err(|source| {
            LifeError::Io {
                path: path.clone(),
                source,
            }
        })?;
        tracing::info!(path = %path.display(), "wrote rotation");
        written.push(path);
    }
    Ok(written)
}
