// codec.rs - Text forms of a pattern
//
// Canonical pattern files use `.` (dead) and `O` (alive), one row per line.
// Files written by the pre-generation tool use space-separated `0`/`1`.
// In both, lines starting with `#` are comments.

use crate::error::{LifeError, Result};
use crate::matrix::CellMatrix;

/// Decodes a pattern file named `name`.
///
/// The first data row picks the form: if it holds only `0`, `1` and
/// whitespace the file is read as the pre-rotated form, otherwise every row
/// must be strictly `.`/`O`.
pub fn decode_pattern(name: &str, text: &str) -> Result<CellMatrix> {
    let rows: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .collect();

    let bits = rows.first().is_some_and(|(_, line)| {
        line.chars().all(|c| c == '0' || c == '1' || c.is_whitespace())
    });

    let mut decoded = Vec::with_capacity(rows.len());
    for (line_no, line) in rows {
        let row = if bits {
            decode_bits_row(name, line_no, line)?
        } else {
            decode_cells_row(name, line_no, line)?
        };
        decoded.push(row);
    }
    Ok(CellMatrix::from_rows(decoded))
}

fn decode_bits_row(name: &str, line_no: usize, line: &str) -> Result<Vec<bool>> {
    line.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            found => Err(LifeError::PatternDecode {
                name: name.to_string(),
                line: line_no,
                found,
            }),
        })
        .collect()
}

fn decode_cells_row(name: &str, line_no: usize, line: &str) -> Result<Vec<bool>> {
    line.chars()
        .map(|c| match c {
            '.' => Ok(false),
            'O' => Ok(true),
            found => Err(LifeError::PatternDecode {
                name: name.to_string(),
                line: line_no,
                found,
            }),
        })
        .collect()
}

/// Lenient reader for raw cell blocks pasted from pattern collections.
///
/// Characters other than `.` and `O` are skipped, lines left empty are
/// dropped, and short rows are padded to the longest one.
pub fn decode_raw_cells(raw: &str) -> CellMatrix {
    CellMatrix::from_rows(
        raw.lines()
            .map(|line| {
                line.trim()
                    .chars()
                    .filter_map(|c| match c {
                        '.' => Some(false),
                        'O' => Some(true),
                        _ => None,
                    })
                    .collect::<Vec<_>>()
            })
            .filter(|row| !row.is_empty()),
    )
}

/// Renders `matrix` in the pre-rotated form under a single comment header.
pub fn encode_bits(header: &str, matrix: &CellMatrix) -> String {
    let mut out = format!("# {header}\n");
    for row in matrix.rows() {
        for &alive in row {
            out.push(if alive { '1' } else { '0' });
            out.push(' ');
        }
        out.push('\n');
    }
    out
}
