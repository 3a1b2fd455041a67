// error.rs - Error taxonomy shared by the store, the interpreter and the grid

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LifeError>;

#[derive(Debug, Error)]
pub enum LifeError {
    /// Malformed directive value, stray `[end]`, or missing `W:`/`H:`.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A block was opened while `[{open}]` (opened on line `opened_at`) was still open,
    /// or the script ended before it was closed.
    #[error("line {line}: block [{open}] opened on line {opened_at} is missing [end]")]
    UnterminatedBlock { line: usize, open: String, opened_at: usize },

    #[error("pattern `{name}` not found (searched: {})", display_paths(.searched))]
    PatternNotFound { name: String, searched: Vec<PathBuf> },

    #[error("pattern `{name}` line {line}: unexpected character {found:?}")]
    PatternDecode { name: String, line: usize, found: char },

    #[error(
        "pattern {height}x{width} at ({top}, {left}) does not fit a {grid_height}x{grid_width} grid"
    )]
    PlacementOutOfBounds {
        top: i128,
        left: i128,
        height: usize,
        width: usize,
        grid_height: usize,
        grid_width: usize,
    },

    /// A pattern block closed before `[grid]` allocated the grid.
    #[error("line {line}: pattern [{name}] placed before the grid was sized")]
    GridNotSized { line: usize, name: String },

    #[error("line {line}: the grid is already sized")]
    GridAlreadySized { line: usize },

    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "<no locations>".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
