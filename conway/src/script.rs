// script.rs - Placement script interpreter
//
//   W:60
//   H:70
//   [grid]
//   [end]
//   angle:90
//   flip:HORIZONTAL
//   anchor:0,0
//   place:10,12
//   [glider]
//   [end]
//
// `angle`, `flip`, `anchor` and `place` are sticky: a value set for one
// pattern block stays in force for every later block until overridden.

use crate::error::{LifeError, Result};
use crate::grid::{Anchor, Grid, Position, Simulation};
use crate::store::{PatternSource, PatternStore};
use crate::transform::{Angle, Flip, Orientation};

const GRID_BLOCK: &str = "grid";

/// One classified script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Blank,
    Comment,
    Width(usize),
    Height(usize),
    Open(String),
    End,
    Angle(Angle),
    Flip(Flip),
    Place(Position),
    Anchor(Anchor),
    Unknown,
}

impl Directive {
    /// Classifies a single line; `line_no` is only used for error messages.
    pub fn classify(line: &str, line_no: usize) -> Result<Self> {
        let line = line.trim_end();
        if line.trim().is_empty() {
            return Ok(Directive::Blank);
        }
        if line.starts_with('#') {
            return Ok(Directive::Comment);
        }
        if line.starts_with("[end]") {
            return Ok(Directive::End);
        }
        if let Some(value) = line.strip_prefix("W:") {
            let w = parse_int(value, "W", line_no)?;
            return dimension(w, "W", line_no).map(Directive::Width);
        }
        if let Some(value) = line.strip_prefix("H:") {
            let h = parse_int(value, "H", line_no)?;
            return dimension(h, "H", line_no).map(Directive::Height);
        }
        if let Some(name) = line.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
            return Ok(Directive::Open(name.to_string()));
        }
        if let Some(value) = line.strip_prefix("angle:") {
            let degrees = parse_int(value, "angle", line_no)?;
            return Ok(Directive::Angle(Angle::from_degrees(degrees)));
        }
        if let Some(value) = line.strip_prefix("flip:") {
            return Ok(Directive::Flip(Flip::from_keyword(value)));
        }
        if let Some(value) = line.strip_prefix("place:") {
            let (row, col) = parse_pair(value, "place", line_no)?;
            return Ok(Directive::Place(Position { row, col }));
        }
        if let Some(value) = line.strip_prefix("anchor:") {
            let (row, col) = parse_pair(value, "anchor", line_no)?;
            return Anchor::new(row, col)
                .map(Directive::Anchor)
                .ok_or_else(|| LifeError::Parse {
                    line: line_no,
                    message: format!("anchor components must be 0 or 1, got {row},{col}"),
                });
        }
        Ok(Directive::Unknown)
    }
}

fn parse_int(value: &str, key: &str, line_no: usize) -> Result<i64> {
    value.trim().parse().map_err(|_| LifeError::Parse {
        line: line_no,
        message: format!("`{key}:` expects an integer, got {:?}", value.trim()),
    })
}

fn dimension(value: i64, key: &str, line_no: usize) -> Result<usize> {
    usize::try_from(value).map_err(|_| LifeError::Parse {
        line: line_no,
        message: format!("`{key}:` must not be negative, got {value}"),
    })
}

fn parse_pair(value: &str, key: &str, line_no: usize) -> Result<(i64, i64)> {
    let fields: Vec<&str> = value.trim().split(',').collect();
    let [row, col] = fields.as_slice() else {
        return Err(LifeError::Parse {
            line: line_no,
            message: format!("`{key}:` expects <row>,<col>, got {:?}", value.trim()),
        });
    };
    Ok((parse_int(row, key, line_no)?, parse_int(col, key, line_no)?))
}

/// Settings carried from block to block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placement {
    pub orientation: Orientation,
    pub anchor: Anchor,
    pub position: Position,
}

struct OpenBlock {
    name: String,
    line: usize,
}

/// Script state machine. Feed lines with [`Interpreter::apply`], then call
/// [`Interpreter::finish`].
pub struct Interpreter<'s, S: PatternSource> {
    store: &'s PatternStore<S>,
    width: Option<usize>,
    height: Option<usize>,
    block: Option<OpenBlock>,
    placement: Placement,
    grid: Option<Grid>,
    placed: usize,
}

impl<'s, S: PatternSource> Interpreter<'s, S> {
    pub fn new(store: &'s PatternStore<S>) -> Self {
        Self {
            store,
            width: None,
            height: None,
            block: None,
            placement: Placement::default(),
            grid: None,
            placed: 0,
        }
    }

    /// Current sticky placement settings.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn apply(&mut self, directive: Directive, line: usize) -> Result<()> {
        match directive {
            Directive::Blank | Directive::Comment => {}
            Directive::Unknown => tracing::debug!(line, "ignoring unrecognised script line"),
            Directive::Width(w) => self.width = Some(w),
            Directive::Height(h) => self.height = Some(h),
            Directive::Angle(angle) => self.placement.orientation.angle = angle,
            Directive::Flip(flip) => self.placement.orientation.flip = flip,
            Directive::Place(position) => self.placement.position = position,
            Directive::Anchor(anchor) => self.placement.anchor = anchor,
            Directive::Open(name) => {
                if let Some(open) = &self.block {
                    return Err(LifeError::UnterminatedBlock {
                        line,
                        open: open.name.clone(),
                        opened_at: open.line,
                    });
                }
                self.block = Some(OpenBlock { name, line });
            }
            Directive::End => {
                let Some(block) = self.block.take() else {
                    return Err(LifeError::Parse {
                        line,
                        message: "[end] without an open block".to_string(),
                    });
                };
                if block.name == GRID_BLOCK {
                    self.size_grid(line)?;
                } else {
                    self.place_pattern(&block.name, line)?;
                }
            }
        }
        Ok(())
    }

    fn size_grid(&mut self, line: usize) -> Result<()> {
        if self.grid.is_some() {
            return Err(LifeError::GridAlreadySized { line });
        }
        let (Some(height), Some(width)) = (self.height, self.width) else {
            return Err(LifeError::Parse {
                line,
                message: "[grid] needs both W: and H: before [end]".to_string(),
            });
        };
        tracing::debug!(height, width, "grid sized");
        self.grid = Some(Grid::new(height, width));
        Ok(())
    }

    fn place_pattern(&mut self, name: &str, line: usize) -> Result<()> {
        let Some(grid) = self.grid.as_mut() else {
            return Err(LifeError::GridNotSized {
                line,
                name: name.to_string(),
            });
        };
        let Placement {
            orientation,
            anchor,
            position,
        } = self.placement;

        let pattern = self.store.load_oriented(name, orientation)?;
        grid.place(&pattern, anchor, position)?;
        self.placed += 1;

        tracing::debug!(
            pattern = name,
            angle = orientation.angle.degrees(),
            flip = ?orientation.flip,
            row = position.row,
            col = position.col,
            "placed pattern"
        );
        Ok(())
    }

    /// Closes the script: fails if a block is still open or the grid was never sized.
    pub fn finish(self, last_line: usize) -> Result<Simulation> {
        if let Some(open) = self.block {
            return Err(LifeError::UnterminatedBlock {
                line: last_line,
                open: open.name,
                opened_at: open.line,
            });
        }
        let Some(grid) = self.grid else {
            return Err(LifeError::GridNotSized {
                line: last_line,
                name: GRID_BLOCK.to_string(),
            });
        };
        tracing::info!(
            height = grid.height(),
            width = grid.width(),
            patterns = self.placed,
            population = grid.population(),
            "script loaded"
        );
        Ok(Simulation::new(grid))
    }
}

/// Builds a simulation from script text, resolving patterns through `store`.
pub fn interpret<S: PatternSource>(script: &str, store: &PatternStore<S>) -> Result<Simulation> {
    let mut interpreter = Interpreter::new(store);
    let mut last_line = 0;
    for (index, line) in script.lines().enumerate() {
        last_line = index + 1;
        let directive = Directive::classify(line, last_line)?;
        interpreter.apply(directive, last_line)?;
    }
    interpreter.finish(last_line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::CellMatrix;
    use crate::store::tests::MemorySource;

    fn store() -> PatternStore<MemorySource> {
        PatternStore::new(
            MemorySource::default()
                .with("block", "OO\nOO\n")
                .with("bar", "OOO\n")
                .with("ell", "O.\nOO\n"),
        )
    }

    fn live(sim: &Simulation) -> Vec<(usize, usize)> {
        sim.grid().cells().live_cells().collect()
    }

    fn classify(line: &str) -> Directive {
        Directive::classify(line, 1).unwrap()
    }

    #[test]
    fn classifies_each_directive() {
        assert_eq!(classify("# note"), Directive::Comment);
        assert_eq!(classify("   "), Directive::Blank);
        assert_eq!(classify("W:12"), Directive::Width(12));
        assert_eq!(classify("H: 7 "), Directive::Height(7));
        assert_eq!(classify("[glider]"), Directive::Open("glider".to_string()));
        assert_eq!(classify("[end]"), Directive::End);
        assert_eq!(classify("angle:-90"), Directive::Angle(Angle::Deg270));
        assert_eq!(classify("flip:VERTICAL"), Directive::Flip(Flip::Vertical));
        assert_eq!(classify("flip:none"), Directive::Flip(Flip::None));
        assert_eq!(classify("place:3, 4"), Directive::Place(Position { row: 3, col: 4 }));
        assert_eq!(classify("anchor:1,0"), Directive::Anchor(Anchor { row: 1, col: 0 }));
        assert_eq!(classify("speed:9"), Directive::Unknown);
    }

    #[test]
    fn malformed_pairs_are_parse_errors() {
        for line in ["place:1", "place:1,2,3", "anchor:", "place:a,b", "anchor:2,0", "W:x", "H:-3"] {
            assert!(
                matches!(Directive::classify(line, 4), Err(LifeError::Parse { line: 4, .. })),
                "{line} should not parse"
            );
        }
    }

    #[test]
    fn empty_grid_script() {
        let mut sim = interpret("W:10\nH:10\n[grid]\n[end]\n", &store()).unwrap();
        assert_eq!((sim.grid().height(), sim.grid().width()), (10, 10));
        assert_eq!(sim.population(), 0);
        assert_eq!(sim.step().population(), 0);
    }

    #[test]
    fn dimensions_are_order_independent() {
        let sim = interpret("H:4\nW:9\n[grid]\n[end]\n", &store()).unwrap();
        assert_eq!((sim.grid().height(), sim.grid().width()), (4, 9));
    }

    #[test]
    fn places_with_defaults() {
        let sim = interpret("W:6\nH:6\n[grid]\n[end]\n[block]\n[end]\n", &store()).unwrap();
        assert_eq!(live(&sim), vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
    }

    #[test]
    fn settings_carry_over_between_blocks() {
        let script = "\
W:12
H:12
[grid]
[end]
angle:90
place:1,1
[bar]
[end]
place:1,5
[bar]
[end]
";
        let sim = interpret(script, &store()).unwrap();
        // Both bars stand upright; the second never asked for a rotation.
        assert_eq!(
            live(&sim),
            vec![(1, 1), (1, 5), (2, 1), (2, 5), (3, 1), (3, 5)]
        );
    }

    #[test]
    fn flip_and_anchor_stick_too() {
        let script = "\
W:10
H:10
[grid]
[end]
flip:HORIZONTAL
anchor:1,1
place:5,5
[ell]
[end]
place:8,8
[ell]
[end]
";
        let sim = interpret(script, &store()).unwrap();
        let expected = CellMatrix::from_rows([[true, true], [true, false]]);
        let cells = sim.grid().cells();
        for (top, left) in [(3, 3), (6, 6)] {
            for r in 0..2 {
                for c in 0..2 {
                    assert_eq!(cells.get(top + r, left + c), expected.get(r, c));
                }
            }
        }
        assert_eq!(sim.population(), 6);
    }

    #[test]
    fn overlapping_blocks_overlay() {
        let script = "W:8\nH:8\n[grid]\n[end]\n[block]\n[end]\nplace:2,1\n[bar]\n[end]\n";
        let sim = interpret(script, &store()).unwrap();
        assert_eq!(live(&sim), vec![(1, 1), (1, 2), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn nested_block_is_unterminated() {
        let err = interpret("W:5\nH:5\n[grid]\n[block]\n[end]\n", &store()).unwrap_err();
        assert!(matches!(
            err,
            LifeError::UnterminatedBlock { line: 4, ref open, opened_at: 3 } if open == "grid"
        ));
    }

    #[test]
    fn script_ending_inside_block_is_unterminated() {
        let err = interpret("W:5\nH:5\n[grid]\n[end]\n[block]\n", &store()).unwrap_err();
        assert!(matches!(err, LifeError::UnterminatedBlock { opened_at: 5, .. }));
    }

    #[test]
    fn stray_end_is_rejected() {
        assert!(matches!(
            interpret("[end]\n", &store()),
            Err(LifeError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn pattern_before_grid_is_rejected() {
        let err = interpret("[block]\n[end]\nW:5\nH:5\n[grid]\n[end]\n", &store()).unwrap_err();
        assert!(matches!(err, LifeError::GridNotSized { line: 2, ref name } if name == "block"));
    }

    #[test]
    fn grid_sized_twice_is_rejected() {
        let err = interpret("W:5\nH:5\n[grid]\n[end]\n[grid]\n[end]\n", &store()).unwrap_err();
        assert!(matches!(err, LifeError::GridAlreadySized { line: 6 }));
    }

    #[test]
    fn missing_dimension_is_rejected() {
        assert!(matches!(
            interpret("W:5\n[grid]\n[end]\n", &store()),
            Err(LifeError::Parse { line: 3, .. })
        ));
    }

    #[test]
    fn script_without_grid_is_rejected() {
        assert!(matches!(
            interpret("# nothing here\n", &store()),
            Err(LifeError::GridNotSized { .. })
        ));
    }

    #[test]
    fn unknown_pattern_aborts() {
        let err = interpret("W:5\nH:5\n[grid]\n[end]\n[ghost]\n[end]\n", &store()).unwrap_err();
        assert!(matches!(err, LifeError::PatternNotFound { ref name, .. } if name == "ghost"));
    }

    #[test]
    fn out_of_bounds_placement_aborts() {
        let err = interpret("W:5\nH:5\n[grid]\n[end]\nplace:4,4\n[block]\n[end]\n", &store())
            .unwrap_err();
        assert!(matches!(err, LifeError::PlacementOutOfBounds { .. }));
    }

    #[test]
    fn huge_place_values_are_out_of_bounds() {
        for place in ["9223372036854775807,0", "0,9223372036854775807", "-9223372036854775808,1"] {
            let script = format!("W:5\nH:5\n[grid]\n[end]\nanchor:1,1\nplace:{place}\n[block]\n[end]\n");
            assert!(
                matches!(interpret(&script, &store()), Err(LifeError::PlacementOutOfBounds { .. })),
                "place:{place}"
            );
        }
        let script = "W:5\nH:5\n[grid]\n[end]\nplace:9223372036854775807,0\n[block]\n[end]\n";
        assert!(matches!(
            interpret(script, &store()),
            Err(LifeError::PlacementOutOfBounds { .. })
        ));
    }

    #[test]
    fn accumulator_tracks_latest_values() {
        let store = store();
        let mut interpreter = Interpreter::new(&store);
        for (i, line) in ["angle:180", "flip:VERTICAL", "anchor:0,1", "place:7,8"].iter().enumerate() {
            interpreter.apply(Directive::classify(line, i + 1).unwrap(), i + 1).unwrap();
        }
        assert_eq!(
            interpreter.placement(),
            Placement {
                orientation: Orientation::new(Angle::Deg180, Flip::Vertical),
                anchor: Anchor { row: 0, col: 1 },
                position: Position { row: 7, col: 8 },
            }
        );
    }
}
