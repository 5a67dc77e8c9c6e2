// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! ASCII diagram of a skip list's links, for debugging.
//!
//! The first row holds the values, preceded by a blank cell for the header.
//! Each following row draws one level, lowest first:
//!
//! ```text
//! {maxLevel: 3, nodes:
//!        1     2     3
//!  |---->|---->|---->|nil
//!  |---------->|---->|nil
//!  |---------->|nil
//! }
//! ```
//!
//! A `|` marks a position with a link at that level, `>` an incoming link,
//! `-` a link continuing to the right, and `nil` the end of the level.

use std::fmt;

use crate::compare::Comparator;
use crate::level::LevelGenerator;
use crate::skip_list::Idx;
use crate::skip_list::NULL;
use crate::skip_list::SkipList;

/// Narrowest cell; fits the `">|nil "` terminator.
const MIN_CELL: usize = 6;

impl<T, C, G> fmt::Display for SkipList<T, C, G>
where
    T: fmt::Display,
    C: Comparator<T>,
    G: LevelGenerator,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.iter().map(|value| format!(" {} ", value)).collect();
        let width = labels
            .iter()
            .map(|label| label.chars().count())
            .max()
            .unwrap_or(0)
            .max(MIN_CELL);

        let mut rows = vec![String::new(); self.max_level + 1];
        pad_to(&mut rows[0], "", ' ', width);
        for label in &labels {
            pad_to(&mut rows[0], label, ' ', width);
        }

        // Whether a link coming from the left is still open at each level.
        let mut incoming = vec![false; self.max_level];
        let mut pos: Option<Idx> = None;
        loop {
            let height = match pos {
                None => self.max_level,
                Some(idx) => self.nodes[idx as usize].height(),
            };
            for level in 0..self.max_level {
                let row = &mut rows[level + 1];
                if level >= height {
                    let fill = if incoming[level] { '-' } else { ' ' };
                    pad_to(row, "", fill, width);
                } else if self.forward(pos, level) == NULL {
                    let cell = if incoming[level] { ">|nil " } else { " |nil " };
                    pad_to(row, cell, ' ', width);
                    incoming[level] = false;
                } else {
                    let cell = if incoming[level] { ">|-" } else { " |-" };
                    pad_to(row, cell, '-', width);
                    incoming[level] = true;
                }
            }

            let next = self.forward(pos, 0);
            if next == NULL {
                break;
            }
            pos = Some(next);
        }

        writeln!(f, "{{maxLevel: {}, nodes:", self.max_level)?;
        for row in &rows {
            writeln!(f, "{}", row.trim_end())?;
        }
        return write!(f, "}}");
    }
}

/// Append `cell` to `row`, filled with `fill` out to `width` characters.
fn pad_to(row: &mut String, cell: &str, fill: char, width: usize) {
    row.push_str(cell);
    for _ in cell.chars().count()..width {
        row.push(fill);
    }
}
