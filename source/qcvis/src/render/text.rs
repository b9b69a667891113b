// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.


use crate::{CircuitData, GateCell, GateKind, LayoutCell};
use std::fmt::{self, Display, Write};

/// Narrowest cell, in characters. Widths are always odd so that glyphs sit
/// exactly in the middle of a cell.
const MIN_CELL_WIDTH: usize = 7;
const CONTROL_DOT: &str = "●";
const WIRE: char = '─';

/// How the rows of one gate are joined.
#[derive(Clone, Copy)]
enum Link {
    /// Control line, or the two halves of a swap.
    Solid,
    /// Targets of a multi-row gate without controls.
    Dashed,
}

impl Link {
    fn of(gate: &GateCell) -> Self {
        if gate.is_controlled() || gate.kind == GateKind::Swap {
            Link::Solid
        } else {
            Link::Dashed
        }
    }

    /// Glyph where the link crosses a qubit wire.
    fn crossing(self) -> &'static str {
        match self {
            Link::Solid => "┼",
            Link::Dashed => "┆",
        }
    }

    /// Glyph between two qubit wires.
    fn spacer(self) -> &'static str {
        match self {
            Link::Solid => "│",
            Link::Dashed => "┆",
        }
    }
}

/// Pads `text` on both sides with `fill`, up to `width` characters.
fn centred(text: &str, fill: char, width: usize) -> String {
    let padding = width.saturating_sub(text.chars().count());
    let left = padding / 2;
    let mut cell = String::with_capacity(width * fill.len_utf8());
    cell.extend(std::iter::repeat_n(fill, left));
    cell.push_str(text);
    cell.extend(std::iter::repeat_n(fill, padding - left));
    cell
}

impl CircuitData {
    /// The gate whose body or control line covers `(row, column)`.
    fn owner(&self, row: usize, column: usize) -> Option<&GateCell> {
        match self.cell(row, column)? {
            LayoutCell::Real(gate) => Some(gate),
            LayoutCell::Ghost(ghost) => match self.cell(ghost.anchor, column)? {
                LayoutCell::Real(gate) => Some(gate),
                LayoutCell::Ghost(_) | LayoutCell::Absent => None,
            },
            LayoutCell::Absent => None,
        }
    }

    /// The link drawn between `row` and `row + 1` in `column`, if the gate
    /// there covers both rows.
    fn link_below(&self, row: usize, column: usize) -> Option<Link> {
        self.owner(row, column)
            .filter(|gate| gate.row_span().1 > row)
            .map(Link::of)
    }

    /// Text for the cell at `(row, column)` on the qubit wire.
    fn wire_cell(&self, row: usize, column: usize, width: usize) -> String {
        match self.owner(row, column) {
            Some(gate) if gate.target_rows.contains(&row) => {
                centred(&format!(" {} ", gate.display_text), WIRE, width)
            }
            Some(gate) if gate.control_rows.contains(&row) => {
                centred(&format!(" {CONTROL_DOT} "), WIRE, width)
            }
            Some(gate) => centred(Link::of(gate).crossing(), WIRE, width),
            None => centred("", WIRE, width),
        }
    }

    /// Widths of the grid columns, wide enough for `── label ──`.
    fn text_widths(&self) -> Vec<usize> {
        let mut widths = vec![MIN_CELL_WIDTH; self.num_columns()];
        for (_, column, gate) in self.gates() {
            let needed = gate.display_text.chars().count() + 4;
            widths[column] = widths[column].max(needed | 1);
        }
        widths
    }
}

impl Display for CircuitData {
    /// Draws one line per qubit. A spacer line goes under a qubit when some
    /// gate continues onto the qubit below.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.text_widths();
        let label_width = (0..self.num_rows())
            .map(|row| format!("q_{row}").len() + 1)
            .fold(MIN_CELL_WIDTH, usize::max)
            | 1;

        for row in 0..self.num_rows() {
            let mut line = String::new();
            write!(line, "{:<label_width$}", format!("q_{row}"))?;
            for (column, &width) in widths.iter().enumerate() {
                line.push_str(&self.wire_cell(row, column, width));
            }
            writeln!(f, "{}", line.trim_end())?;

            let links: Vec<_> = (0..widths.len())
                .map(|column| self.link_below(row, column))
                .collect();
            if links.iter().any(Option::is_some) {
                let mut spacer = " ".repeat(label_width);
                for (link, &width) in links.iter().zip(&widths) {
                    let glyph = link.map_or("", Link::spacer);
                    spacer.push_str(&centred(glyph, ' ', width));
                }
                writeln!(f, "{}", spacer.trim_end())?;
            }
        }

        Ok(())
    }
}
