// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.


use crate::{Error, GateDescriptor, GateKind, Parameter};
use log::debug;
use rustc_hash::FxHashSet;
use serde::Serialize;

/// Nominal width of a gate box, in grid units.
pub const GATE_WIDTH: f32 = 1.0;
/// Nominal height of a gate box on a single row, in grid units.
pub const GATE_HEIGHT: f32 = 1.0;
/// Raw kind reported for ghost cells.
pub const GHOST_KIND: &str = "ghost";

/// The laid-out circuit: one row per qubit, one cell per column.
///
/// Rows are not padded to a common length. A row ends at its last occupied
/// column; earlier unoccupied columns hold [`LayoutCell::Absent`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CircuitData {
    rows: Vec<Vec<LayoutCell>>,
}

impl CircuitData {
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the longest row.
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<LayoutCell>] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[LayoutCell]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// Returns the cell at `(row, column)`, or `None` past the end of the row.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&LayoutCell> {
        self.rows.get(row).and_then(|cells| cells.get(column))
    }

    /// Iterates over the real cells as `(row, column, cell)`, row by row.
    pub fn gates(&self) -> impl Iterator<Item = (usize, usize, &GateCell)> {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(column, cell)| match cell {
                    LayoutCell::Real(gate) => Some((row, column, gate)),
                    LayoutCell::Ghost(_) | LayoutCell::Absent => None,
                })
        })
    }
}

/// A single entry of the layout grid.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "cell")]
pub enum LayoutCell {
    /// The anchor of a gate, drawn at the topmost target row.
    #[serde(rename = "gate")]
    Real(GateCell),
    /// A row crossed by a gate's span or control line at this column.
    #[serde(rename = "ghost")]
    Ghost(GhostCell),
    /// Padding before a later gate on the same row.
    #[serde(rename = "absent")]
    Absent,
}

impl LayoutCell {
    #[must_use]
    pub fn raw_kind(&self) -> &str {
        match self {
            Self::Real(gate) => gate.kind.tag(),
            Self::Ghost(_) => GHOST_KIND,
            Self::Absent => "",
        }
    }

    #[must_use]
    pub fn is_ghost(&self) -> bool {
        matches!(self, Self::Ghost(_))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GateCell {
    #[serde(rename = "rawKind")]
    pub kind: GateKind,
    /// Index of the originating operation in circuit order.
    pub operation: usize,
    #[serde(rename = "displayText")]
    pub display_text: String,
    pub width: f32,
    pub height: f32,
    #[serde(rename = "targetRows")]
    pub target_rows: Vec<usize>,
    #[serde(rename = "controlRows")]
    pub control_rows: Vec<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    pub size: usize,
}

impl GateCell {
    fn new(operation: usize, descriptor: &GateDescriptor) -> Self {
        Self {
            kind: descriptor.kind(),
            operation,
            display_text: descriptor.display_text().to_string(),
            width: GATE_WIDTH,
            height: GATE_HEIGHT,
            target_rows: descriptor.targets().to_vec(),
            control_rows: descriptor.controls().to_vec(),
            parameters: descriptor.parameters().to_vec(),
            size: descriptor.size(),
        }
    }

    /// Height of the gate body when stacked over `size` rows separated by
    /// `margin`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn span_height(&self, margin: f32) -> f32 {
        let size = self.size.max(1) as f32;
        self.height * size + margin * (size - 1.0)
    }

    /// The topmost and bottommost rows touched by the gate body or its
    /// control line.
    #[must_use]
    pub fn row_span(&self) -> (usize, usize) {
        self.target_rows
            .iter()
            .chain(&self.control_rows)
            .fold((usize::MAX, 0), |(lo, hi), &row| (lo.min(row), hi.max(row)))
    }

    #[must_use]
    pub fn is_controlled(&self) -> bool {
        !self.control_rows.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GhostCell {
    /// Row of the real cell this ghost belongs to.
    pub anchor: usize,
}

#[derive(Default)]
struct Row {
    cells: Vec<LayoutCell>,
    next_column: usize,
}

impl Row {
    fn add(&mut self, column: usize, cell: LayoutCell) {
        debug_assert!(column >= self.cells.len(), "column is already occupied");
        self.cells.resize_with(column, || LayoutCell::Absent);
        self.cells.push(cell);
        self.next_column = column + 1;
    }
}

/// The rows a validated gate occupies.
struct Span {
    anchor: usize,
    begin: usize,
    end: usize,
}

/// Lays out gates on a grid of `num_qubits` rows.
///
/// Gates are placed in the order given, each in the leftmost column that is
/// free on every row between its topmost and bottommost target or control.
/// A gate is never placed to the left of an earlier gate sharing one of
/// those rows.
///
/// # Arguments
///
/// * `descriptors` - The gates, in circuit order.
/// * `num_qubits` - The number of qubit rows in the diagram.
///
/// # Returns
///
/// The grid, or `InvalidGateDescriptor` if any gate has no targets, repeats
/// a qubit, or refers to a qubit outside the circuit. No gate is placed
/// unless all of them are valid.
pub fn layout(descriptors: &[GateDescriptor], num_qubits: usize) -> Result<CircuitData, Error> {
    let spans = descriptors
        .iter()
        .enumerate()
        .map(|(index, descriptor)| validate(index, descriptor, num_qubits))
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows: Vec<Row> = (0..num_qubits).map(|_| Row::default()).collect();

    for (index, (descriptor, span)) in descriptors.iter().zip(spans).enumerate() {
        let Span { anchor, begin, end } = span;
        let column = rows[begin..=end]
            .iter()
            .map(|row| row.next_column)
            .max()
            .unwrap_or_default();

        debug!(
            "operation {index} ({}) placed at column {column} on rows {begin}..={end}",
            descriptor.kind()
        );

        for (row_index, row) in rows.iter_mut().enumerate().take(end + 1).skip(begin) {
            let cell = if row_index == anchor {
                LayoutCell::Real(GateCell::new(index, descriptor))
            } else {
                LayoutCell::Ghost(GhostCell { anchor })
            };
            row.add(column, cell);
        }
    }

    Ok(CircuitData {
        rows: rows.into_iter().map(|row| row.cells).collect(),
    })
}

fn validate(index: usize, descriptor: &GateDescriptor, num_qubits: usize) -> Result<Span, Error> {
    let invalid = |reason: String| Error::InvalidGateDescriptor { index, reason };

    let (Some(anchor), Some((begin, end))) = (descriptor.anchor(), descriptor.reserved_rows())
    else {
        return Err(invalid("gate has no target qubits".to_string()));
    };

    let targets: FxHashSet<usize> = descriptor.targets().iter().copied().collect();
    if targets.len() != descriptor.targets().len() {
        return Err(invalid("a target qubit is listed more than once".to_string()));
    }

    let mut controls = FxHashSet::default();
    for &control in descriptor.controls() {
        if targets.contains(&control) {
            return Err(invalid(format!(
                "qubit {control} is both a target and a control"
            )));
        }
        if !controls.insert(control) {
            return Err(invalid(format!(
                "control qubit {control} is listed more than once"
            )));
        }
    }

    // Swaps and controlled inversions mark each target separately; every
    // other gate draws one body over its whole target span.
    let kind = descriptor.kind();
    if kind != GateKind::Swap && !kind.is_controlled_inversion() {
        let bottom = anchor + descriptor.size() - 1;
        if let Some(control) = descriptor
            .controls()
            .iter()
            .find(|&&control| anchor < control && control < bottom)
        {
            return Err(invalid(format!(
                "control qubit {control} lies inside the gate body on qubits {anchor}..={bottom}"
            )));
        }
    }

    if end >= num_qubits {
        return Err(invalid(format!(
            "qubit {end} is out of range for a circuit with {num_qubits} qubits"
        )));
    }

    Ok(Span { anchor, begin, end })
}
