// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.


use crate::{CircuitData, Error, GateKind, Parameter, layout};
use log::debug;
use std::fmt::Write;

/// Index-addressable access to the operations of a circuit.
///
/// Implementors expose the raw gate-kind tag and the qubit indices of each
/// operation; the tags are validated during extraction.
pub trait CircuitSource {
    fn qubit_count(&self) -> usize;
    fn operation_count(&self) -> usize;
    fn gate_kind(&self, index: usize) -> &str;
    fn targets(&self, index: usize) -> &[usize];
    fn controls(&self, index: usize) -> &[usize];
    fn parameters(&self, index: usize) -> &[Parameter];
}

/// A normalized description of one circuit operation.
#[derive(Clone, Debug, PartialEq)]
pub struct GateDescriptor {
    kind: GateKind,
    targets: Vec<usize>,
    controls: Vec<usize>,
    parameters: Vec<Parameter>,
    display_text: String,
}

impl GateDescriptor {
    #[must_use]
    pub fn new(
        kind: GateKind,
        targets: Vec<usize>,
        controls: Vec<usize>,
        parameters: Vec<Parameter>,
    ) -> Self {
        let mut display_text = kind.label().to_string();
        if !parameters.is_empty() {
            let args = parameters
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            let _ = write!(&mut display_text, "({args})");
        }

        Self {
            kind,
            targets,
            controls,
            parameters,
            display_text,
        }
    }

    #[must_use]
    pub fn kind(&self) -> GateKind {
        self.kind
    }

    #[must_use]
    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    #[must_use]
    pub fn controls(&self) -> &[usize] {
        &self.controls
    }

    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    #[must_use]
    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    /// The row the gate's visible box is drawn on.
    #[must_use]
    pub fn anchor(&self) -> Option<usize> {
        self.targets.iter().copied().min()
    }

    /// Number of contiguous rows covered by the gate body, or 0 for a
    /// descriptor without targets.
    #[must_use]
    pub fn size(&self) -> usize {
        match (self.targets.iter().min(), self.targets.iter().max()) {
            (Some(lo), Some(hi)) => hi - lo + 1,
            _ => 0,
        }
    }

    /// The inclusive range of rows touched by the gate body and its control
    /// line, or `None` for a descriptor without targets.
    #[must_use]
    pub fn reserved_rows(&self) -> Option<(usize, usize)> {
        let rows = self.targets.iter().chain(&self.controls).copied();
        rows.fold(None, |acc, row| match acc {
            None => Some((row, row)),
            Some((lo, hi)) => Some((lo.min(row), hi.max(row))),
        })
    }
}

/// Derives one descriptor per operation of `source`, in circuit order.
pub fn extract(source: &impl CircuitSource) -> Result<Vec<GateDescriptor>, Error> {
    (0..source.operation_count())
        .map(|index| {
            let kind = source.gate_kind(index).parse::<GateKind>()?;
            debug!("operation {index}: {kind}");
            Ok(GateDescriptor::new(
                kind,
                source.targets(index).to_vec(),
                source.controls(index).to_vec(),
                source.parameters(index).to_vec(),
            ))
        })
        .collect()
}

/// Extracts the descriptors of `source` and lays them out on its qubits.
pub fn layout_circuit(source: &impl CircuitSource) -> Result<CircuitData, Error> {
    let descriptors = extract(source)?;
    layout(&descriptors, source.qubit_count())
}
