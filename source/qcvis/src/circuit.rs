// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.


use crate::{CircuitSource, Error};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Representation of a quantum circuit as an ordered list of operations.
#[derive(Clone, Serialize, Deserialize, Default, Debug, PartialEq)]
pub struct Circuit {
    #[serde(rename = "qubitCount")]
    pub qubit_count: usize,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

impl Circuit {
    #[must_use]
    pub fn new(qubit_count: usize) -> Self {
        Self {
            qubit_count,
            operations: vec![],
        }
    }

    /// Parses a circuit from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Appends an uncontrolled, unparameterized gate.
    pub fn gate(&mut self, gate: &str, targets: &[usize]) -> &mut Self {
        self.operations.push(Operation {
            gate: gate.to_string(),
            targets: targets.to_vec(),
            controls: vec![],
            params: vec![],
        });
        self
    }

    /// Appends a gate with control qubits.
    pub fn controlled(&mut self, gate: &str, targets: &[usize], controls: &[usize]) -> &mut Self {
        self.operations.push(Operation {
            gate: gate.to_string(),
            targets: targets.to_vec(),
            controls: controls.to_vec(),
            params: vec![],
        });
        self
    }

    /// Appends a parameterized gate.
    pub fn parameterized(
        &mut self,
        gate: &str,
        targets: &[usize],
        params: Vec<Parameter>,
    ) -> &mut Self {
        self.operations.push(Operation {
            gate: gate.to_string(),
            targets: targets.to_vec(),
            controls: vec![],
            params,
        });
        self
    }
}

/// A single gate application.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Operation {
    pub gate: String,
    pub targets: Vec<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub controls: Vec<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub params: Vec<Parameter>,
}

/// A gate parameter, either a concrete angle or a named symbol.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(untagged)]
pub enum Parameter {
    Number(f64),
    Symbol(String),
}

impl From<f64> for Parameter {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Parameter {
    fn from(value: &str) -> Self {
        Self::Symbol(value.to_string())
    }
}

impl Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value:.4}"),
            Self::Symbol(name) => f.write_str(name),
        }
    }
}

impl CircuitSource for Circuit {
    fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    fn operation_count(&self) -> usize {
        self.operations.len()
    }

    fn gate_kind(&self, index: usize) -> &str {
        &self.operations[index].gate
    }

    fn targets(&self, index: usize) -> &[usize] {
        &self.operations[index].targets
    }

    fn controls(&self, index: usize) -> &[usize] {
        &self.operations[index].controls
    }

    fn parameters(&self, index: usize) -> &[Parameter] {
        &self.operations[index].params
    }
}
