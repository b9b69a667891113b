// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.


use crate::Error;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// The kinds of gates a circuit may contain.
///
/// The serialized form of each kind is its tag as reported by the circuit
/// source, e.g. `"X-rotation"` or `"Generic gate"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    I,
    X,
    Y,
    Z,
    H,
    S,
    Sdag,
    T,
    Tdag,
    #[serde(rename = "sqrtX")]
    SqrtX,
    #[serde(rename = "sqrtXdag")]
    SqrtXdag,
    #[serde(rename = "sqrtY")]
    SqrtY,
    #[serde(rename = "sqrtYdag")]
    SqrtYdag,
    #[serde(rename = "Projection-0")]
    Projection0,
    #[serde(rename = "Projection-1")]
    Projection1,
    U1,
    U2,
    U3,
    #[serde(rename = "X-rotation")]
    XRotation,
    #[serde(rename = "Y-rotation")]
    YRotation,
    #[serde(rename = "Z-rotation")]
    ZRotation,
    Pauli,
    #[serde(rename = "Pauli-rotation")]
    PauliRotation,
    #[serde(rename = "CZ")]
    Cz,
    #[serde(rename = "CNOT")]
    Cnot,
    #[serde(rename = "SWAP")]
    Swap,
    Reflection,
    ReversibleBoolean,
    DenseMatrix,
    DiagonalMatrix,
    SparseMatrix,
    #[serde(rename = "Generic gate")]
    Generic,
    #[serde(rename = "ParametricRX")]
    ParametricRx,
    #[serde(rename = "ParametricRY")]
    ParametricRy,
    #[serde(rename = "ParametricRZ")]
    ParametricRz,
    ParametricPauliRotation,
}

impl GateKind {
    pub const ALL: [GateKind; 36] = [
        Self::I,
        Self::X,
        Self::Y,
        Self::Z,
        Self::H,
        Self::S,
        Self::Sdag,
        Self::T,
        Self::Tdag,
        Self::SqrtX,
        Self::SqrtXdag,
        Self::SqrtY,
        Self::SqrtYdag,
        Self::Projection0,
        Self::Projection1,
        Self::U1,
        Self::U2,
        Self::U3,
        Self::XRotation,
        Self::YRotation,
        Self::ZRotation,
        Self::Pauli,
        Self::PauliRotation,
        Self::Cz,
        Self::Cnot,
        Self::Swap,
        Self::Reflection,
        Self::ReversibleBoolean,
        Self::DenseMatrix,
        Self::DiagonalMatrix,
        Self::SparseMatrix,
        Self::Generic,
        Self::ParametricRx,
        Self::ParametricRy,
        Self::ParametricRz,
        Self::ParametricPauliRotation,
    ];

    /// Returns the tag the circuit source uses for this kind.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::I => "I",
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
            Self::H => "H",
            Self::S => "S",
            Self::Sdag => "Sdag",
            Self::T => "T",
            Self::Tdag => "Tdag",
            Self::SqrtX => "sqrtX",
            Self::SqrtXdag => "sqrtXdag",
            Self::SqrtY => "sqrtY",
            Self::SqrtYdag => "sqrtYdag",
            Self::Projection0 => "Projection-0",
            Self::Projection1 => "Projection-1",
            Self::U1 => "U1",
            Self::U2 => "U2",
            Self::U3 => "U3",
            Self::XRotation => "X-rotation",
            Self::YRotation => "Y-rotation",
            Self::ZRotation => "Z-rotation",
            Self::Pauli => "Pauli",
            Self::PauliRotation => "Pauli-rotation",
            Self::Cz => "CZ",
            Self::Cnot => "CNOT",
            Self::Swap => "SWAP",
            Self::Reflection => "Reflection",
            Self::ReversibleBoolean => "ReversibleBoolean",
            Self::DenseMatrix => "DenseMatrix",
            Self::DiagonalMatrix => "DiagonalMatrix",
            Self::SparseMatrix => "SparseMatrix",
            Self::Generic => "Generic gate",
            Self::ParametricRx => "ParametricRX",
            Self::ParametricRy => "ParametricRY",
            Self::ParametricRz => "ParametricRZ",
            Self::ParametricPauliRotation => "ParametricPauliRotation",
        }
    }

    /// Short, backend-neutral label for the gate body.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::I => "I",
            Self::X | Self::Cnot => "X",
            Self::Y => "Y",
            Self::Z | Self::Cz => "Z",
            Self::H => "H",
            Self::S => "S",
            Self::Sdag => "S†",
            Self::T => "T",
            Self::Tdag => "T†",
            Self::SqrtX => "√X",
            Self::SqrtXdag => "√X†",
            Self::SqrtY => "√Y",
            Self::SqrtYdag => "√Y†",
            Self::Projection0 => "P0",
            Self::Projection1 => "P1",
            Self::U1 => "U1",
            Self::U2 => "U2",
            Self::U3 => "U3",
            Self::XRotation => "RX",
            Self::YRotation => "RY",
            Self::ZRotation => "RZ",
            Self::Pauli => "Pauli",
            Self::PauliRotation => "PR",
            Self::Swap => "×",
            Self::Reflection => "Ref",
            Self::ReversibleBoolean => "ReB",
            Self::DenseMatrix => "DeM",
            Self::DiagonalMatrix => "DiM",
            Self::SparseMatrix => "SpM",
            Self::Generic => "GeG",
            Self::ParametricRx => "pRX",
            Self::ParametricRy => "pRY",
            Self::ParametricRz => "pRZ",
            Self::ParametricPauliRotation => "pPR",
        }
    }

    /// Returns true for the two-qubit controlled inversion, which is drawn
    /// with a target glyph rather than a labelled box.
    #[must_use]
    pub fn is_controlled_inversion(self) -> bool {
        matches!(self, Self::Cnot)
    }
}

impl FromStr for GateKind {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| Error::UnknownGateKind(tag.to_string()))
    }
}

impl Display for GateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}
