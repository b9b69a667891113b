// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

mod circuit;
pub mod compile;
mod descriptor;
mod error;
mod gate;
mod layout;
pub mod render;

pub use circuit::{Circuit, Operation, Parameter};
pub use descriptor::{CircuitSource, GateDescriptor, extract, layout_circuit};
pub use error::Error;
pub use gate::GateKind;
pub use layout::{
    CircuitData, GATE_HEIGHT, GATE_WIDTH, GHOST_KIND, GateCell, GhostCell, LayoutCell, layout,
};
