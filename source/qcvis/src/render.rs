// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Backends that draw a laid-out circuit.
//!
//! Every adapter reads a [`CircuitData`](crate::CircuitData) and skips ghost
//! and absent cells; each owns its own gate-label vocabulary.

pub mod canvas;
pub mod latex;
mod text;
