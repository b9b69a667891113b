// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Typeset markup for the `qcircuit` LaTeX package.


use crate::{CircuitData, Error, GateCell, GateKind, Parameter};
use std::fmt::Write;

/// Gate tag to `qcircuit` token.
static LATEX_TOKENS: &[(&str, &str)] = &[
    ("I", "I"),
    ("X", "X"),
    ("Y", "Y"),
    ("Z", "Z"),
    ("H", "H"),
    ("S", "S"),
    ("Sdag", r"S^\dag"),
    ("T", "T"),
    ("Tdag", r"T^\dag"),
    ("sqrtX", r"\sqrt{X}"),
    ("sqrtXdag", r"\sqrt{X^\dag}"),
    ("sqrtY", r"\sqrt{Y}"),
    ("sqrtYdag", r"\sqrt{Y^\dag}"),
    ("Projection-0", "P0"),
    ("Projection-1", "P1"),
    ("U1", "U1"),
    ("U2", "U2"),
    ("U3", "U3"),
    ("X-rotation", "RX"),
    ("Y-rotation", "RY"),
    ("Z-rotation", "RZ"),
    ("Pauli", "Pauli"),
    ("Pauli-rotation", "PR"),
    ("CZ", "CZ"),
    ("CNOT", r"\targ"),
    ("SWAP", "SWAP"),
    ("Reflection", "Ref"),
    ("ReversibleBoolean", "ReB"),
    ("DenseMatrix", "DeM"),
    ("DiagonalMatrix", "DiM"),
    ("SparseMatrix", "SpM"),
    ("Generic gate", "GeG"),
    ("ParametricRX", "pRX"),
    ("ParametricRY", "pRY"),
    ("ParametricRZ", "pRZ"),
    ("ParametricPauliRotation", "pPR"),
];

const WIRE: &str = r"\qw";

/// Tokens that are complete `qcircuit` commands rather than box labels.
const COMMAND_TOKENS: [&str; 1] = [r"\targ"];

#[derive(Clone, Debug)]
pub struct LatexConfig {
    /// Wrap the circuit in a `standalone` document that can be compiled
    /// directly.
    pub standalone: bool,
    /// Column separation, in em.
    pub column_spacing_em: f64,
    /// Row separation, in em.
    pub row_spacing_em: f64,
}

impl LatexConfig {
    #[must_use]
    pub fn standalone() -> Self {
        Self {
            standalone: true,
            ..Default::default()
        }
    }
}

impl Default for LatexConfig {
    fn default() -> Self {
        Self {
            standalone: false,
            column_spacing_em: 1.0,
            row_spacing_em: 0.7,
        }
    }
}

/// Looks up the `qcircuit` token for a gate tag.
pub fn display_token(tag: &str) -> Result<&'static str, Error> {
    LATEX_TOKENS
        .iter()
        .find(|(key, _)| *key == tag)
        .map(|(_, token)| *token)
        .ok_or_else(|| Error::UnmappedDisplayToken(tag.to_string()))
}

/// Emits `qcircuit` markup for the laid-out circuit.
///
/// Every row is padded to the width of the longest row and closed with a
/// trailing wire.
pub fn to_latex(data: &CircuitData, config: &LatexConfig) -> Result<String, Error> {
    let mut grid = vec![vec![WIRE.to_string(); data.num_columns()]; data.num_rows()];

    for (row, column, gate) in data.gates() {
        let token = display_token(gate.kind.tag())?;
        place_gate(&mut grid, row, column, gate, token);
    }

    let mut output = String::new();
    if config.standalone {
        output.push_str("\\documentclass[border=2pt]{standalone}\n");
        output.push_str("\\usepackage[braket, qm]{qcircuit}\n");
        output.push_str("\\begin{document}\n");
    }

    let _ = writeln!(
        output,
        "\\Qcircuit @C={:.1}em @R={:.1}em @!R {{",
        config.column_spacing_em, config.row_spacing_em
    );
    let last = grid.len().saturating_sub(1);
    for (row, cells) in grid.iter().enumerate() {
        let _ = write!(output, "    \\lstick{{q_{{{row}}}}}");
        for cell in cells.iter().map(String::as_str).chain(std::iter::once(WIRE)) {
            let _ = write!(output, " & {cell}");
        }
        output.push_str(if row == last { "\n" } else { " \\\\\n" });
    }
    output.push_str("}\n");

    if config.standalone {
        output.push_str("\\end{document}\n");
    }

    Ok(output)
}

fn place_gate(grid: &mut [Vec<String>], anchor: usize, column: usize, gate: &GateCell, token: &str) {
    let mut label = token.to_string();
    if !gate.parameters.is_empty() {
        let args = gate
            .parameters
            .iter()
            .map(latex_parameter)
            .collect::<Vec<_>>()
            .join(", ");
        let _ = write!(&mut label, "({args})");
    }

    if gate.kind == GateKind::Swap {
        let mut targets = gate.target_rows.clone();
        targets.sort_unstable();
        let mut previous = None;
        for target in targets {
            grid[target][column] = match previous {
                None => r"\qswap".to_string(),
                Some(above) => format!(r"\qswap \qwx[-{}]", target - above),
            };
            previous = Some(target);
        }
    } else if COMMAND_TOKENS.contains(&token) {
        for &target in &gate.target_rows {
            grid[target][column].clone_from(&label);
        }
    } else if gate.size > 1 {
        grid[anchor][column] = format!(r"\multigate{{{}}}{{{label}}}", gate.size - 1);
        for row in &mut grid[anchor + 1..anchor + gate.size] {
            row[column] = format!(r"\ghost{{{label}}}");
        }
    } else {
        grid[anchor][column] = format!(r"\gate{{{label}}}");
    }

    for &control in &gate.control_rows {
        #[allow(clippy::cast_possible_wrap)]
        let distance = anchor as isize - control as isize;
        grid[control][column] = format!(r"\ctrl{{{distance}}}");
    }
}

/// Numbers as written; symbols upright, with TeX specials escaped.
fn latex_parameter(parameter: &Parameter) -> String {
    match parameter {
        Parameter::Number(_) => parameter.to_string(),
        Parameter::Symbol(name) => {
            let mut escaped = String::with_capacity(name.len() + 10);
            escaped.push_str(r"\mathrm{");
            for c in name.chars() {
                match c {
                    '_' | '&' | '#' | '%' | '$' | '{' | '}' => {
                        escaped.push('\\');
                        escaped.push(c);
                    }
                    '\\' => escaped.push_str(r"\backslash{}"),
                    '^' => escaped.push_str(r"\hat{}"),
                    '~' => escaped.push_str(r"\sim{}"),
                    _ => escaped.push(c),
                }
            }
            escaped.push('}');
            escaped
        }
    }
}
