// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    #[error("unknown gate kind `{0}`")]
    #[diagnostic(code("Qcvis.Extract.UnknownGateKind"))]
    #[diagnostic(help("gate kinds are case-sensitive, e.g. `CNOT`, `X-rotation`, `DenseMatrix`"))]
    UnknownGateKind(String),

    #[error("invalid gate descriptor for operation {index}: {reason}")]
    #[diagnostic(code("Qcvis.Layout.InvalidGateDescriptor"))]
    InvalidGateDescriptor { index: usize, reason: String },

    #[error("controlled-inversion gate at row {row}, column {column} has no control rows")]
    #[diagnostic(code("Qcvis.Canvas.MissingControlRows"))]
    MissingControlRows { row: usize, column: usize },

    #[error("no display token for gate kind `{0}`")]
    #[diagnostic(code("Qcvis.Latex.UnmappedDisplayToken"))]
    UnmappedDisplayToken(String),

    #[error("`{0}` not found")]
    #[diagnostic(code("Qcvis.Compile.ToolNotFound"))]
    #[diagnostic(help("install a LaTeX distribution and make sure the compiler is on PATH"))]
    ToolNotFound(String),

    #[error("LaTeX compilation failed, see `{}`", log.display())]
    #[diagnostic(code("Qcvis.Compile.CompilationFailed"))]
    CompilationFailed { log: PathBuf },

    #[error("malformed circuit description: {0}")]
    #[diagnostic(code("Qcvis.Circuit.Format"))]
    CircuitFormat(#[from] serde_json::Error),

    #[error("failed to rasterize figure: {0}")]
    #[diagnostic(code("Qcvis.Canvas.Raster"))]
    Raster(String),

    #[error("{context}")]
    #[diagnostic(code("Qcvis.Io"))]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(context: impl Into<String>) -> impl FnOnce(std::io::Error) -> Self {
        let context = context.into();
        move |source| Self::Io { context, source }
    }
}
