// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Compiles typeset markup to PDF with an external LaTeX compiler.


use crate::Error;
use log::{info, warn};
use std::{
    io,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

#[derive(Clone, Debug)]
pub struct CompilerConfig {
    /// Compiler executable, looked up on `PATH`.
    pub program: String,
    /// Directory the compiled PDF is copied to.
    pub output_dir: PathBuf,
    /// File that receives the compiler output when compilation fails.
    pub error_log: PathBuf,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            program: "pdflatex".to_string(),
            output_dir: PathBuf::from("."),
            error_log: PathBuf::from("latex_error.log"),
        }
    }
}

pub struct LatexCompiler {
    config: CompilerConfig,
}

impl LatexCompiler {
    /// Creates a compiler after checking that the configured program can be
    /// started.
    pub fn new(config: CompilerConfig) -> Result<Self, Error> {
        let status = Command::new(&config.program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(_) => Ok(Self { config }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(Error::ToolNotFound(config.program))
            }
            Err(err) => Err(Error::io(format!("failed to start `{}`", config.program))(err)),
        }
    }

    #[must_use]
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compiles `markup` as `<output_name>.tex` and returns the path of the
    /// produced PDF in the output directory.
    ///
    /// The compiler runs in a temporary directory that is removed before
    /// returning. If it exits unsuccessfully its standard output followed by
    /// its standard error are written to the error log.
    pub fn compile(&self, markup: &str, output_name: &str) -> Result<PathBuf, Error> {
        let workdir = tempfile::tempdir()
            .map_err(Error::io("failed to create a temporary directory"))?;
        let source = workdir.path().join(format!("{output_name}.tex"));
        std::fs::write(&source, markup)
            .map_err(Error::io(format!("failed to write `{}`", source.display())))?;

        info!(
            "compiling `{}` with `{}`",
            source.display(),
            self.config.program
        );
        let output = Command::new(&self.config.program)
            .arg("-halt-on-error")
            .arg("-interaction=nonstopmode")
            .arg(format!("-output-directory={}", workdir.path().display()))
            .arg(&source)
            .stdin(Stdio::null())
            .output()
            .map_err(|err| {
                if err.kind() == io::ErrorKind::NotFound {
                    Error::ToolNotFound(self.config.program.clone())
                } else {
                    Error::io(format!("failed to run `{}`", self.config.program))(err)
                }
            })?;

        if !output.status.success() {
            let log = &self.config.error_log;
            warn!(
                "`{}` exited with {}, writing its output to `{}`",
                self.config.program,
                output.status,
                log.display()
            );
            let mut contents = output.stdout;
            contents.extend_from_slice(&output.stderr);
            std::fs::write(log, contents)
                .map_err(Error::io(format!("failed to write `{}`", log.display())))?;
            return Err(Error::CompilationFailed { log: log.clone() });
        }

        let pdf_name = format!("{output_name}.pdf");
        let destination = self.config.output_dir.join(&pdf_name);
        copy(&workdir.path().join(&pdf_name), &destination)?;
        info!("wrote `{}`", destination.display());
        Ok(destination)
    }
}

fn copy(from: &Path, to: &Path) -> Result<(), Error> {
    std::fs::copy(from, to).map_err(Error::io(format!(
        "failed to copy `{}` to `{}`",
        from.display(),
        to.display()
    )))?;
    Ok(())
}
