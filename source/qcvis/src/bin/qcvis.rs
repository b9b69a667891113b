// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use clap::{Parser, ValueEnum};
use log::info;
use miette::{IntoDiagnostic, WrapErr, bail};
use qcvis::{
    Circuit,
    compile::{CompilerConfig, LatexCompiler},
    layout_circuit,
    render::{
        canvas::{self, CanvasConfig},
        latex::{self, LatexConfig},
    },
};
use std::{fs, io::Write, path::PathBuf};

/// Lays out a quantum circuit and renders it as a diagram.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// JSON circuit description.
    circuit: PathBuf,

    /// Output format.
    #[arg(long, short, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Write the diagram here instead of to standard output. Required for
    /// `png`.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Pixels per grid unit for `svg` and `png` output.
    #[arg(long, default_value_t = CanvasConfig::default().scale)]
    scale: f32,

    /// Compile the circuit to `<NAME>.pdf` in the current directory instead
    /// of rendering it.
    #[arg(long, value_name = "NAME")]
    pdf: Option<String>,

    /// LaTeX compiler used with `--pdf`.
    #[arg(long, default_value = "pdflatex")]
    compiler: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Latex,
    Svg,
    Png,
    Json,
}

fn main() -> miette::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let json = fs::read_to_string(&cli.circuit)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read `{}`", cli.circuit.display()))?;
    let circuit = Circuit::from_json(&json)?;
    let data = layout_circuit(&circuit)?;
    info!(
        "laid out {} operations on {} rows and {} columns",
        circuit.operations.len(),
        data.num_rows(),
        data.num_columns()
    );

    if let Some(name) = &cli.pdf {
        let markup = latex::to_latex(&data, &LatexConfig::standalone())?;
        let compiler = LatexCompiler::new(CompilerConfig {
            program: cli.compiler.clone(),
            ..CompilerConfig::default()
        })?;
        let pdf = compiler.compile(&markup, name)?;
        println!("{}", pdf.display());
        return Ok(());
    }

    let canvas_config = CanvasConfig {
        scale: cli.scale,
        ..CanvasConfig::default()
    };
    let rendered = match cli.format {
        Format::Text => data.to_string(),
        Format::Latex => latex::to_latex(&data, &LatexConfig::standalone())?,
        Format::Svg => canvas::draw(&data, &canvas_config)?.to_svg(),
        Format::Json => serde_json::to_string_pretty(&data).into_diagnostic()?,
        Format::Png => {
            let Some(path) = &cli.output else {
                bail!("`--output` is required for PNG output");
            };
            canvas::draw(&data, &canvas_config)?.save_png(path)?;
            return Ok(());
        }
    };

    match &cli.output {
        Some(path) => fs::write(path, rendered)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to write `{}`", path.display()))?,
        None => std::io::stdout()
            .write_all(rendered.as_bytes())
            .into_diagnostic()?,
    }

    Ok(())
}
