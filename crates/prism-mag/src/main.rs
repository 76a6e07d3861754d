//! prism-mag: CLI tool for forward modelling the magnetic field of prisms

use anyhow::{Context, Result};
use clap::Parser;
use prism_mag::{render, FieldComponent, ForwardConfig, OutputFormat, Survey};
use std::fs;
use std::path::PathBuf;
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(name = "prism-mag")]
#[command(about = "Compute the magnetic field of uniformly magnetized rectangular prisms")]
#[command(version)]
struct Args {
    /// Input JSON file (survey description)
    #[arg(short, long)]
    input: PathBuf,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (json, csv, report)
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Field component, overriding the survey's (b_x, b_y, b_z)
    #[arg(short, long)]
    component: Option<FieldComponent>,

    /// Evaluate observation points on a single thread
    #[arg(long)]
    serial: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let mut survey = Survey::load(&args.input)
        .with_context(|| format!("Failed to load survey: {:?}", args.input))?;
    if let Some(component) = args.component {
        survey.component = component;
    }

    let config = ForwardConfig {
        parallel: !args.serial,
    };

    let result = survey.run(&config).context("Forward computation failed")?;
    let rendered = render(&result, args.format)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write output file: {:?}", path))?;
            info!(points = result.values.len(), "Wrote {} to {:?}", result.component, path);
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from([
            "prism-mag", "-i", "survey.json", "--format", "csv", "--component", "b_y", "--serial",
        ])
        .unwrap();
        assert_eq!(args.input, PathBuf::from("survey.json"));
        assert_eq!(args.format, OutputFormat::Csv);
        assert_eq!(args.component, Some(FieldComponent::By));
        assert!(args.serial);
        assert!(args.output.is_none());
    }

    #[test]
    fn test_rejects_unknown_component() {
        let err = Args::try_parse_from(["prism-mag", "-i", "s.json", "-c", "b_q"]).unwrap_err();
        assert!(err.to_string().contains("b_q"));
    }
}
