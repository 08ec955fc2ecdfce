//! ABG Interpreter - Entry point
//!
//! CLI Usage:
//!   cargo run                                      # Interpret the default (normal) values
//!   cargo run -- --paco2 60 --hco3 24              # Override individual measurements
//!   cargo run -- --hco3 10 --na 140 --cl 100 --json
//!   cargo run -- --diagram-csv diagram.csv         # Write diagram geometry for plotting

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use abg_interpreter::{
    config::{InputField, Parameters},
    export::{export_diagram_csv_to, export_report_json_to, write_report_json},
    AbgReading, AbgReport,
};

/// Parsed command line
#[derive(Debug, Default)]
struct CliOptions {
    paco2: Option<f64>,
    hco3: Option<f64>,
    na: Option<f64>,
    cl: Option<f64>,
    json: bool,
    diagram_csv: Option<PathBuf>,
    export_json: Option<PathBuf>,
    config_dir: Option<PathBuf>,
    help: bool,
}

fn print_help(params: &Parameters) {
    let inputs = &params.inputs;
    println!("ABG Interpreter");
    println!();
    println!("Usage: abg-interpreter [OPTIONS]");
    println!();
    println!("Options:");
    for (flag, field) in [
        ("--paco2", &inputs.paCO2),
        ("--hco3", &inputs.hco3),
        ("--na", &inputs.na),
        ("--cl", &inputs.cl),
    ] {
        println!(
            "  {:<8} X       {} (range {}-{}, default {})",
            flag, field.label, field.min, field.max, field.default
        );
    }
    println!("  --json             Print the report as JSON");
    println!("  --diagram-csv P    Write diagram geometry to CSV file P");
    println!("  --export-json P    Write a timestamped JSON report to file P");
    println!("  --config DIR       Load parameter files from DIR");
    println!("  --help, -h         Show this help");
}

/// Parse CLI arguments
fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<CliOptions> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .with_context(|| format!("{} expects a value", name))
        };
        match arg.as_str() {
            "--paco2" => options.paco2 = Some(parse_number("--paco2", &value("--paco2")?)?),
            "--hco3" => options.hco3 = Some(parse_number("--hco3", &value("--hco3")?)?),
            "--na" => options.na = Some(parse_number("--na", &value("--na")?)?),
            "--cl" => options.cl = Some(parse_number("--cl", &value("--cl")?)?),
            "--json" => options.json = true,
            "--diagram-csv" => options.diagram_csv = Some(PathBuf::from(value("--diagram-csv")?)),
            "--export-json" => options.export_json = Some(PathBuf::from(value("--export-json")?)),
            "--config" => options.config_dir = Some(PathBuf::from(value("--config")?)),
            "--help" | "-h" => options.help = true,
            other => bail!("Unknown argument: {} (try --help)", other),
        }
    }

    Ok(options)
}

fn parse_number(flag: &str, text: &str) -> Result<f64> {
    text.parse::<f64>()
        .with_context(|| format!("{} expects a number, got {:?}", flag, text))
}

fn value_or_default(value: Option<f64>, field: &InputField) -> f64 {
    value.unwrap_or(field.default)
}

fn main() -> Result<()> {
    env_logger::init();

    let options = parse_args(std::env::args().skip(1))?;

    let params = match &options.config_dir {
        Some(dir) => Parameters::load_from_dir(dir),
        None => Parameters::load_or_default(),
    };

    if options.help {
        print_help(&params);
        return Ok(());
    }

    let inputs = &params.inputs;
    let reading = AbgReading::new(
        value_or_default(options.paco2, &inputs.paCO2),
        value_or_default(options.hco3, &inputs.hco3),
        value_or_default(options.na, &inputs.na),
        value_or_default(options.cl, &inputs.cl),
    );
    reading.validate(inputs)?;
    log::debug!("Reading: {:?}", reading);

    let report = AbgReport::interpret(&reading, &params.reference)?;

    if options.json {
        let stdout = std::io::stdout();
        write_report_json(&report, stdout.lock())?;
        println!();
    } else {
        print!("{}", report);
    }

    if let Some(path) = &options.diagram_csv {
        export_diagram_csv_to(&report.diagram, path)
            .with_context(|| format!("writing diagram CSV to {}", path.display()))?;
    }
    if let Some(path) = &options.export_json {
        export_report_json_to(&report, path)
            .with_context(|| format!("writing JSON report to {}", path.display()))?;
    }

    Ok(())
}
