//! Truth table to voxel layout synthesizer - Command Line Interface

use clap::{Parser, ValueEnum};
use redstone_sop::{
    ConstantFalsePolicy, Exporter, GraphvizStyle, Layout, SynthesisConfig, TextRenderer,
    TruthTable, layout::DEFAULT_MAX_CONDUCTOR_RUN,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

#[derive(Debug, Clone, ValueEnum)]
enum Format {
    /// Layer by layer text dump of the grid
    Text,
    /// Graphviz DOT of the wiring
    Dot,
}

#[derive(Parser, Debug)]
#[command(name = "redstone-sop")]
#[command(about = "Synthesizes a truth table into a layered voxel circuit", long_about = None)]
#[command(version)]
struct Args {
    /// Truth table file, one row per line, output bit last
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "text")]
    format: Format,

    /// Longest conductor run allowed by the wiring check
    #[arg(long = "max-conductor-run", default_value_t = DEFAULT_MAX_CONDUCTOR_RUN)]
    max_conductor_run: usize,

    /// Emit nothing at all for a function that is never true
    #[arg(long = "omit-constant-false")]
    omit_constant_false: bool,

    /// Simulate every row of the table against the layout before writing it
    #[arg(long = "verify")]
    verify: bool,

    /// Output file (writes to stdout if not specified)
    #[arg(short = 'o', long = "out-file")]
    output_file: Option<PathBuf>,
}

fn write_output(layout: &Layout, format: &Format, mut out: impl Write) -> redstone_sop::Result<()> {
    match format {
        Format::Text => TextRenderer::new(out).export(layout.grid()),
        Format::Dot => {
            writeln!(out, "{}", layout.to_dot(GraphvizStyle::default()))?;
            out.flush()?;
            Ok(())
        }
    }
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();

    let args = Args::parse();

    let policy = if args.omit_constant_false {
        ConstantFalsePolicy::OmitCircuit
    } else {
        ConstantFalsePolicy::UnpoweredActuator
    };
    let config = SynthesisConfig::default()
        .with_max_conductor_run(args.max_conductor_run)
        .with_constant_false(policy);

    let table = match TruthTable::from_file(&args.input) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Error reading table '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    let layout = match Layout::from_table(&table, &config) {
        Ok(layout) => layout,
        Err(e) => {
            eprintln!("Error synthesizing layout: {}", e);
            process::exit(1);
        }
    };

    if args.verify {
        if let Err(e) = layout.verify(&table, &config) {
            eprintln!("Verification failed: {}", e);
            process::exit(1);
        }
    }

    let result = match &args.output_file {
        Some(path) => match File::create(path) {
            Ok(file) => write_output(&layout, &args.format, BufWriter::new(file)),
            Err(e) => {
                eprintln!("Error creating '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => write_output(&layout, &args.format, io::stdout().lock()),
    };

    if let Err(e) = result {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
}
