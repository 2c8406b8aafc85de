//! narrec CLI - inspect, validate and re-emit NarrativeService records
//!
//! Records are read as NDJSON (one JSON object per line) from a file or stdin.

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process;

use narrec::codegen::{write_record_module, RustCodegenConfig};
use narrec::config::{CliOverrides, NarrecConfig};
use narrec::serialization::{NdjsonReader, NdjsonWriter};
use narrec::{narrative, SchemaRegistry};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "narrec")]
#[command(version, about = "Schema-driven codec for NarrativeService records", long_about = None)]
struct Cli {
    /// Additional directory of schema documents (repeatable)
    #[arg(long = "schema-dir", global = true)]
    schema_dirs: Vec<PathBuf>,

    /// Do not load the built-in NarrativeService catalog
    #[arg(long, global = true)]
    no_builtin: bool,

    /// Path to config file (default: ./narrec.yaml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered schemas and service methods
    List,

    /// Decode every record and report errors and missing required fields
    Check {
        /// Schema to decode against
        #[arg(short, long)]
        schema: String,

        /// NDJSON input (default: stdin)
        input: Option<PathBuf>,
    },

    /// Decode records and re-emit them as canonical NDJSON
    Decode {
        /// Schema to decode against
        #[arg(short, long)]
        schema: String,

        /// NDJSON input (default: stdin)
        input: Option<PathBuf>,
    },

    /// Print a readable description of every record
    Describe {
        /// Schema to decode against
        #[arg(short, long)]
        schema: String,

        /// NDJSON input (default: stdin)
        input: Option<PathBuf>,
    },

    /// Generate typed Rust wrappers for the registered schemas
    Generate {
        /// Output file for generated code
        #[arg(short, long, default_value = "records.rs")]
        output: PathBuf,

        /// Path the generated code uses to reach this crate
        #[arg(long, default_value = "narrec")]
        crate_path: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        schema_dirs: cli.schema_dirs.clone(),
        no_builtin: cli.no_builtin,
    };
    let config = match NarrecConfig::load(overrides, cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let result = build_registry(&config).and_then(|registry| match cli.command {
        Commands::List => list_schemas(&registry),
        Commands::Check { schema, input } => check_records(&registry, &schema, input),
        Commands::Decode { schema, input } => decode_records(&registry, &schema, input),
        Commands::Describe { schema, input } => describe_records(&registry, &schema, input),
        Commands::Generate { output, crate_path } => {
            generate_wrappers(&registry, output, crate_path)
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Built-in catalog (unless disabled) plus every configured schema directory
fn build_registry(config: &NarrecConfig) -> Result<SchemaRegistry, String> {
    let mut registry = if config.builtin {
        narrative::new_registry()
            .map_err(|e| format!("Failed to load built-in schemas: {}", e))?
    } else {
        SchemaRegistry::new()
    };

    for dir in &config.schema_dirs {
        if !dir.is_dir() {
            return Err(format!("Schema directory not found: {}", dir.display()));
        }
        registry
            .load_dir(dir)
            .map_err(|e| format!("Failed to load schemas from {}: {}", dir.display(), e))?;
    }

    tracing::debug!("Registry holds {} schemas", registry.len());
    Ok(registry)
}

fn open_input(input: Option<&Path>) -> Result<Box<dyn BufRead>, String> {
    match input {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| format!("Failed to open {}: {}", path.display(), e))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn reader_for(
    registry: &SchemaRegistry,
    schema: &str,
    input: Option<PathBuf>,
) -> Result<NdjsonReader<Box<dyn BufRead>>, String> {
    let schema = registry.schema(schema).map_err(|e| e.to_string())?;
    Ok(NdjsonReader::new(open_input(input.as_deref())?, schema))
}

fn list_schemas(registry: &SchemaRegistry) -> Result<(), String> {
    for schema in registry.iter() {
        let required = schema
            .properties()
            .iter()
            .filter(|p| !p.is_optional())
            .count();
        println!(
            "{} ({} properties, {} required)",
            schema.name(),
            schema.len(),
            required
        );
        for property in schema.properties() {
            let marker = if property.is_optional() { "?" } else { "" };
            println!("  {}{}: {}", property.name(), marker, property.field_type());
        }
    }

    for service in registry.services() {
        println!();
        println!("service {}", service.name);
        for method in &service.methods {
            println!("  {}({}) -> {}", method.name, method.params, method.result);
        }
    }
    Ok(())
}

fn check_records(
    registry: &SchemaRegistry,
    schema: &str,
    input: Option<PathBuf>,
) -> Result<(), String> {
    let mut reader = reader_for(registry, schema, input)?;
    let mut total = 0usize;
    let mut failed = 0usize;

    while let Some(result) = reader.next() {
        total += 1;
        match result {
            Ok(record) => {
                let missing = record.missing_required();
                if !missing.is_empty() {
                    failed += 1;
                    tracing::warn!(
                        line = reader.line(),
                        "{} is missing required fields: {}",
                        record.schema_name(),
                        missing.join(", ")
                    );
                }
            }
            Err(e) => {
                failed += 1;
                eprintln!("  ✗ {}", e);
            }
        }
    }

    if failed > 0 {
        return Err(format!("{} of {} records failed validation", failed, total));
    }
    println!("✓ {} records valid against {}", total, schema);
    Ok(())
}

fn decode_records(
    registry: &SchemaRegistry,
    schema: &str,
    input: Option<PathBuf>,
) -> Result<(), String> {
    let reader = reader_for(registry, schema, input)?;
    let stdout = io::stdout();
    let mut writer = NdjsonWriter::new(stdout.lock());

    for result in reader {
        let record = result.map_err(|e| e.to_string())?;
        writer.write(&record).map_err(|e| e.to_string())?;
    }
    writer.flush().map_err(|e| e.to_string())
}

fn describe_records(
    registry: &SchemaRegistry,
    schema: &str,
    input: Option<PathBuf>,
) -> Result<(), String> {
    for result in reader_for(registry, schema, input)? {
        let record = result.map_err(|e| e.to_string())?;
        println!("{}", record.describe());
    }
    Ok(())
}

fn generate_wrappers(
    registry: &SchemaRegistry,
    output: PathBuf,
    crate_path: String,
) -> Result<(), String> {
    let config = RustCodegenConfig {
        crate_path,
        ..RustCodegenConfig::default()
    };
    write_record_module(registry, &config, &output)
        .map_err(|e| format!("Failed to write {}: {}", output.display(), e))?;
    println!("✓ Generated {}", output.display());
    Ok(())
}
