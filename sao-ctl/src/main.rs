use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use librsao::{SAOFile, parse_file};
use log::{LevelFilter, debug, info};
use saoctl::{
    config::CtlConfig,
    export::{DumpFormat, summary_line, write_dump},
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sao-ctl")]
#[command(about = "SAO ionogram inspection and export tool", long_about = None)]
struct Cli {
    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a summary of every record in an SAO file
    Inspect {
        /// SAO file, plain or gzip-compressed
        input: PathBuf,

        /// Optional config file with decode options
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Export traces as CSV or all records as JSON
    Dump {
        /// SAO file, plain or gzip-compressed
        input: PathBuf,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = DumpFormat::Csv)]
        format: DumpFormat,

        /// Optional config file with decode options
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Decode every matching file in a directory
    Scan {
        /// Input directory containing SAO files
        #[arg(short, long)]
        input: PathBuf,

        /// File name glob; overrides the config file
        #[arg(short, long)]
        pattern: Option<String>,

        /// Optional config file with decode and scan options
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Generate example configuration file
    GenConfig {
        /// Output path for the configuration file
        #[arg(short, long, default_value = "sao-ctl.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_target(false)
        .format_timestamp_secs()
        .init();

    match cli.command {
        Commands::Inspect { input, config } => {
            inspect_file(&input, config.as_deref())?;
        }
        Commands::Dump {
            input,
            output,
            format,
            config,
        } => {
            dump_file(&input, output.as_deref(), format, config.as_deref())?;
        }
        Commands::Scan {
            input,
            pattern,
            config,
        } => {
            scan_directory(&input, pattern.as_deref(), config.as_deref())?;
        }
        Commands::GenConfig { output } => {
            generate_config_file(&output)?;
        }
    }

    Ok(())
}

fn load_file(input: &Path, config: &CtlConfig) -> Result<SAOFile> {
    parse_file(input, &config.decode)
        .with_context(|| format!("Failed to decode {}", input.display()))
}

fn inspect_file(input: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = CtlConfig::load_or_default(config_path)?;
    let file = load_file(input, &config)?;

    println!("File: {}", file.source());
    println!("Records: {}", file.record_count());
    println!("{}", "=".repeat(80));

    for (i, record) in file.records().iter().enumerate() {
        println!("[{}] {}", i, record);

        let traces: Vec<_> = record.traces().into_iter().filter(|t| !t.is_empty()).collect();
        if !traces.is_empty() {
            println!("  Traces:");
            for trace in traces {
                println!(
                    "    {:<6} {:<36} {:>4} points",
                    trace.spec.name,
                    trace.spec.label,
                    trace.frequencies.len().min(trace.heights.len())
                );
            }
        }
        println!("{}", "-".repeat(80));
    }

    Ok(())
}

fn dump_file(
    input: &Path,
    output: Option<&Path>,
    format: DumpFormat,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = CtlConfig::load_or_default(config_path)?;
    let file = load_file(input, &config)?;

    match output {
        Some(path) => {
            let out = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(out);
            write_dump(&file, format, &mut writer)?;
            writer.flush()?;
            info!(
                "Wrote {} records from {} to {}",
                file.record_count(),
                input.display(),
                path.display()
            );
        }
        None => {
            let stdout = std::io::stdout();
            write_dump(&file, format, stdout.lock())?;
        }
    }

    Ok(())
}

fn scan_directory(
    input_dir: &Path,
    pattern: Option<&str>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = CtlConfig::load_or_default(config_path)?;
    let pattern = pattern.unwrap_or(&config.scan.pattern);

    let full_pattern = if config.scan.recursive {
        input_dir.join("**").join(pattern)
    } else {
        input_dir.join(pattern)
    };
    let full_pattern = full_pattern.to_string_lossy();

    println!("Scanning directory: {}", input_dir.display());
    println!("Pattern: {}", full_pattern);
    println!();

    let entries = glob::glob(&full_pattern)
        .with_context(|| format!("Invalid glob pattern: {}", full_pattern))?;

    let mut processed_count = 0;
    let mut record_count = 0;
    let mut error_count = 0;

    for entry in entries {
        let path = match entry {
            Ok(path) if path.is_file() => path,
            Ok(path) => {
                debug!("skipping {}", path.display());
                continue;
            }
            Err(e) => {
                eprintln!("  {} ... ERROR: {}", e.path().display(), e);
                error_count += 1;
                continue;
            }
        };

        match load_file(&path, &config) {
            Ok(file) => {
                let first = file
                    .records()
                    .first()
                    .map(summary_line)
                    .unwrap_or_else(|| "no records".to_string());
                println!(
                    "  {} ... OK: {} records, {}",
                    path.display(),
                    file.record_count(),
                    first
                );
                processed_count += 1;
                record_count += file.record_count();
            }
            Err(e) => {
                eprintln!("  {} ... ERROR: {:#}", path.display(), e);
                error_count += 1;
            }
        }
    }

    println!();
    println!("Summary:");
    println!("  Files decoded: {}", processed_count);
    println!("  Records: {}", record_count);
    println!("  Errors: {}", error_count);

    if error_count > 0 {
        anyhow::bail!("Scan completed with {} errors", error_count);
    }

    Ok(())
}

fn generate_config_file(output_path: &Path) -> Result<()> {
    println!(
        "Generating example configuration file: {}",
        output_path.display()
    );

    let config = CtlConfig::default_example();

    config
        .save_to_file(output_path)
        .context("Failed to save configuration file")?;

    println!("Configuration file generated successfully!");
    println!();
    println!("Decode options:");
    println!("  index_layout  = {:?}", config.decode.index_layout);
    println!("  separators    = {:?}", config.decode.separators);
    println!("  unused_groups = {:?}", config.decode.unused_groups);
    println!();
    println!(
        "Use it with: sao-ctl scan -i <dir> -c {}",
        output_path.display()
    );

    Ok(())
}
