//! Retro executable container CLI.
//!
//! This binary provides a single entry point for working with 8-bit program
//! containers. It performs:
//! 1. **Inspect:** Decode a container and print its structure (entries or segments).
//! 2. **Load:** Decode a container, apply it to a fresh 64 KiB memory, and report the entry point.
//! 3. **Format resolution:** Explicit `--format` flag, else file extension (`as`/`xex`), else magic sniff.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::Path;
use std::{fs, process};

use retroload_core::config::Config;
use retroload_core::formats::apple_single::{self, AppleSingle, Entry};
use retroload_core::formats::atari::AtariExecutable;
use retroload_core::image::LoadImage;
use retroload_core::sim::{Memory, load_image};

#[derive(Parser, Debug)]
#[command(
    name = "retroload",
    author,
    version,
    about = "Decode AppleSingle and Atari XEX program containers",
    long_about = "Decode 8-bit era executable containers into address-mapped load images.\n\nThe format is taken from --format, else the file extension (.as / .xex), else a magic-number sniff.\n\nExamples:\n  retroload inspect game.xex\n  retroload inspect program.as\n  retroload load game.xex --config retroload.json\n  RUST_LOG=retroload_core=trace retroload inspect game.xex"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a container and print its structure.
    Inspect {
        /// Container file to decode.
        file: String,

        /// Container format; defaults to extension, then magic sniff.
        #[arg(long, value_enum)]
        format: Option<Format>,

        /// JSON configuration file (projection settings).
        #[arg(long)]
        config: Option<String>,
    },

    /// Decode a container, apply it to a 64 KiB memory, and report the entry point.
    Load {
        /// Container file to decode.
        file: String,

        /// Container format; defaults to extension, then magic sniff.
        #[arg(long, value_enum)]
        format: Option<Format>,

        /// JSON configuration file (projection settings).
        #[arg(long)]
        config: Option<String>,
    },
}

/// Supported container formats, named after their conventional extensions.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    /// AppleSingle-wrapped Apple II binary.
    As,
    /// Atari DOS load file.
    Xex,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Inspect {
            file,
            format,
            config,
        } => cmd_inspect(&file, format, config.as_deref()),
        Commands::Load {
            file,
            format,
            config,
        } => cmd_load(&file, format, config.as_deref()),
    }
}

/// Decodes the container and prints its structure.
fn cmd_inspect(file: &str, format: Option<Format>, config_path: Option<&str>) {
    let bytes = read_program(file);
    let config = read_config(config_path);

    match resolve_format(file, format, &bytes) {
        Format::As => {
            let container = decode_apple(&bytes);
            println!("AppleSingle: {} ({} entries)", file, container.entries().len());
            for (n, entry) in container.entries().iter().enumerate() {
                match entry {
                    Entry::DataFork { data } => {
                        println!("  entry {}: data fork, {} byte(s)", n, data.len());
                    }
                    Entry::ProDosInfo {
                        access,
                        file_type,
                        auxiliary_type,
                    } => {
                        println!(
                            "  entry {}: ProDOS info, access={:#06x} type={:#06x} aux={:#010x}",
                            n, access, file_type, auxiliary_type
                        );
                    }
                }
            }
            summarize(&container.to_load_image(&config.load));
        }
        Format::Xex => {
            let executable = decode_atari(&bytes);
            println!(
                "Atari load file: {} ({} segments)",
                file,
                executable.segments().len()
            );
            for (n, segment) in executable.segments().iter().enumerate() {
                println!(
                    "  segment {}: {:#06x}..={:#06x} ({} byte(s)){}",
                    n,
                    segment.start_address,
                    segment.end_address(),
                    segment.data.len(),
                    if segment.is_run_vector() {
                        "  [run vector]"
                    } else {
                        ""
                    }
                );
            }
            match executable.run_address() {
                Some(run) => println!("  run address: {run:#06x}"),
                None => println!("  run address: none"),
            }
            summarize(&executable.to_load_image(&config.load));
        }
    }
}

/// Decodes the container, applies it to a fresh memory, and reports the result.
fn cmd_load(file: &str, format: Option<Format>, config_path: Option<&str>) {
    let bytes = read_program(file);
    let config = read_config(config_path);

    let image = match resolve_format(file, format, &bytes) {
        Format::As => decode_apple(&bytes).to_load_image(&config.load),
        Format::Xex => decode_atari(&bytes).to_load_image(&config.load),
    };

    let mut memory = Memory::new();
    match load_image(&mut memory, &image) {
        Ok(entry) => {
            println!(
                "[*] Loaded {}: {} byte(s) in {} segment(s), entry point {:#06x}",
                file,
                image.byte_len(),
                image.segments.len(),
                entry
            );
        }
        Err(e) => {
            eprintln!("[!] FATAL: Could not load '{file}': {e}");
            process::exit(1);
        }
    }
}

/// Prints the one-line projection summary shared by both formats.
fn summarize(image: &LoadImage) {
    println!(
        "  projected image: {} segment(s), {} byte(s), entry {:#06x}",
        image.segments.len(),
        image.byte_len(),
        image.entry_address
    );
}

fn decode_apple(bytes: &[u8]) -> AppleSingle {
    AppleSingle::decode(bytes).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: AppleSingle decode failed: {e}");
        process::exit(1);
    })
}

fn decode_atari(bytes: &[u8]) -> AtariExecutable {
    AtariExecutable::decode(bytes).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: load file decode failed: {e}");
        process::exit(1);
    })
}

/// Reads a container file from disk.
///
/// Exits the process with an error message if the file cannot be read.
fn read_program(path: &str) -> Vec<u8> {
    fs::read(path).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: Could not read file '{path}': {e}");
        process::exit(1);
    })
}

/// Reads projection configuration from a JSON file, or returns defaults.
fn read_config(path: Option<&str>) -> Config {
    let Some(path) = path else {
        return Config::default();
    };
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: Could not read config '{path}': {e}");
        process::exit(1);
    });
    serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: Could not parse config '{path}': {e}");
        process::exit(1);
    })
}

/// Picks the container format: flag, then extension, then magic sniff.
fn resolve_format(file: &str, format: Option<Format>, bytes: &[u8]) -> Format {
    if let Some(format) = format {
        return format;
    }
    match Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("as") => Format::As,
        Some("xex") => Format::Xex,
        _ => {
            if bytes.len() >= 4
                && u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
                    == apple_single::MAGIC
            {
                Format::As
            } else {
                Format::Xex
            }
        }
    }
}
