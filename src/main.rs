use clap::Parser;
use gapedit::document_model::LineEnding;
use gapedit::document_model::encoding;
use gapedit::{RcLoader, Session};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Report the encoding and layout of text files, optionally re-encoding them.
#[derive(Parser, Debug)]
#[command(name = "gapedit", version)]
struct Cli {
    /// Files to open
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Read settings from this file instead of .gapeditrc
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Save the files in this encoding (e.g. utf-8, euc-jp, shift_jis)
    #[arg(long, value_name = "LABEL")]
    to_encoding: Option<String>,

    /// Save the files with this line ending: unix, dos or mac
    #[arg(long, value_name = "FORMAT")]
    fileformat: Option<String>,

    /// Write the converted file here instead of in place (one file only)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RcLoader::load_from(path),
        None => RcLoader::load_config(),
    };
    let session = Session::new(config);

    if cli.output.is_some() && cli.files.len() != 1 {
        return Err("--output needs exactly one input file".into());
    }
    let target_encoding = cli
        .to_encoding
        .as_deref()
        .map(encoding::encoding_for_label)
        .transpose()?;
    let line_ending = match cli.fileformat.as_deref() {
        Some(name) => {
            Some(LineEnding::from_name(name).ok_or_else(|| format!("Unknown file format: {name}"))?)
        }
        None => None,
    };

    for path in &cli.files {
        if !path.is_file() {
            return Err(format!("{}: no such file", path.display()).into());
        }
        let mut buffer = session.open_file(path)?;
        buffer.end_of_buffer();
        println!(
            "{}: {} [{}] {} bytes, {} lines",
            path.display(),
            buffer.file_encoding().name(),
            buffer.line_ending().name(),
            buffer.len(),
            buffer.current_line()
        );

        if target_encoding.is_none() && line_ending.is_none() {
            continue;
        }
        if let Some(file_encoding) = target_encoding {
            buffer.set_file_encoding(file_encoding);
        }
        if let Some(line_ending) = line_ending {
            buffer.set_line_ending(line_ending);
        }
        let bytes = match &cli.output {
            Some(output) => buffer.save_as(output)?,
            None => buffer.save()?,
        };
        println!("\"{}\" {bytes}B written", buffer.display_name());
    }

    Ok(())
}
