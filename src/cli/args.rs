use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Options shared by every command that builds a reader
#[derive(Args, Debug, Default)]
pub struct ReaderArgs {
    /// Normalization form applied after decoding (NFC or NFD); repeatable,
    /// replaces the forms from the settings file
    #[arg(short = 'n', long = "normalize", value_name = "FORM")]
    pub normalize: Vec<String>,

    /// Bytes captured for encoding detection (at least 1024)
    #[arg(long, value_name = "N")]
    pub peek_size: Option<usize>,
}

/// Arguments for converting input to UTF-8
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Output file (writes to stdout if not provided)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub reader: ReaderArgs,
}

/// Arguments for detecting the input encoding
#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Input file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Bytes captured for encoding detection (at least 1024)
    #[arg(long, value_name = "N")]
    pub peek_size: Option<usize>,
}

/// Arguments for printing the converted prefix
#[derive(Args, Debug)]
pub struct PeekArgs {
    /// Input file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Print the bytes as hex
    #[arg(long)]
    pub hex: bool,

    #[command(flatten)]
    pub reader: ReaderArgs,
}

/// Config subcommand actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
