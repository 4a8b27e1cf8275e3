mod args;
mod config;
mod global;
mod handlers;

use clap::{Parser, Subcommand};

use args::{ConfigAction, ConvertArgs, DetectArgs, PeekArgs};
use global::GlobalArgs;

#[derive(Parser)]
#[command(name = "utf8-reader")]
#[command(version)]
#[command(about = "Detect the character encoding of a stream and convert it to UTF-8", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert input to UTF-8
    Convert(ConvertArgs),

    /// Print the detected encoding
    Detect(DetectArgs),

    /// Print the converted detection prefix without consuming the rest
    Peek(PeekArgs),

    /// Inspect settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.global.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let settings = config::load_settings(&cli.global)?;

    match cli.command {
        Commands::Convert(args) => handlers::convert::handle(args, &cli.global, &settings),
        Commands::Detect(args) => handlers::detect::handle(args, &cli.global, &settings),
        Commands::Peek(args) => handlers::peek::handle(args, &cli.global, &settings),
        Commands::Config { action } => handlers::config::handle(action, &cli.global, &settings),
    }
}
