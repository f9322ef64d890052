mod args;
mod config;
mod global;
mod handlers;

use args::Commands;
use clap::Parser;
use global::GlobalArgs;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "legacy-codec")]
#[command(version)]
#[command(about = "Encode, verify and migrate passwords stored with the legacy chunk codec", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

pub fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v/-q
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.global.log_filter()),
    )
    .format_timestamp(None)
    .init();

    let codec = config::load_codec(&cli.global)?;

    match cli.command {
        Commands::Encode(args) => handlers::encode::handle(args, &cli.global, &codec)?,
        Commands::Verify(args) => return handlers::verify::handle(args, &cli.global, &codec),
        Commands::Classify(args) => handlers::classify::handle(args)?,
        Commands::Migrate(args) => handlers::migrate::handle(args, &cli.global, &codec)?,
        Commands::Table(args) => handlers::table::handle(args, &codec)?,
        Commands::Check(args) => return handlers::check::handle(args, &cli.global, &codec),
    }

    Ok(ExitCode::SUCCESS)
}
