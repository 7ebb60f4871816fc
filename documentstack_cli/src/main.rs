mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "documentstack")]
#[command(about = "Generate PDFs from DocumentStack templates")]
struct Cli {
    /// Output format for the result summary: table or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a template to a PDF file
    Generate(Box<commands::generate::GenerateArgs>),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let debug = match &cli.command {
        Commands::Generate(args) => args.debug,
    };
    let directive = if debug {
        "documentstack=debug"
    } else {
        "documentstack=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    };

    match &cli.command {
        Commands::Generate(args) => commands::generate::run(args.as_ref(), &format).await?,
    }

    Ok(())
}
