//! # fedoc CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// FEDOC CLI — electronic fiscal document toolchain.
///
/// Renders documents to paginated PDFs, inspects the action gate, and
/// validates delivery contacts, all offline from document JSON.
#[derive(Parser, Debug)]
#[command(name = "fedoc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Render a document JSON to a paginated A4 PDF.
    Render(fedoc_cli::render::RenderArgs),
    /// Show permitted and denied actions for a document.
    Actions(fedoc_cli::actions::ActionsArgs),
    /// Validate and normalize a delivery contact.
    Contact(fedoc_cli::contact::ContactArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => {
            fedoc_cli::render::run(&args)?;
        }
        Commands::Actions(args) => {
            fedoc_cli::actions::run(&args)?;
        }
        Commands::Contact(args) => {
            fedoc_cli::contact::run(&args)?;
        }
    }

    Ok(())
}
