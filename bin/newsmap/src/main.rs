//! newsmap CLI
//!
//! Serves and renders Google News and Video sitemaps from configured feeds.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for newsmap.
#[derive(Parser)]
#[command(
    name = "newsmap",
    version,
    about = "Google News and Video sitemap server"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "newsmap.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Serve the sitemap index and section sitemaps over HTTP
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
    },
    /// Print the sitemap index
    Index,
    /// Print the sitemap of one section, or of every section
    Render {
        /// Section name; all sections when omitted
        section: Option<String>,
        /// Page number
        #[arg(short, long)]
        page: Option<String>,
    },
    /// Validate configuration, sources and produced entries
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    newsmap::init_tracing(cli.verbose);

    match cli.command {
        Commands::Serve { port } => {
            newsmap::cmd::serve::run(&cli.config, port).await?;
        }
        Commands::Index => {
            newsmap::cmd::index::run(&cli.config)?;
        }
        Commands::Render { section, page } => {
            newsmap::cmd::render::run(&cli.config, section.as_deref(), page.as_deref())?;
        }
        Commands::Check { strict } => {
            newsmap::cmd::check::run(&cli.config, strict)?;
        }
    }

    Ok(())
}
