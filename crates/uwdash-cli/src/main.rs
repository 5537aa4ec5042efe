mod blocks;
mod options;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::options::OptionList;

#[derive(Debug, Parser)]
#[command(name = "uwdash-cli")]
#[command(about = "Render and inspect dashboard content blocks")]
struct Cli {
    /// Blocks file to use instead of `UWDASH_BLOCKS_PATH`
    #[arg(long, global = true)]
    blocks: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render one configured block and print it as JSON
    Render {
        /// Block id from the blocks file
        id: String,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Render every configured block
    RenderAll {
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Load and validate the blocks file without contacting any API
    Validate,
    /// List the selectable values for a block setting
    Options {
        /// Which list to print, e.g. country, language, topics, or sources
        #[arg(value_parser = options::parse_option_list)]
        list: OptionList,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let mut config = uwdash_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = cli.blocks {
        config.blocks_path = path;
    }

    match cli.command {
        Commands::Render { id, pretty } => blocks::run_render(&config, &id, pretty).await,
        Commands::RenderAll { pretty } => blocks::run_render_all(&config, pretty).await,
        Commands::Validate => blocks::run_validate(&config),
        Commands::Options { list } => options::run_options(&config, list).await,
    }
}

#[cfg(test)]
mod tests;
