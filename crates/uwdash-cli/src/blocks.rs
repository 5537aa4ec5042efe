//! Block rendering and validation commands.

use anyhow::Context;
use serde_json::{json, Map, Value};
use uwdash_core::AppConfig;
use uwdash_feeds::Renderer;

fn print_json(value: &impl serde::Serialize, pretty: bool) -> anyhow::Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}

fn load(config: &AppConfig) -> anyhow::Result<uwdash_core::BlocksFile> {
    uwdash_core::load_blocks(&config.blocks_path)
        .with_context(|| format!("loading {}", config.blocks_path.display()))
}

/// Render a single block by id.
///
/// # Errors
///
/// Returns an error if the blocks file is invalid, the id is unknown, or the
/// render fails.
pub(crate) async fn run_render(config: &AppConfig, id: &str, pretty: bool) -> anyhow::Result<()> {
    let blocks = load(config)?;
    let block = blocks
        .find(id)
        .with_context(|| format!("no block configured with id '{id}'"))?;

    let renderer = Renderer::from_app_config(config)?;
    let rendered = renderer
        .render(block)
        .await
        .with_context(|| format!("rendering block '{id}'"))?;
    print_json(&rendered, pretty)
}

/// Render every configured block, printing an object keyed by block id.
///
/// Failed blocks appear with an `error` entry; the command fails afterwards
/// if any block failed.
///
/// # Errors
///
/// Returns an error if the blocks file is invalid or any block failed.
pub(crate) async fn run_render_all(config: &AppConfig, pretty: bool) -> anyhow::Result<()> {
    let blocks = load(config)?;
    let renderer = Renderer::from_app_config(config)?;

    let mut out = Map::new();
    let mut failed = 0usize;
    for (id, result) in renderer.render_all(&blocks).await {
        let value = match result {
            Ok(rendered) => serde_json::to_value(&rendered)?,
            Err(e) => {
                failed += 1;
                json!({ "error": e.to_string() })
            }
        };
        out.insert(id, value);
    }
    print_json(&Value::Object(out), pretty)?;

    if failed > 0 {
        anyhow::bail!("{failed} of {} blocks failed to render", blocks.blocks.len());
    }
    Ok(())
}

/// Check the blocks file and print one line per block.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or validated.
pub(crate) fn run_validate(config: &AppConfig) -> anyhow::Result<()> {
    let blocks = load(config)?;
    println!("{:<24}KIND", "ID");
    for block in &blocks.blocks {
        println!("{:<24}{}", block.id, block.kind());
    }
    println!(
        "{} blocks valid in {}",
        blocks.blocks.len(),
        config.blocks_path.display()
    );
    Ok(())
}
