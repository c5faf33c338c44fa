use std::{env, fs};

use anyhow::Context;
use dining_hall_menu::{LopdfSource, PageSource, extract_text, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logger();

    let path = env::args()
        .nth(1)
        .context("usage: extract_text <menu.pdf>")?;
    let bytes = fs::read(&path).with_context(|| format!("failed to read {path}"))?;
    let source = LopdfSource::from_bytes(&bytes)?;

    println!("=== RUNS PER PAGE ===");
    for number in 1..=source.page_count() {
        let page = source.load_page(number).await?;
        let runs = source.text_runs(&page).await?;
        println!("{number}: {} runs", runs.len());
        for run in runs.iter().filter(|run| !run.trim().is_empty()) {
            println!("    {run:?}");
        }
    }

    println!("=== FULL PDF TEXT ===");
    println!("{}", extract_text(&source).await?);

    Ok(())
}
