//! CLI entry-point for relation enrichment.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{instrument, warn};

use crate::{
    config::Settings,
    corpus, enrich,
    enrich::translate::{DeepLTranslator, NullTranslator, TranslationCache, Translator},
};

/// Args for the `enrich` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Relation record CSV from `extract`.
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Destination CSV for the viz-ready table.
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Translation cache JSON file.
    #[arg(long)]
    pub cache: Option<PathBuf>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let input = args
        .input
        .unwrap_or_else(|| settings.join_output("dependence_analysis.csv"));
    let output = args
        .output
        .unwrap_or_else(|| settings.join_output("viz_ready.csv"));
    let cache_path = args
        .cache
        .unwrap_or_else(|| settings.join_data("translation_cache.json"));

    let records = corpus::load_relations_csv(&input)?;
    let mut cache = TranslationCache::load(cache_path)?;

    let translator: Box<dyn Translator> = if settings.deepl_api_key.is_empty() {
        warn!("DEEPL_API_KEY not set; relying on cached translations only");
        Box::new(NullTranslator)
    } else {
        Box::new(DeepLTranslator::new(settings.deepl_api_key.clone())?)
    };

    let rows = enrich::build_viz_table(&records, translator.as_ref(), &mut cache).await?;
    enrich::write_viz_csv(&output, &rows)?;
    cache.save()?;
    Ok(())
}
