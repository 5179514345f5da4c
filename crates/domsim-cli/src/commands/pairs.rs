use crate::commands::IoArgs;
use crate::terminal::progress::{finish, pair_progress, progress_callback};
use anyhow::Context;
use domsim_engine::app::classifier::{ClassifyOptions, classify_with_options, pair_count};
use domsim_engine::infra::report_io::export_classification;
use domsim_engine::load_domains;
use std::time::Instant;
use tracing::info;

pub fn pairs(io: &IoArgs) -> anyhow::Result<()> {
    let start = Instant::now();

    let dataset = load_domains(&io.input)
        .with_context(|| format!("failed to load domains from {}", io.input.display()))?;

    let bar = pair_progress(pair_count(dataset.domains.len()));
    let options = ClassifyOptions::default().with_progress(progress_callback(&bar));
    let classification = classify_with_options(&dataset.domains, options)?;
    finish(&bar);

    for (tier, pairs) in classification.iter() {
        info!("{}: {} pairs", tier, pairs.len());
    }

    let written = export_classification(&classification, &io.output)
        .with_context(|| format!("failed to export results to {}", io.output.display()))?;
    for path in &written {
        info!("saved {}", path.display());
    }

    info!("done in {:.2} seconds", start.elapsed().as_secs_f64());
    Ok(())
}
