use crate::commands::{GroupingArgs, IoArgs};
use crate::terminal::progress::{finish, pair_progress, progress_callback};
use anyhow::Context;
use domsim_engine::app::classifier::pair_count;
use domsim_engine::{AnalysisOptions, SimilarityTier, export_report, load_domains};
use std::time::Instant;
use tracing::info;

pub fn analyze(io: &IoArgs, grouping: &GroupingArgs) -> anyhow::Result<()> {
    let start = Instant::now();

    let dataset = load_domains(&io.input)
        .with_context(|| format!("failed to load domains from {}", io.input.display()))?;

    let bar = pair_progress(pair_count(dataset.domains.len()));
    let options = AnalysisOptions::default()
        .with_threshold(grouping.threshold)
        .with_candidate_limit(grouping.candidate_limit)
        .with_progress(progress_callback(&bar));

    let report = domsim_engine::analyze(&dataset.domains, options)?;
    finish(&bar);

    for tier in SimilarityTier::ALL {
        let stats = report.tier_statistics(tier);
        info!(
            "{} ({}): {} pairs, mean {} letters",
            tier,
            tier.description(),
            stats.count,
            stats.mean_common_count
        );
    }
    for (metric, value) in report.summary.metrics() {
        info!("{}: {}", metric, value);
    }

    let written = export_report(&report, Some(&dataset.info), &io.output)
        .with_context(|| format!("failed to export results to {}", io.output.display()))?;
    for path in &written {
        info!("saved {}", path.display());
    }

    info!("done in {:.2} seconds", start.elapsed().as_secs_f64());
    Ok(())
}
