use crate::commands::{GroupingArgs, IoArgs};
use anyhow::Context;
use domsim_engine::domain::company::unique_company_names;
use domsim_engine::infra::report_io::export_name_groups;
use domsim_engine::{GroupOptions, group_names, load_domains};
use std::time::Instant;
use tracing::{info, warn};

pub fn groups(io: &IoArgs, grouping: &GroupingArgs) -> anyhow::Result<()> {
    let start = Instant::now();

    let dataset = load_domains(&io.input)
        .with_context(|| format!("failed to load domains from {}", io.input.display()))?;

    let names = unique_company_names(&dataset.domains);
    let options = GroupOptions::default()
        .with_threshold(grouping.threshold)
        .with_candidate_limit(grouping.candidate_limit);
    let groups = group_names(&names, &options)?;

    info!(
        "{} company names, {} with similar names",
        names.len(),
        groups.len()
    );
    if groups.is_empty() {
        warn!("no name groups at threshold {}", grouping.threshold);
    }

    let written = export_name_groups(&groups, &io.output)
        .with_context(|| format!("failed to export results to {}", io.output.display()))?;
    for path in &written {
        info!("saved {}", path.display());
    }

    info!("done in {:.2} seconds", start.elapsed().as_secs_f64());
    Ok(())
}
