//! Report export
//!
//! Writes analysis results as CSV tables plus a JSON summary into one
//! output directory.

use crate::app::analysis::AnalysisReport;
use crate::app::classifier::LetterClassification;
use crate::app::grouper::NameGroups;
use crate::constants::{
    DOMAIN_STRUCTURE_FILE, LETTER_SEPARATOR, LIST_SEPARATOR, NAME_GROUPS_FILE,
    SUMMARY_JSON_FILE, SUMMARY_STATISTICS_FILE,
};
use crate::domain::pair::SimilarityPair;
use crate::domain::stats::{SummaryStatistics, TierStatistics};
use crate::domain::tier::SimilarityTier;
use crate::infra::domain_source::SourceInfo;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Export failure
#[derive(Debug, Error)]
pub enum ExportError {
    /// Writing `path` failed; files in `written` were completed before it
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        written: Vec<PathBuf>,
        #[source]
        source: io::Error,
    },
}

impl ExportError {
    /// Files completed before the failure
    pub fn written(&self) -> &[PathBuf] {
        match self {
            ExportError::Write { written, .. } => written,
        }
    }
}

/// Pair table file name for a tier
///
/// Format: `similarity_{tier}.csv`
pub fn tier_file_name(tier: SimilarityTier) -> String {
    format!("similarity_{}.csv", tier.name())
}

/// Statistics table file name for a tier
///
/// Format: `similarity_{tier}_stats.csv`
pub fn tier_stats_file_name(tier: SimilarityTier) -> String {
    format!("similarity_{}_stats.csv", tier.name())
}

#[derive(Serialize)]
struct PairRecord<'r> {
    domain_1: &'r str,
    domain_2: &'r str,
    common_letters: String,
    common_count: usize,
    similarity_percent: f64,
}

impl<'r> From<&'r SimilarityPair<'_>> for PairRecord<'r> {
    fn from(pair: &'r SimilarityPair<'_>) -> Self {
        Self {
            domain_1: pair.domain_a,
            domain_2: pair.domain_b,
            common_letters: pair.common_letters.join(LETTER_SEPARATOR),
            common_count: pair.common_count,
            similarity_percent: pair.similarity_percent(),
        }
    }
}

#[derive(Serialize)]
struct GroupRecord<'r> {
    company: &'r str,
    similar_names: String,
    scores: String,
}

#[derive(Serialize)]
struct MetricRecord<'r> {
    metric: &'r str,
    value: String,
}

#[derive(Serialize)]
struct TierSummary {
    perfect: TierStatistics,
    medium: TierStatistics,
    basic: TierStatistics,
}

#[derive(Serialize)]
struct SummaryDocument<'r> {
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'r SourceInfo>,
    summary: &'r SummaryStatistics,
    tiers: TierSummary,
}

/// Tracks the files written into one output directory
struct Exporter {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl Exporter {
    fn new(dir: &Path) -> Result<Self, ExportError> {
        let exporter = Self {
            dir: dir.to_path_buf(),
            written: Vec::new(),
        };
        fs::create_dir_all(dir).map_err(|source| exporter.failure(dir.to_path_buf(), source))?;
        Ok(exporter)
    }

    fn failure(&self, path: PathBuf, source: io::Error) -> ExportError {
        ExportError::Write {
            path,
            written: self.written.clone(),
            source,
        }
    }

    fn write_with(
        &mut self,
        file_name: &str,
        write: impl FnOnce(BufWriter<File>) -> io::Result<()>,
    ) -> Result<(), ExportError> {
        let path = self.dir.join(file_name);
        let result = File::create(&path).and_then(|file| write(BufWriter::new(file)));

        match result {
            Ok(()) => {
                debug!(path = %path.display(), "exported");
                self.written.push(path);
                Ok(())
            }
            Err(source) => Err(self.failure(path, source)),
        }
    }

    fn write_csv<R: Serialize>(
        &mut self,
        file_name: &str,
        records: impl IntoIterator<Item = R>,
    ) -> Result<(), ExportError> {
        self.write_with(file_name, |writer| {
            let mut csv = csv::Writer::from_writer(writer);
            for record in records {
                csv.serialize(record)?;
            }
            csv.flush()
        })
    }

    fn write_metrics<'m>(
        &mut self,
        file_name: &str,
        metrics: impl IntoIterator<Item = (&'m str, String)>,
    ) -> Result<(), ExportError> {
        self.write_csv(
            file_name,
            metrics
                .into_iter()
                .map(|(metric, value)| MetricRecord { metric, value }),
        )
    }

    fn classification(
        &mut self,
        classification: &LetterClassification<'_>,
    ) -> Result<(), ExportError> {
        for (tier, pairs) in classification.iter() {
            if pairs.is_empty() {
                continue;
            }
            self.write_csv(&tier_file_name(tier), pairs.iter().map(PairRecord::from))?;

            let stats = TierStatistics::from_pairs(pairs);
            self.write_metrics(&tier_stats_file_name(tier), stats.metrics())?;
        }
        Ok(())
    }

    fn name_groups(&mut self, groups: &NameGroups) -> Result<(), ExportError> {
        if groups.is_empty() {
            return Ok(());
        }

        let records = groups.iter().map(|group| GroupRecord {
            company: &group.anchor,
            similar_names: group.member_names().collect::<Vec<_>>().join(LIST_SEPARATOR),
            scores: group
                .members
                .iter()
                .map(|m| m.score.to_string())
                .collect::<Vec<_>>()
                .join(LIST_SEPARATOR),
        });
        self.write_csv(NAME_GROUPS_FILE, records)
    }

    fn finish(self) -> Vec<PathBuf> {
        info!(
            dir = %self.dir.display(),
            files = self.written.len(),
            "export complete"
        );
        self.written
    }
}

fn source_metrics(source: &SourceInfo) -> Vec<(&'static str, String)> {
    vec![
        ("Input file", source.path.display().to_string()),
        ("Domain column", source.domain_column.clone()),
        ("Total rows", source.total_rows.to_string()),
        ("Columns", source.columns.join(LIST_SEPARATOR)),
        ("File size (bytes)", source.file_size.to_string()),
    ]
}

/// Export every artifact of an analysis run
///
/// Pair tables and the name-groups table are skipped when empty. Returns the
/// written paths in write order; the first failure aborts the rest.
pub fn export_report(
    report: &AnalysisReport<'_>,
    source: Option<&SourceInfo>,
    output_dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, ExportError> {
    let mut exporter = Exporter::new(output_dir.as_ref())?;

    exporter.classification(&report.classification)?;
    exporter.name_groups(&report.groups)?;
    exporter.write_csv(DOMAIN_STRUCTURE_FILE, &report.domain_patterns)?;

    let mut metrics = source.map(source_metrics).unwrap_or_default();
    metrics.extend(report.summary.metrics());
    exporter.write_metrics(SUMMARY_STATISTICS_FILE, metrics)?;

    let document = SummaryDocument {
        source,
        summary: &report.summary,
        tiers: TierSummary {
            perfect: report.tier_statistics(SimilarityTier::Perfect),
            medium: report.tier_statistics(SimilarityTier::Medium),
            basic: report.tier_statistics(SimilarityTier::Basic),
        },
    };
    exporter.write_with(SUMMARY_JSON_FILE, |mut writer| {
        serde_json::to_writer_pretty(&mut writer, &document)?;
        writer.write_all(b"\n")?;
        writer.flush()
    })?;

    Ok(exporter.finish())
}

/// Export the pair tables and their statistics
pub fn export_classification(
    classification: &LetterClassification<'_>,
    output_dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, ExportError> {
    let mut exporter = Exporter::new(output_dir.as_ref())?;
    exporter.classification(classification)?;
    Ok(exporter.finish())
}

/// Export the name-groups table (nothing when there are no groups)
pub fn export_name_groups(
    groups: &NameGroups,
    output_dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, ExportError> {
    let mut exporter = Exporter::new(output_dir.as_ref())?;
    exporter.name_groups(groups)?;
    Ok(exporter.finish())
}
