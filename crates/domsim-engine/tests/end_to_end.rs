//! End-to-end analysis tests
//!
//! Load a domain file, run the full analysis and export the results, checking
//! concrete values at every step.

use std::fs;
use std::path::PathBuf;

use domsim_engine::constants::{NAME_GROUPS_FILE, SUMMARY_JSON_FILE, SUMMARY_STATISTICS_FILE};
use domsim_engine::{
    AnalysisOptions, LoadError, SimilarityTier, analyze, export_report, load_domains,
};
use tempfile::TempDir;

const FRUIT_CSV: &str = "rank,domain,visits\n1,apple.com,10\n2,apples.com,7\n3,banana.com,3\n";

fn write_input(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_fruit_domains_classification() {
    let domains = ["apple.com", "apples.com", "banana.com"];
    let report = analyze(&domains, AnalysisOptions::default()).unwrap();

    let perfect = report.classification.pairs(SimilarityTier::Perfect);
    assert_eq!(perfect.len(), 3);
    assert!(report.classification.pairs(SimilarityTier::Medium).is_empty());
    assert!(report.classification.pairs(SimilarityTier::Basic).is_empty());

    let rows: Vec<(&str, &str, usize, f64)> = perfect
        .iter()
        .map(|p| (p.domain_a, p.domain_b, p.common_count, p.similarity_percent()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("apple.com", "apples.com", 8, 80.0),
            ("apple.com", "banana.com", 5, 50.0),
            ("apples.com", "banana.com", 5, 50.0),
        ]
    );

    assert_eq!(perfect[1].common_letters.join(", "), "., a, c, m, o");
}

#[test]
fn test_fruit_domains_grouping() {
    let domains = ["apple.com", "apples.com", "banana.com"];
    let report = analyze(&domains, AnalysisOptions::default()).unwrap();

    assert_eq!(report.groups.len(), 2);
    let apple = report.groups.get("apple").unwrap();
    assert_eq!(apple.member_names().collect::<Vec<_>>(), vec!["apples"]);
    assert_eq!(apple.members[0].score, 91);

    let apples = report.groups.get("apples").unwrap();
    assert_eq!(apples.member_names().collect::<Vec<_>>(), vec!["apple"]);
    assert!(report.groups.get("banana").is_none());
}

#[test]
fn test_subdomains_share_company_name() {
    let domains = ["shop.acme.co.uk", "acme.com", "www.acme.co.uk", "other.org"];
    let report = analyze(&domains, AnalysisOptions::default()).unwrap();

    assert_eq!(report.company_names, vec!["acme", "other"]);
    assert_eq!(report.summary.unique_company_names, 2);
    assert_eq!(report.summary.unique_tlds, 3);
    assert_eq!(report.domain_patterns[2].subdomain_count, 2);
    assert_eq!(report.domain_patterns[2].tld, "uk");
}

#[test]
fn test_load_analyze_export() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "logos.csv", FRUIT_CSV);
    let output = dir.path().join("results");

    let dataset = load_domains(&input).unwrap();
    assert_eq!(dataset.domains, vec!["apple.com", "apples.com", "banana.com"]);
    assert_eq!(dataset.info.domain_column, "domain");

    let report = analyze(&dataset.domains, AnalysisOptions::default()).unwrap();
    let written = export_report(&report, Some(&dataset.info), &output).unwrap();
    assert_eq!(written.len(), 6);

    let perfect = fs::read_to_string(output.join("similarity_perfect.csv")).unwrap();
    assert_eq!(
        perfect,
        "domain_1,domain_2,common_letters,common_count,similarity_percent\n\
         apple.com,apples.com,\"., a, c, e, l, m, o, p\",8,80.0\n\
         apple.com,banana.com,\"., a, c, m, o\",5,50.0\n\
         apples.com,banana.com,\"., a, c, m, o\",5,50.0\n"
    );

    let groups = fs::read_to_string(output.join(NAME_GROUPS_FILE)).unwrap();
    assert_eq!(
        groups,
        "company,similar_names,scores\napple,apples,91\napples,apple,91\n"
    );

    let stats = fs::read_to_string(output.join(SUMMARY_STATISTICS_FILE)).unwrap();
    assert!(stats.contains("Total rows,3"));
    assert!(stats.contains("Perfect pairs (4+ letters),3"));
    assert!(stats.contains("Similar name groups,2"));

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(output.join(SUMMARY_JSON_FILE)).unwrap())
            .unwrap();
    assert_eq!(summary["source"]["total_rows"], 3);
    assert_eq!(summary["tiers"]["perfect"]["mean_common_count"], 6.0);
}

#[test]
fn test_load_rejects_numeric_only_input() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "numbers.tsv", "a\tb\n1\t2\n");
    assert!(matches!(load_domains(&input), Err(LoadError::NoTextColumn)));
}

#[test]
fn test_json_records_input() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "logos.json",
        r#"[{"id": 1, "site": "alpha.io"}, {"id": 2, "site": null}, {"id": 3, "site": "alphas.io"}]"#,
    );

    let dataset = load_domains(&input).unwrap();
    assert_eq!(dataset.info.domain_column, "site");
    assert_eq!(dataset.domains, vec!["alpha.io", "alphas.io"]);

    let report = analyze(&dataset.domains, AnalysisOptions::default()).unwrap();
    assert_eq!(report.summary.perfect_pairs, 1);
    assert_eq!(report.groups.get("alpha").unwrap().members[0].name, "alphas");
}
