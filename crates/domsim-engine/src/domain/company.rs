//! Company name extraction
//!
//! Derives the company token of a domain: the registrable-domain label,
//! ignoring subdomain prefixes and the public suffix.

#[cfg(feature = "fx-hash")]
use rustc_hash::FxHashSet as HashSet;
#[cfg(not(feature = "fx-hash"))]
use std::collections::HashSet;

/// Extract the company name from a domain
///
/// The domain is lower-cased and split on `.`. With more than two labels the
/// label third from the end is returned, otherwise the first label.
///
/// ```
/// use domsim_engine::domain::company::extract_company_name;
///
/// assert_eq!(extract_company_name("mail.example.co.uk"), "example");
/// assert_eq!(extract_company_name("Example.com"), "example");
/// ```
pub fn extract_company_name(domain: &str) -> String {
    let lowered = domain.to_lowercase();
    let labels: Vec<&str> = lowered.split('.').collect();

    // split() always yields at least one label
    let label = if labels.len() > 2 {
        labels[labels.len() - 3]
    } else {
        labels[0]
    };

    label.to_string()
}

/// Distinct, non-empty company names in first-occurrence order
pub fn unique_company_names<S: AsRef<str>>(domains: &[S]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::default();
    let mut names = Vec::new();

    for domain in domains {
        let name = extract_company_name(domain.as_ref());
        if name.is_empty() {
            continue;
        }
        if seen.insert(name.clone()) {
            names.push(name);
        }
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_multi_label() {
        assert_eq!(extract_company_name("mail.example.co.uk"), "example");
        assert_eq!(extract_company_name("www.google.com"), "www");
        assert_eq!(extract_company_name("a.b.c.d.e"), "c");
    }

    #[test]
    fn test_extract_two_labels() {
        assert_eq!(extract_company_name("example.com"), "example");
    }

    #[test]
    fn test_extract_single_label() {
        assert_eq!(extract_company_name("localhost"), "localhost");
    }

    #[test]
    fn test_extract_empty() {
        assert_eq!(extract_company_name(""), "");
        assert_eq!(extract_company_name("."), "");
        assert_eq!(extract_company_name(".."), "");
    }

    #[test]
    fn test_extract_lowercases() {
        assert_eq!(extract_company_name("SHOP.Apple.COM"), "shop");
        assert_eq!(extract_company_name("Apple.COM"), "apple");
    }

    #[test]
    fn test_extract_is_deterministic() {
        let domain = "news.bbc.co.uk";
        assert_eq!(extract_company_name(domain), extract_company_name(domain));
    }

    #[test]
    fn test_unique_company_names_dedup_and_order() {
        let domains = ["apples.com", "apple.com", "www.apple.com", "Apple.net", ".com"];
        let names = unique_company_names(&domains);
        assert_eq!(names, vec!["apples", "apple", "www"]);
    }

    #[test]
    fn test_unique_company_names_empty() {
        let domains: [&str; 0] = [];
        assert!(unique_company_names(&domains).is_empty());
    }
}
