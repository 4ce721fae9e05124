//! Domain normalization and the TLD allow-list checked before any lookup.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WhoisError};

/// Normalize and validate a domain name before it is sent to a WHOIS server
///
/// Accepts what users tend to paste:
/// - URLs (`https://www.example.com/path?q=1`)
/// - a port suffix (`example.com:443`)
/// - a fully qualified name with the root dot (`example.com.`)
///
/// The result is the lowercase registrable name with every label made of
/// ASCII letters, digits and inner hyphens.
pub fn normalize_domain(domain: &str) -> Result<String> {
    let input = domain.trim().to_lowercase();
    let invalid = || WhoisError::InvalidDomain(input.clone());

    // Scheme, then everything from the first path/query/fragment separator
    let host = input
        .split_once("://")
        .map_or(input.as_str(), |(_, rest)| rest);
    let host = host.split(['/', '?', '#']).next().unwrap_or_default();

    // Port, root dot, www.
    let host = host.rsplit_once(':').map_or(host, |(name, _)| name);
    let host = host.strip_suffix('.').unwrap_or(host);
    let host = host.strip_prefix("www.").unwrap_or(host);

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 {
        return Err(invalid());
    }

    let label_ok = |label: &str| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    };
    if !labels.iter().all(|label| label_ok(label)) {
        return Err(invalid());
    }

    Ok(host.to_string())
}

/// TLDs the service agrees to look up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TldAllowList {
    tlds: Vec<String>,
}

impl Default for TldAllowList {
    fn default() -> Self {
        Self::new(["com", "net", "edu"])
    }
}

impl TldAllowList {
    /// Builds a list from TLDs with or without their leading dot.
    pub fn new<I, S>(tlds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tlds = tlds
            .into_iter()
            .map(|tld| tld.as_ref().trim().trim_start_matches('.').to_lowercase())
            .filter(|tld| !tld.is_empty())
            .collect();
        Self { tlds }
    }

    pub fn tlds(&self) -> &[String] {
        &self.tlds
    }

    pub fn allows(&self, domain: &str) -> bool {
        let domain = domain.to_lowercase();
        self.tlds
            .iter()
            .any(|tld| domain.ends_with(&format!(".{tld}")))
    }

    /// Normalizes `domain` and checks its suffix against the list.
    pub fn check(&self, domain: &str) -> Result<String> {
        let normalized = normalize_domain(domain)?;
        if self.allows(&normalized) {
            Ok(normalized)
        } else {
            Err(WhoisError::UnsupportedTld(normalized))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_domain() {
        assert_eq!(normalize_domain("example.com").unwrap(), "example.com");
        assert_eq!(normalize_domain("EXAMPLE.COM").unwrap(), "example.com");
        assert_eq!(
            normalize_domain("https://www.example.com/path").unwrap(),
            "example.com"
        );
        assert_eq!(
            normalize_domain("  WWW.EXAMPLE.COM  ").unwrap(),
            "example.com"
        );

        assert!(normalize_domain("").is_err());
        assert!(normalize_domain("nodots").is_err());
        assert!(normalize_domain("example..com").is_err());
        assert!(normalize_domain(".example.com").is_err());
        assert!(normalize_domain("-example.com").is_err());
        assert!(normalize_domain("exa mple.com").is_err());
        assert!(normalize_domain("example.c_m").is_err());
    }

    #[test]
    fn test_normalize_domain_pasted_forms() {
        assert_eq!(normalize_domain("example.com.").unwrap(), "example.com");
        assert_eq!(normalize_domain("example.com:443").unwrap(), "example.com");
        assert_eq!(
            normalize_domain("https://www.example.com:8443/a?b=c#d").unwrap(),
            "example.com"
        );
        assert_eq!(normalize_domain("example.com?x=1").unwrap(), "example.com");
        assert!(normalize_domain("example.com..").is_err());
        assert!(normalize_domain("http://").is_err());
    }

    #[test]
    fn test_default_allow_list() {
        let list = TldAllowList::default();
        assert_eq!(list.tlds(), &["com", "net", "edu"]);
        assert!(list.allows("example.com"));
        assert!(list.allows("mit.edu"));
        assert!(!list.allows("example.org"));
        assert!(!list.allows("examplecom"));
    }

    #[test]
    fn test_check_normalizes_first() {
        let list = TldAllowList::default();
        assert_eq!(list.check("https://www.Example.NET/").unwrap(), "example.net");
        assert!(matches!(
            list.check("example.org"),
            Err(WhoisError::UnsupportedTld(_))
        ));
        assert!(matches!(
            list.check("not-a-domain"),
            Err(WhoisError::InvalidDomain(_))
        ));
    }

    #[test]
    fn test_custom_allow_list() {
        let list = TldAllowList::new([".ORG", " io ", ""]);
        assert_eq!(list.tlds(), &["org", "io"]);
        assert!(list.allows("example.io"));
        assert!(!list.allows("example.com"));
    }
}
