//! Line-oriented parser turning raw WHOIS text into a [`NormalizedRecord`].

use tracing::debug;

use super::record::{canonical_key, NormalizedRecord};

/// Start of the ICANN boilerplate that registrars append after the record.
pub const TERMINAL_MARKER: &str = "\nURL of the ICANN WHOIS Data Problem Reporting System:";

/// Cuts `raw` at the first occurrence of `marker`, or keeps all of it when the
/// marker is missing.
pub fn truncate_at_marker<'a>(raw: &'a str, marker: &str) -> &'a str {
    match raw.find(marker) {
        Some(end) => &raw[..end],
        None => raw,
    }
}

/// Parses `label: value` WHOIS responses.
#[derive(Debug, Clone)]
pub struct RecordParser {
    marker: String,
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordParser {
    pub fn new() -> Self {
        Self {
            marker: TERMINAL_MARKER.to_string(),
        }
    }

    /// Uses a different trailing-boilerplate marker.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Parses a raw response.
    ///
    /// Lines that are not `label: value` pairs are dropped. Returns `None` when
    /// no line produced a field, which callers treat as "domain not found".
    pub fn parse(&self, raw: &str) -> Option<NormalizedRecord> {
        let body = truncate_at_marker(raw, &self.marker);

        let mut record = NormalizedRecord::new();
        let mut lines = 0usize;
        for line in body.lines() {
            lines += 1;
            if let Some((key, value)) = split_field(line) {
                record.insert_or_append(key, value);
            }
        }

        debug!(lines, keys = record.len(), "Parsed WHOIS record");

        if record.is_empty() {
            None
        } else {
            Some(record)
        }
    }
}

/// Splits a line into its canonical key and trimmed value.
///
/// The label is everything before the first colon; the value is everything
/// after it, colons included. Both the label and the segment between the first
/// and second colon must be non-empty.
fn split_field(line: &str) -> Option<(String, &str)> {
    let (label, rest) = line.split_once(':')?;
    let first_segment = rest.split(':').next().unwrap_or_default();
    if label.is_empty() || first_segment.is_empty() {
        return None;
    }

    let key = canonical_key(label)?;
    Some((key, rest.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::whois::record::FieldValue;

    const SAMPLE_RESPONSE: &str = "   Domain Name: EXAMPLE.COM\r
   Registry Domain ID: 2336799_DOMAIN_COM-VRSN\r
   Registrar WHOIS Server: whois.iana.org\r
   Registrar URL: http://res-dom.iana.org\r
   Creation Date: 1995-08-14T04:00:00Z\r
   Registrar: RESERVED-Internet Assigned Numbers Authority\r
   Domain Status: clientDeleteProhibited https://icann.org/epp#clientDeleteProhibited\r
   Domain Status: clientTransferProhibited https://icann.org/epp#clientTransferProhibited\r
   Name Server: A.IANA-SERVERS.NET\r
   Name Server: B.IANA-SERVERS.NET\r
   DNSSEC: signedDelegation\r
\r
URL of the ICANN WHOIS Data Problem Reporting System: http://wdprs.internic.net/\r
>>> Last update of whois database: 2024-01-01T00:00:00Z <<<\r
\r
NOTICE: The expiration date displayed in this record is the date the\r
";

    #[test]
    fn test_parse_sample_response() {
        let record = RecordParser::new().parse(SAMPLE_RESPONSE).unwrap();

        assert_eq!(
            record.get("domainName"),
            Some(&FieldValue::Single("EXAMPLE.COM".into()))
        );
        assert_eq!(
            record.get("registrarWHOISServer"),
            Some(&FieldValue::Single("whois.iana.org".into()))
        );
        assert_eq!(
            record.get("registrarURL"),
            Some(&FieldValue::Single("http://res-dom.iana.org".into()))
        );
        assert_eq!(
            record.get("dnssec"),
            Some(&FieldValue::Single("signedDelegation".into()))
        );
        assert_eq!(record.get("domainStatus").unwrap().values().len(), 2);
    }

    #[test]
    fn test_boilerplate_after_marker_is_dropped() {
        let record = RecordParser::new().parse(SAMPLE_RESPONSE).unwrap();

        assert!(!record.contains_key("uRLoftheICANNWHOISDataProblemReportingSystem"));
        assert!(!record.contains_key(">>>Lastupdateofwhoisdatabase"));
        assert!(!record.contains_key("nOTICE"));
        assert!(!record.contains_key("notice"));
    }

    #[test]
    fn test_missing_marker_keeps_whole_text() {
        let raw = "Registrar: Example Inc\nCreation Date: 2001-02-03T00:00:00Z";
        assert_eq!(truncate_at_marker(raw, TERMINAL_MARKER), raw);

        let record = RecordParser::new().parse(raw).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(
            record.get("creationDate"),
            Some(&FieldValue::Single("2001-02-03T00:00:00Z".into()))
        );
    }

    #[test]
    fn test_repeated_keys_accumulate() {
        let raw = "Name Server: a\nName Server: b\nName Server: c\n";
        let record = RecordParser::new().parse(raw).unwrap();

        assert_eq!(
            record.get("nameServer"),
            Some(&FieldValue::Multiple(vec!["a".into(), "b".into(), "c".into()]))
        );
    }

    #[test]
    fn test_value_keeps_inner_colons() {
        let raw = "Registrar URL: https://www.example.com:8443/path\n";
        let record = RecordParser::new().parse(raw).unwrap();

        assert_eq!(
            record.get("registrarURL"),
            Some(&FieldValue::Single("https://www.example.com:8443/path".into()))
        );
    }

    #[test]
    fn test_malformed_lines_are_ignored() {
        let raw = "no colon here\n: no label\nEmpty Segment::value\n   \nRegistrar: Example Inc\n";
        let record = RecordParser::new().parse(raw).unwrap();

        assert_eq!(record.len(), 1);
        assert!(record.contains_key("registrar"));
    }

    #[test]
    fn test_no_fields_is_empty() {
        let raw = "No match for \"NOPE-EXAMPLE.COM\".\n>>> nothing useful <<<\n";
        let parser = RecordParser::new();

        assert!(parser.parse(raw).is_none());
        assert!(parser.parse(raw).is_none());
        assert!(parser.parse("").is_none());
    }

    #[test]
    fn test_scenario_record() {
        let raw = "Registrar: Example Inc\nName Server: ns1.example.com\nName Server: ns2.example.com\nDNSSEC: unsigned\n";
        let record = RecordParser::new().parse(raw).unwrap();

        let keys: Vec<&str> = record.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["registrar", "nameServer", "dnssec"]);
        assert_eq!(
            record.get("nameServer"),
            Some(&FieldValue::Multiple(vec![
                "ns1.example.com".into(),
                "ns2.example.com".into()
            ]))
        );
        assert_eq!(record.get("dnssec"), Some(&FieldValue::Single("unsigned".into())));
    }

    #[test]
    fn test_custom_marker() {
        let raw = "Registrar: Example Inc\n--- END ---\nReseller: Hidden\n";
        let record = RecordParser::new()
            .with_marker("\n--- END ---")
            .parse(raw)
            .unwrap();

        assert!(record.contains_key("registrar"));
        assert!(!record.contains_key("reseller"));
    }
}
