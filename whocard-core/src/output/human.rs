use colored::Colorize;
use once_cell::sync::Lazy;
use regex::Regex;

use super::OutputFormatter;
use crate::colors::CatppuccinExt;
use crate::report::WhoisReport;

/// `[text](url)` links as produced by the field selector.
static LINK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").expect("Invalid link regex"));

/// Rewrites markdown links as `text <url>`, or just `text` when the URL is empty.
fn plain_links(text: &str) -> String {
    LINK_PATTERN
        .replace_all(text, |caps: &regex::Captures| {
            let url = &caps[2];
            if url.is_empty() {
                caps[1].to_string()
            } else {
                format!("{} <{}>", &caps[1], url)
            }
        })
        .into_owned()
}

pub struct HumanFormatter {
    use_colors: bool,
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanFormatter {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    fn label(&self, text: &str) -> String {
        if self.use_colors {
            text.sky().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn value(&self, text: &str) -> String {
        if self.use_colors {
            text.ctp_white().to_string()
        } else {
            text.to_string()
        }
    }

    fn muted(&self, text: &str) -> String {
        if self.use_colors {
            text.overlay1().to_string()
        } else {
            text.to_string()
        }
    }

    fn warning(&self, text: &str) -> String {
        if self.use_colors {
            text.ctp_yellow().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn error(&self, text: &str) -> String {
        if self.use_colors {
            text.ctp_red().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn header(&self, text: &str) -> String {
        let width = text.chars().count();
        if self.use_colors {
            format!("\n{}\n{}", text.lavender().bold(), "─".repeat(width).subtext0())
        } else {
            format!("\n{}\n{}", text, "-".repeat(width))
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_report(&self, report: &WhoisReport) -> String {
        let mut output = vec![self.header(report.title())];

        match report {
            WhoisReport::Found { embed, .. } => {
                for line in embed.description.lines() {
                    output.push(format!("  {}", self.muted(&plain_links(line))));
                }
                output.push(String::new());

                for field in &embed.fields {
                    let value = plain_links(&field.value);
                    if value.contains('\n') {
                        output.push(format!("  {}:", self.label(&field.label)));
                        for line in value.lines() {
                            output.push(format!("    - {}", self.value(line)));
                        }
                    } else {
                        output.push(format!(
                            "  {}: {}",
                            self.label(&field.label),
                            self.value(&value)
                        ));
                    }
                }
            }
            WhoisReport::NotFound { message, .. } => {
                output.push(format!("  {}", self.warning(message)));
            }
            WhoisReport::InvalidDomain { message, .. } | WhoisReport::Error { message, .. } => {
                for line in message.lines() {
                    output.push(format!("  {}", self.error(line)));
                }
            }
        }

        output.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::WhoisService;
    use crate::whois::WhoisClient;

    #[test]
    fn test_plain_links() {
        assert_eq!(
            plain_links("[ok](http://www.icann.org/epp#ok)"),
            "ok <http://www.icann.org/epp#ok>"
        );
        assert_eq!(plain_links("[Example Inc]()"), "Example Inc");
        assert_eq!(plain_links("ns1.example.com"), "ns1.example.com");
    }

    #[test]
    fn test_format_found_without_colors() {
        let service = WhoisService::new(WhoisClient::new());
        let report = service.report_from_raw(
            "example.com",
            "Registrar: Example Inc\nName Server: ns1.example.com\nName Server: ns2.example.com\n",
        );
        let text = HumanFormatter::new().without_colors().format_report(&report);

        assert!(text.contains("WHOIS - example.com\n-------------------"));
        assert!(text.contains("  Registrar: Example Inc\n"));
        assert!(text.contains("  Domain status (ICANN): Unknown status"));
        assert!(text.contains("  DNS server(s):\n    - ns1.example.com\n    - ns2.example.com"));
        assert!(text.contains("See complete list online <https://who.is/whois/example.com>"));
    }

    #[test]
    fn test_header_rule_counts_characters() {
        let report = WhoisReport::Error {
            domain: "café.com".into(),
            title: "WHOIS - café.com".into(),
            message: "An error occurred.".into(),
        };
        let text = HumanFormatter::new().without_colors().format_report(&report);

        assert!(text.starts_with("\nWHOIS - café.com\n----------------\n"));
    }

    #[test]
    fn test_format_invalid_domain_without_colors() {
        let report = WhoisReport::InvalidDomain {
            domain: "example.org".into(),
            title: "WHOIS - example.org".into(),
            message: "line one\nline two".into(),
        };
        let text = HumanFormatter::new().without_colors().format_report(&report);

        assert!(text.ends_with("  line one\n  line two"));
    }
}
