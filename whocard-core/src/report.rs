//! End-to-end WHOIS summaries: pre-check, lookup, parse, select and assemble.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::error::{Result, WhoisError};
use crate::locale::{Locale, Message};
use crate::validation::TldAllowList;
use crate::whois::{FieldSelector, PresentationField, RecordParser, WhoisLookup};

/// Page with the complete public record for a domain.
pub const SEE_MORE_URL: &str = "https://who.is/whois/";

pub const MAX_FIELDS: usize = 25;
pub const MAX_TITLE_LEN: usize = 256;
pub const MAX_DESCRIPTION_LEN: usize = 4096;
pub const MAX_FIELD_LABEL_LEN: usize = 256;
pub const MAX_FIELD_VALUE_LEN: usize = 1024;

pub fn see_more_url(domain: &str) -> String {
    format!("{SEE_MORE_URL}{domain}")
}

pub fn report_title(domain: &str) -> String {
    format!("WHOIS - {domain}")
}

/// Card-style summary with the size limits of chat embeds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub fields: Vec<PresentationField>,
}

impl Embed {
    pub fn new(title: impl Into<String>) -> Result<Self> {
        let title = title.into();
        check_len("title", &title, MAX_TITLE_LEN)?;
        Ok(Self {
            title,
            ..Self::default()
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Result<Self> {
        let description = description.into();
        check_len("description", &description, MAX_DESCRIPTION_LEN)?;
        self.description = description;
        Ok(self)
    }

    pub fn add_field(&mut self, field: PresentationField) -> Result<()> {
        if self.fields.len() >= MAX_FIELDS {
            return Err(WhoisError::Presentation(format!(
                "embeds hold at most {MAX_FIELDS} fields"
            )));
        }
        if field.value.trim().is_empty() {
            return Err(WhoisError::Presentation(format!(
                "field `{}` has an empty value",
                field.label
            )));
        }
        check_len("field label", &field.label, MAX_FIELD_LABEL_LEN)?;
        check_len("field value", &field.value, MAX_FIELD_VALUE_LEN)?;

        self.fields.push(field);
        Ok(())
    }
}

fn check_len(what: &str, text: &str, max: usize) -> Result<()> {
    let len = text.chars().count();
    if len > max {
        return Err(WhoisError::Presentation(format!(
            "{what} is {len} characters, limit is {max}"
        )));
    }
    Ok(())
}

/// What the user sees for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WhoisReport {
    Found {
        domain: String,
        see_more_url: String,
        #[serde(flatten)]
        embed: Embed,
    },
    NotFound {
        domain: String,
        title: String,
        message: String,
    },
    InvalidDomain {
        domain: String,
        title: String,
        message: String,
    },
    Error {
        domain: String,
        title: String,
        message: String,
    },
}

impl WhoisReport {
    pub fn domain(&self) -> &str {
        match self {
            WhoisReport::Found { domain, .. }
            | WhoisReport::NotFound { domain, .. }
            | WhoisReport::InvalidDomain { domain, .. }
            | WhoisReport::Error { domain, .. } => domain,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            WhoisReport::Found { embed, .. } => &embed.title,
            WhoisReport::NotFound { title, .. }
            | WhoisReport::InvalidDomain { title, .. }
            | WhoisReport::Error { title, .. } => title,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, WhoisReport::Found { .. })
    }
}

/// Runs queries against a [`WhoisLookup`] and turns the result into a report.
#[derive(Debug, Clone)]
pub struct WhoisService<L> {
    lookup: L,
    parser: RecordParser,
    locale: Locale,
    allow_list: TldAllowList,
}

impl<L: WhoisLookup> WhoisService<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            parser: RecordParser::new(),
            locale: Locale::default(),
            allow_list: TldAllowList::default(),
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_allow_list(mut self, allow_list: TldAllowList) -> Self {
        self.allow_list = allow_list;
        self
    }

    pub fn with_parser(mut self, parser: RecordParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub async fn run(&self, domain: &str) -> WhoisReport {
        let domain = match self.checked_domain(domain) {
            Ok(domain) => domain,
            Err(report) => return report,
        };

        match self.lookup.lookup(&domain).await {
            Ok(raw) => self.report_from_raw(&domain, &raw),
            Err(e) if e.is_invalid_domain() => {
                debug!(domain = %domain, error = %e, "Lookup rejected domain");
                self.invalid_domain(&domain)
            }
            Err(e) => {
                warn!(domain = %domain, error = %e, "WHOIS lookup failed");
                self.error(&domain, report_title(&domain))
            }
        }
    }

    /// Builds the report from an already fetched response.
    ///
    /// `domain` goes through the same allow-list check as [`run`](Self::run).
    pub fn report_from_raw(&self, domain: &str, raw: &str) -> WhoisReport {
        let domain = match self.checked_domain(domain) {
            Ok(domain) => domain,
            Err(report) => return report,
        };
        let domain = domain.as_str();

        let Some(record) = self.parser.parse(raw) else {
            return WhoisReport::NotFound {
                domain: domain.to_string(),
                title: report_title(domain),
                message: self.locale.domain_not_found(domain),
            };
        };

        let fields = FieldSelector::new(self.locale).select(&record);
        match self.build_embed(domain, fields) {
            Ok(embed) => WhoisReport::Found {
                domain: domain.to_string(),
                see_more_url: see_more_url(domain),
                embed,
            },
            Err(e) => {
                error!(domain = %domain, error = %e, "Failed to build WHOIS report");
                self.error(domain, "WHOIS".to_string())
            }
        }
    }

    /// Normalizes `domain` and applies the allow-list.
    fn checked_domain(&self, domain: &str) -> std::result::Result<String, WhoisReport> {
        self.allow_list.check(domain).map_err(|e| {
            debug!(domain = %domain, error = %e, "Rejected domain");
            self.invalid_domain(domain.trim())
        })
    }

    fn build_embed(&self, domain: &str, fields: Vec<PresentationField>) -> Result<Embed> {
        let description = format!(
            "{}\n[{}]({})",
            self.locale.results_for(domain),
            self.locale.text(Message::SeeCompleteList),
            see_more_url(domain)
        );

        let mut embed = Embed::new(report_title(domain))?.with_description(description)?;
        for field in fields {
            embed.add_field(field)?;
        }
        Ok(embed)
    }

    fn invalid_domain(&self, domain: &str) -> WhoisReport {
        WhoisReport::InvalidDomain {
            domain: domain.to_string(),
            title: report_title(domain),
            message: self.locale.invalid_domain(domain, self.allow_list.tlds()),
        }
    }

    fn error(&self, domain: &str, title: String) -> WhoisReport {
        WhoisReport::Error {
            domain: domain.to_string(),
            title,
            message: self.locale.text(Message::ErrorOccurred).to_string(),
        }
    }
}
