pub mod colors;
pub mod error;
pub mod locale;
pub mod output;
pub mod report;
pub mod validation;
pub mod whois;

pub use error::{Result, WhoisError};
pub use locale::{Locale, Message};
pub use validation::{normalize_domain, TldAllowList};

pub use report::{Embed, WhoisReport, WhoisService};
pub use whois::{
    FieldKind, FieldSelector, FieldValue, NormalizedRecord, PresentationField, RecordParser,
    WhoisClient, WhoisLookup,
};

pub use output::{OutputFormat, OutputFormatter};
