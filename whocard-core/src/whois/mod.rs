mod client;
mod parser;
mod record;
mod selector;
mod servers;
pub mod status;

pub use client::{WhoisClient, WhoisLookup};
pub use parser::{truncate_at_marker, RecordParser, TERMINAL_MARKER};
pub use record::{canonical_key, FieldValue, NormalizedRecord};
pub use selector::{FieldKind, FieldSelector, PresentationField};
pub use servers::{get_tld, get_whois_server};
