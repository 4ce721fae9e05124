use thiserror::Error;

#[derive(Error, Debug)]
pub enum WhoisError {
    #[error("WHOIS lookup failed: {0}")]
    Lookup(String),

    #[error("WHOIS server not found for TLD: {0}")]
    ServerNotFound(String),

    #[error("WHOIS connection failed: {0}")]
    Connection(#[from] std::io::Error),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomain(String),

    #[error("Unsupported TLD: {0}")]
    UnsupportedTld(String),

    #[error("Failed to build presentation: {0}")]
    Presentation(String),
}

impl WhoisError {
    /// Whether the error came from the domain pre-check rather than the lookup.
    pub fn is_invalid_domain(&self) -> bool {
        matches!(
            self,
            WhoisError::InvalidDomain(_) | WhoisError::UnsupportedTld(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, WhoisError>;
