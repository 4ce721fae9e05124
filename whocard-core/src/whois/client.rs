use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use super::servers::{get_tld, get_whois_server};
use crate::error::{Result, WhoisError};
use crate::validation::normalize_domain;

const WHOIS_PORT: u16 = 43;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_RESPONSE_SIZE: usize = 1024 * 1024; // 1MB
const MAX_REFERRAL_DEPTH: u8 = 3;

/// Each pattern stays on one line so a blank referral never picks up the next field.
static REFERRAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)Registrar WHOIS Server:[ \t]*([^\r\n]*)",
        r"(?i)Whois Server:[ \t]*([^\r\n]*)",
        r"(?i)ReferralServer:[ \t]*whois://([^\r\n]*)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("Invalid referral regex"))
    .collect()
});

/// Source of raw WHOIS text for a domain.
///
/// An `Err` is a lookup failure; an `Ok` carrying text with no usable fields is
/// left for the parser to classify as "not found".
pub trait WhoisLookup: Send + Sync {
    fn lookup(&self, domain: &str) -> impl Future<Output = Result<String>> + Send;
}

/// WHOIS client speaking the port 43 text protocol.
#[derive(Debug, Clone)]
pub struct WhoisClient {
    timeout: Duration,
    server: Option<String>,
}

impl Default for WhoisClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WhoisClient {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            server: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Queries `server` first instead of the registry server for the TLD.
    /// A value containing `:` is used as `host:port`.
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    /// Fetches the raw response for `domain`, following registrar referrals.
    #[instrument(skip(self), fields(domain = %domain))]
    pub async fn lookup_raw(&self, domain: &str) -> Result<String> {
        let domain = normalize_domain(domain)?;

        let whois_server = match &self.server {
            Some(server) => server.clone(),
            None => {
                let tld =
                    get_tld(&domain).ok_or_else(|| WhoisError::InvalidDomain(domain.clone()))?;
                get_whois_server(tld)
                    .ok_or_else(|| WhoisError::ServerNotFound(tld.to_string()))?
                    .to_string()
            }
        };

        let mut visited = HashSet::new();
        self.lookup_with_referrals(&domain, &whois_server, 0, &mut visited)
            .await
    }

    fn lookup_with_referrals<'a>(
        &'a self,
        domain: &'a str,
        whois_server: &'a str,
        depth: u8,
        visited: &'a mut HashSet<String>,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async move {
            if depth >= MAX_REFERRAL_DEPTH {
                warn!(depth = depth, server = %whois_server, "Max referral depth exceeded");
                return Err(WhoisError::Lookup(
                    "Maximum WHOIS referral depth exceeded".to_string(),
                ));
            }

            let server_lower = whois_server.to_lowercase();
            if visited.contains(&server_lower) {
                warn!(server = %whois_server, "Circular WHOIS referral detected");
                return Err(WhoisError::Lookup(
                    "Circular WHOIS referral detected".to_string(),
                ));
            }
            visited.insert(server_lower);

            debug!(whois_server = %whois_server, depth = depth, "Querying WHOIS server");

            let raw_response = self.query_server(whois_server, domain).await?;

            if let Some(referral) = extract_referral(&raw_response) {
                if referral != whois_server.to_lowercase() && !visited.contains(&referral) {
                    debug!(referral = %referral, "Following referral");
                    match self
                        .lookup_with_referrals(domain, &referral, depth + 1, visited)
                        .await
                    {
                        Ok(referred) => return Ok(referred),
                        Err(e) => {
                            warn!(referral = %referral, error = %e, "Referral failed, keeping registry response");
                        }
                    }
                }
            }

            Ok(raw_response)
        })
    }

    async fn query_server(&self, server: &str, query: &str) -> Result<String> {
        let addr = if server.contains(':') {
            server.to_string()
        } else {
            format!("{}:{}", server, WHOIS_PORT)
        };

        let mut stream = timeout(self.timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| WhoisError::Timeout(format!("Connection to {} timed out", server)))?
            .map_err(|e| WhoisError::Lookup(format!("Failed to connect to {}: {}", server, e)))?;

        let query_bytes = format!("{}\r\n", query);
        timeout(self.timeout, stream.write_all(query_bytes.as_bytes()))
            .await
            .map_err(|_| WhoisError::Timeout("Write timed out".to_string()))??;

        let mut response = Vec::new();
        let mut buf = [0u8; 4096];

        loop {
            match timeout(self.timeout, stream.read(&mut buf)).await {
                Ok(Ok(0)) => break, // EOF
                Ok(Ok(n)) => {
                    response.extend_from_slice(&buf[..n]);
                    if response.len() > MAX_RESPONSE_SIZE {
                        return Err(WhoisError::Lookup("Response too large".to_string()));
                    }
                }
                Ok(Err(e)) => return Err(WhoisError::Connection(e)),
                Err(_) => {
                    // Some servers never close the connection
                    if !response.is_empty() {
                        break;
                    }
                    return Err(WhoisError::Timeout("Read timed out".to_string()));
                }
            }
        }

        Ok(decode_response(response))
    }
}

impl WhoisLookup for WhoisClient {
    async fn lookup(&self, domain: &str) -> Result<String> {
        self.lookup_raw(domain).await
    }
}

/// UTF-8, falling back to Latin-1.
fn decode_response(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes)
        .unwrap_or_else(|e| e.into_bytes().iter().map(|&c| c as char).collect())
}

fn extract_referral(response: &str) -> Option<String> {
    REFERRAL_PATTERNS.iter().find_map(|re| {
        let server = re.captures(response)?.get(1)?.as_str().trim().to_lowercase();
        (!server.is_empty() && server.contains('.')).then_some(server)
    })
}
