use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Registry WHOIS servers, keyed by lowercase TLD.
pub static WHOIS_SERVERS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();

    // Thin registries: these answer with a referral to the registrar's server
    m.insert("com", "whois.verisign-grs.com");
    m.insert("net", "whois.verisign-grs.com");
    m.insert("cc", "ccwhois.verisign-grs.com");
    m.insert("tv", "whois.nic.tv");

    m.insert("edu", "whois.educause.edu");
    m.insert("gov", "whois.dotgov.gov");
    m.insert("org", "whois.pir.org");
    m.insert("info", "whois.afilias.net");
    m.insert("biz", "whois.biz");
    m.insert("name", "whois.nic.name");
    m.insert("mobi", "whois.afilias.net");
    m.insert("int", "whois.iana.org");

    m.insert("app", "whois.nic.google");
    m.insert("dev", "whois.nic.google");
    m.insert("page", "whois.nic.google");
    m.insert("io", "whois.nic.io");
    m.insert("co", "whois.nic.co");
    m.insert("me", "whois.nic.me");
    m.insert("xyz", "whois.nic.xyz");

    m
});

pub fn get_whois_server(tld: &str) -> Option<&'static str> {
    WHOIS_SERVERS.get(tld.to_lowercase().as_str()).copied()
}

pub fn get_tld(domain: &str) -> Option<&str> {
    domain.rsplit('.').next().filter(|tld| !tld.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_whois_server() {
        assert_eq!(get_whois_server("com"), Some("whois.verisign-grs.com"));
        assert_eq!(get_whois_server("NET"), Some("whois.verisign-grs.com"));
        assert_eq!(get_whois_server("edu"), Some("whois.educause.edu"));
        assert_eq!(get_whois_server("invalid"), None);
    }

    #[test]
    fn test_get_tld() {
        assert_eq!(get_tld("example.com"), Some("com"));
        assert_eq!(get_tld("sub.example.edu"), Some("edu"));
        assert_eq!(get_tld("example."), None);
    }
}
