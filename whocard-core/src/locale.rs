//! User-facing strings in every supported language.
//!
//! The locale is an explicit value: it is chosen once by the caller and handed
//! to whatever formats labels, placeholders and outcome messages.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept POSIX-style values such as `fr_CA.UTF-8`.
        let lang = s
            .split(['_', '-', '.'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        match lang.as_str() {
            "en" => Ok(Locale::En),
            "fr" => Ok(Locale::Fr),
            _ => Err(format!("Unsupported language: {}", s)),
        }
    }
}

/// Fixed strings of the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Registrar,
    RegistrarWhoisServer,
    RegistrationDate,
    AbuseEmail,
    DomainStatus,
    OwnerName,
    Dnssec,
    NameServers,
    Reseller,
    UnknownStatus,
    NoNameservers,
    NameNotFound,
    ErrorOccurred,
    SeeCompleteList,
}

impl Message {
    pub fn text(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Message::Registrar, Locale::En) => "Registrar",
            (Message::Registrar, Locale::Fr) => "Registraire",
            (Message::RegistrarWhoisServer, Locale::En) => "Registrar WHOIS Server",
            (Message::RegistrarWhoisServer, Locale::Fr) => "Serveur WHOIS du registraire",
            (Message::RegistrationDate, Locale::En) => "Domain registration date",
            (Message::RegistrationDate, Locale::Fr) => "Date d'enregistrement du domaine",
            (Message::AbuseEmail, Locale::En) => "Email for abuse report",
            (Message::AbuseEmail, Locale::Fr) => "Courriel pour signaler un abus",
            (Message::DomainStatus, Locale::En) => "Domain status (ICANN)",
            (Message::DomainStatus, Locale::Fr) => "Statut du domaine (ICANN)",
            (Message::OwnerName, Locale::En) => "Owner's name",
            (Message::OwnerName, Locale::Fr) => "Nom du propriétaire",
            (Message::Dnssec, Locale::En) => "DNSSEC status",
            (Message::Dnssec, Locale::Fr) => "Statut DNSSEC",
            (Message::NameServers, Locale::En) => "DNS server(s)",
            (Message::NameServers, Locale::Fr) => "Serveur(s) DNS",
            (Message::Reseller, Locale::En) => "Reseller",
            (Message::Reseller, Locale::Fr) => "Revendeur",
            (Message::UnknownStatus, Locale::En) => "Unknown status",
            (Message::UnknownStatus, Locale::Fr) => "Statut inconnu",
            (Message::NoNameservers, Locale::En) => "No nameservers",
            (Message::NoNameservers, Locale::Fr) => "Aucun serveur DNS",
            (Message::NameNotFound, Locale::En) => "Name not found",
            (Message::NameNotFound, Locale::Fr) => "Nom introuvable",
            (Message::ErrorOccurred, Locale::En) => "An error occurred.",
            (Message::ErrorOccurred, Locale::Fr) => "Une erreur est survenue.",
            (Message::SeeCompleteList, Locale::En) => "See complete list online",
            (Message::SeeCompleteList, Locale::Fr) => "Voir la liste complète en ligne",
        }
    }
}

impl Locale {
    pub fn text(self, message: Message) -> &'static str {
        message.text(self)
    }

    pub fn results_for(self, domain: &str) -> String {
        match self {
            Locale::En => format!("Here are the results for {domain}"),
            Locale::Fr => format!("Voici les résultats pour {domain}"),
        }
    }

    pub fn domain_not_found(self, domain: &str) -> String {
        match self {
            Locale::En => format!("Domain `{domain}` not found."),
            Locale::Fr => format!("Le domaine `{domain}` est introuvable."),
        }
    }

    /// `tlds` are listed as written, e.g. `["com", "net", "edu"]`.
    pub fn invalid_domain(self, domain: &str, tlds: &[String]) -> String {
        let listed = tlds
            .iter()
            .map(|tld| format!("`.{tld}`"))
            .collect::<Vec<_>>();
        let listed = match self {
            Locale::En => join_words(&listed, "and"),
            Locale::Fr => join_words(&listed, "et"),
        };
        match self {
            Locale::En => format!(
                "`{domain}` is not a valid domain.\nThis WHOIS only supports {listed} TLDs."
            ),
            Locale::Fr => format!(
                "`{domain}` n'est pas un domaine valide.\nCe WHOIS ne prend en charge que les TLD {listed}."
            ),
        }
    }
}

/// `a`, `a and b`, `a, b and c`.
fn join_words(words: &[String], conjunction: &str) -> String {
    match words {
        [] => String::new(),
        [only] => only.clone(),
        [rest @ .., last] => format!("{} {conjunction} {last}", rest.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_str() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("FR".parse::<Locale>().unwrap(), Locale::Fr);
        assert_eq!("fr_CA.UTF-8".parse::<Locale>().unwrap(), Locale::Fr);
        assert_eq!("en-US".parse::<Locale>().unwrap(), Locale::En);
        assert!("de".parse::<Locale>().is_err());
    }

    #[test]
    fn test_placeholders_are_localized() {
        assert_eq!(Locale::En.text(Message::UnknownStatus), "Unknown status");
        assert_eq!(Locale::Fr.text(Message::UnknownStatus), "Statut inconnu");
        assert_eq!(Message::NameNotFound.text(Locale::En), "Name not found");
    }

    #[test]
    fn test_invalid_domain_message() {
        let tlds = vec!["com".to_string(), "net".to_string(), "edu".to_string()];
        assert_eq!(
            Locale::En.invalid_domain("example.org", &tlds),
            "`example.org` is not a valid domain.\nThis WHOIS only supports `.com`, `.net` and `.edu` TLDs."
        );
        assert!(Locale::Fr
            .invalid_domain("example.org", &tlds)
            .contains("`.com`, `.net` et `.edu`"));
    }

    #[test]
    fn test_join_words() {
        assert_eq!(join_words(&[], "and"), "");
        assert_eq!(join_words(&["a".to_string()], "and"), "a");
        assert_eq!(join_words(&["a".to_string(), "b".to_string()], "and"), "a and b");
    }
}
