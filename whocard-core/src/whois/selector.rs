//! Picks the fields shown for a parsed record and fills in defaults.

use serde::{Deserialize, Serialize};

use super::record::{FieldValue, NormalizedRecord};
use super::status::render_statuses;
use crate::locale::{Locale, Message};

/// The fields a summary can contain, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Registrar,
    RegistrarWhoisServer,
    CreationDate,
    AbuseEmail,
    Status,
    OwnerName,
    Dnssec,
    NameServers,
    Reseller,
}

impl FieldKind {
    pub fn message(self) -> Message {
        match self {
            FieldKind::Registrar => Message::Registrar,
            FieldKind::RegistrarWhoisServer => Message::RegistrarWhoisServer,
            FieldKind::CreationDate => Message::RegistrationDate,
            FieldKind::AbuseEmail => Message::AbuseEmail,
            FieldKind::Status => Message::DomainStatus,
            FieldKind::OwnerName => Message::OwnerName,
            FieldKind::Dnssec => Message::Dnssec,
            FieldKind::NameServers => Message::NameServers,
            FieldKind::Reseller => Message::Reseller,
        }
    }

    /// Canonical key an optional field is copied from.
    fn source_key(self) -> Option<&'static str> {
        match self {
            FieldKind::RegistrarWhoisServer => Some("registrarWHOISServer"),
            FieldKind::CreationDate => Some("creationDate"),
            FieldKind::AbuseEmail => Some("registrarAbuseContactEmail"),
            FieldKind::Dnssec => Some("dnssec"),
            FieldKind::Reseller => Some("reseller"),
            _ => None,
        }
    }
}

/// A label and display value ready for a presentation sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationField {
    pub kind: FieldKind,
    pub label: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FieldSelector {
    locale: Locale,
}

impl FieldSelector {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Builds the ordered field list for `record`.
    ///
    /// Status, owner name and nameservers are always present, falling back to
    /// a placeholder. Every other field is emitted only when the record has it.
    pub fn select(&self, record: &NormalizedRecord) -> Vec<PresentationField> {
        let mut fields = Vec::new();

        if let Some(registrar) = record.present("registrar") {
            let url = record
                .present("registrarURL")
                .map(FieldValue::first)
                .unwrap_or_default();
            fields.push(self.field(
                FieldKind::Registrar,
                format!("[{}]({})", registrar.first(), url),
            ));
        }

        for kind in [
            FieldKind::RegistrarWhoisServer,
            FieldKind::CreationDate,
            FieldKind::AbuseEmail,
        ] {
            self.push_optional(&mut fields, record, kind);
        }

        fields.push(self.field(FieldKind::Status, self.status(record)));
        fields.push(self.field(FieldKind::OwnerName, self.owner_name(record)));
        self.push_optional(&mut fields, record, FieldKind::Dnssec);
        fields.push(self.field(FieldKind::NameServers, self.nameservers(record)));
        self.push_optional(&mut fields, record, FieldKind::Reseller);

        fields
    }

    fn status(&self, record: &NormalizedRecord) -> String {
        match record.present("domainStatus") {
            Some(statuses) => render_statuses(statuses),
            None => self.locale.text(Message::UnknownStatus).to_string(),
        }
    }

    fn nameservers(&self, record: &NormalizedRecord) -> String {
        match record.present("nameServer") {
            Some(nameservers) => nameservers.joined(),
            None => self.locale.text(Message::NoNameservers).to_string(),
        }
    }

    fn owner_name(&self, record: &NormalizedRecord) -> String {
        record
            .present("registrantOrganization")
            .or_else(|| record.present("registrantName"))
            .map(|name| name.first().to_string())
            .unwrap_or_else(|| self.locale.text(Message::NameNotFound).to_string())
    }

    fn push_optional(
        &self,
        fields: &mut Vec<PresentationField>,
        record: &NormalizedRecord,
        kind: FieldKind,
    ) {
        let value = kind.source_key().and_then(|key| record.present(key));
        if let Some(value) = value {
            fields.push(self.field(kind, value.joined()));
        }
    }

    fn field(&self, kind: FieldKind, value: String) -> PresentationField {
        PresentationField {
            kind,
            label: self.locale.text(kind.message()).to_string(),
            value,
            inline: true,
        }
    }
}
