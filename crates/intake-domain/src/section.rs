//! Sections, submission statuses, and form identifiers.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::DomainError;

/// One of the three independently gated questionnaire sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    #[default]
    Generic,
    WebTechnical,
    CtvAppTechnical,
}

impl Section {
    /// Submission order; validation reports the first failing section in this order.
    pub const ORDER: [Section; 3] = [
        Section::Generic,
        Section::WebTechnical,
        Section::CtvAppTechnical,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Generic => "Inventory Mix",
            Section::WebTechnical => "Web Technical",
            Section::CtvAppTechnical => "CTV/App Technical",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Section::Generic => "generic",
            Section::WebTechnical => "web",
            Section::CtvAppTechnical => "ctv",
        }
    }

    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "generic" | "inventory" => Ok(Section::Generic),
            "web" | "webtechnical" | "web-technical" => Ok(Section::WebTechnical),
            "ctv" | "app" | "ctvapptechnical" | "ctv-app-technical" => {
                Ok(Section::CtvAppTechnical)
            }
            other => Err(DomainError::UnknownField {
                kind: "section",
                key: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Persistence status attached to every save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Draft,
    Submitted,
}

impl SubmissionStatus {
    pub fn requires_validation(self) -> bool {
        matches!(self, SubmissionStatus::Submitted)
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SubmissionStatus::Draft => "draft",
            SubmissionStatus::Submitted => "submitted",
        };
        f.write_str(label)
    }
}

/// Opaque identifier assigned to a stored form by the persistence gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormId(Uuid);

impl FormId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// First eight hex digits, used in listings.
    pub fn short(&self) -> String {
        let mut short = self.0.simple().to_string();
        short.truncate(8);
        short
    }
}

impl Default for FormId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FormId {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim())
            .map(FormId)
            .map_err(|_| DomainError::InvalidFormId(value.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_serialize_with_legacy_names() {
        let json = serde_json::to_string(&Section::CtvAppTechnical).unwrap();
        assert_eq!(json, "\"ctvAppTechnical\"");
        assert_eq!(Section::parse("WEB").unwrap(), Section::WebTechnical);
        assert!(Section::parse("billing").is_err());
    }

    #[test]
    fn form_ids_parse_and_shorten() {
        let id = FormId::new();
        let parsed: FormId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert_eq!(id.short().len(), 8);
        assert!("not-a-uuid".parse::<FormId>().is_err());
    }
}
