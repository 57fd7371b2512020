//! Read-only reference data: category lists per kind, locations, roles, the
//! company-signer directory, and the job-title catalog.

mod import;

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::DocumentKind;
use crate::config::WizardConfig;

#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("failed to read reference data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid reference data JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid company signer CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("company signer export contained no usable rows")]
    EmptyDirectory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    pub value: String,
    pub label: String,
}

impl CategoryOption {
    fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// Person who can countersign on behalf of the company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySigner {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReferenceData {
    #[serde(default)]
    pub categories: BTreeMap<DocumentKind, Vec<CategoryOption>>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub company_signers: Vec<CompanySigner>,
    #[serde(default)]
    pub job_titles: Vec<String>,
}

impl ReferenceData {
    /// Built-in catalog used when no reference file is configured.
    pub fn standard() -> Self {
        let mut categories = BTreeMap::new();
        categories.insert(
            DocumentKind::PdfSigning,
            vec![
                CategoryOption::new("onboarding", "Onboarding"),
                CategoryOption::new("policy", "Policy Acknowledgement"),
                CategoryOption::new("compliance", "Compliance"),
                CategoryOption::new("tax", "Tax Forms"),
            ],
        );
        categories.insert(
            DocumentKind::WriteUp,
            vec![
                CategoryOption::new("verbal-warning", "Verbal Warning"),
                CategoryOption::new("written-warning", "Written Warning"),
                CategoryOption::new("final-warning", "Final Warning"),
                CategoryOption::new("suspension", "Suspension"),
            ],
        );
        categories.insert(
            DocumentKind::CollectUploads,
            vec![
                CategoryOption::new("certification", "Certification"),
                CategoryOption::new("license", "License"),
                CategoryOption::new("identification", "Identification"),
                CategoryOption::new("training", "Training Record"),
            ],
        );
        categories.insert(
            DocumentKind::Duplicate,
            vec![
                CategoryOption::new("onboarding", "Onboarding"),
                CategoryOption::new("policy", "Policy Acknowledgement"),
                CategoryOption::new("written-warning", "Written Warning"),
                CategoryOption::new("certification", "Certification"),
            ],
        );

        Self {
            categories,
            locations: strings(&["Downtown", "Northside", "Riverside", "Warehouse"]),
            roles: strings(&["Cashier", "Cook", "Shift Lead", "General Manager"]),
            company_signers: vec![
                CompanySigner {
                    id: "cs-hr-director".to_string(),
                    name: "Dana Ortiz".to_string(),
                    title: "HR Director".to_string(),
                    email: None,
                },
                CompanySigner {
                    id: "cs-ops-manager".to_string(),
                    name: "Lee Park".to_string(),
                    title: "Operations Manager".to_string(),
                    email: None,
                },
                CompanySigner {
                    id: "cs-owner".to_string(),
                    name: "Robin Hale".to_string(),
                    title: "Owner".to_string(),
                    email: None,
                },
            ],
            job_titles: strings(&[
                "Line Cook",
                "Prep Cook",
                "Server",
                "Host",
                "Dishwasher",
                "Shift Supervisor",
            ]),
        }
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, ReferenceError> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(file)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, ReferenceError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Replace the company-signer directory with a CSV export.
    pub fn with_company_signers_csv<R: Read>(mut self, reader: R) -> Result<Self, ReferenceError> {
        let signers = import::parse_company_signers(reader)?;
        if signers.is_empty() {
            return Err(ReferenceError::EmptyDirectory);
        }
        self.company_signers = signers;
        Ok(self)
    }

    /// Resolve the configured sources, falling back to the built-in catalog.
    pub fn load(config: &WizardConfig) -> Result<Self, ReferenceError> {
        let mut reference = match &config.reference_path {
            Some(path) => {
                info!(path = %path.display(), "loading wizard reference data");
                Self::from_json_path(path)?
            }
            None => Self::standard(),
        };

        if let Some(path) = &config.company_signers_csv {
            info!(path = %path.display(), "importing company signer directory");
            let file = std::fs::File::open(path)?;
            reference = reference.with_company_signers_csv(file)?;
        }

        Ok(reference)
    }

    pub fn categories_for(&self, kind: DocumentKind) -> &[CategoryOption] {
        self.categories
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn company_signer(&self, id: &str) -> Option<&CompanySigner> {
        self.company_signers.iter().find(|signer| signer.id == id)
    }

    pub fn has_location(&self, location: &str) -> bool {
        self.locations.iter().any(|known| known == location)
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|known| known == role)
    }

    pub fn has_job_title(&self, title: &str) -> bool {
        self.job_titles.iter().any(|known| known == title)
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_covers_every_kind() {
        let reference = ReferenceData::standard();
        for kind in DocumentKind::ordered() {
            assert!(
                !reference.categories_for(kind).is_empty(),
                "{kind} has no categories"
            );
        }
        assert!(reference
            .categories_for(DocumentKind::WriteUp)
            .iter()
            .any(|option| option.value == "written-warning"));
    }

    #[test]
    fn json_fills_missing_sections_with_defaults() {
        let json = r#"{
            "categories": { "write-up": [{ "value": "coaching", "label": "Coaching" }] },
            "locations": ["Main Street"]
        }"#;
        let reference = ReferenceData::from_json_reader(json.as_bytes()).expect("json parses");

        assert_eq!(reference.categories_for(DocumentKind::WriteUp).len(), 1);
        assert!(reference.categories_for(DocumentKind::PdfSigning).is_empty());
        assert!(reference.has_location("Main Street"));
        assert!(reference.company_signers.is_empty());
    }

    #[test]
    fn csv_import_replaces_directory() {
        let csv = "Signer ID,Name,Title\ncs-9,Morgan Reyes,Controller\n";
        let reference = ReferenceData::standard()
            .with_company_signers_csv(csv.as_bytes())
            .expect("import succeeds");
        assert_eq!(reference.company_signers.len(), 1);
        assert_eq!(
            reference.company_signer("cs-9").map(|s| s.name.as_str()),
            Some("Morgan Reyes")
        );
        assert!(reference.company_signer("cs-owner").is_none());
    }

    #[test]
    fn empty_csv_import_is_rejected() {
        let csv = "Signer ID,Name,Title\n";
        let err = ReferenceData::standard()
            .with_company_signers_csv(csv.as_bytes())
            .expect_err("empty export rejected");
        assert!(matches!(err, ReferenceError::EmptyDirectory));
    }
}
