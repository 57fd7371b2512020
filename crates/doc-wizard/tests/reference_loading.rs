use std::path::PathBuf;

use doc_wizard::config::WizardConfig;
use doc_wizard::workflows::templates::{DocumentKind, ReferenceData, ReferenceError};

#[test]
fn default_config_uses_the_built_in_catalog() {
    let reference = ReferenceData::load(&WizardConfig::default()).expect("built-in data");
    assert_eq!(reference, ReferenceData::standard());
    assert!(reference.company_signer("cs-ops-manager").is_some());
}

#[test]
fn missing_reference_file_is_an_io_error() {
    let config = WizardConfig {
        reference_path: Some(PathBuf::from("/nonexistent/doc-wizard/reference.json")),
        ..WizardConfig::default()
    };
    assert!(matches!(
        ReferenceData::load(&config),
        Err(ReferenceError::Io(_))
    ));
}

#[test]
fn json_catalog_and_signer_export_combine() {
    let json = r#"{
        "categories": {
            "collect-uploads": [{ "value": "permit", "label": "Work Permit" }]
        },
        "locations": ["Harbor"],
        "roles": ["Barista"],
        "job_titles": ["Barista"]
    }"#;
    let csv = "Signer ID,Name,Title,Email\n\
               cs-gm, Avery Cole ,General Manager,avery@example.com\n\
               cs-gm,Duplicate,General Manager,\n";

    let reference = ReferenceData::from_json_reader(json.as_bytes())
        .and_then(|reference| reference.with_company_signers_csv(csv.as_bytes()))
        .expect("reference data loads");

    assert_eq!(
        reference.categories_for(DocumentKind::CollectUploads)[0].label,
        "Work Permit"
    );
    assert!(reference.has_location("Harbor"));
    assert!(!reference.has_location("Downtown"));
    assert!(reference.has_job_title("Barista"));
    assert_eq!(reference.company_signers.len(), 1);
    assert_eq!(
        reference.company_signer("cs-gm").map(|signer| signer.name.as_str()),
        Some("Avery Cole")
    );
}

#[test]
fn malformed_json_is_reported() {
    let err = ReferenceData::from_json_reader("{ not json".as_bytes())
        .expect_err("invalid json rejected");
    assert!(matches!(err, ReferenceError::Json(_)));
}

#[test]
fn bundled_sample_files_load_through_config() {
    let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
    let config = WizardConfig {
        reference_path: Some(data.join("reference.json")),
        company_signers_csv: Some(data.join("company_signers.csv")),
        ..WizardConfig::default()
    };

    let reference = ReferenceData::load(&config).expect("sample data loads");
    assert_eq!(reference.categories_for(DocumentKind::WriteUp).len(), 3);
    assert!(reference.has_role("Store Manager"));
    let ids: Vec<_> = reference
        .company_signers
        .iter()
        .map(|signer| signer.id.as_str())
        .collect();
    assert_eq!(ids, vec!["cs-hr-lead", "cs-regional"]);
    assert!(reference.company_signer("cs-store-manager").is_none());
}
