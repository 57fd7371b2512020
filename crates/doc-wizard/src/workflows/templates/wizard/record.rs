use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::super::domain::{DocumentKind, FileRef, Permissions, RecordStatus, TemplateId};
use super::super::draft::DraftState;
use super::super::mapper::MappedField;
use super::super::schema::FormFieldDefinition;
use super::super::signers::SignerEntry;

/// Finished template handed to the catalog. Built once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub id: TemplateId,
    pub name: String,
    pub category: String,
    pub description: String,
    pub kind: DocumentKind,
    pub status: RecordStatus,
    pub created_on: NaiveDate,
    pub permissions: Permissions,
    pub payload: TemplatePayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TemplatePayload {
    PdfSigning {
        file: Option<FileRef>,
        signers: Vec<SignerEntry>,
        fields: Vec<MappedField>,
    },
    WriteUp {
        manager_fields: Vec<FormFieldDefinition>,
        worker_fields: Vec<FormFieldDefinition>,
        allow_decline: bool,
        escalation_days: u32,
    },
    CollectUploads {
        requires_expiration: bool,
        requires_verification: bool,
    },
    Duplicate {
        source_category: String,
        source_template: Option<TemplateId>,
    },
}

impl TemplateRecord {
    pub fn is_draft(&self) -> bool {
        self.status == RecordStatus::Draft
    }
}

/// Project the draft into the catalog's record shape.
pub(crate) fn build_record(
    kind: DocumentKind,
    draft: &DraftState,
    id: TemplateId,
    status: RecordStatus,
    created_on: NaiveDate,
) -> TemplateRecord {
    let payload = match kind {
        DocumentKind::PdfSigning => TemplatePayload::PdfSigning {
            file: draft.file.clone(),
            signers: draft.signers.entries().to_vec(),
            fields: draft.mapper.fields().to_vec(),
        },
        DocumentKind::WriteUp => TemplatePayload::WriteUp {
            manager_fields: draft.manager_fields.fields().to_vec(),
            worker_fields: draft.worker_fields.fields().to_vec(),
            allow_decline: draft.allow_decline,
            escalation_days: draft.escalation_days,
        },
        DocumentKind::CollectUploads => TemplatePayload::CollectUploads {
            requires_expiration: draft.requires_expiration,
            requires_verification: draft.requires_verification,
        },
        DocumentKind::Duplicate => TemplatePayload::Duplicate {
            source_category: draft.source_category.clone().unwrap_or_default(),
            source_template: draft.source_template.clone(),
        },
    };

    TemplateRecord {
        id,
        name: draft.name.trim().to_string(),
        category: draft.category.trim().to_string(),
        description: draft.description.trim().to_string(),
        kind,
        status,
        created_on,
        permissions: draft.permissions.clone(),
        payload,
    }
}
