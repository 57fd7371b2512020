use serde::Serialize;

use super::super::domain::{DocumentKind, SignerRole};
use super::super::draft::DraftState;
use super::super::reference::ReferenceData;

const ORDER_SEPARATOR: &str = " → ";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSummary {
    pub kind: DocumentKind,
    pub kind_label: &'static str,
    pub name: String,
    pub category: String,
    pub category_label: String,
    pub description: String,
    pub locations: usize,
    pub roles: usize,
    pub auto_assign: String,
    pub details: ReviewDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ReviewDetails {
    PdfSigning {
        file_name: Option<String>,
        file_size: Option<String>,
        total_signers: usize,
        signing_order: Vec<String>,
        signing_order_display: String,
        unresolved_signers: usize,
        mapped_fields: usize,
        fields_by_role: Vec<RoleFieldCount>,
    },
    WriteUp {
        manager_questions: usize,
        worker_questions: usize,
        required_questions: usize,
        allow_decline: bool,
        escalation_days: u32,
    },
    CollectUploads {
        requires_expiration: bool,
        requires_verification: bool,
    },
    Duplicate {
        source_category: Option<String>,
        source_template: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleFieldCount {
    pub role: SignerRole,
    pub role_label: &'static str,
    pub fields: usize,
}

impl ReviewSummary {
    pub fn total_signers(&self) -> usize {
        match &self.details {
            ReviewDetails::PdfSigning { total_signers, .. } => *total_signers,
            _ => 0,
        }
    }

    pub fn mapped_fields(&self) -> usize {
        match &self.details {
            ReviewDetails::PdfSigning { mapped_fields, .. } => *mapped_fields,
            _ => 0,
        }
    }
}

pub(crate) fn summarize(
    kind: DocumentKind,
    draft: &DraftState,
    reference: &ReferenceData,
) -> ReviewSummary {
    let category_label = reference
        .categories_for(kind)
        .iter()
        .find(|option| option.value == draft.category)
        .map(|option| option.label.clone())
        .unwrap_or_else(|| draft.category.clone());

    let details = match kind {
        DocumentKind::PdfSigning => {
            let signing_order = draft.signers.signing_order(reference);
            let fields_by_role = draft
                .signers
                .available_roles()
                .into_iter()
                .map(|role| RoleFieldCount {
                    role,
                    role_label: role.label(),
                    fields: draft.mapper.count_for(role),
                })
                .collect();

            ReviewDetails::PdfSigning {
                file_name: draft.file.as_ref().map(|file| file.name.clone()),
                file_size: draft.file.as_ref().map(|file| file.display_size()),
                total_signers: draft.signers.len(),
                signing_order_display: signing_order.join(ORDER_SEPARATOR),
                signing_order,
                unresolved_signers: draft.signers.unresolved_count(),
                mapped_fields: draft.mapper.len(),
                fields_by_role,
            }
        }
        DocumentKind::WriteUp => ReviewDetails::WriteUp {
            manager_questions: draft.manager_fields.len(),
            worker_questions: draft.worker_fields.len(),
            required_questions: draft
                .manager_fields
                .fields()
                .iter()
                .chain(draft.worker_fields.fields())
                .filter(|field| field.required)
                .count(),
            allow_decline: draft.allow_decline,
            escalation_days: draft.escalation_days,
        },
        DocumentKind::CollectUploads => ReviewDetails::CollectUploads {
            requires_expiration: draft.requires_expiration,
            requires_verification: draft.requires_verification,
        },
        DocumentKind::Duplicate => ReviewDetails::Duplicate {
            source_category: draft.source_category.clone(),
            source_template: draft.source_template.as_ref().map(|id| id.0.clone()),
        },
    };

    ReviewSummary {
        kind,
        kind_label: kind.label(),
        name: draft.name.clone(),
        category: draft.category.clone(),
        category_label,
        description: draft.description.clone(),
        locations: draft.permissions.locations.len(),
        roles: draft.permissions.roles.len(),
        auto_assign: draft.permissions.auto_assign.label(),
        details,
    }
}
