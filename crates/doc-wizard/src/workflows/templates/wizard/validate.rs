use super::super::domain::{DocumentKind, StepId};
use super::super::draft::DraftState;

/// Gate that must hold before the wizard advances past `step`.
pub fn is_step_valid(kind: DocumentKind, step: StepId, draft: &DraftState) -> bool {
    match step {
        StepId::Basics => {
            kind == DocumentKind::PdfSigning
                && draft.file.is_some()
                && draft.has_name()
                && !draft.signers.is_empty()
        }
        StepId::Setup => {
            matches!(kind, DocumentKind::WriteUp | DocumentKind::CollectUploads)
                && draft.has_name()
                && draft.has_category()
        }
        StepId::Select => {
            kind == DocumentKind::Duplicate
                && draft
                    .source_category
                    .as_deref()
                    .is_some_and(|category| !category.trim().is_empty())
                && draft.has_name()
        }
        StepId::Configure | StepId::Review => true,
    }
}

/// Draft saving is a write-up feature and only needs a name and a category.
pub fn can_save_as_draft(kind: DocumentKind, draft: &DraftState) -> bool {
    kind == DocumentKind::WriteUp && draft.has_name() && draft.has_category()
}
