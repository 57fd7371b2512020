use serde::Serialize;

use super::domain::{DocumentKind, StepId, WizardStep};

/// Content block rendered by a wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPanel {
    DocumentUpload,
    BasicDetails,
    SignerSequence,
    FieldMapper,
    ManagerQuestions,
    WorkerQuestions,
    EscalationSettings,
    UploadRequirements,
    DuplicateSource,
    Permissions,
    Review,
}

impl StepPanel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::DocumentUpload => "Document upload",
            Self::BasicDetails => "Template details",
            Self::SignerSequence => "Signing order",
            Self::FieldMapper => "Field mapping",
            Self::ManagerQuestions => "Manager questions",
            Self::WorkerQuestions => "Worker questions",
            Self::EscalationSettings => "Decline & escalation",
            Self::UploadRequirements => "Upload requirements",
            Self::DuplicateSource => "Source template",
            Self::Permissions => "Permissions",
            Self::Review => "Review",
        }
    }
}

const REVIEW: WizardStep = WizardStep {
    id: StepId::Review,
    label: "Review",
};

static PDF_SIGNING_STEPS: [WizardStep; 3] = [
    WizardStep {
        id: StepId::Basics,
        label: "Upload & Signers",
    },
    WizardStep {
        id: StepId::Configure,
        label: "Map Fields",
    },
    REVIEW,
];

static SETUP_STEPS: [WizardStep; 2] = [
    WizardStep {
        id: StepId::Setup,
        label: "Setup",
    },
    REVIEW,
];

static DUPLICATE_STEPS: [WizardStep; 2] = [
    WizardStep {
        id: StepId::Select,
        label: "Select Source",
    },
    REVIEW,
];

/// Ordered steps shown for a document kind.
pub fn step_sequence(kind: DocumentKind) -> &'static [WizardStep] {
    match kind {
        DocumentKind::PdfSigning => &PDF_SIGNING_STEPS,
        DocumentKind::WriteUp | DocumentKind::CollectUploads => &SETUP_STEPS,
        DocumentKind::Duplicate => &DUPLICATE_STEPS,
    }
}

/// Panels rendered for a step. Steps a kind never visits render nothing.
pub fn panels_for(kind: DocumentKind, step: StepId) -> &'static [StepPanel] {
    use StepPanel::*;

    match (kind, step) {
        (DocumentKind::PdfSigning, StepId::Basics) => {
            &[DocumentUpload, BasicDetails, SignerSequence, Permissions]
        }
        (DocumentKind::PdfSigning, StepId::Configure) => &[FieldMapper],
        (DocumentKind::WriteUp, StepId::Setup) => &[
            BasicDetails,
            ManagerQuestions,
            WorkerQuestions,
            EscalationSettings,
            Permissions,
        ],
        (DocumentKind::CollectUploads, StepId::Setup) => {
            &[BasicDetails, UploadRequirements, Permissions]
        }
        (DocumentKind::Duplicate, StepId::Select) => &[DuplicateSource, BasicDetails, Permissions],
        (_, StepId::Review) => &[Review],
        _ => &[],
    }
}
