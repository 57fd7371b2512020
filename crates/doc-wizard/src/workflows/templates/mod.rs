//! Document template wizard: step gating per document kind plus the question-schema,
//! signer-sequence, and field-mapping builders that feed the finished template record.

mod blueprint;
pub mod domain;
pub mod draft;
pub mod ids;
pub mod mapper;
pub mod reference;
pub mod schema;
pub mod signers;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use blueprint::{panels_for, step_sequence, StepPanel};
pub use domain::{
    AutoAssignRule, CanvasRect, DocumentKind, EditSeed, FieldId, FieldType, FileRef,
    MappedFieldId, MappedFieldKind, MoveDirection, Notification, Permissions, Point,
    RecordStatus, SchemaSection, Severity, SignerId, SignerRole, StepId, TemplateId, WizardStep,
};
pub use draft::DraftState;
pub use ids::{Clock, FixedClock, IdGenerator, SequentialIds, SystemClock, WizardContext};
pub use mapper::{MappedField, SpatialFieldMapper};
pub use reference::{CategoryOption, CompanySigner, ReferenceData, ReferenceError};
pub use schema::{FieldPatch, FieldSchemaBuilder, FormFieldDefinition};
pub use signers::{SignerEntry, SignerSequenceManager};
pub use wizard::{
    CatalogError, Completion, DraftEdit, EditOutcome, MapperEdit, Navigation, NotifyError,
    ReviewDetails, ReviewSummary, SchemaEdit, SignerEdit, TemplateCatalog, TemplatePayload,
    TemplateRecord, WizardController, WizardError, WizardHost, WizardState,
};
