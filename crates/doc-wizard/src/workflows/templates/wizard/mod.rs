pub mod controller;
mod edit;
pub mod ports;
mod record;
mod review;
mod state;
pub mod validate;

pub use controller::{WizardController, WizardError};
pub use edit::{DraftEdit, EditOutcome, MapperEdit, SchemaEdit, SignerEdit};
pub use ports::{CatalogError, NotifyError, TemplateCatalog, WizardHost};
pub use record::{TemplatePayload, TemplateRecord};
pub use review::{ReviewDetails, ReviewSummary, RoleFieldCount};
pub use state::{Completion, Navigation, WizardState};
pub use validate::{can_save_as_draft, is_step_valid};
