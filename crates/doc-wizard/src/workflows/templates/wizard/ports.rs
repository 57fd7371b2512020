use super::super::domain::{Notification, TemplateId};
use super::record::TemplateRecord;

/// Destination for finished templates (list refresh, persistence).
pub trait TemplateCatalog: Send + Sync {
    fn submit(&self, record: TemplateRecord) -> Result<(), CatalogError>;
    fn save_draft(&self, record: TemplateRecord) -> Result<(), CatalogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("template {0} already exists")]
    Conflict(TemplateId),
    #[error("template catalog unavailable: {0}")]
    Unavailable(String),
}

/// Host surface for toasts and dismissal.
pub trait WizardHost: Send + Sync {
    fn notify(&self, notification: Notification) -> Result<(), NotifyError>;
    fn closed(&self);
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
