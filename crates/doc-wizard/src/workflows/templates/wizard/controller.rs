use std::sync::Arc;

use tracing::{info, warn};

use super::super::domain::{DocumentKind, EditSeed, Notification, Severity};
use super::super::ids::WizardContext;
use super::edit::{DraftEdit, EditOutcome};
use super::ports::{CatalogError, NotifyError, TemplateCatalog, WizardHost};
use super::review::ReviewSummary;
use super::state::{Completion, Navigation, WizardState};

/// Drives a [`WizardState`] and performs its effects against the catalog and host.
pub struct WizardController<C, H> {
    catalog: Arc<C>,
    host: Arc<H>,
    context: WizardContext,
    session: Option<WizardState>,
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("no template wizard is open")]
    NotOpen,
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}

impl<C, H> WizardController<C, H>
where
    C: TemplateCatalog + 'static,
    H: WizardHost + 'static,
{
    pub fn new(catalog: Arc<C>, host: Arc<H>, context: WizardContext) -> Self {
        Self {
            catalog,
            host,
            context,
            session: None,
        }
    }

    /// Start a fresh session. A session already open is dismissed as if by [`Self::close`].
    pub fn open(&mut self, kind: DocumentKind, seed: Option<EditSeed>) -> &WizardState {
        if let Err(err) = self.close() {
            warn!(error = %err, "could not report the replaced session");
        }
        self.session
            .insert(WizardState::open(kind, seed, self.context.clone()))
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn state(&self) -> Option<&WizardState> {
        self.session.as_ref()
    }

    pub fn apply(&mut self, edit: DraftEdit) -> Result<EditOutcome, WizardError> {
        Ok(self.session_mut()?.apply(edit))
    }

    pub fn review_summary(&self) -> Result<ReviewSummary, WizardError> {
        Ok(self.session()?.review_summary())
    }

    /// Advance; on the last step this submits and closes the wizard.
    pub fn go_next(&mut self) -> Result<Navigation, WizardError> {
        let navigation = self.session_mut()?.go_next();
        if let Navigation::Complete(completion) = &navigation {
            self.finish(completion.clone(), FinishKind::Submit)?;
        }
        Ok(navigation)
    }

    pub fn go_back(&mut self) -> Result<Navigation, WizardError> {
        Ok(self.session_mut()?.go_back())
    }

    pub fn submit(&mut self) -> Result<Navigation, WizardError> {
        let navigation = self.session()?.submit();
        if let Navigation::Complete(completion) = &navigation {
            self.finish(completion.clone(), FinishKind::Submit)?;
        }
        Ok(navigation)
    }

    /// Save a write-up as a draft. `Ok(None)` when saving is not available.
    pub fn save_as_draft(&mut self) -> Result<Option<Completion>, WizardError> {
        let Some(completion) = self.session()?.save_as_draft() else {
            return Ok(None);
        };
        self.finish(completion.clone(), FinishKind::Draft)?;
        Ok(Some(completion))
    }

    /// Dismiss the wizard, discarding every uncommitted edit.
    pub fn close(&mut self) -> Result<(), WizardError> {
        let Some(session) = self.session.take() else {
            return Ok(());
        };
        info!(kind = %session.kind(), "template wizard closed without saving");
        let notified = session
            .discard_notice()
            .map_or(Ok(()), |notice| self.host.notify(notice));
        self.host.closed();
        notified?;
        Ok(())
    }

    fn finish(&mut self, completion: Completion, finish: FinishKind) -> Result<(), WizardError> {
        let Completion {
            record,
            notification,
        } = completion;
        let record_id = record.id.clone();
        let kind = record.kind;

        let handoff = match finish {
            FinishKind::Submit => self.catalog.submit(record),
            FinishKind::Draft => self.catalog.save_draft(record),
        };

        if let Err(err) = handoff {
            warn!(template = %record_id, error = %err, "catalog rejected template");
            let notice =
                Notification::new(Severity::Error, format!("Could not save template: {err}"));
            if let Err(notify_err) = self.host.notify(notice) {
                warn!(error = %notify_err, "could not report catalog failure");
            }
            return Err(err.into());
        }

        info!(
            template = %record_id,
            kind = %kind,
            status = finish.status_label(),
            "template handed to catalog"
        );
        self.session = None;
        let notified = self.host.notify(notification);
        self.host.closed();
        notified?;
        Ok(())
    }

    fn session(&self) -> Result<&WizardState, WizardError> {
        self.session.as_ref().ok_or(WizardError::NotOpen)
    }

    fn session_mut(&mut self) -> Result<&mut WizardState, WizardError> {
        self.session.as_mut().ok_or(WizardError::NotOpen)
    }
}

#[derive(Debug, Clone, Copy)]
enum FinishKind {
    Submit,
    Draft,
}

impl FinishKind {
    fn status_label(self) -> &'static str {
        match self {
            Self::Submit => "active",
            Self::Draft => "draft",
        }
    }
}
