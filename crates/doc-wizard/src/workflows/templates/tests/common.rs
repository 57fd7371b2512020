use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::workflows::templates::domain::{FileRef, Notification};
use crate::workflows::templates::ids::{FixedClock, SequentialIds, WizardContext};
use crate::workflows::templates::reference::ReferenceData;
use crate::workflows::templates::wizard::{
    CatalogError, NotifyError, TemplateCatalog, TemplateRecord, WizardHost,
};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date")
}

pub(super) fn context() -> WizardContext {
    WizardContext::new(Arc::new(ReferenceData::standard()), "tpl")
        .with_ids(Arc::new(SequentialIds::default()))
        .with_clock(Arc::new(FixedClock(today())))
}

pub(super) fn nda_pdf() -> FileRef {
    FileRef::new("nda.pdf", 48_213)
}

#[derive(Default)]
pub(super) struct MemoryCatalog {
    submitted: Mutex<Vec<TemplateRecord>>,
    drafts: Mutex<Vec<TemplateRecord>>,
    unavailable: AtomicBool,
}

impl MemoryCatalog {
    pub(super) fn submitted(&self) -> Vec<TemplateRecord> {
        self.submitted.lock().expect("catalog mutex poisoned").clone()
    }

    pub(super) fn drafts(&self) -> Vec<TemplateRecord> {
        self.drafts.lock().expect("catalog mutex poisoned").clone()
    }

    pub(super) fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), CatalogError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(CatalogError::Unavailable("maintenance window".to_string()))
        } else {
            Ok(())
        }
    }
}

impl TemplateCatalog for MemoryCatalog {
    fn submit(&self, record: TemplateRecord) -> Result<(), CatalogError> {
        self.check()?;
        self.submitted
            .lock()
            .expect("catalog mutex poisoned")
            .push(record);
        Ok(())
    }

    fn save_draft(&self, record: TemplateRecord) -> Result<(), CatalogError> {
        self.check()?;
        self.drafts.lock().expect("catalog mutex poisoned").push(record);
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct RecordingHost {
    notifications: Mutex<Vec<Notification>>,
    closed: AtomicUsize,
    failing: AtomicBool,
}

impl RecordingHost {
    pub(super) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub(super) fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .expect("host mutex poisoned")
            .clone()
    }

    pub(super) fn closed_count(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

impl WizardHost for RecordingHost {
    fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotifyError::Transport("toast down".to_string()));
        }
        self.notifications
            .lock()
            .expect("host mutex poisoned")
            .push(notification);
        Ok(())
    }

    fn closed(&self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}
