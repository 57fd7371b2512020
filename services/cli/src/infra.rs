use chrono::NaiveDate;
use doc_wizard::workflows::templates::{
    CatalogError, DocumentKind, Notification, NotifyError, TemplateCatalog, TemplateId,
    TemplateRecord, WizardHost,
};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Catalog keyed by template id. Submitting an existing id replaces it (an edit);
/// an active template cannot be demoted back to a draft.
#[derive(Default, Clone)]
pub(crate) struct InMemoryTemplateCatalog {
    records: Arc<Mutex<BTreeMap<TemplateId, TemplateRecord>>>,
}

impl InMemoryTemplateCatalog {
    pub(crate) fn records(&self) -> Vec<TemplateRecord> {
        self.records
            .lock()
            .map(|guard| guard.values().cloned().collect())
            .unwrap_or_default()
    }
}

impl TemplateCatalog for InMemoryTemplateCatalog {
    fn submit(&self, record: TemplateRecord) -> Result<(), CatalogError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| CatalogError::Unavailable("catalog mutex poisoned".to_string()))?;
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn save_draft(&self, record: TemplateRecord) -> Result<(), CatalogError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| CatalogError::Unavailable("catalog mutex poisoned".to_string()))?;
        if guard
            .get(&record.id)
            .is_some_and(|existing| !existing.is_draft())
        {
            return Err(CatalogError::Conflict(record.id));
        }
        guard.insert(record.id.clone(), record);
        Ok(())
    }
}

/// Prints notifications as they arrive unless `echo` is off; always keeps them.
#[derive(Clone)]
pub(crate) struct ConsoleHost {
    echo: bool,
    notifications: Arc<Mutex<Vec<Notification>>>,
    closed: Arc<AtomicUsize>,
}

impl ConsoleHost {
    pub(crate) fn new(echo: bool) -> Self {
        Self {
            echo,
            notifications: Arc::default(),
            closed: Arc::default(),
        }
    }

    pub(crate) fn closed_count(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

impl WizardHost for ConsoleHost {
    fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        if self.echo {
            println!(
                "[{}] {}",
                notification.severity.label(),
                notification.message
            );
        }
        self.notifications
            .lock()
            .map_err(|_| NotifyError::Transport("notification log poisoned".to_string()))?
            .push(notification);
        Ok(())
    }

    fn closed(&self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

pub(crate) fn parse_kind(raw: &str) -> Result<DocumentKind, String> {
    DocumentKind::from_slug(raw).ok_or_else(|| {
        let known: Vec<_> = DocumentKind::ordered()
            .into_iter()
            .map(DocumentKind::slug)
            .collect();
        format!("unknown document kind '{raw}' (expected one of {})", known.join(", "))
    })
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_parse_from_slugs() {
        assert_eq!(parse_kind("write-up"), Ok(DocumentKind::WriteUp));
        let err = parse_kind("memo").expect_err("unknown kind");
        assert!(err.contains("pdf-signing"));
    }

    #[test]
    fn dates_parse_as_iso() {
        assert_eq!(
            parse_date(" 2025-10-01 "),
            Ok(NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date"))
        );
        assert!(parse_date("10/01/2025").is_err());
    }
}
