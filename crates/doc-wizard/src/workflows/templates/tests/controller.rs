use std::sync::Arc;

use super::common::*;
use crate::workflows::templates::domain::{DocumentKind, RecordStatus, Severity};
use crate::workflows::templates::wizard::{
    CatalogError, DraftEdit, Navigation, NotifyError, WizardController, WizardError,
};

type Controller = WizardController<MemoryCatalog, RecordingHost>;

fn controller() -> (Controller, Arc<MemoryCatalog>, Arc<RecordingHost>) {
    let catalog = Arc::new(MemoryCatalog::default());
    let host = Arc::new(RecordingHost::default());
    let controller = WizardController::new(catalog.clone(), host.clone(), context());
    (controller, catalog, host)
}

#[test]
fn operations_need_an_open_session() {
    let (mut controller, _, _) = controller();
    assert!(matches!(controller.go_next(), Err(WizardError::NotOpen)));
    assert!(matches!(
        controller.apply(DraftEdit::SetName("x".to_string())),
        Err(WizardError::NotOpen)
    ));
    assert!(controller.close().is_ok(), "closing twice is harmless");
}

#[test]
fn finishing_hands_off_notifies_and_closes() {
    let (mut controller, catalog, host) = controller();
    controller.open(DocumentKind::WriteUp, None);

    assert!(matches!(
        controller.go_next().expect("open"),
        Navigation::Moved { from: 0, to: 1 }
    ));
    assert!(matches!(
        controller.go_next().expect("open"),
        Navigation::Complete(_)
    ));

    assert!(!controller.is_open());
    let submitted = catalog.submitted();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].status, RecordStatus::Active);
    assert_eq!(host.closed_count(), 1);
    let notifications = host.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].message, "Template \"Employee Write-Up\" created");
}

#[test]
fn saving_a_draft_goes_to_the_draft_channel() {
    let (mut controller, catalog, host) = controller();
    controller.open(DocumentKind::WriteUp, None);

    let saved = controller
        .save_as_draft()
        .expect("catalog available")
        .expect("write-up can be saved");
    assert!(saved.record.is_draft());
    assert_eq!(catalog.drafts().len(), 1);
    assert!(catalog.submitted().is_empty());
    assert_eq!(host.closed_count(), 1);
}

#[test]
fn unavailable_draft_saving_changes_nothing() {
    let (mut controller, catalog, host) = controller();
    controller.open(DocumentKind::CollectUploads, None);

    assert_eq!(controller.save_as_draft().expect("open").map(|c| c.record), None);
    assert!(controller.is_open());
    assert!(catalog.drafts().is_empty());
    assert!(host.notifications().is_empty());
}

#[test]
fn catalog_failure_keeps_the_session_and_reports_an_error() {
    let (mut controller, catalog, host) = controller();
    catalog.set_unavailable(true);
    controller.open(DocumentKind::WriteUp, None);

    match controller.submit() {
        Err(WizardError::Catalog(CatalogError::Unavailable(reason))) => {
            assert_eq!(reason, "maintenance window")
        }
        other => panic!("expected catalog failure, got {other:?}"),
    }
    assert!(controller.is_open());
    assert_eq!(host.closed_count(), 0);
    let notifications = host.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].severity, Severity::Error);

    catalog.set_unavailable(false);
    assert!(matches!(
        controller.submit().expect("catalog back"),
        Navigation::Complete(_)
    ));
    assert_eq!(catalog.submitted().len(), 1);
}

#[test]
fn closing_discards_edits_with_a_notice() {
    let (mut controller, catalog, host) = controller();
    controller.open(DocumentKind::WriteUp, None);
    controller.close().expect("close");
    assert!(host.notifications().is_empty(), "no edits, no notice");
    assert_eq!(host.closed_count(), 1);

    controller.open(DocumentKind::WriteUp, None);
    controller
        .apply(DraftEdit::SetName("Tardiness".to_string()))
        .expect("open");
    controller.close().expect("close");

    assert!(!controller.is_open());
    assert!(catalog.submitted().is_empty());
    assert_eq!(host.closed_count(), 2);
    let notifications = host.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].message, "Discarded unsaved changes");
}

#[test]
fn failed_toast_after_submit_still_closes() {
    let (mut controller, catalog, host) = controller();
    host.set_failing(true);
    controller.open(DocumentKind::WriteUp, None);

    assert!(matches!(
        controller.submit(),
        Err(WizardError::Notify(NotifyError::Transport(_)))
    ));
    assert!(!controller.is_open());
    assert_eq!(catalog.submitted().len(), 1);
    assert_eq!(host.closed_count(), 1);
}

#[test]
fn catalog_error_wins_over_a_failed_toast() {
    let (mut controller, catalog, host) = controller();
    catalog.set_unavailable(true);
    host.set_failing(true);
    controller.open(DocumentKind::WriteUp, None);

    assert!(matches!(
        controller.submit(),
        Err(WizardError::Catalog(CatalogError::Unavailable(_)))
    ));
    assert!(controller.is_open());
    assert_eq!(host.closed_count(), 0);
}

#[test]
fn failed_discard_notice_still_closes() {
    let (mut controller, _, host) = controller();
    controller.open(DocumentKind::WriteUp, None);
    controller
        .apply(DraftEdit::SetName("Tardiness".to_string()))
        .expect("open");
    host.set_failing(true);

    assert!(matches!(controller.close(), Err(WizardError::Notify(_))));
    assert!(!controller.is_open());
    assert_eq!(host.closed_count(), 1);
}

#[test]
fn reopening_dismisses_the_previous_session() {
    let (mut controller, _, host) = controller();
    controller.open(DocumentKind::WriteUp, None);
    controller
        .apply(DraftEdit::SetName("Tardiness".to_string()))
        .expect("open");

    let state = controller.open(DocumentKind::CollectUploads, None);
    assert_eq!(state.kind(), DocumentKind::CollectUploads);
    assert!(!state.draft().is_dirty());
    assert_eq!(host.closed_count(), 1);
    let notifications = host.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].message, "Discarded unsaved changes");
}

#[test]
fn retry_after_catalog_failure_keeps_the_record_id() {
    let (mut controller, catalog, _) = controller();
    catalog.set_unavailable(true);
    let id = controller
        .open(DocumentKind::WriteUp, None)
        .record_id()
        .clone();

    assert!(controller.submit().is_err());
    catalog.set_unavailable(false);
    controller.submit().expect("catalog back");

    let submitted = catalog.submitted();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].id, id);
}
