use tracing::{debug, info, warn};

use super::super::blueprint::{panels_for, step_sequence, StepPanel};
use super::super::domain::{
    DocumentKind, EditSeed, Notification, RecordStatus, Severity, StepId, TemplateId, WizardStep,
};
use super::super::draft::DraftState;
use super::super::ids::WizardContext;
use super::edit::{apply_edit, DraftEdit, EditOutcome};
use super::record::{build_record, TemplateRecord};
use super::review::{summarize, ReviewSummary};
use super::validate;

/// Result of a navigation request.
#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    /// The active step's gate does not hold.
    Blocked,
    /// Already at the first step; nothing changed.
    Stayed,
    Moved { from: usize, to: usize },
    /// The wizard finished; the record still has to be handed off.
    Complete(Completion),
}

/// Record plus the toast that accompanies it once the catalog accepts it.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub record: TemplateRecord,
    pub notification: Notification,
}

/// One wizard session: document kind, step position, and the draft being built.
///
/// All transitions are synchronous and side-effect free; handing records to the catalog
/// and emitting notifications is left to [`super::WizardController`].
#[derive(Debug, Clone)]
pub struct WizardState {
    kind: DocumentKind,
    steps: &'static [WizardStep],
    step_index: usize,
    draft: DraftState,
    editing: Option<TemplateId>,
    record_id: TemplateId,
    context: WizardContext,
}

impl WizardState {
    pub fn open(kind: DocumentKind, seed: Option<EditSeed>, context: WizardContext) -> Self {
        let mut draft = DraftState::for_kind(kind, context.ids.as_ref());
        let editing = match seed {
            Some(seed) if seed.kind == kind => {
                draft.apply_seed(&seed);
                Some(seed.id)
            }
            Some(seed) => {
                warn!(
                    expected = %kind,
                    found = %seed.kind,
                    template = %seed.id,
                    "ignoring edit seed for a different document kind"
                );
                None
            }
            None => None,
        };

        let record_id = editing
            .clone()
            .unwrap_or_else(|| TemplateId(context.ids.next_id(&context.record_prefix)));

        info!(
            kind = %kind,
            template = %record_id,
            editing = editing.is_some(),
            "template wizard opened"
        );

        Self {
            kind,
            steps: step_sequence(kind),
            step_index: 0,
            draft,
            editing,
            record_id,
            context,
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn steps(&self) -> &'static [WizardStep] {
        self.steps
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn current_step(&self) -> WizardStep {
        self.steps[self.step_index]
    }

    pub fn is_first_step(&self) -> bool {
        self.step_index == 0
    }

    pub fn is_last_step(&self) -> bool {
        self.step_index + 1 == self.steps.len()
    }

    pub fn panels(&self) -> &'static [StepPanel] {
        panels_for(self.kind, self.current_step().id)
    }

    pub fn draft(&self) -> &DraftState {
        &self.draft
    }

    pub fn editing(&self) -> Option<&TemplateId> {
        self.editing.as_ref()
    }

    /// Id the finished record is stored under; fixed for the whole session.
    pub fn record_id(&self) -> &TemplateId {
        &self.record_id
    }

    pub fn context(&self) -> &WizardContext {
        &self.context
    }

    pub fn is_step_valid(&self, step: StepId) -> bool {
        validate::is_step_valid(self.kind, step, &self.draft)
    }

    pub fn can_advance(&self) -> bool {
        self.is_step_valid(self.current_step().id)
    }

    pub fn can_save_as_draft(&self) -> bool {
        validate::can_save_as_draft(self.kind, &self.draft)
    }

    pub fn review_summary(&self) -> ReviewSummary {
        summarize(self.kind, &self.draft, &self.context.reference)
    }

    /// Apply an edit if the current step shows the panel it belongs to.
    pub fn apply(&mut self, edit: DraftEdit) -> EditOutcome {
        let panel = edit.panel();
        if !self.panels().contains(&panel) {
            debug!(
                step = self.current_step().id.as_str(),
                panel = panel.label(),
                "edit refused: panel not shown on this step"
            );
            return EditOutcome::Refused;
        }

        match apply_edit(
            &mut self.draft,
            edit,
            &self.context.reference,
            self.context.ids.as_ref(),
        ) {
            Ok(()) => {
                self.draft.touch();
                EditOutcome::Applied
            }
            Err(reason) => {
                debug!(panel = panel.label(), reason, "edit refused");
                EditOutcome::Refused
            }
        }
    }

    pub fn go_next(&mut self) -> Navigation {
        if !self.can_advance() {
            debug!(step = self.current_step().id.as_str(), "advance blocked");
            return Navigation::Blocked;
        }
        if self.is_last_step() {
            return self.submit();
        }

        let from = self.step_index;
        self.step_index += 1;
        debug!(from, to = self.step_index, "wizard advanced");
        Navigation::Moved {
            from,
            to: self.step_index,
        }
    }

    pub fn go_back(&mut self) -> Navigation {
        if self.is_first_step() {
            return Navigation::Stayed;
        }
        let from = self.step_index;
        self.step_index -= 1;
        Navigation::Moved {
            from,
            to: self.step_index,
        }
    }

    /// Build the active record. Every step gate must hold.
    pub fn submit(&self) -> Navigation {
        if let Some(step) = self.steps.iter().find(|step| !self.is_step_valid(step.id)) {
            debug!(step = step.id.as_str(), "submit blocked by invalid step");
            return Navigation::Blocked;
        }

        let record = self.record(RecordStatus::Active);
        let verb = if self.editing.is_some() {
            "updated"
        } else {
            "created"
        };
        let notification = Notification::new(
            Severity::Success,
            format!("Template \"{}\" {verb}", record.name),
        );
        Navigation::Complete(Completion {
            record,
            notification,
        })
    }

    /// Build a draft record; write-up only, needs name and category.
    pub fn save_as_draft(&self) -> Option<Completion> {
        if !self.can_save_as_draft() {
            return None;
        }
        let record = self.record(RecordStatus::Draft);
        let notification =
            Notification::new(Severity::Success, format!("Draft \"{}\" saved", record.name));
        Some(Completion {
            record,
            notification,
        })
    }

    /// Toast shown when the wizard is dismissed with unsaved edits.
    pub fn discard_notice(&self) -> Option<Notification> {
        self.draft
            .is_dirty()
            .then(|| Notification::new(Severity::Info, "Discarded unsaved changes"))
    }

    fn record(&self, status: RecordStatus) -> TemplateRecord {
        build_record(
            self.kind,
            &self.draft,
            self.record_id.clone(),
            status,
            self.context.clock.today(),
        )
    }
}
