use super::super::blueprint::StepPanel;
use super::super::domain::{
    AutoAssignRule, CanvasRect, FieldId, FieldType, FileRef, MappedFieldId, MappedFieldKind,
    MoveDirection, Point, SchemaSection, SignerId, SignerRole, TemplateId,
};
use super::super::draft::{parse_escalation_days, DraftState};
use super::super::ids::IdGenerator;
use super::super::reference::ReferenceData;
use super::super::schema::FieldPatch;

/// Step-scoped change to the draft.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftEdit {
    SetName(String),
    SetCategory(String),
    SetDescription(String),
    AttachFile(FileRef),
    RemoveFile,
    Schema(SchemaSection, SchemaEdit),
    Signers(SignerEdit),
    Mapper(MapperEdit),
    SetAllowDecline(bool),
    /// Raw text from the escalation-days input.
    SetEscalationDays(String),
    SetRequiresExpiration(bool),
    SetRequiresVerification(bool),
    ToggleLocation(String),
    ToggleRole(String),
    SetAutoAssign(AutoAssignRule),
    SelectDuplicateSource {
        category: String,
        template: Option<TemplateId>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SchemaEdit {
    AddField(FieldType),
    UpdateField(FieldId, FieldPatch),
    RemoveField(FieldId),
    AddOption(FieldId),
    UpdateOption(FieldId, usize, String),
    RemoveOption(FieldId, usize),
    MoveField(usize, MoveDirection),
    Expand(Option<FieldId>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignerEdit {
    ToggleTeamMember,
    ToggleCompany,
    AddCompanySigner,
    SetIdentity(SignerId, String),
    RemoveEntry(SignerId),
    MoveUp(usize),
    MoveDown(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapperEdit {
    AddField {
        kind: MappedFieldKind,
        label: Option<String>,
    },
    RemoveField(MappedFieldId),
    SetActiveRole(SignerRole),
    BeginPlacement {
        kind: MappedFieldKind,
        label: Option<String>,
    },
    CancelPlacement,
    BeginDrag(MappedFieldId),
    DropOnCanvas {
        pointer: Point,
        canvas: CanvasRect,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    Refused,
}

impl EditOutcome {
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

impl DraftEdit {
    /// Panel that must be on screen for this edit to be accepted.
    pub fn panel(&self) -> StepPanel {
        match self {
            Self::SetName(_) | Self::SetCategory(_) | Self::SetDescription(_) => {
                StepPanel::BasicDetails
            }
            Self::AttachFile(_) | Self::RemoveFile => StepPanel::DocumentUpload,
            Self::Schema(SchemaSection::Manager, _) => StepPanel::ManagerQuestions,
            Self::Schema(SchemaSection::Worker, _) => StepPanel::WorkerQuestions,
            Self::Signers(_) => StepPanel::SignerSequence,
            Self::Mapper(_) => StepPanel::FieldMapper,
            Self::SetAllowDecline(_) | Self::SetEscalationDays(_) => StepPanel::EscalationSettings,
            Self::SetRequiresExpiration(_) | Self::SetRequiresVerification(_) => {
                StepPanel::UploadRequirements
            }
            Self::ToggleLocation(_) | Self::ToggleRole(_) | Self::SetAutoAssign(_) => {
                StepPanel::Permissions
            }
            Self::SelectDuplicateSource { .. } => StepPanel::DuplicateSource,
        }
    }
}

/// Apply `edit` to `draft`, or explain why it was refused.
pub(crate) fn apply_edit(
    draft: &mut DraftState,
    edit: DraftEdit,
    reference: &ReferenceData,
    ids: &dyn IdGenerator,
) -> Result<(), &'static str> {
    match edit {
        DraftEdit::SetName(name) => draft.name = name,
        DraftEdit::SetCategory(category) => draft.category = category,
        DraftEdit::SetDescription(description) => draft.description = description,
        DraftEdit::AttachFile(file) => draft.file = Some(file),
        DraftEdit::RemoveFile => {
            draft.file.take().ok_or("no file attached")?;
        }
        DraftEdit::Schema(section, edit) => {
            let builder = match section {
                SchemaSection::Manager => &mut draft.manager_fields,
                SchemaSection::Worker => &mut draft.worker_fields,
            };
            let applied = match edit {
                SchemaEdit::AddField(field_type) => {
                    builder.add_field(field_type, ids);
                    true
                }
                SchemaEdit::UpdateField(id, patch) => builder.update_field(&id, patch),
                SchemaEdit::RemoveField(id) => builder.remove_field(&id),
                SchemaEdit::AddOption(id) => builder.add_option(&id),
                SchemaEdit::UpdateOption(id, index, value) => {
                    builder.update_option(&id, index, value)
                }
                SchemaEdit::RemoveOption(id, index) => builder.remove_option(&id, index),
                SchemaEdit::MoveField(index, direction) => builder.move_field(index, direction),
                SchemaEdit::Expand(id) => builder.set_expanded(id),
            };
            refuse_unless(applied, "question edit rejected by schema builder")?;
        }
        DraftEdit::Signers(edit) => {
            let signers = &mut draft.signers;
            let applied = match edit {
                SignerEdit::ToggleTeamMember => {
                    signers.toggle_team_member(ids);
                    true
                }
                SignerEdit::ToggleCompany => {
                    signers.toggle_company(ids);
                    true
                }
                SignerEdit::AddCompanySigner => signers.add_company_signer(ids).is_some(),
                SignerEdit::SetIdentity(id, identity_ref) => {
                    if reference.company_signer(&identity_ref).is_none() {
                        return Err("identity is not in the company signer directory");
                    }
                    signers.set_identity(&id, identity_ref)
                }
                SignerEdit::RemoveEntry(id) => signers.remove_entry(&id),
                SignerEdit::MoveUp(index) => signers.move_up(index),
                SignerEdit::MoveDown(index) => signers.move_down(index),
            };
            refuse_unless(applied, "signer edit rejected by sequence manager")?;
            let available = draft.signers.available_roles();
            draft.mapper.reconcile_roles(&available);
        }
        DraftEdit::Mapper(edit) => {
            let available = draft.signers.available_roles();
            let mapper = &mut draft.mapper;
            let applied = match edit {
                MapperEdit::AddField { kind, label } => {
                    mapper.add_field(kind, label.as_deref(), ids).is_some()
                }
                MapperEdit::RemoveField(id) => mapper.remove_field(&id),
                MapperEdit::SetActiveRole(role) => mapper.set_active_signer_role(role, &available),
                MapperEdit::BeginPlacement { kind, label } => mapper.begin_placement(kind, label),
                MapperEdit::CancelPlacement => mapper.cancel_placement(),
                MapperEdit::BeginDrag(id) => mapper.begin_drag(&id),
                MapperEdit::DropOnCanvas { pointer, canvas } => {
                    mapper.drop_on_canvas(pointer, canvas, ids).is_some()
                }
            };
            refuse_unless(applied, "mapping edit rejected by field mapper")?;
        }
        DraftEdit::SetAllowDecline(allow) => draft.allow_decline = allow,
        DraftEdit::SetEscalationDays(raw) => draft.escalation_days = parse_escalation_days(&raw),
        DraftEdit::SetRequiresExpiration(required) => draft.requires_expiration = required,
        DraftEdit::SetRequiresVerification(required) => draft.requires_verification = required,
        DraftEdit::ToggleLocation(location) => {
            refuse_unless(reference.has_location(&location), "unknown location")?;
            toggle(&mut draft.permissions.locations, location);
        }
        DraftEdit::ToggleRole(role) => {
            refuse_unless(reference.has_role(&role), "unknown role")?;
            toggle(&mut draft.permissions.roles, role);
        }
        DraftEdit::SetAutoAssign(rule) => {
            if let AutoAssignRule::JobTitles(titles) = &rule {
                refuse_unless(!titles.is_empty(), "job-title rule needs at least one title")?;
                refuse_unless(
                    titles.iter().all(|title| reference.has_job_title(title)),
                    "unknown job title",
                )?;
            }
            draft.permissions.auto_assign = rule;
        }
        DraftEdit::SelectDuplicateSource { category, template } => {
            refuse_unless(!category.trim().is_empty(), "source category is blank")?;
            draft.source_category = Some(category);
            draft.source_template = template;
        }
    }
    Ok(())
}

fn refuse_unless(condition: bool, reason: &'static str) -> Result<(), &'static str> {
    if condition {
        Ok(())
    } else {
        Err(reason)
    }
}

fn toggle(set: &mut std::collections::BTreeSet<String>, value: String) {
    if !set.remove(&value) {
        set.insert(value);
    }
}
