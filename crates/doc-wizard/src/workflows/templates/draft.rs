use super::domain::{
    DocumentKind, EditSeed, FieldId, FieldType, FileRef, Permissions, SignerRole, TemplateId,
};
use super::ids::IdGenerator;
use super::mapper::SpatialFieldMapper;
use super::schema::{FieldSchemaBuilder, FormFieldDefinition};
use super::signers::SignerSequenceManager;

pub const DEFAULT_ESCALATION_DAYS: u32 = 7;
pub const WRITE_UP_NAME: &str = "Employee Write-Up";
pub const WRITE_UP_CATEGORY: &str = "written-warning";

/// Everything the operator has entered so far. Fields are read freely; mutation goes
/// through the wizard so every change bumps `version`.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftState {
    version: u64,
    pub name: String,
    pub category: String,
    pub description: String,
    pub file: Option<FileRef>,
    pub manager_fields: FieldSchemaBuilder,
    pub worker_fields: FieldSchemaBuilder,
    pub signers: SignerSequenceManager,
    pub mapper: SpatialFieldMapper,
    pub allow_decline: bool,
    pub escalation_days: u32,
    pub requires_expiration: bool,
    pub requires_verification: bool,
    pub permissions: Permissions,
    pub source_category: Option<String>,
    pub source_template: Option<TemplateId>,
}

impl DraftState {
    fn empty() -> Self {
        Self {
            version: 0,
            name: String::new(),
            category: String::new(),
            description: String::new(),
            file: None,
            manager_fields: FieldSchemaBuilder::new(),
            worker_fields: FieldSchemaBuilder::new(),
            signers: SignerSequenceManager::new(),
            mapper: SpatialFieldMapper::default(),
            allow_decline: false,
            escalation_days: DEFAULT_ESCALATION_DAYS,
            requires_expiration: false,
            requires_verification: false,
            permissions: Permissions::default(),
            source_category: None,
            source_template: None,
        }
    }

    /// Defaults the wizard opens with for `kind`.
    pub fn for_kind(kind: DocumentKind, ids: &dyn IdGenerator) -> Self {
        let mut draft = Self::empty();
        match kind {
            DocumentKind::PdfSigning => {
                draft.signers = SignerSequenceManager::with_team_member(ids);
                draft.mapper = SpatialFieldMapper::new(Some(SignerRole::TeamMember));
            }
            DocumentKind::WriteUp => {
                draft.name = WRITE_UP_NAME.to_string();
                draft.category = WRITE_UP_CATEGORY.to_string();
                draft.manager_fields =
                    FieldSchemaBuilder::from_fields(default_manager_questions(ids));
                draft.worker_fields =
                    FieldSchemaBuilder::from_fields(default_worker_questions(ids));
            }
            DocumentKind::CollectUploads => {
                draft.requires_expiration = true;
            }
            DocumentKind::Duplicate => {}
        }
        draft
    }

    /// Overlay an existing template's identity onto the defaults.
    pub fn apply_seed(&mut self, seed: &EditSeed) {
        self.name = seed.name.clone();
        self.category = seed.category.clone();
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_dirty(&self) -> bool {
        self.version > 0
    }

    pub(crate) fn touch(&mut self) {
        self.version += 1;
    }

    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    pub fn has_category(&self) -> bool {
        !self.category.trim().is_empty()
    }
}

/// Parse the escalation-day input, falling back to the default on anything unusable.
pub fn parse_escalation_days(raw: &str) -> u32 {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|days| *days > 0)
        .unwrap_or(DEFAULT_ESCALATION_DAYS)
}

fn question(ids: &dyn IdGenerator, field_type: FieldType, label: &str) -> FormFieldDefinition {
    FormFieldDefinition::new(FieldId(ids.next_id("fld")), field_type, label)
}

fn default_manager_questions(ids: &dyn IdGenerator) -> Vec<FormFieldDefinition> {
    vec![
        question(ids, FieldType::OpenText, "Describe the incident").required(),
        question(ids, FieldType::SingleSelect, "Type of violation")
            .required()
            .with_options(&[
                "Attendance",
                "Conduct",
                "Performance",
                "Policy violation",
                "Safety",
            ]),
        question(ids, FieldType::OpenText, "Date and time of the incident").required(),
        question(ids, FieldType::SingleSelect, "Were there witnesses?")
            .with_options(&["Yes", "No"]),
        question(ids, FieldType::MultipleChoice, "Prior warnings issued").with_options(&[
            "Verbal",
            "Written",
            "Final",
            "None",
        ]),
        question(ids, FieldType::OpenText, "Expected corrective action").required(),
        question(ids, FieldType::Rating, "Severity of the infraction"),
    ]
}

fn default_worker_questions(ids: &dyn IdGenerator) -> Vec<FormFieldDefinition> {
    vec![
        question(ids, FieldType::SingleSelect, "Do you agree with this write-up?")
            .required()
            .with_options(&["Agree", "Partially agree", "Disagree"]),
        question(ids, FieldType::OpenText, "Employee statement"),
        question(ids, FieldType::MultipleChoice, "Contributing factors").with_options(&[
            "Scheduling",
            "Training",
            "Equipment",
            "Personal",
            "Other",
        ]),
        question(
            ids,
            FieldType::Rating,
            "How clear were expectations before the incident?",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::templates::ids::SequentialIds;

    #[test]
    fn write_up_defaults_are_prefilled() {
        let ids = SequentialIds::default();
        let draft = DraftState::for_kind(DocumentKind::WriteUp, &ids);
        assert_eq!(draft.name, WRITE_UP_NAME);
        assert_eq!(draft.category, WRITE_UP_CATEGORY);
        assert_eq!(draft.manager_fields.len(), 7);
        assert_eq!(draft.worker_fields.len(), 4);
        assert_eq!(draft.escalation_days, 7);
        assert!(!draft.is_dirty());
    }

    #[test]
    fn default_choice_questions_keep_their_options() {
        let ids = SequentialIds::default();
        let draft = DraftState::for_kind(DocumentKind::WriteUp, &ids);
        for field in draft
            .manager_fields
            .fields()
            .iter()
            .chain(draft.worker_fields.fields())
        {
            assert_eq!(field.field_type.has_options(), !field.options.is_empty());
            assert_eq!(field.field_type == FieldType::Rating, field.max_rating == Some(5));
        }
    }

    #[test]
    fn pdf_defaults_start_with_the_team_member() {
        let ids = SequentialIds::default();
        let draft = DraftState::for_kind(DocumentKind::PdfSigning, &ids);
        assert_eq!(draft.signers.len(), 1);
        assert!(draft.signers.has_role(SignerRole::TeamMember));
        assert_eq!(draft.mapper.active_role(), Some(SignerRole::TeamMember));
        assert!(draft.file.is_none());
        assert!(draft.name.is_empty());
    }

    #[test]
    fn escalation_days_fall_back_on_bad_input() {
        assert_eq!(parse_escalation_days("14"), 14);
        assert_eq!(parse_escalation_days(" 3 "), 3);
        assert_eq!(parse_escalation_days("abc"), DEFAULT_ESCALATION_DAYS);
        assert_eq!(parse_escalation_days(""), DEFAULT_ESCALATION_DAYS);
        assert_eq!(parse_escalation_days("0"), DEFAULT_ESCALATION_DAYS);
        assert_eq!(parse_escalation_days("-4"), DEFAULT_ESCALATION_DAYS);
    }
}
