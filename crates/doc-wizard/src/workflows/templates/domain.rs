use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of template being built. Fixed for the lifetime of a wizard session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    PdfSigning,
    WriteUp,
    CollectUploads,
    Duplicate,
}

impl DocumentKind {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::PdfSigning,
            Self::WriteUp,
            Self::CollectUploads,
            Self::Duplicate,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PdfSigning => "PDF for Signature",
            Self::WriteUp => "Employee Write-Up",
            Self::CollectUploads => "Collect Uploads",
            Self::Duplicate => "Duplicate Existing",
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::PdfSigning => "pdf-signing",
            Self::WriteUp => "write-up",
            Self::CollectUploads => "collect-uploads",
            Self::Duplicate => "duplicate",
        }
    }

    pub fn from_slug(raw: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|kind| kind.slug().eq_ignore_ascii_case(raw.trim()))
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    Basics,
    Setup,
    Configure,
    Select,
    Review,
}

impl StepId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basics => "basics",
            Self::Setup => "setup",
            Self::Configure => "configure",
            Self::Select => "select",
            Self::Review => "review",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WizardStep {
    pub id: StepId,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignerRole {
    TeamMember,
    Company,
}

impl SignerRole {
    pub const fn ordered() -> [Self; 2] {
        [Self::TeamMember, Self::Company]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::TeamMember => "Team Member",
            Self::Company => "Company Signer",
        }
    }
}

/// Question types available in a write-up section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    OpenText,
    SingleSelect,
    MultipleChoice,
    Rating,
}

impl FieldType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::OpenText => "Open Text",
            Self::SingleSelect => "Single Select",
            Self::MultipleChoice => "Multiple Choice",
            Self::Rating => "Rating",
        }
    }

    /// Choice types must always carry at least one option.
    pub const fn has_options(self) -> bool {
        matches!(self, Self::SingleSelect | Self::MultipleChoice)
    }
}

/// Element that can be placed on a document preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappedFieldKind {
    Signature,
    Initials,
    Date,
    Text,
    Checkbox,
}

impl MappedFieldKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Signature => "Signature",
            Self::Initials => "Initials",
            Self::Date => "Date",
            Self::Text => "Text",
            Self::Checkbox => "Checkbox",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaSection {
    Manager,
    Worker,
}

impl SchemaSection {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Manager => "Manager",
            Self::Worker => "Worker",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Active,
    Draft,
}

impl RecordStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Draft => "draft",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a question inside a schema section.
    FieldId
);
string_id!(
    /// Identifier of a participant in the signing sequence.
    SignerId
);
string_id!(
    /// Identifier of a field placed on the document canvas.
    MappedFieldId
);
string_id!(
    /// Identifier of a finished template record.
    TemplateId
);

/// Opaque handle to an uploaded document. Never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,
    pub size_bytes: u64,
}

impl FileRef {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }

    pub fn display_size(&self) -> String {
        const KB: f64 = 1024.0;
        let bytes = self.size_bytes as f64;
        if bytes < KB {
            format!("{} B", self.size_bytes)
        } else if bytes < KB * KB {
            format!("{:.1} KB", bytes / KB)
        } else {
            format!("{:.1} MB", bytes / (KB * KB))
        }
    }
}

/// Who receives the template automatically once it is active.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "rule", content = "job_titles")]
pub enum AutoAssignRule {
    #[default]
    Manual,
    AllNewHires,
    JobTitles(BTreeSet<String>),
}

impl AutoAssignRule {
    pub fn label(&self) -> String {
        match self {
            Self::Manual => "Manual assignment".to_string(),
            Self::AllNewHires => "All new hires".to_string(),
            Self::JobTitles(titles) => format!("{} job title(s)", titles.len()),
        }
    }
}

/// Location and role visibility shared by every document kind.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Permissions {
    pub locations: BTreeSet<String>,
    pub roles: BTreeSet<String>,
    pub auto_assign: AutoAssignRule,
}

/// Existing template being edited; overlays the kind defaults at open time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditSeed {
    pub id: TemplateId,
    pub name: String,
    pub category: String,
    pub kind: DocumentKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Bounding rectangle of the canvas in pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl CanvasRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Convert a pointer position into canvas-local units, clamped to the canvas.
    pub fn to_local(&self, pointer: Point) -> Point {
        let x = (pointer.x - self.left).clamp(0.0, self.width.max(0.0));
        let y = (pointer.y - self.top).clamp(0.0, self.height.max(0.0));
        Point::new(x, y)
    }
}
