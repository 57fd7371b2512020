use crate::infra::{parse_date, parse_kind, ConsoleHost, InMemoryTemplateCatalog};
use chrono::NaiveDate;
use clap::Args;
use doc_wizard::config::WizardConfig;
use doc_wizard::error::AppError;
use doc_wizard::workflows::templates::{
    panels_for, step_sequence, AutoAssignRule, CanvasRect, DocumentKind, DraftEdit, FieldPatch,
    FieldType, FileRef, FixedClock, MappedFieldKind, MapperEdit, Navigation, Point,
    ReferenceData, ReviewDetails, ReviewSummary, SchemaEdit, SchemaSection, SignerEdit,
    SignerRole, StepId, TemplateRecord, WizardContext, WizardController, WizardError,
};
use std::sync::Arc;
use tracing::warn;

type DemoWizard = WizardController<InMemoryTemplateCatalog, ConsoleHost>;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Document kind to build (pdf-signing, write-up, collect-uploads, duplicate)
    #[arg(long, value_parser = parse_kind, default_value = "pdf-signing")]
    pub(crate) kind: DocumentKind,
    /// Template name entered on the first step
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Save a write-up as a draft from its setup step instead of submitting it
    #[arg(long)]
    pub(crate) draft: bool,
    /// Print the stored records as JSON instead of the narrated walkthrough
    #[arg(long)]
    pub(crate) json: bool,
    /// Override the creation date stamped on records (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ReferenceArgs {
    /// Print the reference data as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn print_steps() {
    println!("Template wizard steps");
    for kind in DocumentKind::ordered() {
        println!("\n{} ({})", kind.label(), kind.slug());
        for (index, step) in step_sequence(kind).iter().enumerate() {
            let panels: Vec<_> = panels_for(kind, step.id)
                .iter()
                .map(|panel| panel.label())
                .collect();
            println!(
                "  {}. {} [{}]: {}",
                index + 1,
                step.label,
                step.id.as_str(),
                panels.join(", ")
            );
        }
    }
}

pub(crate) fn print_reference(args: ReferenceArgs, reference: &ReferenceData) {
    if args.json {
        match serde_json::to_string_pretty(reference) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Reference data unavailable: {err}"),
        }
        return;
    }

    println!("Wizard reference data");
    for kind in DocumentKind::ordered() {
        let categories: Vec<_> = reference
            .categories_for(kind)
            .iter()
            .map(|option| format!("{} ({})", option.label, option.value))
            .collect();
        println!("- {} categories: {}", kind.label(), categories.join(", "));
    }
    println!("- Locations: {}", reference.locations.join(", "));
    println!("- Roles: {}", reference.roles.join(", "));
    println!("- Job titles: {}", reference.job_titles.join(", "));
    println!("Company signers:");
    for signer in &reference.company_signers {
        match &signer.email {
            Some(email) => println!(
                "  - {} | {} | {} <{}>",
                signer.id, signer.name, signer.title, email
            ),
            None => println!("  - {} | {} | {}", signer.id, signer.name, signer.title),
        }
    }
}

pub(crate) fn run_demo(
    args: DemoArgs,
    config: &WizardConfig,
    reference: Arc<ReferenceData>,
) -> Result<(), AppError> {
    let DemoArgs {
        kind,
        name,
        draft,
        json,
        today,
    } = args;
    let narrate = !json;

    let mut context = WizardContext::new(reference.clone(), config.record_prefix.clone());
    if let Some(today) = today {
        context = context.with_clock(Arc::new(FixedClock(today)));
    }

    let catalog = Arc::new(InMemoryTemplateCatalog::default());
    let host = Arc::new(ConsoleHost::new(narrate));
    let mut wizard = WizardController::new(catalog.clone(), host.clone(), context);
    wizard.open(kind, None);

    let save_draft = draft && kind == DocumentKind::WriteUp;
    if narrate {
        println!("Template wizard demo: {}", kind.label());
        if draft && !save_draft {
            println!("Draft saving is only offered for write-ups; submitting instead.");
        }
    }

    let name = name.unwrap_or_else(|| default_name(kind).to_string());
    loop {
        let state = wizard.state().ok_or(WizardError::NotOpen)?;
        let step = state.current_step();
        let last = state.is_last_step();
        if narrate {
            println!(
                "\nStep {}/{}: {}",
                state.step_index() + 1,
                state.steps().len(),
                step.label
            );
        }

        fill_step(&mut wizard, step.id, &name, &reference)?;

        if save_draft && step.id == StepId::Setup {
            if wizard.save_as_draft()?.is_none() {
                warn!("write-up could not be saved as a draft");
            }
            break;
        }

        if last {
            if narrate {
                render_summary(&wizard.review_summary()?);
            }
            wizard.submit()?;
            break;
        }

        match wizard.go_next()? {
            Navigation::Moved { .. } => {}
            Navigation::Blocked => {
                warn!(step = step.id.as_str(), "demo script left the step incomplete");
                if narrate {
                    println!("Step \"{}\" is incomplete; stopping.", step.label);
                }
                wizard.close()?;
                return Ok(());
            }
            Navigation::Stayed | Navigation::Complete(_) => break,
        }
    }

    let records = catalog.records();
    if json {
        match serde_json::to_string_pretty(&records) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Template records unavailable: {err}"),
        }
    } else {
        render_records(&records);
        println!("Wizard closed {} time(s)", host.closed_count());
    }
    Ok(())
}

fn default_name(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::PdfSigning => "Offer Letter",
        DocumentKind::WriteUp => "Employee Write-Up",
        DocumentKind::CollectUploads => "Food Handler Card",
        DocumentKind::Duplicate => "Onboarding Packet (Copy)",
    }
}

/// Enter the demo values for the panels shown on `step`.
fn fill_step(
    wizard: &mut DemoWizard,
    step: StepId,
    name: &str,
    reference: &ReferenceData,
) -> Result<(), AppError> {
    let kind = wizard.state().ok_or(WizardError::NotOpen)?.kind();
    let first_category = reference
        .categories_for(kind)
        .first()
        .map(|option| option.value.clone());

    match (kind, step) {
        (DocumentKind::PdfSigning, StepId::Basics) => {
            apply(wizard, DraftEdit::AttachFile(FileRef::new("offer-letter.pdf", 182_344)))?;
            apply(wizard, DraftEdit::SetName(name.to_string()))?;
            if let Some(category) = first_category {
                apply(wizard, DraftEdit::SetCategory(category))?;
            }
            apply(wizard, DraftEdit::Signers(SignerEdit::ToggleCompany))?;
            let company = wizard
                .state()
                .ok_or(WizardError::NotOpen)?
                .draft()
                .signers
                .entries()
                .iter()
                .find(|entry| entry.role == SignerRole::Company)
                .map(|entry| entry.id.clone());
            if let (Some(company), Some(signer)) = (company, reference.company_signers.first()) {
                apply(
                    wizard,
                    DraftEdit::Signers(SignerEdit::SetIdentity(company, signer.id.clone())),
                )?;
            }
            permissions(wizard, reference)?;
        }
        (DocumentKind::PdfSigning, StepId::Configure) => {
            for kind in [MappedFieldKind::Signature, MappedFieldKind::Date] {
                apply(wizard, DraftEdit::Mapper(MapperEdit::AddField { kind, label: None }))?;
            }
            apply(
                wizard,
                DraftEdit::Mapper(MapperEdit::SetActiveRole(SignerRole::Company)),
            )?;
            apply(
                wizard,
                DraftEdit::Mapper(MapperEdit::BeginPlacement {
                    kind: MappedFieldKind::Signature,
                    label: Some("Countersignature".to_string()),
                }),
            )?;
            apply(
                wizard,
                DraftEdit::Mapper(MapperEdit::DropOnCanvas {
                    pointer: Point::new(420.0, 700.0),
                    canvas: CanvasRect::new(0.0, 0.0, 612.0, 792.0),
                }),
            )?;
        }
        (DocumentKind::WriteUp, StepId::Setup) => {
            apply(wizard, DraftEdit::SetName(name.to_string()))?;
            apply(
                wizard,
                DraftEdit::Schema(SchemaSection::Worker, SchemaEdit::AddField(FieldType::OpenText)),
            )?;
            let added = wizard
                .state()
                .ok_or(WizardError::NotOpen)?
                .draft()
                .worker_fields
                .expanded()
                .cloned();
            if let Some(added) = added {
                apply(
                    wizard,
                    DraftEdit::Schema(
                        SchemaSection::Worker,
                        SchemaEdit::UpdateField(
                            added,
                            FieldPatch::label("Anything else we should know?"),
                        ),
                    ),
                )?;
            }
            apply(wizard, DraftEdit::SetAllowDecline(true))?;
            apply(wizard, DraftEdit::SetEscalationDays("5".to_string()))?;
            permissions(wizard, reference)?;
        }
        (DocumentKind::CollectUploads, StepId::Setup) => {
            apply(wizard, DraftEdit::SetName(name.to_string()))?;
            if let Some(category) = first_category {
                apply(wizard, DraftEdit::SetCategory(category))?;
            }
            apply(wizard, DraftEdit::SetRequiresVerification(true))?;
            permissions(wizard, reference)?;
        }
        (DocumentKind::Duplicate, StepId::Select) => {
            if let Some(category) = first_category {
                apply(
                    wizard,
                    DraftEdit::SelectDuplicateSource {
                        category,
                        template: None,
                    },
                )?;
            }
            apply(wizard, DraftEdit::SetName(name.to_string()))?;
            permissions(wizard, reference)?;
        }
        _ => {}
    }
    Ok(())
}

fn permissions(wizard: &mut DemoWizard, reference: &ReferenceData) -> Result<(), AppError> {
    if let Some(location) = reference.locations.first() {
        apply(wizard, DraftEdit::ToggleLocation(location.clone()))?;
    }
    if let Some(role) = reference.roles.first() {
        apply(wizard, DraftEdit::ToggleRole(role.clone()))?;
    }
    apply(wizard, DraftEdit::SetAutoAssign(AutoAssignRule::AllNewHires))
}

fn apply(wizard: &mut DemoWizard, edit: DraftEdit) -> Result<(), AppError> {
    let panel = edit.panel();
    if !wizard.apply(edit)?.is_applied() {
        warn!(panel = panel.label(), "demo edit refused");
    }
    Ok(())
}

fn render_summary(summary: &ReviewSummary) {
    println!("Review: {}", summary.kind_label);
    println!("- Name: {}", summary.name);
    if !summary.category.is_empty() {
        println!("- Category: {}", summary.category_label);
    }
    if !summary.description.is_empty() {
        println!("- Description: {}", summary.description);
    }
    println!(
        "- Visible to {} location(s) and {} role(s); {}",
        summary.locations, summary.roles, summary.auto_assign
    );

    match &summary.details {
        ReviewDetails::PdfSigning {
            file_name,
            file_size,
            total_signers,
            signing_order_display,
            unresolved_signers,
            mapped_fields,
            fields_by_role,
            ..
        } => {
            if let (Some(name), Some(size)) = (file_name, file_size) {
                println!("- Document: {name} ({size})");
            }
            println!("- Signing order ({total_signers}): {signing_order_display}");
            if *unresolved_signers > 0 {
                println!("- {unresolved_signers} company signer(s) still unassigned");
            }
            println!("- Mapped fields: {mapped_fields}");
            for role in fields_by_role {
                println!("  - {}: {}", role.role_label, role.fields);
            }
        }
        ReviewDetails::WriteUp {
            manager_questions,
            worker_questions,
            required_questions,
            allow_decline,
            escalation_days,
        } => {
            println!(
                "- Questions: {manager_questions} manager / {worker_questions} worker \
                 ({required_questions} required)"
            );
            println!(
                "- Employee may decline: {} | escalate after {escalation_days} day(s)",
                if *allow_decline { "yes" } else { "no" }
            );
        }
        ReviewDetails::CollectUploads {
            requires_expiration,
            requires_verification,
        } => {
            println!(
                "- Expiration date required: {} | manager verification required: {}",
                if *requires_expiration { "yes" } else { "no" },
                if *requires_verification { "yes" } else { "no" }
            );
        }
        ReviewDetails::Duplicate {
            source_category,
            source_template,
        } => {
            println!(
                "- Copied from: {} / {}",
                source_category.as_deref().unwrap_or("(none)"),
                source_template.as_deref().unwrap_or("any template")
            );
        }
    }
}

fn render_records(records: &[TemplateRecord]) {
    println!("\nCatalog now holds {} template(s)", records.len());
    for record in records {
        println!(
            "- {} \"{}\" [{}] {} created {}",
            record.id,
            record.name,
            record.kind,
            record.status.label(),
            record.created_on
        );
    }
}
