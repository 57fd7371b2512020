use crate::workflows::templates::domain::{FieldId, FieldType, MoveDirection};
use crate::workflows::templates::ids::SequentialIds;
use crate::workflows::templates::schema::{
    FieldPatch, FieldSchemaBuilder, FormFieldDefinition, RATING_SCALE,
};

fn labels(builder: &FieldSchemaBuilder) -> Vec<&str> {
    builder
        .fields()
        .iter()
        .map(|field| field.label.as_str())
        .collect()
}

fn three_questions(ids: &SequentialIds) -> FieldSchemaBuilder {
    let mut builder = FieldSchemaBuilder::new();
    for (index, field_type) in [FieldType::OpenText, FieldType::SingleSelect, FieldType::Rating]
        .into_iter()
        .enumerate()
    {
        let id = builder.add_field(field_type, ids);
        builder.update_field(&id, FieldPatch::label(format!("Q{}", index + 1)));
    }
    builder
}

#[test]
fn added_fields_carry_type_defaults_and_expand() {
    let ids = SequentialIds::default();
    let mut builder = FieldSchemaBuilder::new();

    let text = builder.add_field(FieldType::OpenText, &ids);
    assert_eq!(builder.expanded(), Some(&text));
    let select = builder.add_field(FieldType::SingleSelect, &ids);
    assert_eq!(builder.expanded(), Some(&select));
    let rating = builder.add_field(FieldType::Rating, &ids);

    let text = builder.field(&text).expect("text field present");
    assert_eq!(text.label, "Untitled question");
    assert!(!text.required);
    assert!(text.options.is_empty());
    assert_eq!(text.max_rating, None);

    let select = builder.field(&select).expect("select field present");
    assert_eq!(select.options, vec!["Option 1", "Option 2"]);

    let rating = builder.field(&rating).expect("rating field present");
    assert_eq!(rating.max_rating, Some(RATING_SCALE));
    assert!(rating.options.is_empty());
}

#[test]
fn removing_options_never_empties_a_choice_field() {
    let ids = SequentialIds::default();
    let mut builder = FieldSchemaBuilder::new();
    let id = builder.add_field(FieldType::MultipleChoice, &ids);
    assert!(builder.add_option(&id));
    assert_eq!(
        builder.field(&id).expect("field").options,
        vec!["Option 1", "Option 2", "Option 3"]
    );

    assert!(builder.remove_option(&id, 0));
    assert!(builder.remove_option(&id, 0));
    assert!(!builder.remove_option(&id, 0), "last option must stay");
    assert_eq!(builder.field(&id).expect("field").options, vec!["Option 3"]);
}

#[test]
fn option_edits_are_refused_for_text_and_bad_indexes() {
    let ids = SequentialIds::default();
    let mut builder = FieldSchemaBuilder::new();
    let text = builder.add_field(FieldType::OpenText, &ids);
    let select = builder.add_field(FieldType::SingleSelect, &ids);

    assert!(!builder.add_option(&text));
    assert!(!builder.update_option(&select, 5, "Nope"));
    assert!(!builder.remove_option(&select, 9));
    assert!(builder.update_option(&select, 1, "Maybe"));
    assert_eq!(
        builder.field(&select).expect("field").options,
        vec!["Option 1", "Maybe"]
    );
    assert!(!builder.add_option(&FieldId("fld-9999".to_string())));
}

#[test]
fn move_field_swaps_neighbours_and_ignores_boundaries() {
    let ids = SequentialIds::default();
    let mut builder = three_questions(&ids);

    assert!(!builder.move_field(0, MoveDirection::Up));
    assert!(!builder.move_field(2, MoveDirection::Down));
    assert!(!builder.move_field(7, MoveDirection::Up));
    assert_eq!(labels(&builder), vec!["Q1", "Q2", "Q3"]);

    assert!(builder.move_field(1, MoveDirection::Up));
    assert_eq!(labels(&builder), vec!["Q2", "Q1", "Q3"]);
    assert!(builder.move_field(1, MoveDirection::Down));
    assert_eq!(labels(&builder), vec!["Q2", "Q3", "Q1"]);
}

#[test]
fn changing_type_rebuilds_the_payload() {
    let ids = SequentialIds::default();
    let mut builder = FieldSchemaBuilder::new();
    let id = builder.add_field(FieldType::OpenText, &ids);

    assert!(builder.update_field(&id, FieldPatch::field_type(FieldType::SingleSelect)));
    let field = builder.field(&id).expect("field");
    assert_eq!(field.options.len(), 2);
    assert_eq!(field.max_rating, None);

    assert!(builder.update_field(&id, FieldPatch::field_type(FieldType::Rating)));
    let field = builder.field(&id).expect("field");
    assert!(field.options.is_empty());
    assert_eq!(field.max_rating, Some(RATING_SCALE));

    assert!(builder.update_field(&id, FieldPatch::field_type(FieldType::MultipleChoice)));
    let field = builder.field(&id).expect("field");
    assert_eq!(field.options.len(), 2);
    assert_eq!(field.max_rating, None);
}

#[test]
fn patches_merge_only_the_supplied_keys() {
    let ids = SequentialIds::default();
    let mut builder = FieldSchemaBuilder::new();
    let id = builder.add_field(FieldType::SingleSelect, &ids);
    builder.update_option(&id, 0, "Keep me");

    assert!(builder.update_field(&id, FieldPatch::required(true)));
    assert!(builder.update_field(&id, FieldPatch::label("Shift")));
    let field = builder.field(&id).expect("field");
    assert!(field.required);
    assert_eq!(field.label, "Shift");
    assert_eq!(field.options[0], "Keep me");

    assert!(!builder.update_field(&FieldId("fld-missing".to_string()), FieldPatch::required(true)));
}

#[test]
fn removing_the_expanded_field_collapses_the_editor() {
    let ids = SequentialIds::default();
    let mut builder = three_questions(&ids);
    let last = builder.fields()[2].id.clone();
    assert_eq!(builder.expanded(), Some(&last));

    assert!(builder.remove_field(&last));
    assert_eq!(builder.expanded(), None);
    assert_eq!(builder.len(), 2);
    assert!(!builder.remove_field(&last));
}

#[test]
fn duplicate_labels_are_allowed() {
    let ids = SequentialIds::default();
    let mut builder = FieldSchemaBuilder::new();
    let first = builder.add_field(FieldType::OpenText, &ids);
    let second = builder.add_field(FieldType::OpenText, &ids);
    builder.update_field(&first, FieldPatch::label("Notes"));
    builder.update_field(&second, FieldPatch::label("Notes"));

    assert_eq!(labels(&builder), vec!["Notes", "Notes"]);
    assert_ne!(first, second);
}

#[test]
fn expansion_refuses_unknown_ids() {
    let ids = SequentialIds::default();
    let mut builder = three_questions(&ids);
    let first = builder.fields()[0].id.clone();

    assert!(builder.set_expanded(Some(first.clone())));
    assert_eq!(builder.expanded(), Some(&first));
    assert!(!builder.set_expanded(Some(FieldId("fld-0404".to_string()))));
    assert!(builder.set_expanded(None));
    assert_eq!(builder.expanded(), None);
}

#[test]
fn loaded_fields_are_normalized() {
    let mut broken = FormFieldDefinition::new(
        FieldId("fld-1".to_string()),
        FieldType::OpenText,
        "Pick one",
    );
    broken.field_type = FieldType::SingleSelect;
    let builder = FieldSchemaBuilder::from_fields(vec![broken]);
    assert_eq!(builder.fields()[0].options.len(), 2);
}
