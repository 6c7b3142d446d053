// tests/conversion.rs
//! Decoding recorded service payloads into the domain model and back.

mod common;

use common::fixture;
use notion_typed::convert::{ApiConverter, DatabaseConverter, PageConverter, UserConverter};
use notion_typed::{
    BotOwner, Color, ConversionError, DateValue, FormulaResult, PropertyType, PropertyTypeValue,
    Reference, RichTextContent, RollupResult, UserReference, UserType,
};
use pretty_assertions::assert_eq;
use serde_json::Value;

#[test]
fn person_payload_becomes_a_person() {
    let user = UserConverter::decode_json(&fixture("user_person.json")).unwrap();

    assert_eq!(user.user_type(), UserType::Person);
    assert_eq!(user.id().to_dashed(), "d40e767c-d7af-4b18-a86d-55c61f1e39a4");
    assert_eq!(user.name(), Some("Ann"));
    assert_eq!(
        user.person().and_then(|person| person.email.as_deref()),
        Some("ann@example.com")
    );
    assert!(user.bot().is_none());
}

#[test]
fn unrecognized_user_type_names_the_value() {
    let body = fixture("user_person.json").replace(r#""type": "person""#, r#""type": "robot""#);

    let err = UserConverter::decode_json(&body).unwrap_err();

    assert!(matches!(err, ConversionError::UnknownVariant { .. }), "{err:?}");
    assert!(err.to_string().contains("robot"));
}

#[test]
fn unknown_fields_do_not_change_the_result() {
    let raw: Value = serde_json::from_str(&fixture("user_bot.json")).unwrap();
    let mut stripped = raw.clone();
    stripped.as_object_mut().unwrap().remove("request_id");
    stripped["bot"]
        .as_object_mut()
        .unwrap()
        .remove("workspace_limits");

    let with_extras = UserConverter::decode_value(&raw).unwrap();
    let without = UserConverter::decode_value(&stripped).unwrap();

    assert_eq!(with_extras, without);
    let bot = with_extras.bot().unwrap();
    assert_eq!(bot.owner, Some(BotOwner::Workspace));
    assert_eq!(bot.workspace_name.as_deref(), Some("Acme"));
}

#[test]
fn user_survives_a_round_trip() {
    for name in ["user_person.json", "user_bot.json"] {
        let user = UserConverter::decode_json(&fixture(name)).unwrap();
        let encoded = UserConverter::encode_value(&user).unwrap();
        assert_eq!(UserConverter::decode_value(&encoded).unwrap(), user, "{name}");
    }
}

#[test]
fn page_fixture_decodes_every_property() {
    let page = PageConverter::decode_json(&fixture("page.json")).unwrap();

    assert_eq!(page.id().to_dashed(), "59833787-2cf9-4fdf-8782-e53db20768a5");
    assert!(matches!(page.parent(), Reference::Database(_)));
    assert!(!page.archived());
    assert_eq!(page.title().as_deref(), Some("Ship the launch"));

    let names: Vec<_> = page.property_values().iter().map(|value| value.name()).collect();
    assert_eq!(
        names,
        vec![
            "Name",
            "Estimate",
            "Stage",
            "Tags",
            "Due",
            "Owner",
            "Done",
            "Spec",
            "Notes",
            "Score",
            "Blocked by",
            "Total",
            "Attachments",
            "Created",
            "Ticket",
        ]
    );

    let title = page.property("Name").unwrap().as_title().unwrap();
    assert_eq!(title[1].annotations.color, Color::RedBackground);
    assert!(title[1].annotations.bold);

    let estimate = page.property("Estimate").unwrap();
    assert_eq!(estimate.property_type(), PropertyType::Number);
    assert_eq!(estimate.id(), Some("%3AVe%3E"));
    assert_eq!(estimate.as_number(), Ok(&Some(3.0)));

    let stage = page.property("Stage").unwrap().as_status().unwrap();
    assert_eq!(stage.as_ref().map(|option| option.name.as_str()), Some("In progress"));

    let due = page.property("Due").unwrap().as_date().unwrap();
    assert_eq!(
        due,
        &Some(DateValue::on(chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()))
    );

    let people = page.property("Owner").unwrap().as_people().unwrap();
    assert!(matches!(people[0], UserReference::Partial { .. }));
    assert_eq!(
        people[1].user().map(|user| user.user_type()),
        Some(UserType::Bot)
    );

    let notes = page.property("Notes").unwrap().as_text().unwrap();
    assert!(matches!(notes[0].content, RichTextContent::Mention(_)));
    assert_eq!(notes[1].plain_text, "x^2");

    assert_eq!(
        page.property("Score").unwrap().as_formula(),
        Ok(&FormulaResult::Number(Some(42.0)))
    );
    let total = page.property("Total").unwrap().as_rollup().unwrap();
    assert_eq!(total.function.as_deref(), Some("sum"));
    assert_eq!(total.result, RollupResult::Number(Some(12.5)));

    assert_eq!(page.property("Spec").unwrap().as_url(), Ok(&None));
    let ticket = page.property("Ticket").unwrap().as_unique_id().unwrap();
    assert_eq!(ticket.prefix.as_deref(), Some("ENG"));
    assert_eq!(ticket.number, Some(17));
    assert!(matches!(
        page.property("Created").unwrap().value(),
        PropertyTypeValue::CreatedTime(_)
    ));
}

#[test]
fn number_property_refuses_text_access() {
    let page = PageConverter::decode_json(&fixture("page.json")).unwrap();

    let err = page.property("Estimate").unwrap().as_text().unwrap_err();

    assert_eq!(
        err,
        ConversionError::WrongVariant {
            expected: "rich_text",
            actual: "number",
        }
    );
}

#[test]
fn page_survives_a_round_trip() {
    let page = PageConverter::decode_json(&fixture("page.json")).unwrap();

    let encoded = PageConverter::encode_value(&page).unwrap();
    let decoded = PageConverter::decode_value(&encoded).unwrap();

    assert_eq!(decoded, page);
    let keys: Vec<_> = encoded["properties"]
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect();
    assert_eq!(keys.first().map(String::as_str), Some("Name"));
    assert_eq!(keys.last().map(String::as_str), Some("Ticket"));
}

#[test]
fn property_payload_under_the_wrong_key_is_rejected() {
    let body = fixture("page.json").replace(
        r#"{ "id": "%3AVe%3E", "type": "number", "number": 3 }"#,
        r#"{ "id": "%3AVe%3E", "type": "number", "checkbox": true }"#,
    );
    assert_ne!(body, fixture("page.json"));

    let err = PageConverter::decode_json(&body).unwrap_err();

    assert!(matches!(err, ConversionError::TagMismatch { .. }), "{err:?}");
}

#[test]
fn database_fixture_decodes_its_schema() {
    let database = DatabaseConverter::decode_json(&fixture("database.json")).unwrap();

    assert_eq!(database.title_text(), "Roadmap");
    assert_eq!(database.parent(), &Reference::Workspace);
    let columns: Vec<_> = database
        .property_specs()
        .iter()
        .map(|spec| (spec.name.as_str(), spec.property_type))
        .collect();
    assert_eq!(
        columns,
        vec![
            ("Name", PropertyType::Title),
            ("Estimate", PropertyType::Number),
            ("Stage", PropertyType::Status),
            ("Done", PropertyType::Checkbox),
        ]
    );

    let encoded = DatabaseConverter::encode_value(&database).unwrap();
    assert_eq!(DatabaseConverter::decode_value(&encoded).unwrap(), database);
}

#[test]
fn unknown_property_type_in_a_schema_fails() {
    let body = fixture("database.json").replace(r#""type": "checkbox""#, r#""type": "button""#);

    let err = DatabaseConverter::decode_json(&body).unwrap_err();

    assert_eq!(err.to_string(), "Unknown property type 'button'");
}
