use catalog_engine::{decode_records, FailureKind};

#[test]
fn non_string_names_decode_as_missing() {
    let body = br#"[
        {"id": 1, "listId": 1, "name": 17, "price": 1.0, "rating": 1},
        {"id": 2, "listId": 1, "name": ["Item 2"], "price": 1.0, "rating": 1},
        {"id": 3, "listId": 1, "price": 1.0, "rating": 1},
        {"id": 4, "listId": 1, "name": "Item 4", "price": 1.0, "rating": 1}
    ]"#;

    let records = decode_records(body).expect("decode");
    let names: Vec<Option<&str>> = records.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec![None, None, None, Some("Item 4")]);
}

#[test]
fn unknown_fields_are_ignored() {
    let body = br#"[{"id": 1, "listId": 3, "name": "Item 1", "price": 2.5, "rating": 4, "color": "red"}]"#;

    let records = decode_records(body).expect("decode");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].group_id(), 3);
    assert_eq!(records[0].price(), 2.5);
}

#[test]
fn missing_required_field_fails_the_whole_body() {
    let body = br#"[
        {"id": 1, "listId": 1, "name": "Item 1", "price": 1.0, "rating": 1},
        {"id": 2, "name": "Item 2", "price": 1.0, "rating": 1}
    ]"#;

    let err = decode_records(body).unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
    assert!(err.message.contains("listId"));
}

#[test]
fn empty_array_decodes_to_no_records() {
    assert!(decode_records(b"[]").expect("decode").is_empty());
}

#[test]
fn non_json_body_is_a_decode_error() {
    let err = decode_records(b"<html>").unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}
