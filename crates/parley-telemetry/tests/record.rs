use parley_telemetry::record::{DEFAULT_TEXT_LIMIT, InteractionRecord};

#[test]
fn short_input_passes_through_unchanged() {
    let record = InteractionRecord::build("hello", "hi there", 120, DEFAULT_TEXT_LIMIT);
    assert_eq!(record.user_message, "hello");
    assert_eq!(record.assistant_message, "hi there");
    assert_eq!(record.response_time_ms, 120);
}

#[test]
fn oversized_input_truncates_to_exactly_the_bound() {
    let long = "x".repeat(25_000);
    let record = InteractionRecord::build(&long, &long, 0, DEFAULT_TEXT_LIMIT);

    assert_eq!(record.user_message.len(), DEFAULT_TEXT_LIMIT);
    assert_eq!(record.assistant_message.len(), DEFAULT_TEXT_LIMIT);
    assert_eq!(record.user_message, long[..DEFAULT_TEXT_LIMIT]);
    assert_eq!(record.assistant_message, long[..DEFAULT_TEXT_LIMIT]);
}

#[test]
fn truncation_never_splits_a_char() {
    // "é" is two bytes; a 5-byte bound falls mid-char after two of them.
    let text = "ééééé";
    let record = InteractionRecord::build(text, "", 0, 5);

    assert_eq!(record.user_message, "éé");
    assert!(text.starts_with(&record.user_message));
}

#[test]
fn empty_input_is_allowed() {
    let record = InteractionRecord::build("", "", 0, DEFAULT_TEXT_LIMIT);
    assert!(record.user_message.is_empty());
    assert!(record.assistant_message.is_empty());
}

#[test]
fn each_record_gets_a_fresh_id() {
    let a = InteractionRecord::build("a", "b", 1, DEFAULT_TEXT_LIMIT);
    let b = InteractionRecord::build("a", "b", 1, DEFAULT_TEXT_LIMIT);
    assert_ne!(a.telemetry_id, b.telemetry_id);
}
