use libreviews_types::{Error, ErrorMessage};
use proptest::prelude::*;
use serde_json::json;

// ── Construction ──────────────────────────────────────────────────

#[test]
fn new_without_params() {
    let msg = ErrorMessage::new("page not found").unwrap();
    assert_eq!(msg.key(), "page not found");
    assert!(msg.to_array().is_empty());
    assert!(msg.original_error().is_none());
}

#[test]
fn empty_key_is_rejected() {
    assert!(matches!(ErrorMessage::new(""), Err(Error::InvalidMessageKey)));
    assert!(matches!(ErrorMessage::new("  "), Err(Error::InvalidMessageKey)));
}

#[test]
fn json_params_must_be_an_array() {
    let err = ErrorMessage::from_json_params("x", &json!("not an array")).unwrap_err();
    assert!(matches!(err, Error::InvalidMessageParams(_)));

    let err = ErrorMessage::from_json_params("x", &json!({"a": "b"})).unwrap_err();
    assert!(matches!(err, Error::InvalidMessageParams(_)));
}

#[test]
fn json_params_must_all_be_strings() {
    let err = ErrorMessage::from_json_params("x", &json!(["ok", 42])).unwrap_err();
    assert!(err.to_string().contains("parameter 1"));
}

#[test]
fn json_params_accepts_strings_and_empty_array() {
    let msg = ErrorMessage::from_json_params("x", &json!(["a", "b"])).unwrap();
    assert_eq!(msg.to_array(), ["a".to_string(), "b".to_string()]);

    let msg = ErrorMessage::from_json_params("x", &json!([])).unwrap();
    assert!(msg.to_array().is_empty());
}

#[test]
fn json_params_rejects_null() {
    let err = ErrorMessage::from_json_params("x", &json!(null)).unwrap_err();
    assert!(matches!(err, Error::InvalidMessageParams(_)));
}

#[test]
fn escaped_array_escapes_markup() {
    let msg = ErrorMessage::with_params(
        "invalid url",
        vec!["<script>alert('x')</script>".into(), "a & b".into()],
    )
    .unwrap();
    let escaped = msg.to_escaped_array();
    assert_eq!(escaped.len(), 2);
    assert!(!escaped[0].contains('<'));
    assert!(escaped[0].contains("&lt;script&gt;"));
    assert_eq!(escaped[1], "a &amp; b");
    // raw view is untouched
    assert_eq!(msg.to_array()[1], "a & b");
}

#[test]
fn source_is_kept_for_logging() {
    let io = std::io::Error::other("disk on fire");
    let msg = ErrorMessage::new("unknown error").unwrap().with_source(io);
    let source = msg.original_error().unwrap();
    assert!(source.to_string().contains("disk on fire"));
    assert!(std::error::Error::source(&msg).is_some());
}

#[test]
fn display_includes_params() {
    let msg = ErrorMessage::with_params("no thing", vec!["abc".into()]).unwrap();
    assert_eq!(msg.to_string(), "no thing (abc)");
}

// ── Properties ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn escaped_view_has_same_length(params in prop::collection::vec(".{0,40}", 0..8)) {
        let msg = ErrorMessage::with_params("key", params.clone()).unwrap();
        let escaped = msg.to_escaped_array();
        prop_assert_eq!(escaped.len(), msg.to_array().len());
        for (raw, esc) in params.iter().zip(&escaped) {
            prop_assert!(!esc.contains('<') && !esc.contains('>'));
            let decoded = html_escape::decode_html_entities(esc);
            prop_assert_eq!(decoded.as_ref(), raw.as_str());
        }
    }
}
