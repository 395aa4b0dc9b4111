use super::*;

#[test]
fn parses_camel_case_keys() {
    let patch = BadgePatch::from_json_str(
        r#"{"name":"JS","title":"DEV","size":512,"fontSize":52,"imageScale":0.5,
            "outlineColor":"green","backgroundColor":"black","fontColor":"white","image":"a.png"}"#,
    )
    .unwrap();
    assert_eq!(patch.name.as_deref(), Some("JS"));
    assert_eq!(patch.title.as_deref(), Some("DEV"));
    assert_eq!(patch.size, Some(512));
    assert_eq!(patch.font_size, Some(52));
    assert_eq!(patch.image_scale, Some(0.5));
    assert_eq!(patch.image.as_deref(), Some("a.png"));
}

#[test]
fn missing_keys_stay_none() {
    let patch = BadgePatch::from_json_str("{}").unwrap();
    assert_eq!(patch, BadgePatch::default());
}

#[test]
fn rejects_unknown_keys_and_bad_types() {
    assert!(BadgePatch::from_json_str(r#"{"colour":"red"}"#).is_err());
    assert!(BadgePatch::from_json_str(r#"{"size":"big"}"#).is_err());
}
