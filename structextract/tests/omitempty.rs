//! `omitempty` modifier behaviour: zero-valued fields disappear from
//! tag-derived views but stay visible in name-keyed views.

use std::collections::HashMap;

use rstest::rstest;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use structextract::{Extractable, Extractor};

#[derive(Extractable, Serialize, Deserialize, Default, Clone)]
struct Metrics {
    #[extract(tags = r#"custom:"boolType" custom_two:"boolTypeTwo,omitempty""#)]
    bool_type: bool,
    #[extract(tags = r#"custom:"stringType,omitempty""#)]
    string_type: String,
    #[extract(tags = r#"custom:"intType,omitempty""#)]
    int_type: i64,
    #[extract(tags = r#"custom:"bytesType,omitempty""#)]
    bytes_type: Vec<u8>,
    #[extract(tags = r#"custom:"floatType,omitempty""#)]
    float_type: f64,
    #[extract(tags = r#"custom:"optIntType,omitempty""#)]
    opt_int_type: Option<i64>,
    #[extract(tags = r#"custom:"fieldWithNoOmitTag""#)]
    plain: String,
}

fn populated() -> Metrics {
    Metrics {
        bool_type: true,
        string_type: "test".to_owned(),
        int_type: 1,
        bytes_type: b"test".to_vec(),
        float_type: 1.2,
        opt_int_type: Some(6),
        plain: "test".to_owned(),
    }
}

#[rstest]
#[case::all_zero(Metrics::default(), vec!["boolType", "fieldWithNoOmitTag"])]
#[case::all_populated(
    populated(),
    vec![
        "boolType",
        "stringType",
        "intType",
        "bytesType",
        "floatType",
        "optIntType",
        "fieldWithNoOmitTag",
    ],
)]
fn names_from_tag_omits_zero_values(#[case] record: Metrics, #[case] expected: Vec<&str>) {
    let names = Extractor::new(&record).names_from_tag("custom").unwrap();
    assert_eq!(names, expected);
}

#[rstest]
#[case::all_zero(Metrics::default(), vec!["p_boolType", "p_fieldWithNoOmitTag"])]
fn prefixed_names_omit_zero_values(#[case] record: Metrics, #[case] expected: Vec<&str>) {
    let names = Extractor::new(&record)
        .names_from_tag_with_prefix("custom", "p_")
        .unwrap();
    assert_eq!(names, expected);
}

#[test]
fn values_from_tag_omits_zero_values() {
    let values = Extractor::new(&Metrics::default())
        .values_from_tag("custom")
        .unwrap();
    assert_eq!(values, [json!(false), json!("")]);
}

#[test]
fn values_from_tag_keeps_populated_values() {
    let record = populated();
    let values = Extractor::new(&record).values_from_tag("custom").unwrap();
    assert_eq!(
        values,
        [
            json!(true),
            json!("test"),
            json!(1),
            json!([116, 101, 115, 116]),
            json!(1.2),
            json!(6),
            json!("test"),
        ]
    );
}

#[test]
fn tag_map_omits_zero_values() {
    let map = Extractor::new(&Metrics::default())
        .field_value_from_tag_map("custom")
        .unwrap();
    let expected: HashMap<&str, Value> = [
        ("boolType", json!(false)),
        ("fieldWithNoOmitTag", json!("")),
    ]
    .into();
    assert_eq!(map, expected);
}

#[test]
fn omit_applies_per_tag_key() {
    // The same zero-valued field stays visible under a key without the
    // modifier and disappears under a key with it.
    let record = Metrics::default();
    let extractor = Extractor::new(&record);
    assert!(
        extractor
            .names_from_tag("custom")
            .unwrap()
            .contains(&"boolType")
    );
    assert!(extractor.names_from_tag("custom_two").unwrap().is_empty());
}

#[test]
fn name_keyed_views_keep_zero_valued_fields() {
    let record = Metrics::default();
    let extractor = Extractor::new(&record);
    assert_eq!(extractor.names().unwrap().len(), 7);
    assert_eq!(extractor.field_value_map().unwrap().len(), 7);
}
