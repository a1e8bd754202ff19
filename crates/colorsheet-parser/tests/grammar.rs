use colorsheet_parser::ast::{
    Color, ColorSet, ColorSetValue, DocumentItem, RuleSetItem, Value, Variable,
};
use colorsheet_parser::{parse, parse_file, LoadError};
use proptest::prelude::*;

fn first_value(source: &str) -> Value {
    match parse(source).unwrap().items.into_iter().next() {
        Some(DocumentItem::Declaration(d)) | Some(DocumentItem::Variable(d)) => d.value,
        other => panic!("Expected a declaration, got {:?}", other),
    }
}

#[test]
fn test_full_sample_document() {
    let source = r#"
    $white: #ffffff
    $black: #000000
    $classic: (light: $black, dark: $white)

    $brightAccent: #5753CF
    $mediumBright: rgba(25, 200, 255, 1)

    $grey1: $black

    Text {
      Primary: (light: #151618, dark: #E7E8EA)
      Secondary: (light: $grey1, dark: #85868A)
    }

    LightContentSeparator: (light: #F1F2F2, dark: #222525)

    NumericInput {
      DoneKey {
        Background: (light: $mediumBright, dark: $brightAccent)
        Text: $classic
      }

      Background: (light: #D6D9DE 30%, dark: #313131 40%)
    }
  "#;

    let doc = parse(source).unwrap();
    assert_eq!(doc.items.len(), 9);
    assert_eq!(doc.variables().count(), 6);

    let DocumentItem::RuleSet(numeric) = &doc.items[8] else {
        panic!("Expected NumericInput ruleset");
    };
    assert_eq!(numeric.identifier, "NumericInput");
    assert_eq!(numeric.items.len(), 2);
    match &numeric.items[1] {
        RuleSetItem::Declaration(d) => {
            assert_eq!(
                d.value,
                Value::ColorSet(ColorSet {
                    light: ColorSetValue::Color(Color::rgba(0xd6, 0xd9, 0xde, 0.3)),
                    dark: ColorSetValue::Color(Color::rgba(0x31, 0x31, 0x31, 0.4)),
                })
            );
        }
        other => panic!("Expected declaration, got {:?}", other),
    }
}

#[test]
fn test_variable_chain_is_kept_symbolic() {
    assert_eq!(
        first_value("$a1: $a0"),
        Value::Variable(Variable::new("a0"))
    );
}

#[test]
fn test_identifiers_are_case_sensitive() {
    let doc = parse("A: #000000\na: #ffffff").unwrap();
    let names: Vec<_> = doc
        .items
        .iter()
        .map(|item| match item {
            DocumentItem::Declaration(d) => d.identifier.clone(),
            other => panic!("Expected declaration, got {:?}", other),
        })
        .collect();
    assert_eq!(names, vec!["A", "a"]);
}

#[test]
fn test_parse_file_reads_and_parses() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("colors.colorsheet");
    std::fs::write(&path, "a: #102030\n").unwrap();
    let doc = parse_file(&path).unwrap();
    assert_eq!(doc.items.len(), 1);
}

#[test]
fn test_parse_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.colorsheet");
    std::fs::write(&path, "a: #10").unwrap();
    let err = parse_file(&path).unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }));
    assert!(err.to_string().contains("broken.colorsheet:1:"));

    let missing = parse_file(dir.path().join("missing")).unwrap_err();
    assert!(matches!(missing, LoadError::Io { .. }));
}

proptest! {
    #[test]
    fn prop_hex_channels_roundtrip(r in any::<u8>(), g in any::<u8>(), b in any::<u8>(), upper in any::<bool>()) {
        let hex = format!("{:02x}{:02x}{:02x}", r, g, b);
        let hex = if upper { hex.to_uppercase() } else { hex };
        let value = first_value(&format!("a: #{}", hex));
        prop_assert_eq!(value, Value::Color(Color::rgb(r, g, b)));
    }

    #[test]
    fn prop_hex_percentage_alpha(percent in 0u32..=100) {
        let value = first_value(&format!("a: #000000 {}%", percent));
        prop_assert_eq!(value, Value::Color(Color::rgba(0, 0, 0, percent as f32 / 100.0)));
    }

    #[test]
    fn prop_rgba_tolerates_whitespace(
        r in any::<u8>(),
        g in any::<u8>(),
        b in any::<u8>(),
        pads in prop::collection::vec("[ \t]{0,3}", 7),
    ) {
        let source = format!(
            "a: rgba({r}{}, {}{g}{},{}{b}{},{}1{})",
            pads[0], pads[1], pads[2], pads[3], pads[4], pads[5], pads[6]
        );
        prop_assert_eq!(first_value(&source), Value::Color(Color::rgba(r, g, b, 1.0)));
    }

    #[test]
    fn prop_colorset_label_order_is_irrelevant(light in any::<u8>(), dark in any::<u8>()) {
        let forward = first_value(&format!("a: (light: #{0:02x}0000, dark: #{1:02x}0000)", light, dark));
        let backward = first_value(&format!("a: (dark: #{1:02x}0000, light: #{0:02x}0000)", light, dark));
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn prop_other_labels_fail(first in "[a-z]{1,8}", second in "[a-z]{1,8}") {
        prop_assume!(!matches!((first.as_str(), second.as_str()), ("light", "dark") | ("dark", "light")));
        let source = format!("a: ({}: #000000, {}: #ffffff)", first, second);
        prop_assert!(parse(&source).is_err());
    }
}
