use super::*;
use serde_json::json;

#[test]
fn parses_hex_forms() {
    let c: ColorDef = "#ff0000".parse().unwrap();
    assert_eq!(c, ColorDef::rgba(1.0, 0.0, 0.0, 1.0));

    let c: ColorDef = "#0000ff80".parse().unwrap();
    assert!((c.b - 1.0).abs() < 1e-9);
    assert!((c.a - (128.0 / 255.0)).abs() < 1e-9);

    let c: ColorDef = "#fff".parse().unwrap();
    assert_eq!(c, ColorDef::white());

    let c: ColorDef = "00FF00".parse().unwrap();
    assert_eq!(c.to_rgba8(), [0, 255, 0, 255]);
}

#[test]
fn parses_names_case_insensitive() {
    assert_eq!("White".parse::<ColorDef>().unwrap(), ColorDef::white());
    assert_eq!(" black ".parse::<ColorDef>().unwrap(), ColorDef::black());
    assert_eq!(
        "transparent".parse::<ColorDef>().unwrap().to_rgba8(),
        [0, 0, 0, 0]
    );
}

#[test]
fn rejects_malformed() {
    assert!("#12345".parse::<ColorDef>().is_err());
    assert!("#gg0000".parse::<ColorDef>().is_err());
    assert!("chartreuse-ish".parse::<ColorDef>().is_err());
    assert!("#ééé".parse::<ColorDef>().is_err());
}

#[test]
fn hex_label_is_uppercase() {
    assert_eq!(ColorDef::rgb8(0xab, 0xcd, 0xef).to_hex(), "#ABCDEF");
    assert_eq!(
        ColorDef::rgba(1.0, 1.0, 1.0, 0.0).to_hex(),
        "#FFFFFF00"
    );
}

#[test]
fn hex_label_parses_back() {
    for c in [ColorDef::rgb8(0x12, 0x34, 0x56), ColorDef::rgba(0.2, 0.4, 0.6, 0.5)] {
        let back: ColorDef = c.to_hex().parse().unwrap();
        assert_eq!(back.to_rgba8(), c.to_rgba8());
    }
}

#[test]
fn deserializes_objects_and_arrays() {
    let c: ColorDef = serde_json::from_value(json!({"r": 0.25, "g": 0.5, "b": 0.75})).unwrap();
    assert_eq!(c, ColorDef::rgba(0.25, 0.5, 0.75, 1.0));

    let c: ColorDef = serde_json::from_value(json!([0.25, 0.5, 0.75, 0.9])).unwrap();
    assert_eq!(c, ColorDef::rgba(0.25, 0.5, 0.75, 0.9));

    let c: ColorDef = serde_json::from_value(json!("#336699")).unwrap();
    assert_eq!(c.to_rgba8(), [0x33, 0x66, 0x99, 255]);

    assert!(serde_json::from_value::<ColorDef>(json!([1.0])).is_err());
}

#[test]
fn deserializes_hsla_object() {
    let c: ColorDef = serde_json::from_value(json!({"h": 0.0, "s": 1.0, "l": 0.5})).unwrap();
    // Pure red.
    assert!((c.r - 1.0).abs() < 1e-9);
    assert!((c.g - 0.0).abs() < 1e-9);
    assert!((c.b - 0.0).abs() < 1e-9);
}
