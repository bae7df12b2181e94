use crate::diagnostics::MessageId;
use crate::error::MetrumError;
use crate::unit_system::{UnitDefinition, UnitSystem, UnitSystemFile};

#[test]
fn test_si_catalog() {
    let system = UnitSystem::si();
    assert_eq!(system.get("SI.metre"), Some(&UnitDefinition::Definition));
    assert_eq!(
        system.get("m"),
        Some(&UnitDefinition::Alias("SI.metre".to_string()))
    );
    assert_eq!(
        system.get("kilogram"),
        Some(&UnitDefinition::Alias("SI.kilogram".to_string()))
    );
    assert_eq!(
        system.get("milli"),
        Some(&UnitDefinition::Alias("SI.milli".to_string()))
    );
    assert_eq!(system.len(), 11);
}

#[test]
fn test_empty_system() {
    assert!(UnitSystem::empty().is_empty());
    assert!(UnitSystem::empty().get("m").is_none());
}

#[test]
fn test_load_untagged_json() {
    let system = UnitSystem::from_json(
        r#"{
            "units": {
                "SI.ampere": null,
                "A": "SI.ampere",
                "W": [["kg", 1], ["m", 2], ["s", -3]]
            }
        }"#,
    )
    .unwrap();

    assert_eq!(system.get("SI.ampere"), Some(&UnitDefinition::Definition));
    assert_eq!(
        system.get("A"),
        Some(&UnitDefinition::Alias("SI.ampere".to_string()))
    );
    assert_eq!(
        system.get("W"),
        Some(&UnitDefinition::Expression(vec![
            ("kg".to_string(), 1),
            ("m".to_string(), 2),
            ("s".to_string(), -3),
        ]))
    );
}

#[test]
fn test_load_messages() {
    let file = UnitSystemFile::from_json(
        r#"{"messages": {"Number_is_required": "Nummer benodigd"}}"#,
    )
    .unwrap();

    assert!(file.units.is_empty());
    assert_eq!(
        file.messages.message(MessageId::NumberIsRequired),
        "Nummer benodigd"
    );
    assert_eq!(
        file.messages.message(MessageId::FractionSymbolRequired),
        "Fraction symbol ( / ) required"
    );
}

#[test]
fn test_invalid_json_is_unit_system_error() {
    let result = UnitSystem::from_json(r#"{"units": {"W": [["kg"]]}}"#);
    assert!(matches!(result, Err(MetrumError::UnitSystem(_))));

    let result = UnitSystem::from_json(r#"{"unit": {}}"#);
    assert!(matches!(result, Err(MetrumError::UnitSystem(_))));
}

#[test]
fn test_serialize_round_trip() {
    let mut system = UnitSystem::empty();
    system.define("s");
    system.alias("second", "s");
    system.expression("Hz", [("s", -1)]);

    let json = serde_json::to_string(&system).unwrap();
    assert_eq!(json, r#"{"Hz":[["s",-1]],"s":null,"second":"s"}"#);

    let back: UnitSystem = serde_json::from_str(&json).unwrap();
    assert_eq!(back, system);
}

#[test]
fn test_merge_overrides() {
    let mut system = UnitSystem::si();
    let mut extra = UnitSystem::empty();
    extra.alias("m", "SI.mile");
    extra.define("SI.mile");

    system.merge(extra);
    assert_eq!(
        system.get("m"),
        Some(&UnitDefinition::Alias("SI.mile".to_string()))
    );
    assert_eq!(system.len(), 12);
}

#[test]
fn test_references() {
    assert!(UnitDefinition::Definition.references().is_empty());
    assert_eq!(UnitDefinition::Alias("m".to_string()).references(), vec!["m"]);
    assert_eq!(
        UnitDefinition::Expression(vec![("m".to_string(), 1), ("s".to_string(), -1)])
            .references(),
        vec!["m", "s"]
    );
}
