use crate::diagnostics::{Diagnostic, MessageCatalog, MessageId};
use crate::dimension::DimensionVector;
use crate::engine::{parse_units, Engine};
use crate::error::MetrumError;
use crate::message_builder::{DiagnosticRenderer, InlineRenderer};
use crate::unit_system::UnitSystem;
use crate::ResourceLimits;
use rust_decimal::Decimal;

fn plain_engine() -> Engine {
    Engine::new().with_unit_system(UnitSystem::empty())
}

#[test]
fn test_parse_units_with_si() {
    let engine = Engine::new();
    let units = engine.parse_units("kg m^2 / s^3").unwrap();
    assert_eq!(
        units,
        DimensionVector::from_iter([("SI.kilogram", 1), ("SI.metre", 2), ("SI.second", -3)])
    );
}

#[test]
fn test_surface_variants_are_equal() {
    let engine = plain_engine();
    let expected = engine.parse_units("m s^-2").unwrap();
    for variant in ["m * s^-2", "m/s^2", "m s⁻²", "1 m / s s"] {
        assert_eq!(
            engine.parse_units(variant).unwrap(),
            expected,
            "variant '{}'",
            variant
        );
    }
}

#[test]
fn test_dimensionless_inputs() {
    let engine = plain_engine();
    assert!(engine.parse_units("1").unwrap().is_dimensionless());
    assert!(engine.parse_units("").unwrap().is_dimensionless());
}

#[test]
fn test_failure_carries_formatted_source() {
    let engine = plain_engine();
    let error = engine.parse_units("s^").unwrap_err();

    let formatted = error.formatted().expect("formatted error");
    assert_eq!(formatted.source, "s^");
    assert!(formatted.has(MessageId::NumberIsRequired));
    assert!(formatted.message.starts_with("s^🕳👈❮"));
}

#[test]
fn test_cycle_fails_whole_parse() {
    let mut system = UnitSystem::empty();
    system.alias("a", "b");
    system.alias("b", "a");
    let engine = Engine::new().with_unit_system(system);

    let error = engine.parse_units("a").unwrap_err();
    assert!(error
        .formatted()
        .is_some_and(|f| f.has(MessageId::UnitsIncludeCircularReferences)));
}

#[test]
fn test_parse_and_resolve_errors_are_combined() {
    let mut system = UnitSystem::empty();
    system.alias("a", "a");
    let engine = Engine::new().with_unit_system(system);

    let resolution = engine.resolve("a s^").unwrap();
    let ids: Vec<MessageId> = resolution.diagnostics.iter().map(|d| d.id).collect();
    assert_eq!(
        ids,
        vec![
            MessageId::NumberIsRequired,
            MessageId::UnitsIncludeCircularReferences
        ]
    );
}

#[test]
fn test_render_with_custom_renderer() {
    struct CountingRenderer;

    impl DiagnosticRenderer for CountingRenderer {
        fn render(&self, _source: &str, diagnostics: &[Diagnostic]) -> String {
            format!("{} problem(s)", diagnostics.len())
        }
    }

    let engine = plain_engine();
    let error = engine.render_with(&CountingRenderer, "s^ m^").unwrap_err();
    assert_eq!(error.formatted().map(|f| f.message.as_str()), Some("2 problem(s)"));

    let error = engine
        .render_with(&InlineRenderer::plain(), "m/s/s")
        .unwrap_err();
    assert_eq!(
        error.formatted().map(|f| f.message.as_str()),
        Some("m/s^<<End of source is required>>/s")
    );
}

#[test]
fn test_custom_messages() {
    let messages = MessageCatalog::new().with_message(MessageId::NumberIsRequired, "Need digits");
    let engine = plain_engine().with_messages(messages);

    let error = engine
        .render_with(&InlineRenderer::plain(), "s^")
        .unwrap_err();
    assert_eq!(
        error.formatted().map(|f| f.message.as_str()),
        Some("s^^<<Need digits>>")
    );
}

#[test]
fn test_check_equivalent() {
    let engine = Engine::new();
    assert!(engine.check_equivalent("metre / second", "m s^-1").unwrap());
    assert!(!engine.check_equivalent("m", "s").unwrap());
    assert!(engine.check_equivalent("m", "s^").is_err());
}

#[test]
fn test_measure() {
    let engine = Engine::new();
    let distance = engine.measure(Decimal::from(100), "m").unwrap();
    let time = engine.measure(Decimal::from(20), "s").unwrap();

    let speed = distance.div(&time).unwrap();
    assert_eq!(speed.value, Decimal::from(5));
    assert_eq!(speed.units, engine.parse_units("m/s").unwrap());
}

#[test]
fn test_add_unit_system_json() {
    let mut engine = Engine::new();
    engine
        .add_unit_system_json(
            r#"{
                "units": {"N": [["kg", 1], ["m", 1], ["s", -2]]},
                "messages": {"End_of_source_is_required": "Too much"}
            }"#,
        )
        .unwrap();

    assert!(engine.check_equivalent("N m", "kg m^2 s^-2").unwrap());
    assert_eq!(engine.messages().message(MessageId::EndOfSourceIsRequired), "Too much");
}

#[test]
fn test_add_invalid_unit_system_json() {
    let mut engine = Engine::new();
    let result = engine.add_unit_system_json("not json");
    assert!(matches!(result, Err(MetrumError::UnitSystem(_))));
    assert_eq!(engine.unit_system(), &UnitSystem::si());
}

#[test]
fn test_source_length_limit() {
    let limits = ResourceLimits {
        max_source_chars: 4,
        ..ResourceLimits::default()
    };
    let engine = Engine::new().with_limits(limits);

    assert!(engine.parse_units("m s").is_ok());
    // Counted in characters: four superscripts are fine
    assert!(engine.parse_units("m²³⁴").is_ok());

    match engine.parse_units("m s^2") {
        Err(MetrumError::ResourceLimitExceeded { limit_name, .. }) => {
            assert_eq!(limit_name, "max_source_chars");
        }
        other => panic!("Expected ResourceLimitExceeded, got {:?}", other),
    }
}

#[test]
fn test_unit_system_entry_limit() {
    let limits = ResourceLimits {
        max_unit_system_entries: 12,
        ..ResourceLimits::default()
    };
    let mut engine = Engine::new().with_limits(limits);

    let mut one_more = UnitSystem::empty();
    one_more.define("A");
    engine.add_unit_system(one_more).unwrap();

    // Replacing an existing name does not add an entry
    let mut replacement = UnitSystem::empty();
    replacement.define("m");
    engine.add_unit_system(replacement).unwrap();

    let mut too_many = UnitSystem::empty();
    too_many.define("K");
    let result = engine.add_unit_system(too_many);
    assert!(matches!(
        result,
        Err(MetrumError::ResourceLimitExceeded { .. })
    ));
    assert!(!engine.unit_system().contains("K"));
}

#[test]
fn test_validate_loaded_system() {
    let mut engine = Engine::new();
    assert!(engine.validate().is_valid());

    engine
        .add_unit_system_json(r#"{"units": {"x": "y", "y": "x"}}"#)
        .unwrap();
    assert_eq!(engine.validate().cyclic_units, vec!["x", "y"]);
}

#[test]
fn test_free_parse_units() {
    let mut system = UnitSystem::empty();
    system.expression("W", [("kg", 1), ("m", 2), ("s", -3)]);
    let units = parse_units("W", &system, None).unwrap();
    assert_eq!(units.exponent("s"), -3);

    let messages = MessageCatalog::new().with_message(MessageId::NumberIsRequired, "?");
    let error = parse_units("s^", &UnitSystem::empty(), Some(&messages)).unwrap_err();
    assert_eq!(
        error.formatted().map(|f| f.diagnostics[0].message.as_str()),
        Some("?")
    );
}
