use crate::analysis::*;
use crate::unit_system::UnitSystem;
use crate::validator::Validator;
use std::collections::{HashMap, HashSet};

fn set(names: &[&str]) -> HashSet<String> {
    names.iter().map(|name| name.to_string()).collect()
}

#[test]
fn test_build_dependency_graph() {
    let mut system = UnitSystem::empty();
    system.define("SI.metre");
    system.alias("m", "SI.metre");
    system.expression("W", [("kg", 1), ("m", 2), ("s", -3)]);

    let graph = build_dependency_graph(&system);
    assert_eq!(graph.len(), 3);
    assert!(graph["SI.metre"].is_empty());
    assert_eq!(graph["m"], set(&["SI.metre"]));
    assert_eq!(graph["W"], set(&["kg", "m", "s"]));
}

#[test]
fn test_topological_sort_chain() {
    let mut graph = HashMap::new();
    graph.insert("top".to_string(), set(&["middle"]));
    graph.insert("middle".to_string(), set(&["base"]));
    graph.insert("base".to_string(), HashSet::new());

    let sorted = topological_sort(&graph);
    assert_eq!(sorted.order, vec!["base", "middle", "top"]);
    assert!(sorted.blocked.is_empty());
}

#[test]
fn test_topological_sort_blocks_cycle_and_dependents() {
    let mut graph = HashMap::new();
    graph.insert("a".to_string(), set(&["b"]));
    graph.insert("b".to_string(), set(&["a"]));
    graph.insert("c".to_string(), set(&["a"]));
    graph.insert("d".to_string(), HashSet::new());

    let sorted = topological_sort(&graph);
    assert_eq!(sorted.order, vec!["d"]);
    assert_eq!(
        sorted.blocked.into_iter().collect::<Vec<_>>(),
        vec!["a", "b", "c"]
    );
}

#[test]
fn test_dangling_references() {
    let mut system = UnitSystem::empty();
    system.define("m");
    system.expression("v", [("m", 1), ("s", -1)]);

    assert_eq!(
        dangling_references(&system),
        vec![("v".to_string(), "s".to_string())]
    );
}

#[test]
fn test_validator_accepts_si() {
    let report = Validator::new().validate(&UnitSystem::si());
    assert!(report.is_valid());
    assert!(report.dangling_references.is_empty());
    assert_eq!(report.order.len(), UnitSystem::si().len());
}

#[test]
fn test_validator_orders_definitions_first() {
    let mut system = UnitSystem::empty();
    system.alias("m", "SI.metre");
    system.define("SI.metre");

    let report = Validator::new().validate(&system);
    assert_eq!(report.order, vec!["SI.metre", "m"]);
}

#[test]
fn test_validator_reports_cycles() {
    let mut system = UnitSystem::si();
    system.alias("a", "b");
    system.alias("b", "a");

    let report = Validator::new().validate(&system);
    assert!(!report.is_valid());
    assert_eq!(report.cyclic_units, vec!["a", "b"]);
    assert!(!report.order.contains(&"a".to_string()));
}

#[test]
fn test_validator_excludes_dangling_names_from_order() {
    let mut system = UnitSystem::empty();
    system.alias("x", "undefined");

    let report = Validator::new().validate(&system);
    assert!(report.is_valid());
    assert_eq!(report.order, vec!["x"]);
    assert_eq!(
        report.dangling_references,
        vec![("x".to_string(), "undefined".to_string())]
    );
}
