//! Whole-netlist parsing tests.

use std::path::PathBuf;

use ynet_core::{ComponentKind, ComponentValue, NodeId};
use ynet_parser::{AcSweep, AcSweepType, Error, parse, parse_file};

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

#[test]
fn test_common_emitter_file() {
    let result = parse_file(data("ce_stage.cir")).expect("parse failed");
    let table = &result.table;

    // Everything after .END is ignored.
    assert_eq!(table.len(), 7);
    assert!(table.get("R99").is_none());
    assert_eq!(table.order(), 5);

    let names: Vec<&str> = table.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["RS", "CIN", "Q1", "RE", "LC", "RL", "GFB"]);

    let q1 = table.get("Q1").unwrap();
    assert_eq!(q1.kind, ComponentKind::Transistor);
    assert_eq!(q1.nodes, vec![NodeId::new(2), NodeId::new(3), NodeId::new(4)]);
    assert_eq!(q1.value.as_model(), Some("BFR92"));

    let gfb = table.get("GFB").unwrap();
    assert_eq!(gfb.kind, ComponentKind::Vccs);
    assert!((gfb.value.as_numeric().unwrap() + 1e-4).abs() < 1e-18);

    let model = result.models.get("bfr92").expect("model defined");
    assert!((model.gm - 0.38).abs() < 1e-15);
    assert!((model.gpi - 1.0 / 263.0).abs() < 1e-15);
    assert!((model.gmu - 1e-6).abs() < 1e-18);
    assert!((model.go - 1.0 / 12e3).abs() < 1e-15);
    assert!((model.cce - 1e-13).abs() < 1e-25);

    assert_eq!(
        result.ac,
        Some(AcSweep {
            sweep_type: AcSweepType::Dec,
            num_points: 20,
            fstart: 10e6,
            fstop: 3e9,
        })
    );
}

#[test]
fn test_missing_file() {
    let err = parse_file(data("does_not_exist.cir")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn test_duplicate_identifier_last_write_wins() {
    let netlist = "R1 1 7 100\nC1 1 0 1p\nR1 1 2 220\n";
    let result = parse(netlist).unwrap();
    let table = &result.table;

    assert_eq!(table.len(), 2);
    // First position kept
    let names: Vec<&str> = table.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["R1", "C1"]);
    // Later value and nodes
    let r1 = table.get("R1").unwrap();
    assert_eq!(r1.value, ComponentValue::Numeric(220.0));
    assert_eq!(r1.nodes, vec![NodeId::new(1), NodeId::new(2)]);
    // Order still counts the overwritten line
    assert_eq!(table.order(), 7);
}

#[test]
fn test_unclassified_components_listed() {
    let netlist = "R1 1 0 1k\nX1 1 2 3 opamp\nD1 2 0 dmod\n";
    let result = parse(netlist).unwrap();
    let unknown: Vec<&str> = result
        .table
        .unclassified()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(unknown, vec!["X1", "D1"]);
    // Skipped kinds never stamp, so the table still counts as passive.
    assert!(result.table.is_passive());
    assert!(!parse("Q1 1 2 0 m\n").unwrap().table.is_passive());
}

#[test]
fn test_first_error_stops_parse() {
    let netlist = "R1 1 0 1k\nQ1 1 2 BFR92\nR2 x 0 1k\n";
    match parse(netlist) {
        Err(Error::ParseError { line, text, message }) => {
            assert_eq!(line, 2);
            assert_eq!(text, "Q1 1 2 BFR92");
            assert!(message.contains("expects 3 nodes"), "{message}");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_case_insensitive_prefixes_and_suffixes() {
    let result = parse("r1 1 0 4K7\nc2 1 0 10PF\nl3 1 0 2.2uH\n").unwrap();
    let t = &result.table;
    assert_eq!(t.get("r1").unwrap().kind, ComponentKind::Resistor);
    // 4K7 is not a plain SI value, so it stays a model reference
    assert!(t.get("r1").unwrap().value.as_model().is_some());
    assert!((t.get("c2").unwrap().value.as_numeric().unwrap() - 10e-12).abs() < 1e-24);
    assert!((t.get("l3").unwrap().value.as_numeric().unwrap() - 2.2e-6).abs() < 1e-18);
    assert!(t.is_passive());
}
