// tests/config_loading.rs
use glam::DVec2;
use lsystem_turtle::{
    Action, ActionMap, Canvas, Command, DrawOptions, LSystem, LSystemConfig, LSystemError,
};
use std::io::Write;

const SNOWFLAKE: &str = r#"{
    "axiom": "F--F--F",
    "rules": { "F": "F+F--F+F" },
    "angle": 60,
    "rand_unit": 0,
    "comment": "ignored",
    "draw": {
        "start_point": [-0.25, 0.5],
        "start_heading": 90,
        "default_order": 3,
        "default_unit": 4,
        "fill_order": 3,
        "fill_colors": { "F": "yellow" },
        "seq_color_order": 2,
        "seq_colors": ["red", "green", "blue"]
    }
}"#;

#[test]
fn test_defaults() {
    let config = LSystemConfig::from_json("{}").unwrap();
    assert_eq!(config.draw, DrawOptions::default());
    assert_eq!(config.draw.default_order, 5);
    assert_eq!(config.draw.default_unit, 5.0);
    assert!(!config.trace);

    let lsys = LSystem::from_config(config).unwrap();
    assert_eq!(lsys.actions(), &ActionMap::standard());
    assert_eq!(lsys.grammar().axiom, "");
    assert_eq!(lsys.config().left_angle, 0.0);
}

#[test]
fn test_full_record() {
    let lsys = LSystem::from_json(SNOWFLAKE).unwrap();
    let config = lsys.config();

    assert_eq!(lsys.grammar().rule('F'), Some("F+F--F+F"));
    assert_eq!(lsys.grammar().axiom, "F--F--F");
    assert_eq!(config.left_angle, 60.0);
    assert_eq!(config.right_angle, 60.0);
    assert_eq!(config.start_point, DVec2::new(-0.25, 0.5));
    assert_eq!(config.surface_start_heading(), 0.0);
    assert_eq!(config.default_order, 3);
    assert_eq!(config.fill_colors.get(&'F').map(String::as_str), Some("yellow"));
    assert_eq!(config.seq_colors, vec!["red", "green", "blue"]);
    assert!(config.cycles_color_at(2));
    assert!(!config.cycles_color_at(3));
}

#[test]
fn test_snowflake_renders_three_filled_sides() {
    let lsys = LSystem::from_json(SNOWFLAKE).unwrap();
    let mut canvas = Canvas::default();
    lsys.render(&mut canvas, None, None).unwrap();

    // Each side opens in yellow, then four order-2 substitutions advance the
    // color cycle, so every fill closes on a different cycle color.
    let fill_colors: Vec<&str> = canvas.fills().iter().map(|f| f.color.as_str()).collect();
    assert_eq!(fill_colors, vec!["red", "green", "blue"]);
    let yellow = Command::SetColor("yellow".to_string());
    assert_eq!(canvas.commands().iter().filter(|c| **c == yellow).count(), 3);
    // 3 sides of 4^3 segments each.
    let forwards = canvas
        .commands()
        .iter()
        .filter(|c| matches!(c, Command::Forward(d) if *d == 4.0))
        .count();
    assert_eq!(forwards, 192);
    assert_eq!(canvas.commands()[1], Command::MoveTo(DVec2::new(-100.0, 150.0)));
}

#[test]
fn test_separate_turn_angles() {
    let json = r#"{ "angle": 45, "right_angle": 30, "actions": { "L": "turn-left", "R": "right" } }"#;
    let lsys = LSystem::from_json(json).unwrap();

    assert_eq!(lsys.config().left_angle, 45.0);
    assert_eq!(lsys.config().right_angle, 30.0);
    assert_eq!(lsys.actions().resolve('L').unwrap(), Action::TurnLeft);
    assert_eq!(lsys.actions().resolve('R').unwrap(), Action::TurnRight);
    assert_eq!(lsys.actions().resolve('F').unwrap(), Action::Noop);
}

#[test]
fn test_unknown_action_fails_on_dispatch() {
    // A bad name on a symbol that is never reached does not matter.
    let lsys = LSystem::from_json(r#"{ "axiom": "F", "actions": { "F": "draw", "X": "spin" } }"#)
        .unwrap();
    let mut canvas = Canvas::default();
    lsys.render(&mut canvas, Some(1), Some(10.0)).unwrap();
    assert_eq!(canvas.strokes().len(), 1);

    // Reaching it aborts the render, keeping what was already drawn.
    let lsys = LSystem::from_json(r#"{ "axiom": "FXF", "actions": { "F": "draw", "X": "spin" } }"#)
        .unwrap();
    let mut canvas = Canvas::default();
    let err = lsys.render(&mut canvas, Some(1), Some(10.0)).unwrap_err();

    assert!(matches!(err, LSystemError::UnknownAction(ref name) if name == "spin"));
    let forwards = canvas
        .commands()
        .iter()
        .filter(|c| matches!(c, Command::Forward(_)))
        .count();
    assert_eq!(forwards, 1);
}

#[test]
fn test_negative_corner_radius_rejected() {
    let err = LSystem::from_json(r#"{ "draw": { "corner_radius": -1 } }"#).unwrap_err();
    assert!(matches!(err, LSystemError::InvalidConfig(_)));
}

#[test]
fn test_malformed_json() {
    let err = LSystemConfig::from_json(r#"{ "axiom": "#).unwrap_err();
    assert!(matches!(err, LSystemError::Json(_)));
}

#[test]
fn test_multi_symbol_keys_are_skipped() {
    let json = r#"{
        "axiom": "F",
        "rules": { "F": "F+F", "FF": "G" },
        "actions": { "F": "draw", "+": "left", "XY": "spin" },
        "angle": 90,
        "draw": { "fill_colors": { "F": "red", "ab": "blue" } }
    }"#;
    let lsys = LSystem::from_json(json).unwrap();

    assert_eq!(lsys.grammar().rules().len(), 1);
    assert_eq!(lsys.actions().len(), 2);
    assert_eq!(lsys.config().fill_colors.len(), 1);
    assert_eq!(lsys.grammar().derive(1), "F+F");

    let mut canvas = Canvas::default();
    lsys.render(&mut canvas, Some(1), Some(10.0)).unwrap();
    assert_eq!(canvas.strokes()[0].points.len(), 3);
}

#[test]
fn test_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SNOWFLAKE.as_bytes()).unwrap();

    let config = LSystemConfig::from_path(file.path()).unwrap();
    assert_eq!(config.axiom, "F--F--F");
    assert_eq!(config.draw.seq_colors.len(), 3);

    let err = LSystemConfig::from_path("/nonexistent/lsystem.json").unwrap_err();
    assert!(matches!(err, LSystemError::Io(_)));
}
