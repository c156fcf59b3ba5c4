//! Name hash tests

use rust_motion_config::hash::{hash_bytes, known_name, name_hash, names};

#[test]
fn test_known_vectors() {
    assert_eq!(name_hash("config-get"), 0x2832);
    assert_eq!(name_hash("config-set"), 0xB791);
    assert_eq!(name_hash("config-load"), 0x9E10);
    assert_eq!(name_hash("foo"), 0xAF96);
    assert_eq!(name_hash("stepper.alpha.step_pin"), 0x89A3);
}

#[test]
fn test_bytes_and_str_agree() {
    assert_eq!(hash_bytes(b"planner.max_speed"), name_hash("planner.max_speed"));
}

#[test]
fn test_order_dependent() {
    assert_ne!(name_hash("ab"), name_hash("ba"));
}

#[test]
fn test_accepted_collision() {
    // Two distinct names, one id: the config file decides by line order
    assert_eq!(name_hash("kacq"), 0xDB59);
    assert_eq!(name_hash("kpaa"), 0xDB59);
}

#[test]
fn test_generated_constants() {
    assert_eq!(names::CONFIG_GET, name_hash("config-get"));
    assert_eq!(names::STEPPER_ALPHA_STEP_PIN, name_hash("stepper.alpha.step_pin"));
    assert_eq!(names::PLANNER_JUNCTION_DEVIATION, name_hash("planner.junction_deviation"));
}

#[test]
fn test_known_name_lookup() {
    assert_eq!(known_name(names::CONFIG_SET), Some("config-set"));
    assert_eq!(known_name(name_hash("laser.max_power")), Some("laser.max_power"));
    assert_eq!(known_name(name_hash("not.listed")), None);
}
