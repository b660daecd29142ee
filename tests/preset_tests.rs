use std::fs;
use std::path::PathBuf;

use calc_autofill::preset::fingerprint::config_fingerprint;
use calc_autofill::preset::loader::{find_preset, load_preset, load_presets};
use calc_autofill::preset::preset_model::SettingValue;

/// Fresh scratch directory per test, cleaned up on drop.
struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(tag: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "calc-autofill-test-{}-{}",
            std::process::id(),
            tag
        ));
        fs::create_dir_all(&path).expect("create temp dir");
        TempDir { path }
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let p = self.path.join(name);
        fs::write(&p, content).expect("write fixture");
        p
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

#[test]
fn loads_a_preset_and_keeps_author_order() {
    let dir = TempDir::new("order");
    let path = dir.write(
        "baseline.json",
        r#"{
            "name": "baseline",
            "description": "entry sizing",
            "estimated_cost": "$12.34/mo",
            "settings": {
                "zeta": 1,
                "alpha": true,
                "middle": "us-east-1"
            }
        }"#,
    );

    let preset = load_preset(&path).expect("load");
    assert_eq!(preset.name, "baseline");
    assert_eq!(preset.description, "entry sizing");
    assert_eq!(preset.estimated_cost.as_deref(), Some("$12.34/mo"));

    let fields: Vec<&str> = preset.field_names().collect();
    assert_eq!(fields, vec!["zeta", "alpha", "middle"]);
    assert_eq!(preset.settings[0].value, SettingValue::Number(1.0));
    assert_eq!(preset.settings[1].value, SettingValue::Flag(true));
    assert_eq!(
        preset.settings[2].value,
        SettingValue::Text("us-east-1".to_string())
    );
}

#[test]
fn nested_groups_flatten_to_dotted_fields() {
    let dir = TempDir::new("nested");
    let path = dir.write(
        "nested.json",
        r#"{
            "name": "nested",
            "settings": {
                "storage": {
                    "standard": { "gb_per_month": 50 },
                    "infrequent_access": { "gb_per_month": 200 }
                },
                "enable_logging": false
            }
        }"#,
    );

    let preset = load_preset(&path).expect("load");
    let fields: Vec<&str> = preset.field_names().collect();
    assert_eq!(
        fields,
        vec![
            "storage.standard.gb_per_month",
            "storage.infrequent_access.gb_per_month",
            "enable_logging",
        ]
    );
}

#[test]
fn non_scalar_setting_values_are_rejected() {
    let dir = TempDir::new("array");
    let path = dir.write(
        "bad.json",
        r#"{
            "name": "bad",
            "settings": { "tiers": [1, 2, 3] }
        }"#,
    );

    let err = load_preset(&path).expect_err("array values are invalid");
    let message = err.to_string();
    assert!(message.contains("tiers"));
    assert!(message.contains("array"));
}

#[test]
fn colliding_dotted_names_are_rejected() {
    let dir = TempDir::new("dup");
    let path = dir.write(
        "dup.json",
        r#"{
            "name": "dup",
            "settings": {
                "storage": { "gb": 10 },
                "storage.gb": 20
            }
        }"#,
    );

    let err = load_preset(&path).expect_err("colliding names are invalid");
    assert!(err.to_string().contains("storage.gb"));
}

#[test]
fn missing_name_is_rejected() {
    let dir = TempDir::new("noname");
    let path = dir.write("noname.json", r#"{ "settings": {} }"#);

    assert!(load_preset(&path).is_err());
}

#[test]
fn directory_load_sorts_by_preset_name() {
    let dir = TempDir::new("dirload");
    dir.write("02.json", r#"{ "name": "small", "settings": {} }"#);
    dir.write("01.json", r#"{ "name": "xlarge", "settings": {} }"#);
    dir.write("notes.txt", "not a preset");

    let presets = load_presets(&dir.path).expect("load dir");
    let names: Vec<&str> = presets.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["small", "xlarge"]);
}

#[test]
fn find_preset_matches_the_declared_name_not_the_filename() {
    let dir = TempDir::new("find");
    dir.write("whatever.json", r#"{ "name": "prod", "settings": {} }"#);

    let preset = find_preset(&dir.path, "prod").expect("find");
    assert_eq!(preset.name, "prod");

    let err = find_preset(&dir.path, "whatever").expect_err("filename is not the name");
    assert!(err.to_string().contains("whatever"));
}

#[test]
fn fingerprint_is_stable_and_order_sensitive() {
    let dir = TempDir::new("fp");
    let path_a = dir.write(
        "a.json",
        r#"{ "name": "a", "settings": { "x": 1, "y": 2 } }"#,
    );
    let path_b = dir.write(
        "b.json",
        r#"{ "name": "b", "settings": { "y": 2, "x": 1 } }"#,
    );

    let a = load_preset(&path_a).expect("load a");
    let b = load_preset(&path_b).expect("load b");

    // Same file, same fingerprint
    assert_eq!(config_fingerprint(&a), config_fingerprint(&load_preset(&path_a).expect("reload")));
    // Field order is part of the identity
    assert_ne!(config_fingerprint(&a), config_fingerprint(&b));
    // 40 hex chars of SHA-1
    let hex = config_fingerprint(&a);
    assert_eq!(hex.len(), 40);
    assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn settings_format_as_field_text() {
    assert_eq!(SettingValue::Number(1_000_000.0).as_field_text(), "1000000");
    assert_eq!(SettingValue::Number(2.5).as_field_text(), "2.5");
    assert_eq!(SettingValue::Flag(true).as_field_text(), "true");
    assert_eq!(
        SettingValue::Text("us-east-1".to_string()).as_field_text(),
        "us-east-1"
    );
}
