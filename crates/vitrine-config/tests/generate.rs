#![forbid(unsafe_code)]

//! File output of the generator.

use std::fs;

use vitrine_config::{ConfigError, SiteConfig, generate, generate_example};

#[test]
fn writes_config_with_values() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("config.js");
    let config = SiteConfig {
        google_script_url: "https://script.google.com/macros/s/abc/exec".into(),
        google_analytics_id: "G-123".into(),
        facebook_pixel_id: String::new(),
    };

    generate(&out, &config).unwrap();
    let js = fs::read_to_string(&out).unwrap();
    assert!(js.contains("GOOGLE_SCRIPT_URL: 'https://script.google.com/macros/s/abc/exec',"));
    assert!(js.contains("GOOGLE_ANALYTICS_ID: 'G-123',"));
    assert!(js.contains("FACEBOOK_PIXEL_ID: '',"));
    assert!(js.ends_with("}\n"));
}

#[test]
fn missing_url_still_writes_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("config.js");

    let err = generate(&out, &SiteConfig::default()).unwrap_err();
    assert!(matches!(err, ConfigError::MissingScriptUrl));
    let js = fs::read_to_string(&out).unwrap();
    assert!(js.contains("GOOGLE_SCRIPT_URL: '',"));
}

#[test]
fn env_lookup_feeds_generation() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("config.js");
    let config = SiteConfig::from_env(|name| match name {
        "GOOGLE_SCRIPT_URL" => Some(String::new()),
        "VITE_GOOGLE_SCRIPT_URL" => Some("https://vite.example/exec\n".into()),
        "FACEBOOK_PIXEL_ID" => Some("  998877  ".into()),
        _ => None,
    });

    generate(&out, &config).unwrap();
    let js = fs::read_to_string(&out).unwrap();
    assert!(js.contains("GOOGLE_SCRIPT_URL: 'https://vite.example/exec',"));
    assert!(js.contains("FACEBOOK_PIXEL_ID: '998877',"));
}

#[test]
fn example_template_has_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("config.example.js");

    generate_example(&out).unwrap();
    let js = fs::read_to_string(&out).unwrap();
    assert!(js.contains("GOOGLE_SCRIPT_URL: 'YOUR_GOOGLE_APPS_SCRIPT_URL_HERE',"));
    assert!(js.contains("複製此檔案並重新命名為 config.js"));
}

#[test]
fn unwritable_path_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("missing").join("config.js");

    let err = generate(&out, &SiteConfig::example()).unwrap_err();
    match err {
        ConfigError::Io { path, .. } => assert_eq!(path, out),
        other => panic!("unexpected error: {other}"),
    }
    assert!(std::error::Error::source(&generate_example(&out).unwrap_err()).is_some());
}
