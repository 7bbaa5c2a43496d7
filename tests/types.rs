// ABOUTME: Tests for validated domain types.
// ABOUTME: App name rules and image reference parsing.

use azrollout::types::{AppName, AppNameError, ImageRef, ParseImageRefError};

#[test]
fn app_name_accepts_valid_names() {
    for name in ["demo-backend", "a1", "web-app-42", "API2"] {
        assert!(AppName::new(name).is_ok(), "{name} should be valid");
    }
}

#[test]
fn app_name_rejects_invalid_names() {
    assert!(matches!(AppName::new(""), Err(AppNameError::Empty)));
    assert!(matches!(AppName::new("a"), Err(AppNameError::TooShort)));
    assert!(matches!(
        AppName::new(&"x".repeat(61)),
        Err(AppNameError::TooLong)
    ));
    assert!(matches!(
        AppName::new("-demo"),
        Err(AppNameError::StartsWithHyphen)
    ));
    assert!(matches!(
        AppName::new("demo-"),
        Err(AppNameError::EndsWithHyphen)
    ));
    assert!(matches!(
        AppName::new("demo_backend"),
        Err(AppNameError::InvalidChar('_'))
    ));
}

#[test]
fn image_ref_parses_registry_name_and_tag() {
    let image = ImageRef::parse("demoacr.azurecr.io/demo-backend:build-42").unwrap();
    assert_eq!(image.registry(), Some("demoacr.azurecr.io"));
    assert_eq!(image.name(), "demo-backend");
    assert_eq!(image.tag(), Some("build-42"));
    assert_eq!(image.digest(), None);
}

#[test]
fn image_ref_display_is_verbatim() {
    // An untagged reference resolves to "latest" in its parsed parts, but
    // the displayed string must stay exactly as given.
    let image = ImageRef::parse("nginx").unwrap();
    assert_eq!(image.tag(), Some("latest"));
    assert_eq!(image.to_string(), "nginx");

    let digest_only = "demoacr.azurecr.io/demo-backend@sha256:4bc453b53cb3d914";
    let image = ImageRef::parse(digest_only).unwrap();
    assert_eq!(image.tag(), None);
    assert_eq!(image.digest(), Some("sha256:4bc453b53cb3d914"));
    assert_eq!(image.to_string(), digest_only);
}

#[test]
fn image_ref_registry_port_is_not_a_tag() {
    let image = ImageRef::parse("localhost:5000/demo-backend").unwrap();
    assert_eq!(image.registry(), Some("localhost:5000"));
    assert_eq!(image.name(), "demo-backend");
    assert_eq!(image.tag(), Some("latest"));
    assert_eq!(image.to_string(), "localhost:5000/demo-backend");
}

#[test]
fn image_ref_namespaced_name_without_registry() {
    let image = ImageRef::parse("library/nginx:1.27").unwrap();
    assert_eq!(image.registry(), None);
    assert_eq!(image.name(), "library/nginx");
    assert_eq!(image.tag(), Some("1.27"));
}

#[test]
fn image_ref_rejects_bad_input() {
    assert!(matches!(
        ImageRef::parse("  "),
        Err(ParseImageRefError::Empty)
    ));
    assert!(matches!(
        ImageRef::parse("demo backend"),
        Err(ParseImageRefError::InvalidChar(' '))
    ));
}

#[test]
fn image_ref_trims_surrounding_whitespace() {
    let image = ImageRef::parse("  nginx:1.27\n").unwrap();
    assert_eq!(image.to_string(), "nginx:1.27");
}
