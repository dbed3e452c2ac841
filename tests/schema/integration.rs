use super::common::*;
use integration_manifest::error::ViolationKind;
use integration_manifest::validate;
use serde_json::{Value, json};

// ─── Acceptance and defaults ─────────────────────────────────────────────────

#[test]
fn valid_document_passes() {
    let integration = must_pass(&valid_document());
    assert_eq!(integration.name, "Example Threat Intel");
    assert_eq!(integration.version, "1.2.3");
    assert_eq!(integration.manifest.actions.len(), 2);
    assert_eq!(integration.manifest.configuration.len(), 2);
}

#[test]
fn omitted_optional_fields_take_their_defaults() {
    let integration = must_pass(&valid_document());
    assert!(integration.enabled);
    assert!(integration.contributor.is_empty());
    assert!(integration.tags.is_empty());
    assert!(integration.categories.is_empty());
    assert_eq!(integration.license, None);
    assert_eq!(integration.integration_url, None);
    assert_eq!(integration.logo, None);

    let region = &integration.manifest.configuration["region"];
    assert!(!region.required);
    assert!(!region.secret);
    let api_key = &integration.manifest.configuration["api_key"];
    assert!(api_key.required);
    assert!(api_key.secret);
    assert!(api_key.options.is_empty());
}

#[test]
fn explicit_values_override_defaults() {
    let mut doc = valid_document();
    set(&mut doc, "/enabled", json!(false));
    set(&mut doc, "/tags", json!(["intel", "enrichment"]));
    set(&mut doc, "/categories", json!(["Threat Intelligence"]));
    set(&mut doc, "/license", json!("MIT"));
    set(&mut doc, "/contributor", json!(["John Smith <john@example.org>"]));

    let integration = must_pass(&doc);
    assert!(!integration.enabled);
    assert_eq!(integration.tags, vec!["intel", "enrichment"]);
    assert_eq!(integration.categories, vec!["Threat Intelligence"]);
    assert_eq!(integration.license.as_deref(), Some("MIT"));
    assert_eq!(integration.contributor, vec!["John Smith <john@example.org>"]);
}

#[test]
fn unknown_keys_are_ignored_at_every_level() {
    let mut doc = valid_document();
    set(&mut doc, "/x_future_field", json!({"anything": [1, 2, 3]}));
    set(&mut doc, "/manifest/x_extra", json!(true));
    set(&mut doc, "/manifest/actions/0/icon", json!("bolt"));
    set(&mut doc, "/manifest/configuration/api_key/placeholder", json!("sk-..."));
    must_pass(&doc);
}

#[test]
fn null_optional_fields_count_as_absent() {
    let mut doc = valid_document();
    set(&mut doc, "/license", Value::Null);
    set(&mut doc, "/logo", Value::Null);
    set(&mut doc, "/integration_url", Value::Null);
    let integration = must_pass(&doc);
    assert_eq!(integration.license, None);
    assert_eq!(integration.logo, None);
}

#[test]
fn integration_url_is_not_validated() {
    let mut doc = valid_document();
    set(&mut doc, "/integration_url", json!("not really a url"));
    let integration = must_pass(&doc);
    assert_eq!(integration.integration_url.as_deref(), Some("not really a url"));
}

// ─── Missing fields ──────────────────────────────────────────────────────────

#[test]
fn missing_top_level_field_is_reported_at_its_path() {
    for field in [
        "name",
        "product_identifier",
        "brief_description",
        "description",
        "version",
        "author",
        "manifest",
    ] {
        let mut doc = valid_document();
        remove(&mut doc, &format!("/{}", field));
        assert_only(&doc, field, ViolationKind::MissingRequiredField);
    }
}

#[test]
fn missing_nested_field_does_not_implicate_siblings() {
    let mut doc = valid_document();
    remove(&mut doc, "/manifest/actions/1/run_from");
    assert_only(
        &doc,
        "manifest.actions[1].run_from",
        ViolationKind::MissingRequiredField,
    );
}

#[test]
fn two_independent_errors_are_both_reported() {
    let mut doc = valid_document();
    remove(&mut doc, "/name");
    set(&mut doc, "/version", json!("1.0"));

    let errors = must_fail(&doc);
    assert_eq!(errors.len(), 2, "got: {}", errors);
    assert_eq!(kinds_at(&errors, "name"), vec![ViolationKind::MissingRequiredField]);
    assert_eq!(kinds_at(&errors, "version"), vec![ViolationKind::PatternMismatch]);
}

#[test]
fn violations_follow_document_order() {
    let errors = must_fail(&invalid_document());
    let paths: Vec<&str> = errors.iter().map(|v| v.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "name",
            "product_identifier",
            "version",
            "manifest.actions[0].run_from",
        ]
    );
}

// ─── Shapes ──────────────────────────────────────────────────────────────────

#[test]
fn non_mapping_root_is_a_single_type_mismatch() {
    for doc in [json!([1, 2]), json!("manifest"), json!(null), json!(3)] {
        let errors = must_fail(&doc);
        assert_eq!(errors.len(), 1);
        let v = &errors.violations[0];
        assert_eq!(v.kind, ViolationKind::TypeMismatch);
        assert_eq!(v.path, "");
        assert!(v.to_string().starts_with("(root):"), "{}", v);
    }
}

#[test]
fn empty_mapping_reports_every_required_field() {
    let errors = must_fail(&json!({}));
    assert_eq!(errors.len(), 7, "got: {}", errors);
    assert!(
        errors
            .iter()
            .all(|v| v.kind == ViolationKind::MissingRequiredField)
    );
}

#[test]
fn wrong_scalar_type_carries_the_offending_value() {
    let mut doc = valid_document();
    set(&mut doc, "/name", json!(42));
    let errors = must_fail(&doc);
    let v = errors.at("name").next().expect("violation at name");
    assert_eq!(v.kind, ViolationKind::TypeMismatch);
    assert_eq!(v.message, "expected string, got integer");
    assert_eq!(v.invalid_value, Some(json!(42)));
}

#[test]
fn container_values_are_described_not_copied() {
    let mut doc = valid_document();
    set(&mut doc, "/description", json!({"en": "text"}));
    let errors = must_fail(&doc);
    let v = errors.at("description").next().expect("violation");
    assert_eq!(v.message, "expected string, got mapping");
    assert_eq!(v.invalid_value, None);
}

#[test]
fn null_for_required_field_is_a_type_mismatch() {
    let mut doc = valid_document();
    set(&mut doc, "/manifest", Value::Null);
    assert_only(&doc, "manifest", ViolationKind::TypeMismatch);
}

#[test]
fn null_for_non_nullable_default_is_a_type_mismatch() {
    for field in ["contributor", "tags", "categories", "enabled"] {
        let mut doc = valid_document();
        set(&mut doc, &format!("/{}", field), Value::Null);
        assert_only(&doc, field, ViolationKind::TypeMismatch);
    }
}

#[test]
fn enabled_must_be_a_boolean() {
    let mut doc = valid_document();
    set(&mut doc, "/enabled", json!("yes"));
    assert_only(&doc, "enabled", ViolationKind::TypeMismatch);
}

#[test]
fn tags_elements_must_be_strings() {
    let mut doc = valid_document();
    set(&mut doc, "/tags", json!(["ok", 7, "fine", false]));
    let errors = must_fail(&doc);
    assert_eq!(kinds_at(&errors, "tags[1]"), vec![ViolationKind::TypeMismatch]);
    assert_eq!(kinds_at(&errors, "tags[3]"), vec![ViolationKind::TypeMismatch]);
    assert_eq!(errors.len(), 2);
}

// ─── brief_description bound ─────────────────────────────────────────────────

#[test]
fn brief_description_of_100_characters_passes() {
    let mut doc = valid_document();
    set(&mut doc, "/brief_description", json!("a".repeat(100)));
    must_pass(&doc);
}

#[test]
fn brief_description_of_101_characters_fails() {
    let mut doc = valid_document();
    set(&mut doc, "/brief_description", json!("a".repeat(101)));
    assert_only(&doc, "brief_description", ViolationKind::BoundViolation);
}

#[test]
fn brief_description_counts_characters_not_bytes() {
    let mut doc = valid_document();
    set(&mut doc, "/brief_description", json!("é".repeat(100)));
    must_pass(&doc);
}

// ─── contributor ─────────────────────────────────────────────────────────────

#[test]
fn each_contributor_is_checked_independently() {
    let mut doc = valid_document();
    set(
        &mut doc,
        "/contributor",
        json!([
            "Jane Doe <jane@example.com>",
            "nobody",
            "John Smith <john@example.org>",
            "<anon@example.com>"
        ]),
    );
    let errors = must_fail(&doc);
    assert_eq!(errors.len(), 2, "got: {}", errors);
    assert_eq!(
        kinds_at(&errors, "contributor[1]"),
        vec![ViolationKind::PatternMismatch]
    );
    assert_eq!(
        kinds_at(&errors, "contributor[3]"),
        vec![ViolationKind::PatternMismatch]
    );
}

#[test]
fn contributor_must_be_a_list() {
    let mut doc = valid_document();
    set(&mut doc, "/contributor", json!("Jane Doe <jane@example.com>"));
    assert_only(&doc, "contributor", ViolationKind::TypeMismatch);
}

// ─── logo ────────────────────────────────────────────────────────────────────

#[test]
fn logo_accepts_data_uri_or_url() {
    for logo in [
        "data:image/png;base64,iVBORw0KGgo=",
        "data:image/svg+xml;base64,PHN2Zz48L3N2Zz4",
        "data:image/jpeg;base64,/9j/4AAQ==",
        "https://example.com/logo.png",
        "http://example.com/logo.svg?size=64",
    ] {
        let mut doc = valid_document();
        set(&mut doc, "/logo", json!(logo));
        let integration = must_pass(&doc);
        assert_eq!(integration.logo.as_deref(), Some(logo));
    }
}

#[test]
fn logo_rejects_anything_else() {
    for logo in [
        "ftp://example.com/logo.png",
        "data:image/bmp;base64,AAAA",
        "data:image/png;base64,not base64!",
        "https://example.com/has space.png",
        "logo.png",
        "",
    ] {
        let mut doc = valid_document();
        set(&mut doc, "/logo", json!(logo));
        assert_only(&doc, "logo", ViolationKind::PatternMismatch);
    }
}

#[test]
fn long_invalid_values_are_shortened_in_reports() {
    let mut doc = valid_document();
    let long = "x".repeat(300);
    set(&mut doc, "/product_identifier", json!(long));
    let errors = must_fail(&doc);
    let v = errors.at("product_identifier").next().expect("violation");
    let reported = v.invalid_value.as_ref().and_then(Value::as_str).expect("string value");
    assert_eq!(reported.chars().count(), 131);
    assert!(reported.ends_with("..."));
}

#[test]
fn validation_is_deterministic() {
    let doc = invalid_document();
    let first = validate(&doc).unwrap_err();
    let second = validate(&doc).unwrap_err();
    assert_eq!(first, second);
}
