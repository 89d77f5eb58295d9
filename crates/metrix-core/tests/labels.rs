//! Label canonicalization tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use metrix_core::LabelSet;

#[test]
fn identity_ignores_insertion_order() {
    let a = LabelSet::from_pairs(&[("a", "1"), ("b", "2")]);
    let b = LabelSet::from_pairs(&[("b", "2"), ("a", "1")]);
    assert_eq!(a.identity(), b.identity());
    assert_eq!(a, b);
}

#[test]
fn identity_distinguishes_values() {
    let a = LabelSet::from_pairs(&[("a", "1")]);
    let b = LabelSet::from_pairs(&[("a", "2")]);
    assert_ne!(a.identity(), b.identity());
}

#[test]
fn identity_survives_separator_lookalikes() {
    // Naive `k:v|k:v` joining would map both of these to "a:1|b:2".
    let one = LabelSet::from_pairs(&[("a", "1|b:2")]);
    let two = LabelSet::from_pairs(&[("a", "1"), ("b", "2")]);
    assert_ne!(one.identity(), two.identity());
}

#[test]
fn repeated_name_keeps_last_value() {
    let l = LabelSet::from_pairs(&[("route", "/a"), ("route", "/b")]);
    assert_eq!(l.len(), 1);
    assert_eq!(l.get("route"), Some("/b"));
}

#[test]
fn render_sorts_keys() {
    let l = LabelSet::from_pairs(&[("status", "200"), ("method", "GET"), ("route", "/")]);
    assert_eq!(l.render(), r#"{method="GET",route="/",status="200"}"#);
}

#[test]
fn render_escapes_values() {
    let l = LabelSet::from_pairs(&[("msg", "say \"hi\"\\\n")]);
    assert_eq!(l.render(), r#"{msg="say \"hi\"\\\n"}"#);
}

#[test]
fn render_empty_has_no_braces() {
    assert_eq!(LabelSet::empty().render(), "");
    assert!(LabelSet::from_pairs(&[]).is_empty());
}
