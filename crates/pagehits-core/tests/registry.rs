//! Registry behavior: creation, counting, failure paths.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use pagehits_core::{PageHitsError, PageRegistry};

#[test]
fn create_starts_at_zero_hits() {
    let reg = PageRegistry::new();
    let page = reg.create(Some("Homepage")).unwrap();
    assert_eq!(page.id, 1);
    assert_eq!(page.name, "Homepage");
    assert_eq!(page.hits, 0);
}

#[test]
fn created_at_is_stable_across_reads_and_hits() {
    let reg = PageRegistry::new();
    let page = reg.create(Some("stable")).unwrap();
    reg.hit(page.id).unwrap();
    reg.hit(page.id).unwrap();
    assert_eq!(reg.get(page.id).unwrap().created_at, page.created_at);
    assert_eq!(reg.list()[0].created_at, page.created_at);
}

#[test]
fn sequential_hits_accumulate() {
    let reg = PageRegistry::new();
    let page = reg.create(Some("counted")).unwrap();
    for _ in 0..25 {
        reg.hit(page.id).unwrap();
    }
    assert_eq!(reg.hits(page.id).unwrap(), 25);
}

#[test]
fn empty_or_missing_name_is_rejected_without_side_effects() {
    let reg = PageRegistry::new();
    for name in [None, Some("")] {
        let err = reg.create(name).expect_err("must fail");
        assert!(matches!(err, PageHitsError::Validation(_)));
        assert_eq!(err.client_code().as_str(), "VALIDATION_ERROR");
    }
    assert!(reg.is_empty());

    // ids are not burned by failed creates
    assert_eq!(reg.create(Some("first")).unwrap().id, 1);
}

#[test]
fn whitespace_name_is_non_empty_text() {
    let reg = PageRegistry::new();
    let page = reg.create(Some("   ")).unwrap();
    assert_eq!(page.name, "   ");
    assert_eq!(reg.len(), 1);
}

#[test]
fn duplicate_names_get_distinct_ids() {
    let reg = PageRegistry::new();
    let a = reg.create(Some("same")).unwrap();
    let b = reg.create(Some("same")).unwrap();
    assert_ne!(a.id, b.id);
}

#[test]
fn unknown_id_fails_and_leaves_state_unchanged() {
    let reg = PageRegistry::new();
    let page = reg.create(Some("kept")).unwrap();
    reg.hit(page.id).unwrap();
    let before = reg.list();

    assert_eq!(reg.hits(999), Err(PageHitsError::NotFound(999)));
    let err = reg.hit(999).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "NOT_FOUND");

    assert_eq!(reg.list(), before);
}

#[test]
fn homepage_scenario() {
    let reg = PageRegistry::new();
    let home = reg.create(Some("Homepage")).unwrap();
    assert_eq!((home.id, home.hits), (1, 0));

    assert_eq!(reg.hit(1).unwrap().hits, 1);
    assert_eq!(reg.hit(1).unwrap().hits, 2);
    assert_eq!(reg.hits(1).unwrap(), 2);

    assert!(reg.hit(999).is_err());
    let pages = reg.list();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].hits, 2);
}

#[test]
fn list_preserves_creation_order() {
    let reg = PageRegistry::new();
    assert!(reg.list().is_empty());

    reg.create(Some("first")).unwrap();
    reg.create(Some("second")).unwrap();

    let names: Vec<_> = reg.list().into_iter().map(|p| (p.name, p.hits)).collect();
    assert_eq!(names, vec![("first".to_string(), 0), ("second".to_string(), 0)]);
}

#[test]
fn page_serializes_with_iso_timestamp() {
    let reg = PageRegistry::new();
    let page = reg.create(Some("json")).unwrap();
    let v = serde_json::to_value(&page).unwrap();

    assert_eq!(v["id"], 1);
    assert_eq!(v["name"], "json");
    assert_eq!(v["hits"], 0);
    let ts = v["created_at"].as_str().unwrap();
    let parsed = chrono::DateTime::parse_from_rfc3339(ts).unwrap();
    assert_eq!(parsed, page.created_at);
}
