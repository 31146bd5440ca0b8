/// Catalog integration tests: loading and linting RON fixtures.

use mystery_case::core::catalog::{CatalogError, CatalogIssue, ClueCatalog, TraitCatalog};
use mystery_case::schema::location::Location;
use mystery_case::schema::traits::*;
use std::path::Path;

#[test]
fn load_clue_fixture() {
    let catalog = ClueCatalog::load_from_ron(Path::new("tests/fixtures/clues.ron")).unwrap();
    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.templates[0].category, TraitCategory::Height);
    assert_eq!(catalog.templates[0].location, Location::Neighbor);
    assert!(catalog.templates[0].conditions.is_none());
    assert_eq!(
        catalog.templates[2].conditions.as_deref(),
        Some(
            &[
                TraitValue::LinkToVictim(LinkToVictim::Ex),
                TraitValue::LinkToVictim(LinkToVictim::Sibling)
            ][..]
        )
    );
}

#[test]
fn fixture_merges_over_standard() {
    let mut catalog = ClueCatalog::standard();
    let base = catalog.len();
    catalog.extend(ClueCatalog::load_from_ron(Path::new("tests/fixtures/clues.ron")).unwrap());
    assert_eq!(catalog.len(), base + 4);
    assert!(catalog.lint().is_empty());

    let facts = [
        TraitValue::Hand(Hand::Left),
        TraitValue::BloodType(BloodType::O),
    ];
    let hospital: Vec<_> = catalog
        .matching(&facts[1], &facts)
        .filter(|t| t.location == Location::Hospital)
        .collect();
    assert_eq!(hospital.len(), 1);
}

#[test]
fn load_trait_fixture() {
    let catalog = TraitCatalog::load_from_ron(Path::new("tests/fixtures/traits.ron")).unwrap();
    assert_eq!(catalog.weights(TraitCategory::Height), &[0.05, 0.05, 0.9]);
    assert_eq!(catalog.weights(TraitCategory::Hand), &[0.1, 0.9]);
    assert_eq!(
        catalog.weights(TraitCategory::BloodType),
        TraitCatalog::standard().weights(TraitCategory::BloodType)
    );
}

#[test]
fn missing_file_is_io_error() {
    assert!(matches!(
        ClueCatalog::load_from_ron(Path::new("tests/fixtures/nope.ron")),
        Err(CatalogError::Io(_))
    ));
    assert!(matches!(
        TraitCatalog::load_from_ron(Path::new("tests/fixtures/nope.ron")),
        Err(CatalogError::Io(_))
    ));
}

#[test]
fn unknown_location_is_parse_error() {
    assert!(matches!(
        ClueCatalog::load_from_ron(Path::new("tests/fixtures/broken_clues.ron")),
        Err(CatalogError::Ron(_))
    ));
}

#[test]
fn lint_reports_fixture_gaps() {
    let catalog = ClueCatalog::load_from_ron(Path::new("tests/fixtures/gaps.ron")).unwrap();
    let issues = catalog.lint();

    assert!(issues.contains(&CatalogIssue::MissingCategory(TraitCategory::BloodType)));
    assert!(issues.contains(&CatalogIssue::MissingCategory(TraitCategory::LinkToVictim)));
    assert!(!issues.contains(&CatalogIssue::MissingCategory(TraitCategory::Gender)));
    assert!(issues.contains(&CatalogIssue::UncoveredValue(TraitValue::Hand(Hand::Right))));
    assert!(!issues.contains(&CatalogIssue::UncoveredValue(TraitValue::Hand(Hand::Left))));
    assert!(issues.contains(&CatalogIssue::EmptyConditions(2)));
    // The empty-conditioned height template covers nothing.
    assert!(issues.contains(&CatalogIssue::UncoveredValue(TraitValue::Height(Height::Tall))));
}
