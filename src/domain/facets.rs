// src/domain/facets.rs

use crate::domain::property::Property;
use std::collections::BTreeSet;

pub const SIMILAR_LIMIT: usize = 6;
const SIMILAR_MIN_CANDIDATES: usize = 3;

/// Distinct non-empty cities, sorted.
pub fn city_options(properties: &[Property]) -> Vec<String> {
    distinct(properties.iter().map(|p| p.city.as_str()))
}

/// Distinct non-empty localities. When cities are selected only their localities are offered.
pub fn locality_options(properties: &[Property], cities: &BTreeSet<String>) -> Vec<String> {
    distinct(
        properties
            .iter()
            .filter(|p| cities.is_empty() || cities.contains(&p.city))
            .map(|p| p.locality.as_str()),
    )
}

pub fn find_by_id<'a>(properties: &'a [Property], id: &str) -> Option<&'a Property> {
    properties.iter().find(|p| p.id == id)
}

/// Listings to show next to `property`: same city and type first, widening to the same city
/// and then to anything when too few candidates turn up.
pub fn similar<'a>(properties: &'a [Property], property: &Property, limit: usize) -> Vec<&'a Property> {
    let others: Vec<&Property> = properties.iter().filter(|p| p.id != property.id).collect();

    let mut picked: Vec<&Property> = others
        .iter()
        .copied()
        .filter(|p| p.city == property.city && p.property_type == property.property_type)
        .collect();

    if picked.len() < SIMILAR_MIN_CANDIDATES {
        picked = others
            .iter()
            .copied()
            .filter(|p| p.city == property.city)
            .collect();
    }
    if picked.len() < SIMILAR_MIN_CANDIDATES {
        picked = others.into_iter().take(SIMILAR_MIN_CANDIDATES).collect();
    }

    picked.truncate(limit);
    picked
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: &str, city: &str, locality: &str, kind: &str) -> Property {
        Property {
            id: id.to_string(),
            city: city.to_string(),
            locality: locality.to_string(),
            property_type: kind.to_string(),
            ..Property::default()
        }
    }

    fn pool() -> Vec<Property> {
        vec![
            listing("1", "Chennai", "Adyar", "Apartment"),
            listing("2", "Chennai", "Velachery", "Apartment"),
            listing("3", "Pune", "Baner", "Villa"),
            listing("4", "Chennai", "Adyar", "Villa"),
            listing("5", "", "", "Apartment"),
            listing("6", "Chennai", "Adyar", "Apartment"),
            listing("7", "Chennai", "Tambaram", "Apartment"),
        ]
    }

    #[test]
    fn city_options_are_distinct_and_sorted() {
        assert_eq!(city_options(&pool()), vec!["Chennai", "Pune"]);
        assert!(city_options(&[]).is_empty());
    }

    #[test]
    fn locality_options_follow_selected_cities() {
        let all = locality_options(&pool(), &BTreeSet::new());
        assert_eq!(all, vec!["Adyar", "Baner", "Tambaram", "Velachery"]);

        let pune: BTreeSet<String> = ["Pune".to_string()].into_iter().collect();
        assert_eq!(locality_options(&pool(), &pune), vec!["Baner"]);
    }

    #[test]
    fn finds_by_exact_id() {
        let pool = pool();
        assert_eq!(find_by_id(&pool, "3").map(|p| p.city.as_str()), Some("Pune"));
        assert!(find_by_id(&pool, "99").is_none());
    }

    #[test]
    fn similar_prefers_same_city_and_type() {
        let pool = pool();
        let ids: Vec<&str> = similar(&pool, &pool[0], SIMILAR_LIMIT)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["2", "6", "7"]);
    }

    #[test]
    fn similar_widens_when_candidates_are_scarce() {
        let pool = pool();
        // Only one other Chennai villa, so the whole city is offered.
        let ids: Vec<&str> = similar(&pool, &pool[3], SIMILAR_LIMIT)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "2", "6", "7"]);

        // Nothing else in Pune: fall back to the first three others.
        let ids: Vec<&str> = similar(&pool, &pool[2], SIMILAR_LIMIT)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "2", "4"]);

        assert_eq!(similar(&pool, &pool[0], 2).len(), 2);
    }
}
