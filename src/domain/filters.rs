// src/domain/filters.rs

use crate::domain::property::Property;
use serde::Serialize;
use std::collections::BTreeSet;

/// Locality value meaning "any locality"; a selection containing it imposes no constraint.
pub const ANY_LOCALITY: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Relevance,
    Newest,
    PriceLow,
    PriceHigh,
    AreaHigh,
}

impl SortKey {
    /// Unknown keys fall back to relevance ordering.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "newest" => SortKey::Newest,
            "priceLow" => SortKey::PriceLow,
            "priceHigh" => SortKey::PriceHigh,
            "areaHigh" => SortKey::AreaHigh,
            _ => SortKey::Relevance,
        }
    }
}

/// Everything a search view lets the user constrain. Empty strings, empty sets and `None`
/// mean "no constraint".
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub query: String,
    pub mode: String,
    pub cities: BTreeSet<String>,
    pub localities: BTreeSet<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub property_type: String,
    pub bhk: String,
    pub furnished: String,
    pub facing: String,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub amenity: String,
    pub sort: SortKey,
    pub page: usize,
}

impl FilterState {
    /// Builds a state from deep-link query pairs (`?q=..&city=..&minPrice=..`).
    ///
    /// `city` and `locality` may repeat or carry comma-separated values. Unknown keys are
    /// ignored and numbers that do not parse are treated as unset.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut state = FilterState {
            page: 1,
            ..FilterState::default()
        };

        for (key, value) in pairs {
            let value = value.as_ref().trim();
            match key.as_ref() {
                "q" => state.query = value.to_string(),
                "mode" => state.mode = value.to_lowercase(),
                "city" => extend_set(&mut state.cities, value),
                "locality" => extend_set(&mut state.localities, value),
                "minPrice" => state.min_price = parse_bound(value),
                "maxPrice" => state.max_price = parse_bound(value),
                "ptype" | "type" => state.property_type = value.to_string(),
                "bhk" => state.bhk = value.to_string(),
                "furnished" => state.furnished = value.to_string(),
                "facing" => state.facing = value.to_string(),
                "minArea" => state.min_area = parse_bound(value),
                "maxArea" => state.max_area = parse_bound(value),
                "amenity" => state.amenity = value.to_string(),
                "sort" => state.sort = SortKey::parse(value),
                "page" => state.page = value.parse().unwrap_or(1),
                _ => {}
            }
        }

        state
    }

    /// Clears every constraint and returns to the first page, keeping the sort order.
    pub fn reset(&mut self) {
        *self = FilterState {
            sort: self.sort,
            page: 1,
            ..FilterState::default()
        };
    }

    /// The predicates for every active filter. Each is independent of the others, so the
    /// order they are applied in does not change which properties survive.
    pub fn predicates(&self) -> Vec<Predicate<'_>> {
        let mut out = Vec::new();

        if !self.mode.is_empty() {
            out.push(Predicate::Mode(self.mode.to_lowercase()));
        }
        let tokens: Vec<String> = self
            .query
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        if !tokens.is_empty() {
            out.push(Predicate::Query(tokens));
        }
        if !self.cities.is_empty() {
            out.push(Predicate::City(&self.cities));
        }
        if !self.localities.is_empty() && !self.localities.contains(ANY_LOCALITY) {
            out.push(Predicate::Locality(&self.localities));
        }
        if let Some(range) = Range::active(NumericField::Price, self.min_price, self.max_price) {
            out.push(Predicate::Range(range));
        }
        if let Some(range) = Range::active(NumericField::Area, self.min_area, self.max_area) {
            out.push(Predicate::Range(range));
        }
        if !self.property_type.is_empty() {
            out.push(Predicate::Exact(TextField::Type, &self.property_type));
        }
        if !self.bhk.is_empty() {
            out.push(Predicate::Bhk(&self.bhk));
        }
        if !self.furnished.is_empty() {
            out.push(Predicate::Exact(TextField::Furnished, &self.furnished));
        }
        if !self.facing.is_empty() {
            out.push(Predicate::Exact(TextField::Facing, &self.facing));
        }
        if !self.amenity.trim().is_empty() {
            out.push(Predicate::Amenity(self.amenity.trim()));
        }

        out
    }

    pub fn matches(&self, property: &Property) -> bool {
        self.predicates().iter().all(|p| p.matches(property))
    }

    /// Human-readable list of the active filters, as `(label, value)` pairs.
    pub fn active_filters(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        let mut push = |label: &'static str, value: String| {
            if !value.trim().is_empty() {
                out.push((label, value));
            }
        };

        push("q", self.query.clone());
        push("mode", self.mode.clone());
        push("city", join_set(&self.cities));
        push("locality", join_set(&self.localities));
        push("price", format_span(self.min_price, self.max_price));
        push("type", self.property_type.clone());
        push("bhk", self.bhk.clone());
        push("furnished", self.furnished.clone());
        push("facing", self.facing.clone());
        push("area", format_span(self.min_area, self.max_area));
        push("amenity", self.amenity.clone());

        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Price,
    Area,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Type,
    Furnished,
    Facing,
}

/// Inclusive numeric bounds. A bound of zero counts as unset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub field: NumericField,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Range {
    fn active(field: NumericField, min: Option<f64>, max: Option<f64>) -> Option<Self> {
        let min = min.filter(|v| *v != 0.0);
        let max = max.filter(|v| *v != 0.0);
        if min.is_none() && max.is_none() {
            return None;
        }
        Some(Range { field, min, max })
    }

    /// A missing value counts as zero on both sides: it fails any positive minimum and
    /// passes any non-negative maximum.
    fn contains(&self, property: &Property) -> bool {
        let value = match self.field {
            NumericField::Price => property.price_inr,
            NumericField::Area => property.carpet_area_sqft,
        }
        .unwrap_or(0.0);

        if let Some(min) = self.min {
            if value < min {
                return false;
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate<'a> {
    /// Case-insensitive equality with the category; holds the lower-cased mode.
    Mode(String),
    /// Every lower-cased token must appear in the search haystack.
    Query(Vec<String>),
    City(&'a BTreeSet<String>),
    Locality(&'a BTreeSet<String>),
    Range(Range),
    Exact(TextField, &'a str),
    Bhk(&'a str),
    Amenity(&'a str),
}

impl Predicate<'_> {
    pub fn matches(&self, property: &Property) -> bool {
        match self {
            Predicate::Mode(mode) => property.category.to_lowercase() == *mode,
            Predicate::Query(tokens) => {
                let haystack = search_haystack(property);
                tokens.iter().all(|t| haystack.contains(t.as_str()))
            }
            Predicate::City(cities) => cities.contains(&property.city),
            Predicate::Locality(localities) => localities.contains(&property.locality),
            Predicate::Range(range) => range.contains(property),
            Predicate::Exact(field, wanted) => {
                let actual = match field {
                    TextField::Type => &property.property_type,
                    TextField::Furnished => &property.furnished,
                    TextField::Facing => &property.facing,
                };
                actual == wanted
            }
            Predicate::Bhk(wanted) => property
                .bhk
                .map(|b| b.to_string() == *wanted)
                .unwrap_or(false),
            Predicate::Amenity(term) => property.has_amenity(term),
        }
    }
}

fn search_haystack(property: &Property) -> String {
    [
        property.title.as_str(),
        &property.project,
        &property.city,
        &property.locality,
        &property.address,
        &property.summary,
    ]
    .join(" ")
    .to_lowercase()
}

fn extend_set(set: &mut BTreeSet<String>, raw: &str) {
    set.extend(
        raw.split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string),
    );
}

fn parse_bound(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn join_set(set: &BTreeSet<String>) -> String {
    set.iter().cloned().collect::<Vec<_>>().join(", ")
}

fn format_span(min: Option<f64>, max: Option<f64>) -> String {
    let fmt = |v: Option<f64>| {
        v.filter(|v| *v != 0.0)
            .map(|v| v.to_string())
            .unwrap_or_default()
    };
    if min.filter(|v| *v != 0.0).is_none() && max.filter(|v| *v != 0.0).is_none() {
        return String::new();
    }
    format!("{}-{}", fmt(min), fmt(max))
}
