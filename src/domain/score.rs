// src/domain/score.rs

use crate::domain::property::Property;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

pub const TOKEN_MATCH_POINTS: f64 = 8.0;
pub const RECENCY_MAX_POINTS: f64 = 10.0;
pub const PRICE_MAX_POINTS: f64 = 6.0;
pub const AMENITY_MATCH_POINTS: f64 = 6.0;

/// Logistic curve for price attractiveness: centred at ₹6000/sqft, scale 800.
const PRICE_PIVOT: f64 = 6000.0;
const PRICE_SCALE: f64 = 800.0;

/// Divisor used to present a score as a "match %". Tuned by eye, not derived from the
/// maximum achievable score, so percentages above 100 are possible for long queries.
pub const MATCH_SCORE_SCALE: f64 = 30.0;

/// Additive relevance score. Only meaningful relative to other scores computed with the
/// same query, amenity and `now`.
pub fn score(property: &Property, query: &str, amenity: &str, now: DateTime<Utc>) -> f64 {
    text_overlap(property, query)
        + recency(property, now)
        + price_attractiveness(property)
        + amenity_match(property, amenity)
}

pub fn match_percent(score: f64) -> i64 {
    (score / MATCH_SCORE_SCALE * 100.0).round() as i64
}

fn text_overlap(property: &Property, query: &str) -> f64 {
    let haystack = format!(
        "{} {} {} {}",
        property.title, property.project, property.city, property.locality
    )
    .to_lowercase();

    let matched = query
        .to_lowercase()
        .split_whitespace()
        .filter(|token| haystack.contains(token))
        .count();

    matched as f64 * TOKEN_MATCH_POINTS
}

/// Full points on the day of posting, losing one point every three days.
/// Future-dated listings are treated as posted today.
fn recency(property: &Property, now: DateTime<Utc>) -> f64 {
    let Some(posted) = property.posted_at.as_deref().and_then(parse_posted_at) else {
        return 0.0;
    };
    let days = ((now - posted).num_seconds() as f64 / 86_400.0).max(0.0);
    (RECENCY_MAX_POINTS - (days / 3.0).min(RECENCY_MAX_POINTS)).max(0.0)
}

fn price_attractiveness(property: &Property) -> f64 {
    match property.price_per_sqft_inr {
        Some(pps) if pps > 0.0 => PRICE_MAX_POINTS * sigmoid(-(pps - PRICE_PIVOT) / PRICE_SCALE),
        _ => 0.0,
    }
}

fn amenity_match(property: &Property, amenity: &str) -> f64 {
    if !amenity.is_empty() && property.has_amenity(amenity) {
        AMENITY_MATCH_POINTS
    } else {
        0.0
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Parses the timestamp formats seen across feeds. Naive values are taken as UTC.
pub fn parse_posted_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
