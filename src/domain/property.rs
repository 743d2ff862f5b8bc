// src/domain/property.rs

use serde::{Deserialize, Serialize};

/// Canonical listing record. Every upstream feed is reconciled into this shape by
/// [`crate::domain::normalize::normalize`]; nothing downstream ever sees a raw row.
///
/// Serialized keys use the flat-caps convention (`priceINR`, `carpetAreaSqft`), which the
/// normalizer also accepts, so a serialized property normalizes back to itself.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Property {
    pub id: String,
    pub title: String,
    pub project: String,
    pub builder: String,
    pub is_verified: bool,
    pub listing_status: String,
    pub category: String,
    #[serde(rename = "type")]
    pub property_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bhk: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<f64>,
    pub furnished: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carpet_area_sqft: Option<f64>,
    #[serde(rename = "priceINR", skip_serializing_if = "Option::is_none")]
    pub price_inr: Option<f64>,
    pub price_display: String,
    #[serde(rename = "pricePerSqftINR", skip_serializing_if = "Option::is_none")]
    pub price_per_sqft_inr: Option<f64>,
    pub facing: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floors_total: Option<i64>,
    pub city: String,
    pub locality: String,
    pub state: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    pub images: Vec<String>,
    pub amenities: Vec<String>,
    pub rera: String,
    pub docs_link: String,
    pub owner: Owner,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<String>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub name: String,
    pub phone: String,
    pub whatsapp: String,
}

pub const DEFAULT_OWNER_NAME: &str = "Owner";

impl Default for Owner {
    fn default() -> Self {
        Owner {
            name: DEFAULT_OWNER_NAME.to_string(),
            phone: String::new(),
            whatsapp: String::new(),
        }
    }
}

impl Property {
    /// Ribbon text for a listing card.
    ///
    /// A verified flag always wins and reads "Verified"; otherwise the raw listing status is
    /// shown unless it is empty or the upstream "changed" marker.
    pub fn badge(&self) -> Option<String> {
        if self.is_verified {
            return Some("Verified".to_string());
        }
        let status = self.listing_status.trim();
        if status.is_empty() || status.eq_ignore_ascii_case("changed") {
            None
        } else {
            Some(status.to_string())
        }
    }

    /// True when any amenity contains `term`, ignoring case.
    pub fn has_amenity(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.amenities
            .iter()
            .any(|a| a.to_lowercase().contains(&needle))
    }

    /// A short generated description built from the structured fields.
    pub fn smart_summary(&self) -> String {
        let mut bits = Vec::new();

        if !self.city.is_empty() {
            let locality = if self.locality.is_empty() {
                String::new()
            } else {
                format!("{}, ", self.locality)
            };
            bits.push(format!("Located in {locality}{}.", self.city));
        }
        if let Some(bhk) = self.bhk.filter(|b| *b != 0) {
            let kind = if self.property_type.is_empty() {
                "home"
            } else {
                self.property_type.as_str()
            };
            let area = self
                .carpet_area_sqft
                .filter(|a| *a != 0.0)
                .map(|a| a.to_string())
                .unwrap_or_else(|| "-".to_string());
            bits.push(format!("{bhk} BHK {kind} with {area} sqft."));
        }
        if !self.furnished.is_empty() {
            bits.push(format!("{}.", self.furnished));
        }
        if !self.facing.is_empty() {
            bits.push(format!("Vaastu: {}-facing.", self.facing));
        }
        if !self.amenities.is_empty() {
            let top: Vec<&str> = self.amenities.iter().take(5).map(String::as_str).collect();
            bits.push(format!("Key amenities: {}.", top.join(", ")));
        }

        bits.join(" ")
    }
}
