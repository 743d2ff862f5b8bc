// src/domain/normalize.rs

//! Reconciles loosely-typed upstream rows into the canonical [`Property`].
//!
//! Feeds disagree on naming (`priceINR` vs `price_inr`, `bedrooms` vs `bhk`) and on value
//! types (numbers arrive as `"₹45,00,000"`, lists arrive as JSON text or comma-separated
//! strings). Every canonical field has a fixed, ordered list of accepted source keys in
//! [`Field::aliases`]; the first alias whose value coerces to something usable wins.
//! Normalization never fails: a field that cannot be coerced falls back to its empty value.

use crate::domain::currency::format_inr;
use crate::domain::property::{Owner, Property, DEFAULT_OWNER_NAME};
use serde_json::{Map, Value};

/// Canonical fields that are resolved through the alias table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Title,
    Project,
    Builder,
    IsVerified,
    ListingStatus,
    Category,
    PropertyType,
    Bhk,
    Bathrooms,
    Furnished,
    CarpetArea,
    Price,
    PriceDisplay,
    PricePerSqft,
    Facing,
    Floor,
    FloorsTotal,
    City,
    Locality,
    State,
    Address,
    Lat,
    Lng,
    Images,
    Amenities,
    Rera,
    DocsLink,
    OwnerName,
    OwnerPhone,
    PostedAt,
    Summary,
}

impl Field {
    pub const ALL: [Field; 32] = [
        Field::Id,
        Field::Title,
        Field::Project,
        Field::Builder,
        Field::IsVerified,
        Field::ListingStatus,
        Field::Category,
        Field::PropertyType,
        Field::Bhk,
        Field::Bathrooms,
        Field::Furnished,
        Field::CarpetArea,
        Field::Price,
        Field::PriceDisplay,
        Field::PricePerSqft,
        Field::Facing,
        Field::Floor,
        Field::FloorsTotal,
        Field::City,
        Field::Locality,
        Field::State,
        Field::Address,
        Field::Lat,
        Field::Lng,
        Field::Images,
        Field::Amenities,
        Field::Rera,
        Field::DocsLink,
        Field::OwnerName,
        Field::OwnerPhone,
        Field::PostedAt,
        Field::Summary,
    ];

    /// Source keys accepted for this field, highest priority first.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Id => &["id"],
            Field::Title => &["title", "property_title", "propertyTitle"],
            Field::Project => &["project"],
            Field::Builder => &["builder"],
            Field::IsVerified => &["is_verified", "isVerified"],
            Field::ListingStatus => &["listing_status", "listingStatus"],
            Field::Category => &["category", "property_category", "propertyCategory"],
            Field::PropertyType => &["property_type", "propertyType", "type"],
            Field::Bhk => &["bedrooms", "bhk"],
            Field::Bathrooms => &["bathrooms"],
            Field::Furnished => &["furnished"],
            Field::CarpetArea => &["carpetAreaSqft", "carpet_area_sqft", "sqft"],
            Field::Price => &["priceINR", "price_inr", "priceInr"],
            Field::PriceDisplay => &["price_display", "priceDisplay"],
            Field::PricePerSqft => &[
                "pricePerSqftINR",
                "price_per_sqft_inr",
                "price_per_sqft",
                "pricePerSqft",
            ],
            Field::Facing => &["facing"],
            Field::Floor => &["floor"],
            Field::FloorsTotal => &["floors_total", "floorsTotal"],
            Field::City => &["city"],
            Field::Locality => &["locality"],
            Field::State => &["state"],
            Field::Address => &["address"],
            Field::Lat => &["lat", "latitude"],
            Field::Lng => &["lng", "longitude"],
            Field::Images => &[
                "images",
                "images_json",
                "imagesJson",
                "images_array",
                "imagesArray",
            ],
            Field::Amenities => &["amenities", "amenities_array", "amenitiesArray"],
            Field::Rera => &["rera"],
            Field::DocsLink => &["docs_link", "docsLink"],
            Field::OwnerName => &["owner_name", "ownerName", "owner"],
            Field::OwnerPhone => &["owner_phone", "ownerPhone"],
            Field::PostedAt => &["listed_at", "listedAt", "postedAt", "posted_at"],
            Field::Summary => &["description", "summary"],
        }
    }
}

/// A raw row viewed through the alias table.
struct RawRecord<'a> {
    row: &'a Map<String, Value>,
}

impl<'a> RawRecord<'a> {
    /// Non-null values present under the field's aliases, in priority order.
    fn values(&self, field: Field) -> impl Iterator<Item = &'a Value> {
        let row = self.row;
        field
            .aliases()
            .iter()
            .filter_map(move |key| row.get(*key))
            .filter(|v| !v.is_null())
    }

    fn text(&self, field: Field) -> Option<String> {
        self.values(field).find_map(coerce_text)
    }

    fn text_or_empty(&self, field: Field) -> String {
        self.text(field).unwrap_or_default()
    }

    fn number(&self, field: Field) -> Option<f64> {
        self.values(field).find_map(coerce_number)
    }

    fn integer(&self, field: Field) -> Option<i64> {
        self.values(field).find_map(coerce_integer)
    }

    fn list(&self, field: Field) -> Vec<String> {
        self.values(field)
            .map(coerce_list)
            .find(|items| !items.is_empty())
            .unwrap_or_default()
    }

    /// Only a literal JSON `true` counts; `"true"` or `1` do not.
    fn flag(&self, field: Field) -> bool {
        matches!(self.values(field).next(), Some(Value::Bool(true)))
    }

    /// Reads `owner.<key>` when the `owner` key holds a nested object.
    fn nested_owner(&self, key: &str) -> Option<String> {
        self.row
            .get("owner")
            .and_then(Value::as_object)
            .and_then(|owner| owner.get(key))
            .and_then(coerce_text)
    }
}

/// Converts one raw upstream record into the canonical [`Property`].
///
/// Non-object input yields a property with every field at its default.
pub fn normalize(raw: &Value) -> Property {
    let empty = Map::new();
    let record = RawRecord {
        row: raw.as_object().unwrap_or(&empty),
    };

    let price_inr = record.number(Field::Price);
    let carpet_area_sqft = record.number(Field::CarpetArea);
    let price_per_sqft_inr = record
        .number(Field::PricePerSqft)
        .or_else(|| derive_price_per_sqft(price_inr, carpet_area_sqft));

    let price_display = record.text(Field::PriceDisplay).unwrap_or_else(|| {
        price_inr
            .filter(|p| *p != 0.0)
            .map(format_inr)
            .unwrap_or_default()
    });

    let owner = Owner {
        name: record
            .text(Field::OwnerName)
            .or_else(|| record.nested_owner("name"))
            .unwrap_or_else(|| DEFAULT_OWNER_NAME.to_string()),
        phone: record
            .text(Field::OwnerPhone)
            .or_else(|| record.nested_owner("phone"))
            .unwrap_or_default(),
        // Contact goes through the enquiry flow; the number is never exposed.
        whatsapp: String::new(),
    };

    Property {
        id: record.text_or_empty(Field::Id),
        title: record.text_or_empty(Field::Title),
        project: record.text_or_empty(Field::Project),
        builder: record.text_or_empty(Field::Builder),
        is_verified: record.flag(Field::IsVerified),
        listing_status: record.text_or_empty(Field::ListingStatus),
        category: record.text_or_empty(Field::Category),
        property_type: record.text_or_empty(Field::PropertyType),
        bhk: record.integer(Field::Bhk),
        bathrooms: record.number(Field::Bathrooms),
        furnished: record.text_or_empty(Field::Furnished),
        carpet_area_sqft,
        price_inr,
        price_display,
        price_per_sqft_inr,
        facing: record.text_or_empty(Field::Facing),
        floor: record.integer(Field::Floor),
        floors_total: record.integer(Field::FloorsTotal),
        city: record.text_or_empty(Field::City),
        locality: record.text_or_empty(Field::Locality),
        state: record.text_or_empty(Field::State),
        address: record.text_or_empty(Field::Address),
        lat: record.number(Field::Lat),
        lng: record.number(Field::Lng),
        images: record.list(Field::Images),
        amenities: record.list(Field::Amenities),
        rera: record.text_or_empty(Field::Rera),
        docs_link: record.text_or_empty(Field::DocsLink),
        owner,
        posted_at: record.text(Field::PostedAt),
        summary: record.text_or_empty(Field::Summary),
    }
}

/// Normalizes a batch of rows from a single source.
pub fn normalize_all(rows: &[Value]) -> Vec<Property> {
    rows.iter().map(normalize).collect()
}

fn derive_price_per_sqft(price: Option<f64>, area: Option<f64>) -> Option<f64> {
    match (price, area) {
        (Some(price), Some(area)) if price != 0.0 && area != 0.0 => {
            Some((price / area.max(1.0)).round())
        }
        _ => None,
    }
}

fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Keeps only digits, dots and minus signs, then parses. Anything that does not
/// produce a finite number is treated as absent.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            if cleaned.is_empty() {
                return None;
            }
            cleaned.parse::<f64>().ok().filter(|f| f.is_finite())
        }
        _ => None,
    }
}

/// Whole-number fields (bedrooms, floors). Fractional values are rejected.
fn coerce_integer(value: &Value) -> Option<i64> {
    coerce_number(value)
        .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
        .map(|f| f as i64)
}

/// List coercion: arrays pass through, JSON-encoded arrays are decoded, anything
/// else is split on commas. Empty and falsy entries are dropped.
pub fn coerce_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(list_item).collect(),
        Value::String(s) if s.is_empty() => Vec::new(),
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Array(items)) => items.iter().filter_map(list_item).collect(),
            _ => s
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect(),
        },
        Value::Number(n) if n.as_f64() != Some(0.0) => vec![n.to_string()],
        _ => Vec::new(),
    }
}

fn list_item(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}
