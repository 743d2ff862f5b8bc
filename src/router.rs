use crate::app::AppState;
use crate::browse::BrowseSession;
use crate::domain::facets::{city_options, find_by_id, locality_options, similar, SIMILAR_LIMIT};
use crate::domain::filters::FilterState;
use crate::domain::pipeline::PipelineOutcome;
use crate::domain::property::Property;
use crate::domain::slider::RangeFill;
use crate::errors::ServerError;
use crate::responses::{json_response, ResultResp};
use astra::Request;
use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeSet;

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();
    let query = req.uri().query().unwrap_or("");

    tracing::debug!(method, path, "request");

    match (method, path) {
        ("GET", "/api/listings") => list_listings(state, query),
        ("GET", "/api/facets") => facets(state, query),
        ("POST", "/api/reload") => reload(state, query),
        ("GET", p) if p.starts_with("/api/listings/") => {
            let id = urlencoding::decode(&p["/api/listings/".len()..])
                .map_err(|_| ServerError::BadRequest("listing id is not valid UTF-8".into()))?;
            listing_detail(state, &id)
        }
        _ => Err(ServerError::NotFound),
    }
}

fn query_pairs(query: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListingsResponse<'a> {
    #[serde(flatten)]
    outcome: PipelineOutcome<'a>,
    active_filters: Vec<ActiveFilter>,
    price_range: PriceRangeView,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PriceRangeView {
    min: f64,
    max: f64,
    fill: RangeFill,
    min_label: String,
    max_label: String,
}

#[derive(Serialize)]
struct ActiveFilter {
    label: &'static str,
    value: String,
}

fn list_listings(state: &AppState, query: &str) -> ResultResp {
    let filters = FilterState::from_query_pairs(query_pairs(query));
    let session = BrowseSession::with_state(filters, state.config.price_range, state.config.debounce);
    let properties = state.working_set.snapshot();

    let outcome = session.render(&properties, Utc::now());
    let active_filters = session
        .state()
        .active_filters()
        .into_iter()
        .map(|(label, value)| ActiveFilter { label, value })
        .collect();

    let slider = session.slider();
    let (min_label, max_label) = slider.labels();
    let price_range = PriceRangeView {
        min: slider.min_value(),
        max: slider.max_value(),
        fill: slider.fill(),
        min_label,
        max_label,
    };

    json_response(
        200,
        &ListingsResponse {
            outcome,
            active_filters,
            price_range,
        },
    )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListingDetail<'a> {
    property: &'a Property,
    badge: Option<String>,
    smart_summary: String,
    similar: Vec<&'a Property>,
}

fn listing_detail(state: &AppState, id: &str) -> ResultResp {
    if id.is_empty() {
        return Err(ServerError::NotFound);
    }

    let properties = state.working_set.snapshot();
    let property = find_by_id(&properties, id).ok_or(ServerError::NotFound)?;

    json_response(
        200,
        &ListingDetail {
            property,
            badge: property.badge(),
            smart_summary: property.smart_summary(),
            similar: similar(&properties, property, SIMILAR_LIMIT),
        },
    )
}

#[derive(Serialize)]
struct Facets {
    cities: Vec<String>,
    localities: Vec<String>,
}

fn facets(state: &AppState, query: &str) -> ResultResp {
    let selected: BTreeSet<String> = FilterState::from_query_pairs(query_pairs(query)).cities;
    let properties = state.working_set.snapshot();

    json_response(
        200,
        &Facets {
            cities: city_options(&properties),
            localities: locality_options(&properties, &selected),
        },
    )
}

fn reload(state: &AppState, query: &str) -> ResultResp {
    let pairs = query_pairs(query);
    let match_id = pairs
        .iter()
        .find(|(k, _)| k == "matchId")
        .map(|(_, v)| v.trim())
        .filter(|v| !v.is_empty());

    if let Some(id) = match_id {
        if id.len() > 128 || id.chars().any(char::is_control) {
            return Err(ServerError::BadRequest("invalid matchId".into()));
        }
    }

    let summary = state.reload(match_id);
    tracing::info!(source = ?summary.source, count = summary.count, "working set reloaded");
    json_response(200, &summary)
}
