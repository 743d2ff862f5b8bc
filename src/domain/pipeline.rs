// src/domain/pipeline.rs

//! Filter, rank and paginate the working set for one view of the search page.
//!
//! The whole pipeline is a pure function of `(properties, state, now)`; re-running it with
//! unchanged inputs yields the same page in the same order.

use crate::domain::filters::{FilterState, SortKey};
use crate::domain::property::Property;
use crate::domain::score::{match_percent, parse_posted_at, score};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const PAGE_SIZE: usize = 9;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredProperty<'a> {
    pub property: &'a Property,
    pub score: f64,
    pub match_percent: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<'a> {
    pub items: Vec<ScoredProperty<'a>>,
    pub total: usize,
    pub page_count: usize,
    pub page: usize,
    pub page_size: usize,
}

/// Outcome of one pipeline run. An empty filter result is reported explicitly rather
/// than as an empty page.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PipelineOutcome<'a> {
    Page(PageResult<'a>),
    NoResults,
}

impl<'a> PipelineOutcome<'a> {
    pub fn total(&self) -> usize {
        match self {
            PipelineOutcome::Page(page) => page.total,
            PipelineOutcome::NoResults => 0,
        }
    }

    pub fn page_count(&self) -> usize {
        match self {
            PipelineOutcome::Page(page) => page.page_count,
            PipelineOutcome::NoResults => 1,
        }
    }

    /// The page actually shown after clamping.
    pub fn page(&self) -> usize {
        match self {
            PipelineOutcome::Page(page) => page.page,
            PipelineOutcome::NoResults => 1,
        }
    }

    pub fn items(&self) -> &[ScoredProperty<'a>] {
        match self {
            PipelineOutcome::Page(page) => &page.items,
            PipelineOutcome::NoResults => &[],
        }
    }
}

pub fn run<'a>(
    properties: &'a [Property],
    state: &FilterState,
    now: DateTime<Utc>,
) -> PipelineOutcome<'a> {
    let predicates = state.predicates();
    let query = state.query.trim();
    let amenity = state.amenity.trim();

    let mut ranked: Vec<ScoredProperty<'a>> = properties
        .iter()
        .filter(|p| predicates.iter().all(|pred| pred.matches(p)))
        .map(|p| {
            let s = score(p, query, amenity, now);
            ScoredProperty {
                property: p,
                score: s,
                match_percent: match_percent(s),
            }
        })
        .collect();

    sort_ranked(&mut ranked, state.sort);

    let total = ranked.len();
    if total == 0 {
        return PipelineOutcome::NoResults;
    }

    let page_count = page_count(total, PAGE_SIZE);
    let page = state.page.clamp(1, page_count);
    let items: Vec<ScoredProperty<'a>> = ranked
        .into_iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .collect();

    PipelineOutcome::Page(PageResult {
        items,
        total,
        page_count,
        page,
        page_size: PAGE_SIZE,
    })
}

/// `ceil(total / page_size)`, never less than one.
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Stable sort, so equal keys keep working-set order.
fn sort_ranked(ranked: &mut [ScoredProperty<'_>], key: SortKey) {
    match key {
        SortKey::Relevance => ranked.sort_by(|a, b| b.score.total_cmp(&a.score)),
        SortKey::Newest => ranked.sort_by(|a, b| posted(b.property).cmp(&posted(a.property))),
        SortKey::PriceLow => ranked.sort_by(|a, b| price(a.property).total_cmp(&price(b.property))),
        SortKey::PriceHigh => {
            ranked.sort_by(|a, b| price(b.property).total_cmp(&price(a.property)))
        }
        SortKey::AreaHigh => ranked.sort_by(|a, b| area(b.property).total_cmp(&area(a.property))),
    }
}

/// `None` sorts before every timestamp, so undated listings land last when descending.
fn posted(p: &Property) -> Option<DateTime<Utc>> {
    p.posted_at.as_deref().and_then(parse_posted_at)
}

fn price(p: &Property) -> f64 {
    p.price_inr.unwrap_or(0.0)
}

fn area(p: &Property) -> f64 {
    p.carpet_area_sqft.unwrap_or(0.0)
}
