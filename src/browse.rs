// src/browse.rs

//! One user's browsing session: the filter state, the price slider and the debounce timer
//! that decides when the result list is recomputed.

use crate::debounce::Debouncer;
use crate::domain::filters::{FilterState, SortKey, ANY_LOCALITY};
use crate::domain::pipeline::{self, PipelineOutcome};
use crate::domain::property::Property;
use crate::domain::slider::{RangeConfig, RangeSliderController, Thumb};
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
pub enum BrowseEvent {
    QueryTyped(String),
    ModeSelected(String),
    /// An empty city means all cities. Changing the city always clears the locality.
    CitySelected(String),
    LocalitySelected(String),
    SliderMoved(Thumb, f64),
    PropertyTypeSelected(String),
    BhkSelected(String),
    FurnishedSelected(String),
    FacingSelected(String),
    AreaChanged { min: Option<f64>, max: Option<f64> },
    AmenityTyped(String),
    SortSelected(SortKey),
    GotoPage(usize),
    Reset,
}

impl BrowseEvent {
    /// Typing and dragging arrive in bursts and wait for the debounce window.
    fn is_continuous(&self) -> bool {
        matches!(
            self,
            BrowseEvent::QueryTyped(_) | BrowseEvent::SliderMoved(..) | BrowseEvent::AmenityTyped(_)
        )
    }
}

#[derive(Debug, Clone)]
pub struct BrowseSession {
    state: FilterState,
    slider: RangeSliderController,
    debounce: Debouncer,
}

impl BrowseSession {
    pub fn new(range: RangeConfig, debounce: Duration) -> Self {
        let state = FilterState {
            page: 1,
            ..FilterState::default()
        };
        Self::with_state(state, range, debounce)
    }

    /// Starts from a deep-linked state. The slider settles the price bounds and the settled
    /// values replace the ones in `state`, so the filter and the slider always agree.
    pub fn with_state(mut state: FilterState, range: RangeConfig, debounce: Duration) -> Self {
        let slider = RangeSliderController::new(range, state.min_price, state.max_price);
        slider.current().apply_to(&range, &mut state);
        Self {
            state,
            slider,
            debounce: Debouncer::new(debounce),
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn slider(&self) -> &RangeSliderController {
        &self.slider
    }

    /// Applies one event. Returns `true` when the results should be recomputed right away;
    /// continuous events return `false` and become due through [`BrowseSession::flush`].
    pub fn handle(&mut self, event: BrowseEvent, now: Instant) -> bool {
        let continuous = event.is_continuous();
        let state = &mut self.state;

        match event {
            BrowseEvent::QueryTyped(q) => state.query = q,
            BrowseEvent::ModeSelected(mode) => state.mode = mode.trim().to_lowercase(),
            BrowseEvent::CitySelected(city) => {
                state.cities.clear();
                let city = city.trim();
                if !city.is_empty() {
                    state.cities.insert(city.to_string());
                }
                state.localities.clear();
            }
            BrowseEvent::LocalitySelected(locality) => {
                state.localities.clear();
                let locality = locality.trim();
                if !locality.is_empty() && locality != ANY_LOCALITY {
                    state.localities.insert(locality.to_string());
                }
            }
            BrowseEvent::SliderMoved(thumb, value) => {
                let change = self.slider.input(thumb, value);
                change.apply_to(self.slider.config(), state);
            }
            BrowseEvent::PropertyTypeSelected(v) => state.property_type = v,
            BrowseEvent::BhkSelected(v) => state.bhk = v,
            BrowseEvent::FurnishedSelected(v) => state.furnished = v,
            BrowseEvent::FacingSelected(v) => state.facing = v,
            BrowseEvent::AreaChanged { min, max } => {
                state.min_area = min;
                state.max_area = max;
            }
            BrowseEvent::AmenityTyped(v) => state.amenity = v,
            BrowseEvent::SortSelected(sort) => state.sort = sort,
            BrowseEvent::GotoPage(page) => {
                state.page = page.max(1);
                return true;
            }
            BrowseEvent::Reset => {
                state.reset();
                self.slider = RangeSliderController::new(*self.slider.config(), None, None);
                return true;
            }
        }

        state.page = 1;
        if continuous {
            self.debounce.touch(now);
            false
        } else {
            true
        }
    }

    /// Whether a debounced recompute has come due.
    pub fn flush(&mut self, now: Instant) -> bool {
        self.debounce.poll(now)
    }

    pub fn render<'a>(&self, properties: &'a [Property], now: DateTime<Utc>) -> PipelineOutcome<'a> {
        pipeline::run(properties, &self.state, now)
    }
}
