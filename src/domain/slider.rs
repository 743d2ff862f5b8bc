// src/domain/slider.rs

//! Dual-thumb price range input.
//!
//! Two values share one domain and must stay at least `gap` apart. When a move would
//! squeeze them closer, the thumb that was not moved is pushed away so exactly `gap`
//! separates them.

use crate::config::ConfigError;
use crate::domain::currency::format_inr_short;
use crate::domain::filters::FilterState;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeConfig {
    min: f64,
    max: f64,
    step: f64,
    gap: f64,
}

impl Default for RangeConfig {
    fn default() -> Self {
        RangeConfig {
            min: 0.0,
            max: 20_000_000.0,
            step: 100_000.0,
            gap: 200_000.0,
        }
    }
}

impl RangeConfig {
    pub fn new(min: f64, max: f64, step: f64, gap: f64) -> Result<Self, ConfigError> {
        let all_finite = [min, max, step, gap].iter().all(|v| v.is_finite());
        if !all_finite {
            return Err(ConfigError::InvalidRange("bounds must be finite".into()));
        }
        if step < 0.0 || gap < 0.0 {
            return Err(ConfigError::InvalidRange(
                "step and gap must not be negative".into(),
            ));
        }
        if max - min < gap {
            return Err(ConfigError::InvalidRange(format!(
                "domain [{min}, {max}] is narrower than the gap {gap}"
            )));
        }
        Ok(RangeConfig { min, max, step, gap })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn gap(&self) -> f64 {
        self.gap
    }

    /// Snaps to the step grid measured from the domain minimum, then clamps into the domain.
    /// Values at or past either edge land exactly on it, even when the span is not a whole
    /// number of steps.
    fn clamp(&self, value: f64) -> f64 {
        let value = if value.is_finite() { value } else { self.min };
        if value <= self.min {
            return self.min;
        }
        if value >= self.max {
            return self.max;
        }
        let snapped = if self.step > 0.0 {
            self.min + ((value - self.min) / self.step).round() * self.step
        } else {
            value
        };
        snapped.clamp(self.min, self.max)
    }

    fn percent(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        (value - self.min) / span * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Thumb {
    Min,
    Max,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    DraggingMin,
    DraggingMax,
}

/// Where the highlighted track starts and ends, as percentages from each edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeFill {
    pub left_pct: f64,
    pub right_pct: f64,
}

/// Published after every settled input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeChange {
    pub min: f64,
    pub max: f64,
}

impl RangeChange {
    /// Price bounds for the filter. A thumb resting on its domain edge means "no limit".
    pub fn as_bounds(&self, config: &RangeConfig) -> (Option<f64>, Option<f64>) {
        let min = (self.min > config.min).then_some(self.min);
        let max = (self.max < config.max).then_some(self.max);
        (min, max)
    }

    pub fn apply_to(&self, config: &RangeConfig, state: &mut FilterState) {
        let (min, max) = self.as_bounds(config);
        state.min_price = min;
        state.max_price = max;
    }
}

#[derive(Debug, Clone)]
pub struct RangeSliderController {
    config: RangeConfig,
    min_value: f64,
    max_value: f64,
    state: DragState,
    fill: RangeFill,
}

impl RangeSliderController {
    /// Starts at the full domain unless starting values are supplied; those are clamped
    /// into the domain and settled as if the max thumb had just moved.
    pub fn new(config: RangeConfig, start_min: Option<f64>, start_max: Option<f64>) -> Self {
        let mut slider = RangeSliderController {
            config,
            min_value: config.clamp(start_min.unwrap_or(config.min)),
            max_value: config.clamp(start_max.unwrap_or(config.max)),
            state: DragState::Idle,
            fill: RangeFill {
                left_pct: 0.0,
                right_pct: 0.0,
            },
        };
        slider.settle(Thumb::Max);
        slider
    }

    pub fn config(&self) -> &RangeConfig {
        &self.config
    }

    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn fill(&self) -> RangeFill {
        self.fill
    }

    pub fn labels(&self) -> (String, String) {
        (
            format_inr_short(self.min_value),
            format_inr_short(self.max_value),
        )
    }

    /// Handles one input event from either thumb and returns the settled values.
    pub fn input(&mut self, thumb: Thumb, value: f64) -> RangeChange {
        self.state = match thumb {
            Thumb::Min => DragState::DraggingMin,
            Thumb::Max => DragState::DraggingMax,
        };

        let value = self.config.clamp(value);
        match thumb {
            Thumb::Min => self.min_value = value,
            Thumb::Max => self.max_value = value,
        }
        let change = self.settle(thumb);

        self.state = DragState::Idle;
        change
    }

    pub fn current(&self) -> RangeChange {
        RangeChange {
            min: self.min_value,
            max: self.max_value,
        }
    }

    fn settle(&mut self, moved: Thumb) -> RangeChange {
        let RangeConfig { min, max, gap, .. } = self.config;

        if self.max_value - self.min_value < gap {
            match moved {
                Thumb::Min => {
                    self.min_value = self.min_value.min(max - gap);
                    self.max_value = self.min_value + gap;
                }
                Thumb::Max => {
                    self.max_value = self.max_value.max(min + gap);
                    self.min_value = self.max_value - gap;
                }
            }
        }

        self.fill = RangeFill {
            left_pct: self.config.percent(self.min_value),
            right_pct: 100.0 - self.config.percent(self.max_value),
        };
        self.current()
    }
}
