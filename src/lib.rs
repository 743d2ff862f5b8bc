//! Real-estate listing search: source loading, normalization, filtering and the JSON API.

pub mod app;
pub mod browse;
pub mod config;
pub mod db;
pub mod debounce;
pub mod domain;
pub mod errors;
pub mod responses;
pub mod router;
pub mod sources;
pub mod working_set;

#[cfg(test)]
mod tests;
