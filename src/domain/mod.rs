pub mod currency;
pub mod facets;
pub mod filters;
pub mod normalize;
pub mod pipeline;
pub mod property;
pub mod score;
pub mod slider;
