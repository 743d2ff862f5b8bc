mod detail_tests;
mod facets_tests;
mod listings_tests;
mod reload_tests;
