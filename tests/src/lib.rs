//! Live tests against the configured ReqRes environment.
//!
//! Nothing here runs unless `API_TEST_MARKERS` selects it, e.g.
//! `API_TEST_MARKERS=smoke cargo test -p tests` or `API_TEST_MARKERS=all,!performance`.

#[cfg(test)]
mod api_validation;
#[cfg(test)]
mod error_scenarios;
#[cfg(test)]
mod user_creation;
#[cfg(test)]
mod user_retrieval;
