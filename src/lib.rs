pub mod auth;
pub mod coerce;
pub mod config;
pub mod query;
pub mod sanitize;
pub mod schema;
pub mod traverse;
