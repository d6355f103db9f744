//! Search Module
//!
//! Nearby place search: proxies a keyword/location query to the external
//! places API, converts the raw results, and merges them with locally
//! stored name matches. Database rows are passed first into the merge, so
//! a place we already know wins over its freshly searched copy.

mod handler;
mod routes;

pub use routes::routes;
