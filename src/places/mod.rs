//! Places Module
//!
//! Everything about a single place: the typed record, conversion from raw
//! external search results (never persisted on conversion), merging of
//! heterogeneous place collections, and CRUD over the places table.
//!
//! # Usage
//!
//! ```rust,ignore
//! use glitter::places;
//!
//! // Mount the routes
//! let app = Router::new()
//!     .nest("/api", places::routes())
//!     .with_state(app_state);
//!
//! // Use the library directly
//! let places = places::Places::new(connection);
//! let place = places.create("Alma Chocolates").await?;
//! ```

mod handler;
mod lib;
mod routes;

pub use lib::*;

pub use routes::routes;

pub fn migrations() -> &'static [(&'static str, &'static str)] {
    &[(
        "places_001_schema.sql",
        include_str!("migrations/001_schema.sql"),
    )]
}
