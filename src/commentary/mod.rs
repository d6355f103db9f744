//! Commentary Module
//!
//! Short user notes on a place: a headline, an optional rating and an
//! optional date. A commentary belongs to both a user and a place; the
//! place detail endpoint attaches the caller's own commentary.

mod handler;
mod lib;
mod routes;

pub use lib::*;

pub use routes::routes;

pub fn migrations() -> &'static [(&'static str, &'static str)] {
    &[(
        "commentary_001_schema.sql",
        include_str!("migrations/001_schema.sql"),
    )]
}
