//! Lists Module
//!
//! User-owned, named collections of places. Mutating a list (adding or
//! removing places, deleting it) is restricted to its owning user; reads go
//! through the owner-scoped queries. Deleting a list clears its place
//! associations first.

mod handler;
mod lib;
mod routes;

pub use lib::*;

pub use routes::routes;

pub fn migrations() -> &'static [(&'static str, &'static str)] {
    &[(
        "lists_001_schema.sql",
        include_str!("migrations/001_schema.sql"),
    )]
}
