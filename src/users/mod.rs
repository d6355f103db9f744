//! Users Module
//!
//! Account records and credential handling. The login identifier is the
//! user name; passwords are stored as salted digests and never serialized
//! into a response.

mod handler;
mod lib;
mod routes;

pub use lib::*;

pub use routes::routes;

pub fn migrations() -> &'static [(&'static str, &'static str)] {
    &[(
        "users_001_schema.sql",
        include_str!("migrations/001_schema.sql"),
    )]
}
