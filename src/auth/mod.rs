//! Auth Module
//!
//! Session tokens and their resolution into an authenticated user. A token
//! is an opaque random value handed out at signup or login and kept until
//! an explicit logout; there is no automatic expiry. Protected handlers
//! take a [`CurrentUser`] argument, which makes the lookup run before the
//! handler body.

mod extract;
mod lib;

pub use extract::{CurrentUser, TOKEN_HEADER};
pub use lib::*;

pub fn migrations() -> &'static [(&'static str, &'static str)] {
    &[(
        "auth_001_schema.sql",
        include_str!("migrations/001_schema.sql"),
    )]
}
