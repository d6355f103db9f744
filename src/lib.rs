use std::error::Error;

pub mod api;
pub mod auth;
pub mod commentary;
pub mod config;
pub mod db;
pub mod error;
pub mod google;
pub mod handler;
pub mod lists;
pub mod places;
pub mod search;
pub mod users;

pub fn unpack_error(err: &(dyn Error)) -> String {
    let mut parts = Vec::new();
    parts.push(err.to_string());
    let mut current = err.source();
    while let Some(source) = current {
        parts.push(source.to_string());
        current = source.source();
    }
    parts.join(": ")
}
