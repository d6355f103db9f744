//! Client for the Google Places nearby-search web service.
//!
//! Returns raw search records; converting them into [`crate::places::Place`]
//! values is the job of the places module. Requests are a single round trip,
//! no retry or paging.

use reqwest::Client;
use serde::Deserialize;

use crate::config::Config;
use crate::error::Error;
use crate::places::Location;

const NEARBY_SEARCH_PATH: &str = "/place/nearbysearch/json";

const DEFAULT_RADIUS_MILES: f64 = 5.0;

// Only establishment categories we curate; everything else is noise.
const TYPES: &str = "bakery|bar|cafe|food|grocery_or_supermarket|liquor_store|\
meal_delivery|meal_takeaway|night_club|restaurant";

/// A place exactly as it comes back from the search API.
#[derive(Debug, Clone, Deserialize)]
pub struct GooglePlace {
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub vicinity: Option<String>,
    pub geometry: Option<Geometry>,
    pub types: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: Option<Location>,
}

#[derive(Debug, Deserialize)]
struct NearbySearchEnvelope {
    #[serde(default)]
    results: Vec<GooglePlace>,
}

pub fn miles_to_meters(miles: f64) -> i64 {
    (miles / 0.00062137).round() as i64
}

pub struct GoogleClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl GoogleClient {
    pub fn new(cfg: &Config) -> Self {
        GoogleClient {
            http: Client::new(),
            api_key: cfg.google.get_api_key().to_string(),
            base_url: cfg.google.get_base_url().trim_end_matches('/').to_string(),
        }
    }

    fn nearby_query(&self, keyword: &str, location: &str, radius_miles: f64) -> Vec<(&'static str, String)> {
        vec![
            ("keyword", keyword.to_string()),
            ("location", location.to_string()),
            ("radius", miles_to_meters(radius_miles).to_string()),
            ("types", TYPES.to_string()),
            ("key", self.api_key.clone()),
        ]
    }

    /// Request nearby places for a keyword around a lat/long.
    ///
    /// Both keyword and location are required; the request is never sent
    /// without them. Radius is in miles, defaulting to 5.
    pub async fn nearby_search(
        &self,
        keyword: Option<&str>,
        location: Option<&str>,
        radius_miles: Option<f64>,
    ) -> Result<Vec<GooglePlace>, Error> {
        let keyword = match keyword {
            Some(k) if !k.is_empty() => k,
            _ => {
                return Err(Error::Validation(
                    "missing keyword_search for nearby search".to_string(),
                ));
            }
        };
        let location = match location {
            Some(l) if !l.is_empty() => l,
            _ => {
                return Err(Error::Validation(
                    "missing location for nearby search".to_string(),
                ));
            }
        };

        let url = format!("{}{}", self.base_url, NEARBY_SEARCH_PATH);
        let envelope: NearbySearchEnvelope = self
            .http
            .get(&url)
            .query(&self.nearby_query(keyword, location, radius_miles.unwrap_or(DEFAULT_RADIUS_MILES)))
            .send()
            .await
            .map_err(|e| Error::Unhandled(e.into()))?
            .error_for_status()
            .map_err(|e| Error::Unhandled(e.into()))?
            .json()
            .await
            .map_err(|e| Error::Unhandled(e.into()))?;

        Ok(envelope.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_miles_to_meters() {
        assert_eq!(miles_to_meters(2.0), 3219);
        assert_eq!(miles_to_meters(5.0), 8047);
    }

    #[test]
    fn nearby_query_carries_converted_radius() {
        let client = GoogleClient::new(&Config::default());
        let query = client.nearby_query("coffee", "45.52,-122.67", 2.0);

        let radius = query.iter().find(|(k, _)| *k == "radius").unwrap();
        assert_eq!(radius.1, "3219");
        let keyword = query.iter().find(|(k, _)| *k == "keyword").unwrap();
        assert_eq!(keyword.1, "coffee");
        assert!(query.iter().any(|(k, _)| *k == "types"));
    }

    #[tokio::test]
    async fn nearby_search_requires_keyword_and_location() {
        let client = GoogleClient::new(&Config::default());

        let missing_keyword = client.nearby_search(None, Some("45.52,-122.67"), None).await;
        assert!(matches!(missing_keyword, Err(Error::Validation(_))));

        let missing_location = client.nearby_search(Some("coffee"), None, None).await;
        assert!(matches!(missing_location, Err(Error::Validation(_))));

        let empty_keyword = client.nearby_search(Some(""), Some("45.52,-122.67"), None).await;
        assert!(matches!(empty_keyword, Err(Error::Validation(_))));
    }
}
