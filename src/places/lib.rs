use anyhow::Result;
use libsql::Connection;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::Error;
use crate::google::GooglePlace;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// A place is identified by its row id once saved. Candidates coming out of
/// an external search are not saved yet and carry a synthetic
/// `temp_<place id>` identifier instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PlaceId {
    Saved(i64),
    Temporary(String),
}

impl PlaceId {
    pub fn as_saved(&self) -> Option<i64> {
        match self {
            PlaceId::Saved(id) => Some(*id),
            PlaceId::Temporary(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Place {
    pub id: PlaceId,
    pub name: Option<String>,
    pub google_place_id: Option<String>,
    pub location: Option<Location>,
    pub icon_url: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub intl_phone: Option<String>,
    pub locality: Option<String>,
    pub neighborhood: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub timezone: Option<String>,
    pub website: Option<String>,
    pub types: Option<Vec<String>>,
    pub temporary: bool,
}

/// Detail presentation of a place: everything except the raw
/// google_place_id.
#[derive(Debug, Serialize)]
pub struct PlaceDetails {
    pub id: PlaceId,
    pub name: Option<String>,
    pub location: Option<Location>,
    pub icon_url: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub intl_phone: Option<String>,
    pub locality: Option<String>,
    pub neighborhood: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub timezone: Option<String>,
    pub website: Option<String>,
    pub types: Option<Vec<String>>,
    pub temporary: bool,
}

impl From<Place> for PlaceDetails {
    fn from(place: Place) -> Self {
        PlaceDetails {
            id: place.id,
            name: place.name,
            location: place.location,
            icon_url: place.icon_url,
            address: place.address,
            phone: place.phone,
            intl_phone: place.intl_phone,
            locality: place.locality,
            neighborhood: place.neighborhood,
            country: place.country,
            postal_code: place.postal_code,
            timezone: place.timezone,
            website: place.website,
            types: place.types,
            temporary: place.temporary,
        }
    }
}

impl Place {
    /// Convert a raw search record into a Place.
    ///
    /// The result is intentionally not saved; it only gets persisted later
    /// if and when it is added to at least one user list. A record without
    /// an external id or a location is rejected outright.
    pub fn from_google_place(google_place: &GooglePlace) -> Result<Place, Error> {
        let place_id = match &google_place.place_id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => return Err(Error::Validation("missing place id".to_string())),
        };

        let location = match google_place.geometry.as_ref().and_then(|g| g.location) {
            Some(location) => location,
            None => return Err(Error::Validation("missing location".to_string())),
        };

        Ok(Place {
            id: PlaceId::Temporary(format!("temp_{place_id}")),
            name: google_place.name.clone(),
            google_place_id: Some(place_id),
            location: Some(location),
            icon_url: None,
            address: google_place.vicinity.clone(),
            phone: None,
            intl_phone: None,
            locality: None,
            neighborhood: None,
            country: None,
            postal_code: None,
            timezone: None,
            website: None,
            types: google_place.types.clone(),
            temporary: true,
        })
    }

    /// Convert an ordered batch of raw search records, failing on the first
    /// invalid one.
    pub fn from_google_places(google_places: &[GooglePlace]) -> Result<Vec<Place>, Error> {
        google_places.iter().map(Place::from_google_place).collect()
    }

    /// Merge two place collections into one, deduplicated by
    /// google_place_id. The first occurrence of each id wins, scanning
    /// `places_a` before `places_b`; places without an external id are
    /// always retained.
    pub fn merge(places_a: Vec<Place>, places_b: Vec<Place>) -> Vec<Place> {
        let mut seen: HashSet<String> = HashSet::new();
        places_a
            .into_iter()
            .chain(places_b)
            .filter(|place| match &place.google_place_id {
                Some(id) if !id.is_empty() => seen.insert(id.clone()),
                _ => true,
            })
            .collect()
    }
}

pub(crate) fn row_to_place(row: &libsql::Row) -> Result<Place> {
    let location: Option<String> = row.get(3)?;
    let location = location
        .map(|s| serde_json::from_str(&s))
        .transpose()?;
    let types: Option<String> = row.get(14)?;
    let types = types.map(|s| serde_json::from_str(&s)).transpose()?;
    let temporary: i64 = row.get(15)?;

    Ok(Place {
        id: PlaceId::Saved(row.get(0)?),
        name: row.get(1)?,
        google_place_id: row.get(2)?,
        location,
        icon_url: row.get(4)?,
        address: row.get(5)?,
        phone: row.get(6)?,
        intl_phone: row.get(7)?,
        locality: row.get(8)?,
        neighborhood: row.get(9)?,
        country: row.get(10)?,
        postal_code: row.get(11)?,
        timezone: row.get(12)?,
        website: row.get(13)?,
        types,
        temporary: temporary != 0,
    })
}

pub struct Places<'a> {
    conn: &'a Connection,
}

impl<'a> Places<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, name: &str) -> Result<Place> {
        let query = r#"
            INSERT INTO places (name, temporary)
            VALUES (?, 0)
            RETURNING id, name, google_place_id, location, icon_url, address, phone,
                      intl_phone, locality, neighborhood, country, postal_code,
                      timezone, website, types, temporary
        "#;

        let mut rows = self.conn.query(query, libsql::params![name]).await?;

        if let Some(row) = rows.next().await? {
            Ok(row_to_place(&row)?)
        } else {
            anyhow::bail!("Failed to create place")
        }
    }

    pub async fn find_or_create_by_name(&self, name: &str) -> Result<Place> {
        let query = r#"
            SELECT id, name, google_place_id, location, icon_url, address, phone,
                   intl_phone, locality, neighborhood, country, postal_code,
                   timezone, website, types, temporary
            FROM places WHERE name = ?
            ORDER BY id LIMIT 1
        "#;

        let mut rows = self.conn.query(query, libsql::params![name]).await?;

        if let Some(row) = rows.next().await? {
            Ok(row_to_place(&row)?)
        } else {
            self.create(name).await
        }
    }

    pub async fn get(&self, id: i64) -> Result<Option<Place>> {
        let query = r#"
            SELECT id, name, google_place_id, location, icon_url, address, phone,
                   intl_phone, locality, neighborhood, country, postal_code,
                   timezone, website, types, temporary
            FROM places WHERE id = ?
        "#;

        let mut rows = self.conn.query(query, libsql::params![id]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(row_to_place(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn list(&self, limit: i64) -> Result<Vec<Place>> {
        let query = r#"
            SELECT id, name, google_place_id, location, icon_url, address, phone,
                   intl_phone, locality, neighborhood, country, postal_code,
                   timezone, website, types, temporary
            FROM places
            ORDER BY id
            LIMIT ?
        "#;

        let mut rows = self.conn.query(query, libsql::params![limit]).await?;
        let mut places = Vec::new();

        while let Some(row) = rows.next().await? {
            places.push(row_to_place(&row)?);
        }

        Ok(places)
    }

    pub async fn search_by_name(&self, keyword: &str, limit: i64) -> Result<Vec<Place>> {
        let query = r#"
            SELECT id, name, google_place_id, location, icon_url, address, phone,
                   intl_phone, locality, neighborhood, country, postal_code,
                   timezone, website, types, temporary
            FROM places
            WHERE name LIKE ?
            ORDER BY id
            LIMIT ?
        "#;

        let pattern = format!("%{}%", keyword);
        let mut rows = self.conn.query(query, libsql::params![pattern, limit]).await?;
        let mut places = Vec::new();

        while let Some(row) = rows.next().await? {
            places.push(row_to_place(&row)?);
        }

        Ok(places)
    }
}
