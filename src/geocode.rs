//! Reverse geocoding contract.
//!
//! The service never talks to a geocoder directly; it asks a
//! [`PlaceNameProvider`] for an [`Address`] and turns that into a short
//! display name. Any failure degrades to formatted coordinates.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ImpactError;
use crate::types::GeoPoint;

/// Source of structured addresses for a coordinate.
pub trait PlaceNameProvider: Send + Sync {
    /// `Ok(None)` when the provider has nothing for this point.
    fn lookup_place_name(&self, lat: f64, lon: f64) -> Result<Option<Address>, ImpactError>;
}

/// The address components the display name is built from.
///
/// Field names match OpenStreetMap's reverse-geocoding `address` object so a
/// provider can deserialize the upstream payload straight into this type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Address {
    pub body_of_water: Option<String>,
    pub ocean: Option<String>,
    pub sea: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl Address {
    /// Short name for the impact site.
    ///
    /// Water bodies win over settlements; a settlement or state is qualified
    /// with its country when one is known.
    pub fn display_name(&self) -> Option<String> {
        if let Some(water) = [&self.body_of_water, &self.ocean, &self.sea]
            .into_iter()
            .find_map(non_empty)
        {
            return Some(water.to_string());
        }

        let country = non_empty(&self.country);
        let locality = [&self.city, &self.town, &self.village, &self.state]
            .into_iter()
            .find_map(non_empty);

        match (locality, country) {
            (Some(place), Some(country)) => Some(format!("{place}, {country}")),
            (Some(place), None) => Some(place.to_string()),
            (None, Some(country)) => Some(country.to_string()),
            (None, None) => None,
        }
    }
}

/// Display name the provider knows for `point`, if any.
pub fn lookup_display_name(
    provider: &dyn PlaceNameProvider,
    point: GeoPoint,
) -> Result<Option<String>, ImpactError> {
    let name = provider
        .lookup_place_name(point.lat, point.lon)?
        .and_then(|address| address.display_name());
    if name.is_none() {
        debug!(lat = point.lat, lon = point.lon, "no usable address for point");
    }
    Ok(name)
}

/// Display name for `point`, falling back to its formatted coordinates.
pub fn resolve_place_name(provider: &dyn PlaceNameProvider, point: GeoPoint) -> String {
    name_or_coordinates(point, lookup_display_name(provider, point))
}

/// Turn the outcome of a display-name lookup into the name shown to users.
/// A missing name or a failed lookup yields the coordinates.
pub fn name_or_coordinates(point: GeoPoint, lookup: Result<Option<String>, ImpactError>) -> String {
    match lookup {
        Ok(Some(name)) => name,
        Ok(None) => point.format_coordinates(),
        Err(err) => {
            warn!(lat = point.lat, lon = point.lon, error = %err, "reverse geocoding failed");
            point.format_coordinates()
        }
    }
}
