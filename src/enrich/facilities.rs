//! Facility coordinates from postal addresses.
//!
//! Geocoding and the coordinate transform are supplied by the caller. This
//! module only drives them over the site list and keeps the sites that
//! resolved.

use crate::error::Result;
use crate::records::{Coordinates, FacilityLocation};
use serde::{Deserialize, Serialize};

/// A facility as listed upstream, before geocoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilitySite {
    /// Facility code
    #[serde(rename = "Code")]
    pub code: String,
    /// Postal address
    #[serde(rename = "Address", default)]
    pub address: Option<String>,
}

/// Geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Longitude
    pub lon: f64,
    /// Latitude
    pub lat: f64,
}

/// Address → geographic position.
pub trait Geocoder {
    /// Resolve `address`; `Ok(None)` when the service has no match.
    fn geocode(&self, address: &str) -> Result<Option<GeoPoint>>;
}

/// Geographic position → projected coordinates.
pub trait Projection {
    /// Project one point.
    fn project(&self, point: GeoPoint) -> Coordinates;
}

impl<F> Projection for F
where
    F: Fn(GeoPoint) -> Coordinates,
{
    fn project(&self, point: GeoPoint) -> Coordinates {
        self(point)
    }
}

/// Geocode and project every site with an address.
///
/// Sites with no address, no geocoder match, or a geocoder error are logged
/// and left out; the result keeps input order.
pub fn locate_facilities(
    sites: &[FacilitySite],
    geocoder: &dyn Geocoder,
    projection: &dyn Projection,
) -> Vec<FacilityLocation> {
    let mut located = Vec::with_capacity(sites.len());

    for site in sites {
        let address = match site.address.as_deref().map(str::trim) {
            Some(address) if !address.is_empty() => address,
            _ => {
                log::warn!("Facility {} has no address, skipped", site.code);
                continue;
            },
        };

        match geocoder.geocode(address) {
            Ok(Some(point)) => {
                let at = projection.project(point);
                log::debug!("Facility {} at {:?} -> ({}, {})", site.code, address, at.x, at.y);
                located.push(FacilityLocation::new(site.code.clone(), at.x, at.y));
            },
            Ok(None) => log::warn!("No coordinates found for {:?} ({})", address, site.code),
            Err(e) => log::warn!("Geocoding {:?} ({}) failed: {}", address, site.code, e),
        }
    }

    log::info!("Located {} of {} facilities", located.len(), sites.len());
    located
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    struct Gazetteer;

    impl Geocoder for Gazetteer {
        fn geocode(&self, address: &str) -> Result<Option<GeoPoint>> {
            match address {
                "Warsaw" => Ok(Some(GeoPoint { lon: 21.0, lat: 52.25 })),
                "Down" => Err(Error::UnsupportedInput("service down".to_string())),
                _ => Ok(None),
            }
        }
    }

    fn site(code: &str, address: Option<&str>) -> FacilitySite {
        FacilitySite {
            code: code.to_string(),
            address: address.map(str::to_string),
        }
    }

    #[test]
    fn test_locate_facilities_skips_unresolved() {
        let sites = vec![
            site("PL001", Some(" Warsaw ")),
            site("PL002", None),
            site("PL003", Some("")),
            site("PL004", Some("Atlantis")),
            site("PL005", Some("Down")),
        ];
        let scale = |p: GeoPoint| Coordinates::new(p.lon * 10.0, p.lat * 10.0);

        let located = locate_facilities(&sites, &Gazetteer, &scale);
        assert_eq!(located, vec![FacilityLocation::new("PL001", 210.0, 522.5)]);
    }
}
