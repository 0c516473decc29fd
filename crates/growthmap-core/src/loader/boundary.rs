// crates/growthmap-core/src/loader/boundary.rs
//! GeoJSON reader for boundary polygons.

use crate::common::{Level, CITY_COLUMN, DISTRICT_COLUMN, PROVINCE_COLUMN};
use crate::error::{GrowthError, Result};
use crate::model::{AreaKey, GeoArea};
use geo::MultiPolygon;
use geojson::{Feature, GeoJson, JsonObject};
use std::io::Read;

fn string_property(props: Option<&JsonObject>, name: &str) -> Option<String> {
    props?
        .get(name)?
        .as_str()
        .map(str::to_owned)
        .filter(|s| !s.trim().is_empty())
}

fn feature_key(feature: &Feature, level: Level, index: usize, source: &str) -> Result<AreaKey> {
    let props = feature.properties.as_ref();
    let get = |name: &str| {
        string_property(props, name).ok_or_else(|| {
            GrowthError::Configuration(format!(
                "feature #{index} in {source} has no `{name}` property"
            ))
        })
    };

    Ok(match level {
        Level::Province => AreaKey::province(&get(PROVINCE_COLUMN)?),
        Level::City => AreaKey::city(&get(PROVINCE_COLUMN)?, &get(CITY_COLUMN)?),
        Level::District => AreaKey::district(
            &get(PROVINCE_COLUMN)?,
            &get(CITY_COLUMN)?,
            &get(DISTRICT_COLUMN)?,
        ),
    })
}

/// Converts a GeoJSON geometry into a multipolygon, promoting single
/// polygons. Other geometry types are not areas.
fn feature_geometry(feature: &Feature, index: usize, source: &str) -> Result<MultiPolygon<f64>> {
    let not_areal = |what: &str| {
        GrowthError::Configuration(format!(
            "feature #{index} in {source} has {what}, expected Polygon or MultiPolygon"
        ))
    };

    let geometry = feature
        .geometry
        .clone()
        .ok_or_else(|| not_areal("no geometry"))?;
    let geometry: geo::Geometry<f64> = geometry.try_into()?;
    match geometry {
        geo::Geometry::MultiPolygon(mp) => Ok(mp),
        geo::Geometry::Polygon(p) => Ok(MultiPolygon(vec![p])),
        _ => Err(not_areal("a non-areal geometry")),
    }
}

/// Reads one level's boundary collection.
///
/// Every feature must carry the key properties of `level` (`WADMPR`, plus
/// `WADMKK` for cities, plus `WADMKC` for districts); names are uppercased.
///
/// # Errors
///
/// [`GrowthError::Configuration`] for a missing key property, a non-areal
/// geometry or a document that is not a FeatureCollection;
/// [`GrowthError::Json`] / [`GrowthError::GeoJson`] for malformed input.
pub fn read_boundaries<R: Read>(reader: R, level: Level, source: &str) -> Result<Vec<GeoArea>> {
    let value: serde_json::Value = serde_json::from_reader(reader)?;
    let collection = match GeoJson::from_json_value(value)? {
        GeoJson::FeatureCollection(fc) => fc,
        _ => {
            return Err(GrowthError::Configuration(format!(
                "{source} is not a GeoJSON FeatureCollection"
            )))
        }
    };

    let areas = collection
        .features
        .iter()
        .enumerate()
        .map(|(index, feature)| {
            Ok(GeoArea {
                key: feature_key(feature, level, index, source)?,
                geometry: feature_geometry(feature, index, source)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    log::info!("Read {} {level} boundaries from {source}", areas.len());
    Ok(areas)
}
