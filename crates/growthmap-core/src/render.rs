// crates/growthmap-core/src/render.rs
//! Builds the GeoJSON layers a map widget draws for a selection.
//!
//! Every feature carries its level's name fields, the tooltip metrics and a
//! `style` object. The same property object comes back on click and is read
//! by [`crate::drilldown::FeatureProperties::from_json`].

use crate::common::{
    BusinessUnit, Level, Year, CITY_COLUMN, CUSTOMER_GROWTH_COLUMN, DISTRICT_COLUMN,
    PROVINCE_COLUMN,
};
use crate::drilldown::Selection;
use crate::error::Result;
use crate::model::{AggregatedArea, AreaKey, GrowthDb};
use crate::style::{tooltip_fields, Colormap, Style};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use serde_json::json;
use strum::IntoEnumIterator;

/// Property key holding the layer a feature belongs to.
pub const LAYER_PROPERTY: &str = "layer";
/// Property key holding the feature's [`Style`].
pub const STYLE_PROPERTY: &str = "style";

/// How a layer is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    /// Filled by customer growth.
    Choropleth,
    /// White background under a drilled-into area's children.
    Background,
}

/// One drawn layer: a level's rows and how to paint them.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer<'a> {
    pub name: String,
    pub level: Level,
    pub paint: Paint,
    pub rows: Vec<&'a AggregatedArea>,
}

/// Layers for a selection, bottom to top.
///
/// - top: provinces, colored;
/// - province selected: provinces white, then that province's cities colored;
/// - city (or district) selected: additionally the province's cities white
///   and the city's districts colored.
#[must_use]
pub fn layers<'a>(db: &'a GrowthDb, state: &Selection) -> Vec<Layer<'a>> {
    let provinces: Vec<&AggregatedArea> = db.provinces.iter().collect();

    let Some(province) = state.selected_province() else {
        return vec![Layer {
            name: "provinces".to_owned(),
            level: Level::Province,
            paint: Paint::Choropleth,
            rows: provinces,
        }];
    };

    let province_key = AreaKey::Province {
        province: province.to_owned(),
    };
    let cities: Vec<&AggregatedArea> = db.children(&province_key).collect();

    let mut out = vec![Layer {
        name: "provinces".to_owned(),
        level: Level::Province,
        paint: Paint::Background,
        rows: provinces,
    }];

    match state.city_key() {
        None => out.push(Layer {
            name: "cities".to_owned(),
            level: Level::City,
            paint: Paint::Choropleth,
            rows: cities,
        }),
        Some(city_key) => {
            out.push(Layer {
                name: "cities".to_owned(),
                level: Level::City,
                paint: Paint::Background,
                rows: cities,
            });
            out.push(Layer {
                name: "districts".to_owned(),
                level: Level::District,
                paint: Paint::Choropleth,
                rows: db.children(&city_key).collect(),
            });
        }
    }
    out
}

/// Property object of one rendered feature. Metrics are `null` without data.
#[must_use]
pub fn feature_properties(area: &AggregatedArea, style: &Style, layer: &str) -> JsonObject {
    let mut props = JsonObject::new();
    props.insert(PROVINCE_COLUMN.into(), json!(area.key.province_name()));
    if let Some(city) = area.key.city_name() {
        props.insert(CITY_COLUMN.into(), json!(city));
    }
    if let Some(district) = area.key.district_name() {
        props.insert(DISTRICT_COLUMN.into(), json!(district));
    }

    let m = area.metrics.as_ref();
    for year in Year::iter() {
        props.insert(year.customer_column(), json!(m.map(|m| m.customers(year))));
        for unit in BusinessUnit::iter() {
            props.insert(
                unit.total_column(year),
                json!(m.map(|m| m.unit_total(year, unit))),
            );
        }
    }
    for unit in BusinessUnit::iter() {
        props.insert(unit.growth_column(), json!(m.map(|m| m.booking_growth(unit))));
    }
    props.insert(
        CUSTOMER_GROWTH_COLUMN.into(),
        json!(m.map(|m| m.customer_growth)),
    );
    props.insert(LAYER_PROPERTY.into(), json!(layer));
    props.insert(STYLE_PROPERTY.into(), json!(style));
    props
}

fn to_feature(area: &AggregatedArea, style: &Style, layer: &str) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new((&area.geometry).into())),
        id: None,
        properties: Some(feature_properties(area, style, layer)),
        foreign_members: None,
    }
}

/// The full drawable collection for a selection.
///
/// Colors span the province table's customer growth at every depth, so a
/// color means the same growth wherever it appears.
#[must_use]
pub fn render(db: &GrowthDb, state: &Selection) -> FeatureCollection {
    let colormap = Colormap::for_customer_growth(&db.provinces);
    let background = Style::background();

    let features = layers(db, state)
        .into_iter()
        .flat_map(|layer| {
            let colormap = &colormap;
            let background = &background;
            layer.rows.into_iter().map(move |area| match layer.paint {
                Paint::Choropleth => {
                    to_feature(area, &Style::choropleth(area, colormap), &layer.name)
                }
                Paint::Background => to_feature(area, background, &layer.name),
            })
        })
        .collect();

    // Tooltips follow the colored layer.
    let colored = state.city_key().map_or_else(
        || state.selected_province().map_or(Level::Province, |_| Level::City),
        |_| Level::District,
    );
    let tooltip: Vec<_> = tooltip_fields(colored)
        .into_iter()
        .map(|(field, alias)| json!({ "field": field, "alias": alias }))
        .collect();

    let mut foreign = JsonObject::new();
    foreign.insert("selection".into(), json!(state));
    foreign.insert("colormap".into(), json!(colormap));
    foreign.insert("tooltip".into(), json!(tooltip));
    foreign.insert("highlight".into(), json!(Style::highlight()));

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(foreign),
    }
}

/// Serializes [`render`] as a JSON string.
///
/// # Errors
///
/// Only if serialization itself fails.
pub fn render_json(db: &GrowthDb, state: &Selection, pretty: bool) -> Result<String> {
    let value = serde_json::to_value(render(db, state))?;
    Ok(if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drilldown::{on_feature_clicked, FeatureProperties};
    use crate::model::{Counts, Metrics};
    use geo::{polygon, MultiPolygon};
    use geojson::JsonValue;

    fn unit_square() -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
        ]])
    }

    fn with_growth(key: AreaKey, c2019: i64, c2024: i64) -> AggregatedArea {
        let mut counts = Counts::default();
        counts.y2019.customers = c2019;
        counts.y2024.customers = c2024;
        AggregatedArea {
            key,
            geometry: unit_square(),
            metrics: Some(Metrics::from_counts(counts)),
        }
    }

    fn db() -> GrowthDb {
        GrowthDb {
            provinces: vec![
                with_growth(AreaKey::province("BALI"), 100, 200),
                AggregatedArea {
                    key: AreaKey::province("ACEH"),
                    geometry: unit_square(),
                    metrics: None,
                },
            ],
            cities: vec![with_growth(AreaKey::city("BALI", "DENPASAR"), 10, 10)],
            districts: vec![with_growth(
                AreaKey::district("BALI", "DENPASAR", "DENPASAR BARAT"),
                5,
                6,
            )],
        }
    }

    #[test]
    fn top_renders_only_colored_provinces() {
        let db = db();
        let fc = render(&db, &Selection::Top);
        assert_eq!(fc.features.len(), 2);
        let aceh = fc.features[1].properties.as_ref().expect("props");
        assert_eq!(aceh[CUSTOMER_GROWTH_COLUMN], JsonValue::Null);
        assert_eq!(aceh[STYLE_PROPERTY]["fillColor"], "grey");
    }

    #[test]
    fn city_selection_stacks_three_layers() {
        let db = db();
        let state = Selection::from_parts(Some("BALI"), Some("DENPASAR"), None).expect("valid");
        let names: Vec<_> = layers(&db, &state)
            .iter()
            .map(|l| (l.name.clone(), l.paint, l.rows.len()))
            .collect();
        let fc = render(&db, &state);
        let tooltip = fc.foreign_members.as_ref().expect("foreign members");
        assert_eq!(tooltip["tooltip"][2]["field"], DISTRICT_COLUMN);
        assert_eq!(
            names,
            vec![
                ("provinces".to_owned(), Paint::Background, 2),
                ("cities".to_owned(), Paint::Background, 1),
                ("districts".to_owned(), Paint::Choropleth, 1),
            ]
        );
    }

    #[test]
    fn rendered_properties_drive_the_next_click() {
        let db = db();
        let state = Selection::Top;
        let fc = render(&db, &Selection::Top);
        let bali = fc.features[0].properties.as_ref().expect("props");
        assert_eq!(bali[CUSTOMER_GROWTH_COLUMN], json!(100.0));
        let next = on_feature_clicked(&state, &FeatureProperties::from_json(bali));
        assert_eq!(next.selected_province(), Some("BALI"));

        let fc = render(&db, &next);
        let city = fc
            .features
            .iter()
            .filter_map(|f| f.properties.as_ref())
            .find(|p| p[LAYER_PROPERTY] == "cities")
            .expect("city feature");
        let next = on_feature_clicked(&next, &FeatureProperties::from_json(city));
        assert_eq!(next.selected_city(), Some("DENPASAR"));
    }

    #[test]
    fn render_json_is_a_feature_collection() {
        let db = db();
        let text = render_json(&db, &Selection::Top, false).expect("serializes");
        let value: JsonValue = serde_json::from_str(&text).expect("valid json");
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["selection"]["state"], "top");
        assert_eq!(value["tooltip"][0]["alias"], "Province");
        assert_eq!(value["highlight"]["fillOpacity"], 0.8);
    }
}
