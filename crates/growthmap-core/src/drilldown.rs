// crates/growthmap-core/src/drilldown.rs
//! Drill-down selection through the hierarchy.
//!
//! [`Selection`] is a plain value. Every action is a pure function that
//! takes the current selection and returns the next one; nothing here holds
//! ambient state.
//!
//! Re-click policy: clicking the selected city again collapses the whole
//! selection back to [`Selection::Top`]; clicking the selected district (or
//! province) again changes nothing.

use crate::common::{normalize_name, Level, CITY_COLUMN, DISTRICT_COLUMN, PROVINCE_COLUMN};
use crate::model::AreaKey;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Which province / city / district is selected.
///
/// The enum makes an orphaned selection (a city without its province, a
/// district without its city) unrepresentable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    Top,
    Province {
        province: String,
    },
    City {
        province: String,
        city: String,
    },
    District {
        province: String,
        city: String,
        district: String,
    },
}

impl Selection {
    /// Builds a selection from optional names, e.g. from CLI flags.
    ///
    /// Returns `None` when the combination breaks the hierarchy (a city
    /// without a province, a district without a city).
    #[must_use]
    pub fn from_parts(
        province: Option<&str>,
        city: Option<&str>,
        district: Option<&str>,
    ) -> Option<Self> {
        let n = normalize_name;
        match (province, city, district) {
            (None, None, None) => Some(Self::Top),
            (Some(p), None, None) => Some(Self::Province { province: n(p) }),
            (Some(p), Some(c), None) => Some(Self::City {
                province: n(p),
                city: n(c),
            }),
            (Some(p), Some(c), Some(d)) => Some(Self::District {
                province: n(p),
                city: n(c),
                district: n(d),
            }),
            _ => None,
        }
    }

    pub fn selected_province(&self) -> Option<&str> {
        match self {
            Self::Top => None,
            Self::Province { province }
            | Self::City { province, .. }
            | Self::District { province, .. } => Some(province),
        }
    }

    pub fn selected_city(&self) -> Option<&str> {
        match self {
            Self::City { city, .. } | Self::District { city, .. } => Some(city),
            _ => None,
        }
    }

    pub fn selected_district(&self) -> Option<&str> {
        match self {
            Self::District { district, .. } => Some(district),
            _ => None,
        }
    }

    /// Deepest selected level, `None` at the top.
    #[must_use]
    pub const fn depth(&self) -> Option<Level> {
        match self {
            Self::Top => None,
            Self::Province { .. } => Some(Level::Province),
            Self::City { .. } => Some(Level::City),
            Self::District { .. } => Some(Level::District),
        }
    }

    /// Key of the deepest selected area.
    #[must_use]
    pub fn selected_key(&self) -> Option<AreaKey> {
        match self {
            Self::Top => None,
            Self::Province { province } => Some(AreaKey::Province {
                province: province.clone(),
            }),
            Self::City { province, city } => Some(AreaKey::City {
                province: province.clone(),
                city: city.clone(),
            }),
            Self::District {
                province,
                city,
                district,
            } => Some(AreaKey::District {
                province: province.clone(),
                city: city.clone(),
                district: district.clone(),
            }),
        }
    }

    /// Key of the selected city, if any (also for a selected district).
    #[must_use]
    pub fn city_key(&self) -> Option<AreaKey> {
        Some(AreaKey::City {
            province: self.selected_province()?.to_owned(),
            city: self.selected_city()?.to_owned(),
        })
    }

    /// "Back to province view" is only offered once a province is selected.
    #[must_use]
    pub fn can_reset_to_top(&self) -> bool {
        self.selected_province().is_some()
    }

    /// "Back to city view" is only offered once a city is selected.
    #[must_use]
    pub fn can_reset_to_city_level(&self) -> bool {
        self.selected_city().is_some()
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.selected_key() {
            None => f.write_str("top"),
            Some(key) => write!(f, "{} {key}", key.level()),
        }
    }
}

/// Properties of a clicked map feature.
///
/// This is the property object the rendering side attaches to every drawn
/// polygon; only the name fields matter for navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureProperties {
    #[serde(rename = "WADMPR", default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(rename = "WADMKK", default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "WADMKC", default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
}

impl FeatureProperties {
    pub fn province(province: &str) -> Self {
        Self {
            province: Some(province.to_owned()),
            ..Self::default()
        }
    }

    pub fn city(province: &str, city: &str) -> Self {
        Self {
            province: Some(province.to_owned()),
            city: Some(city.to_owned()),
            district: None,
        }
    }

    pub fn district(province: &str, city: &str, district: &str) -> Self {
        Self {
            province: Some(province.to_owned()),
            city: Some(city.to_owned()),
            district: Some(district.to_owned()),
        }
    }

    /// Picks the name fields out of an arbitrary property object. Non-string
    /// and blank values count as absent.
    #[must_use]
    pub fn from_json(props: &Map<String, Value>) -> Self {
        let get = |name: &str| {
            props
                .get(name)
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(normalize_name)
        };
        Self {
            province: get(PROVINCE_COLUMN),
            city: get(CITY_COLUMN),
            district: get(DISTRICT_COLUMN),
        }
    }

    fn name(value: Option<&String>) -> Option<String> {
        value
            .map(|s| normalize_name(s))
            .filter(|s| !s.is_empty())
    }
}

/// What a click resolved to, after bounding the feature level by the state.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Click {
    Province(String),
    City { province: String, city: String },
    District {
        province: String,
        city: String,
        district: String,
    },
}

fn classify(state: &Selection, props: &FeatureProperties) -> Option<Click> {
    let province = FeatureProperties::name(props.province.as_ref());
    let city = FeatureProperties::name(props.city.as_ref());
    let district = FeatureProperties::name(props.district.as_ref());

    // Only the layers drawn at the current depth can be clicked: provinces at
    // the top, cities once a province is open, districts once a city is.
    let deepest = match state.depth() {
        None => Level::Province,
        Some(Level::Province) => Level::City,
        Some(Level::City | Level::District) => Level::District,
    };

    if deepest == Level::District {
        if let Some(district) = district {
            return Some(Click::District {
                province: province?,
                city: city?,
                district,
            });
        }
    }
    if deepest >= Level::City {
        if let Some(city) = city {
            return Some(Click::City {
                province: province?,
                city,
            });
        }
    }
    province.map(Click::Province)
}

/// Applies a click on a map feature.
///
/// - province click: a different province opens it (descendants cleared);
///   the same province changes nothing;
/// - city click: a different city opens it (district cleared); the selected
///   city again collapses to [`Selection::Top`];
/// - district click: a different district selects it; the same district
///   changes nothing.
///
/// A feature without the names its level needs leaves the state as is.
#[must_use]
pub fn on_feature_clicked(state: &Selection, props: &FeatureProperties) -> Selection {
    let Some(click) = classify(state, props) else {
        log::warn!("Ignoring click on a feature without area names: {props:?}");
        return state.clone();
    };

    match click {
        Click::Province(province) => {
            if state.selected_province() == Some(province.as_str()) {
                state.clone()
            } else {
                Selection::Province { province }
            }
        }
        Click::City { province, city } => {
            let same_city = state.selected_city() == Some(city.as_str())
                && state.selected_province() == Some(province.as_str());
            if same_city {
                Selection::Top
            } else {
                Selection::City { province, city }
            }
        }
        Click::District {
            province,
            city,
            district,
        } => {
            if state.selected_district() == Some(district.as_str())
                && state.selected_city() == Some(city.as_str())
                && state.selected_province() == Some(province.as_str())
            {
                state.clone()
            } else {
                Selection::District {
                    province,
                    city,
                    district,
                }
            }
        }
    }
}

/// "Back to province view": clears everything.
#[must_use]
pub fn reset_to_top(_state: &Selection) -> Selection {
    Selection::Top
}

/// "Back to city view": clears city and district, keeps the province.
#[must_use]
pub fn reset_to_city_level(state: &Selection) -> Selection {
    match state.selected_province() {
        Some(province) => Selection::Province {
            province: province.to_owned(),
        },
        None => Selection::Top,
    }
}

/// A user action at the event boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Click(FeatureProperties),
    ResetToTop,
    ResetToCityLevel,
}

impl Action {
    #[must_use]
    pub fn apply(&self, state: &Selection) -> Selection {
        match self {
            Self::Click(props) => on_feature_clicked(state, props),
            Self::ResetToTop => reset_to_top(state),
            Self::ResetToCityLevel => reset_to_city_level(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invariant_holds(s: &Selection) -> bool {
        (s.selected_city().is_none() || s.selected_province().is_some())
            && (s.selected_district().is_none() || s.selected_city().is_some())
    }

    fn bali() -> Selection {
        Selection::Province {
            province: "BALI".into(),
        }
    }

    fn denpasar() -> Selection {
        Selection::City {
            province: "BALI".into(),
            city: "DENPASAR".into(),
        }
    }

    #[test]
    fn province_click_at_top_opens_province() {
        let next = on_feature_clicked(&Selection::Top, &FeatureProperties::province("Bali"));
        assert_eq!(next, bali());
    }

    #[test]
    fn top_only_reads_the_province_name() {
        let next = on_feature_clicked(
            &Selection::Top,
            &FeatureProperties::district("BALI", "DENPASAR", "DENPASAR SELATAN"),
        );
        assert_eq!(next, bali());
    }

    #[test]
    fn city_click_under_province_opens_city() {
        let next = on_feature_clicked(&bali(), &FeatureProperties::city("BALI", "DENPASAR"));
        assert_eq!(next, denpasar());
    }

    #[test]
    fn reclicking_selected_city_collapses_to_top() {
        let next = on_feature_clicked(&denpasar(), &FeatureProperties::city("BALI", "DENPASAR"));
        assert_eq!(next, Selection::Top);
    }

    #[test]
    fn other_city_replaces_city_and_clears_district() {
        let state = on_feature_clicked(
            &denpasar(),
            &FeatureProperties::district("BALI", "DENPASAR", "DENPASAR BARAT"),
        );
        let next = on_feature_clicked(&state, &FeatureProperties::city("BALI", "BADUNG"));
        assert_eq!(
            next,
            Selection::City {
                province: "BALI".into(),
                city: "BADUNG".into()
            }
        );
    }

    #[test]
    fn district_click_and_reclick() {
        let props = FeatureProperties::district("BALI", "DENPASAR", "DENPASAR BARAT");
        let selected = on_feature_clicked(&denpasar(), &props);
        assert_eq!(selected.selected_district(), Some("DENPASAR BARAT"));
        assert_eq!(on_feature_clicked(&selected, &props), selected);
    }

    #[test]
    fn same_province_click_is_a_no_op() {
        assert_eq!(
            on_feature_clicked(&bali(), &FeatureProperties::province("bali")),
            bali()
        );
        let other = on_feature_clicked(&denpasar(), &FeatureProperties::province("ACEH"));
        assert_eq!(other.selected_province(), Some("ACEH"));
        assert_eq!(other.selected_city(), None);
    }

    #[test]
    fn nameless_feature_changes_nothing() {
        let props = FeatureProperties {
            province: None,
            city: Some("DENPASAR".into()),
            district: None,
        };
        assert_eq!(on_feature_clicked(&bali(), &props), bali());
        assert_eq!(
            on_feature_clicked(&Selection::Top, &FeatureProperties::default()),
            Selection::Top
        );
    }

    #[test]
    fn resets() {
        let deep = Selection::District {
            province: "BALI".into(),
            city: "DENPASAR".into(),
            district: "DENPASAR BARAT".into(),
        };
        for s in [Selection::Top, bali(), denpasar(), deep.clone()] {
            assert_eq!(reset_to_top(&s), Selection::Top);
        }
        assert_eq!(reset_to_city_level(&deep), bali());
        assert_eq!(reset_to_city_level(&Selection::Top), Selection::Top);
        assert!(deep.can_reset_to_city_level());
        assert!(!bali().can_reset_to_city_level());
        assert!(!Selection::Top.can_reset_to_top());
    }

    #[test]
    fn invariant_holds_along_any_click_sequence() {
        let clicks = [
            FeatureProperties::province("BALI"),
            FeatureProperties::city("BALI", "BADUNG"),
            FeatureProperties::district("BALI", "BADUNG", "KUTA"),
            FeatureProperties::city("BALI", "BADUNG"),
            FeatureProperties::district("BALI", "BADUNG", "KUTA"),
            FeatureProperties::default(),
            FeatureProperties::city("BALI", "DENPASAR"),
            FeatureProperties::province("ACEH"),
        ];
        let mut seen = vec![Selection::Top];
        for _ in 0..3 {
            let mut next = Vec::new();
            for s in &seen {
                for c in &clicks {
                    let n = on_feature_clicked(s, c);
                    assert!(invariant_holds(&n), "{n:?}");
                    next.push(n);
                }
                next.push(reset_to_city_level(s));
            }
            seen = next;
        }
    }

    #[test]
    fn from_parts_rejects_orphans() {
        assert_eq!(Selection::from_parts(None, Some("X"), None), None);
        assert_eq!(
            Selection::from_parts(Some("bali"), Some("denpasar"), None),
            Some(denpasar())
        );
    }

    #[test]
    fn properties_from_json_ignore_other_fields() {
        let json = serde_json::json!({
            "WADMPR": "Bali",
            "WADMKK": "Denpasar",
            "CUSTOMER_GROWTH": 12.5,
            "WADMKC": null
        });
        let props = FeatureProperties::from_json(json.as_object().expect("object"));
        assert_eq!(props, FeatureProperties::city("BALI", "DENPASAR"));
    }

    #[test]
    fn actions_deserialize_from_json() {
        let action: Action =
            serde_json::from_str(r#"{"action":"click","WADMPR":"BALI"}"#).expect("valid");
        assert_eq!(action.apply(&Selection::Top), bali());
        let back: Action = serde_json::from_str(r#"{"action":"reset_to_top"}"#).expect("valid");
        assert_eq!(back.apply(&bali()), Selection::Top);
    }
}
