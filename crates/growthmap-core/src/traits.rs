// crates/growthmap-core/src/traits.rs
use crate::common::Level;
use crate::model::{AggregatedArea, AreaKey, GeoArea};
use geo::{BoundingRect, MultiPolygon, Rect};

/// Anything that sits somewhere in the province/city/district hierarchy.
///
/// Implementors expose their [`AreaKey`] and geometry; the provided methods
/// give the containment and bounds checks used by the drill-down views.
///
/// # Examples
/// ```rust
/// use growthmap_core::traits::AreaRecord;
/// use growthmap_core::{AreaKey, GeoArea};
/// use geo::MultiPolygon;
///
/// let area = GeoArea {
///     key: AreaKey::city("Bali", "Denpasar"),
///     geometry: MultiPolygon::new(vec![]),
/// };
/// assert!(area.is_within(&AreaKey::province("BALI")));
/// ```
pub trait AreaRecord {
    fn key(&self) -> &AreaKey;
    fn geometry(&self) -> &MultiPolygon<f64>;

    #[inline]
    fn level(&self) -> Level {
        self.key().level()
    }

    /// `true` when this record lies inside `ancestor` (or is it).
    fn is_within(&self, ancestor: &AreaKey) -> bool {
        self.key().at_level(ancestor.level()).as_ref() == Some(ancestor)
    }

    /// Bounding box in (longitude, latitude); `None` for empty geometry.
    #[inline]
    fn bounds(&self) -> Option<Rect<f64>> {
        self.geometry().bounding_rect()
    }
}

impl AreaRecord for GeoArea {
    fn key(&self) -> &AreaKey {
        &self.key
    }

    fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }
}

impl AreaRecord for AggregatedArea {
    fn key(&self) -> &AreaKey {
        &self.key
    }

    fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }
}

/// Union of the bounds of every record, `None` when none has geometry.
pub fn total_bounds<'a, R, I>(records: I) -> Option<Rect<f64>>
where
    R: AreaRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    records
        .into_iter()
        .filter_map(AreaRecord::bounds)
        .reduce(|acc, r| {
            Rect::new(
                (acc.min().x.min(r.min().x), acc.min().y.min(r.min().y)),
                (acc.max().x.max(r.max().x), acc.max().y.max(r.max().y)),
            )
        })
}
