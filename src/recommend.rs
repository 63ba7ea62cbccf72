//! Recommendation table builder.
//!
//! Joins a selected dish to its places, enriches each row with distance,
//! price glyph and rating band, and yields a display-ready ordered table.
//! The builder never sorts; column sorting is a display-layer capability
//! exposed through [`sort_rows`].

use std::cmp::Ordering;

use ahash::AHashSet;
use serde::Serialize;

use crate::data::DishCatalog;
use crate::geo::{distance_km, Distance, UNKNOWN_GLYPH};
use crate::types::{price_display, Dish, GeoPoint, PriceLevel, RatingBand};

/// Table outcome. `NoPlaces` means no recommendations exist for the dish,
/// distinct from a table whose joins all failed to resolve (empty rows).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RecommendationOutcome {
    Rows(Vec<RecommendationRow>),
    NoPlaces,
}

/// One display-ready recommendation row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationRow {
    pub place_id: String,
    pub name: String,
    pub distance: Distance,
    pub distance_display: String,
    /// Numeric rating, or `None` for the explicit unrated marker.
    pub rating: Option<f64>,
    pub rating_display: String,
    /// Rating color band; unrated rows carry none and render neutral.
    pub rating_band: Option<RatingBand>,
    pub price: Option<PriceLevel>,
    pub price_display: String,
    pub maps_uri: Option<String>,
}

/// Build the recommendation table for one dish.
///
/// * The dish's place list resolves against the catalog's join index;
///   identifiers with no matching place are silently dropped.
/// * An absent or empty place list yields [`RecommendationOutcome::NoPlaces`].
/// * Rows keep the place collection's natural order.
/// * With no `reference_point`, every distance is the unknown marker.
pub fn build_table(
    dish: &Dish,
    catalog: &DishCatalog,
    reference_point: Option<GeoPoint>,
) -> RecommendationOutcome {
    if dish.places.is_empty() {
        return RecommendationOutcome::NoPlaces;
    }

    let wanted: AHashSet<&str> = dish.places.iter().map(String::as_str).collect();

    let rows = catalog
        .places()
        .iter()
        .filter(|place| wanted.contains(place.id.as_str()))
        .map(|place| {
            let distance = match reference_point {
                Some(user) => distance_km(
                    Some(user.lat),
                    Some(user.lon),
                    place.latitude,
                    place.longitude,
                ),
                None => Distance::Unknown,
            };
            RecommendationRow {
                place_id: place.id.clone(),
                name: place.name.clone(),
                distance,
                distance_display: distance.display(),
                rating: place.rating,
                rating_display: match place.rating {
                    Some(r) => format!("{:.1}", r),
                    None => UNKNOWN_GLYPH.to_string(),
                },
                rating_band: RatingBand::classify(place.rating),
                price: place.price_level.clone(),
                price_display: price_display(place.price_level.as_ref()).to_string(),
                maps_uri: place.maps_uri.clone(),
            }
        })
        .collect();

    RecommendationOutcome::Rows(rows)
}

// ============================================================================
// Column sorting (display-layer capability)
// ============================================================================

/// Sortable columns of the recommendation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Distance,
    Rating,
    Price,
}

/// Stable sort of table rows. Unknown distances, unrated rows and
/// unranked price tiers always order last, in either direction.
pub fn sort_rows(rows: &mut [RecommendationRow], key: SortKey, ascending: bool) {
    rows.sort_by(|a, b| match key {
        SortKey::Name => {
            let ord = a.name.cmp(&b.name);
            if ascending { ord } else { ord.reverse() }
        }
        SortKey::Distance => cmp_known_last(a.distance.km(), b.distance.km(), ascending),
        SortKey::Rating => cmp_known_last(a.rating, b.rating, ascending),
        SortKey::Price => cmp_known_last(
            a.price.as_ref().and_then(PriceLevel::rank).map(f64::from),
            b.price.as_ref().and_then(PriceLevel::rank).map(f64::from),
            ascending,
        ),
    });
}

fn cmp_known_last(a: Option<f64>, b: Option<f64>, ascending: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => {
            let ord = x.total_cmp(&y);
            if ascending { ord } else { ord.reverse() }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
