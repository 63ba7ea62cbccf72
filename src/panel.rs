//! Display view models: facet options, the dish detail panel and map
//! markers.
//!
//! Pure builders over the read-only catalog. The "no selection" and
//! "no places" states are explicit, always-renderable values rather than
//! an absent panel.

use ahash::AHashSet;
use serde::Serialize;

use crate::data::DishCatalog;
use crate::recommend::{build_table, RecommendationOutcome};
use crate::types::{Dish, DietaryFlag, GeoPoint, Season};

/// Prompt shown while no dish is selected.
pub const NO_SELECTION_PROMPT: &str = "Please select a dish on the map";

/// Text shown when a dish has no recommendations.
pub const NO_PLACES_TEXT: &str = "This dish has no places";

/// Marker label for the user's own location.
pub const USER_LOCATION_LABEL: &str = "Current Location";

// ============================================================================
// Facet dropdown options
// ============================================================================

/// One dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOption {
    pub value: String,
    pub label: String,
}

/// Option lists for every facet dropdown, derived once from the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct FacetOptions {
    /// Unique prefectures in first-occurrence order.
    pub prefectures: Vec<FacetOption>,
    /// Seasons in canonical order, restricted to values present.
    pub seasons: Vec<FacetOption>,
    /// Types, sorted alphabetically.
    pub types: Vec<FacetOption>,
    /// The fixed dietary vocabulary.
    pub dietary: Vec<FacetOption>,
    /// Every dish name, in collection order, for the search dropdown.
    pub dish_names: Vec<String>,
}

impl FacetOptions {
    pub fn from_catalog(catalog: &DishCatalog) -> Self {
        let dishes = catalog.dishes();

        let mut seen = AHashSet::new();
        let prefectures = dishes
            .iter()
            .filter_map(|d| d.prefecture.as_deref())
            .filter(|p| seen.insert(p.to_string()))
            .map(|p| FacetOption { value: p.to_string(), label: p.to_string() })
            .collect();

        let present: AHashSet<Season> = dishes.iter().filter_map(|d| d.seasonality).collect();
        let seasons = Season::canonical_order()
            .iter()
            .filter(|s| present.contains(s))
            .map(|s| FacetOption {
                value: format!("{:?}", s),
                label: s.label().to_string(),
            })
            .collect();

        let mut types: Vec<String> = dishes
            .iter()
            .filter_map(|d| d.dish_type.clone())
            .collect::<AHashSet<_>>()
            .into_iter()
            .collect();
        types.sort();
        let types = types
            .into_iter()
            .map(|t| FacetOption { label: t.clone(), value: t })
            .collect();

        let dietary = DietaryFlag::all()
            .iter()
            .map(|f| FacetOption {
                value: f.column().to_string(),
                label: f.label().to_string(),
            })
            .collect();

        let dish_names = dishes.iter().map(|d| d.dish_name.clone()).collect();

        Self { prefectures, seasons, types, dietary, dish_names }
    }
}

// ============================================================================
// Dish detail panel
// ============================================================================

/// The right-hand panel, always renderable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PanelView {
    /// Nothing selected yet; render [`NO_SELECTION_PROMPT`].
    NoSelection,
    Dish(DishPanel),
}

/// Detail view for a selected dish.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DishPanel {
    pub dish_name: String,
    pub history: Option<String>,
    pub main_ingredients: Option<String>,
    pub image_url: Option<String>,
    /// Table rows, or the explicit no-places state
    /// (render [`NO_PLACES_TEXT`]).
    pub recommendations: RecommendationOutcome,
}

/// Build the panel for an optional selection. An unresolvable name falls
/// back to the no-selection state rather than an undefined panel.
pub fn build_panel(
    catalog: &DishCatalog,
    selected_dish: Option<&str>,
    reference_point: Option<GeoPoint>,
) -> PanelView {
    let Some(dish) = selected_dish.and_then(|name| catalog.dish(name)) else {
        return PanelView::NoSelection;
    };

    PanelView::Dish(DishPanel {
        dish_name: dish.dish_name.clone(),
        history: dish.history.clone(),
        main_ingredients: dish.main_ingredients.clone(),
        image_url: dish.image_url.clone(),
        recommendations: build_table(dish, catalog, reference_point),
    })
}

// ============================================================================
// Map markers
// ============================================================================

/// One marker on the dish map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub label: String,
    pub lat: f64,
    pub lon: f64,
}

/// Marker set for the current filter result plus the optional user marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub markers: Vec<MapMarker>,
    pub user: Option<MapMarker>,
}

/// Build map markers from a filtered candidate set. Dishes without a
/// complete centroid are skipped.
pub fn map_view(filtered: &[&Dish], reference_point: Option<GeoPoint>) -> MapView {
    let markers = filtered
        .iter()
        .filter_map(|dish| {
            let (Some(lat), Some(lon)) = (dish.area_lat, dish.area_lon) else {
                return None;
            };
            Some(MapMarker { label: dish.dish_name.clone(), lat, lon })
        })
        .collect();

    let user = reference_point.map(|p| MapMarker {
        label: USER_LOCATION_LABEL.to_string(),
        lat: p.lat,
        lon: p.lon,
    });

    MapView { markers, user }
}
