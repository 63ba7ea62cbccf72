//! Dish Atlas core computation layer.
//!
//! Turns two read-only tabular collections (dishes, places) into the
//! display-ready products of a regional-cuisine map UI:
//! - a filtered candidate set (`filter`)
//! - a distance-annotated, tier-ranked recommendation table (`recommend`)
//! - a self-scaling nutrient radar profile (`nutrition`)
//! - facet options, dish panel and map markers (`panel`)
//!
//! Module layout:
//! - `data`: CSV loading with Polars, places-list parsing, join index
//! - `types`: row types and display vocabularies
//! - `geo`: great-circle distance with an explicit unknown sentinel
//! - `filter`: facet filter engine
//! - `recommend`: recommendation table builder and column sort
//! - `nutrition`: adaptive nutrient scale selection
//! - `panel`: presentation view models
//!
//! Everything downstream of `data` is a pure, synchronous function of its
//! inputs; the loaded catalog is immutable for the lifetime of the process
//! and safe to share across threads without coordination.

pub mod data;
pub mod filter;
pub mod geo;
pub mod nutrition;
pub mod panel;
pub mod recommend;
pub mod types;

// Re-export commonly used types
pub use data::{parse_places_list, CatalogError, DishCatalog};
pub use filter::DishFilter;
pub use geo::{distance_between, distance_km, Distance};
pub use nutrition::{scale, select_band, Nutrient, NutrientScale, ScaleBand};
pub use panel::{build_panel, map_view, FacetOptions, PanelView};
pub use recommend::{build_table, sort_rows, RecommendationOutcome, RecommendationRow, SortKey};
pub use types::{
    Dish, DietaryFlag, DietaryFlags, GeoPoint, Nutrients, Place, PriceLevel, RatingBand, Season,
};
