//! Data loading and management.
//!
//! Loads the dish and place tables from CSV with Polars into typed row
//! vectors plus a place join index. This is the only I/O in the crate;
//! both collections are immutable after loading and every downstream
//! component receives read-only references.
//!
//! The raw `places` column holds a bracketed literal list (`"[1, 2]"` or
//! `"['id-a', 'id-b']"`). It is parsed once here; a parse failure falls
//! back to an empty list so the join logic never sees the raw string.

use anyhow::{Context, Result};
use polars::prelude::*;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::types::{Dish, DietaryFlag, DietaryFlags, Nutrients, Place, PriceLevel, Season};

/// Schema-shaped loading failures.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("column '{column}' missing from {table}")]
    MissingColumn { column: String, table: &'static str },
    #[error("column '{column}' in {table} has an unusable dtype")]
    BadColumnType { column: String, table: &'static str },
}

const DISHES_TABLE: &str = "dishes";
const PLACES_TABLE: &str = "places";

/// Read-only holder for both collections, loaded once at startup.
pub struct DishCatalog {
    dishes: Vec<Dish>,
    places: Vec<Place>,
    /// Place ID -> index into `places`.
    place_index: FxHashMap<String, usize>,
}

impl DishCatalog {
    /// Load both tables from CSV files.
    pub fn load(dishes_csv: &str, places_csv: &str) -> Result<Self> {
        let dishes = load_dishes(dishes_csv)?;
        let places = load_places(places_csv)?;
        let catalog = Self::from_rows(dishes, places);
        tracing::info!(
            dishes = catalog.dishes.len(),
            places = catalog.places.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Build a catalog from already-typed rows (tests, alternative loaders).
    pub fn from_rows(dishes: Vec<Dish>, places: Vec<Place>) -> Self {
        let mut place_index = FxHashMap::default();
        for (idx, place) in places.iter().enumerate() {
            // First occurrence wins on duplicate IDs.
            place_index.entry(place.id.clone()).or_insert(idx);
        }
        Self { dishes, places, place_index }
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Resolve one place by identifier.
    pub fn place(&self, id: &str) -> Option<&Place> {
        self.place_index.get(id).map(|&idx| &self.places[idx])
    }

    /// Resolve one dish by its unique name.
    pub fn dish(&self, name: &str) -> Option<&Dish> {
        self.dishes.iter().find(|d| d.dish_name == name)
    }
}

// ============================================================================
// Places-list parsing
// ============================================================================

/// Parse the raw `places` literal-list column into identifiers.
///
/// Accepts JSON arrays and single-quoted literal syntax; integer tokens
/// normalize to their decimal string form. Anything unparsable yields an
/// empty list (documented fallback), never an error.
pub fn parse_places_list(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else { return Vec::new() };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if let Ok(values) = serde_json::from_str::<Vec<serde_json::Value>>(trimmed) {
        return values.iter().filter_map(id_token).collect();
    }

    // Literal syntax with single quotes; normalize and retry.
    let normalized = trimmed.replace('\'', "\"");
    if let Ok(values) = serde_json::from_str::<Vec<serde_json::Value>>(&normalized) {
        return values.iter().filter_map(id_token).collect();
    }

    tracing::debug!(raw = trimmed, "unparsable places list, treating as empty");
    Vec::new()
}

fn id_token(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// ============================================================================
// CSV loading
// ============================================================================

fn read_csv(path: &str) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.into()))
        .with_context(|| format!("Failed to create CSV reader: {}", path))?
        .finish()
        .with_context(|| format!("Failed to load CSV: {}", path))
}

fn column<'a>(df: &'a DataFrame, name: &str, table: &'static str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| CatalogError::MissingColumn { column: name.to_string(), table }.into())
}

/// String column as owned optional values (casts through String so
/// integer-typed ID columns normalize to their decimal form).
fn str_values(df: &DataFrame, name: &str, table: &'static str) -> Result<Vec<Option<String>>> {
    let cast = column(df, name, table)?
        .cast(&DataType::String)
        .map_err(|_| CatalogError::BadColumnType { column: name.to_string(), table })?;
    let ca = cast
        .str()
        .map_err(|_| CatalogError::BadColumnType { column: name.to_string(), table })?;
    Ok(ca
        .into_iter()
        .map(|v| v.map(|s| s.to_string()).filter(|s| !s.trim().is_empty()))
        .collect())
}

/// Numeric column as optional f64 (non-numeric cells become nulls).
fn f64_values(df: &DataFrame, name: &str, table: &'static str) -> Result<Vec<Option<f64>>> {
    let cast = column(df, name, table)?
        .cast(&DataType::Float64)
        .map_err(|_| CatalogError::BadColumnType { column: name.to_string(), table })?;
    let ca = cast
        .f64()
        .map_err(|_| CatalogError::BadColumnType { column: name.to_string(), table })?;
    Ok(ca.into_iter().collect())
}

/// Boolean flag column; nulls and unrecognized tokens are false.
fn bool_values(df: &DataFrame, name: &str, table: &'static str) -> Result<Vec<bool>> {
    let raw = str_values(df, name, table)?;
    Ok(raw
        .into_iter()
        .map(|v| {
            matches!(
                v.as_deref().map(str::trim),
                Some("true") | Some("True") | Some("TRUE") | Some("1") | Some("1.0")
            )
        })
        .collect())
}

fn load_dishes(path: &str) -> Result<Vec<Dish>> {
    let df = read_csv(path)?;
    let t = DISHES_TABLE;

    let names = str_values(&df, "dish_name", t)?;
    let prefectures = str_values(&df, "prefecture", t)?;
    let areas = str_values(&df, "area_name", t)?;
    let lats = f64_values(&df, "area_lat", t)?;
    let lons = f64_values(&df, "area_lon", t)?;
    let seasons = str_values(&df, "seasonality", t)?;
    let types = str_values(&df, "type", t)?;

    let flag_cols: Vec<Vec<bool>> = DietaryFlag::all()
        .iter()
        .map(|flag| bool_values(&df, flag.column(), t))
        .collect::<Result<_>>()?;

    let calories = f64_values(&df, "calories", t)?;
    let protein = f64_values(&df, "protein", t)?;
    let carbohydrates = f64_values(&df, "carbohydrates", t)?;
    let fat = f64_values(&df, "fat", t)?;
    let sodium = f64_values(&df, "sodium", t)?;

    let places = str_values(&df, "places", t)?;
    let histories = str_values(&df, "history", t)?;
    let ingredients = str_values(&df, "main_ingredients", t)?;
    let images = str_values(&df, "image_url", t)?;

    let mut dishes = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        // A row without an identifier cannot participate anywhere.
        let Some(dish_name) = names[i].clone() else { continue };

        dishes.push(Dish {
            dish_name,
            prefecture: prefectures[i].clone(),
            area_name: areas[i].clone(),
            area_lat: lats[i],
            area_lon: lons[i],
            seasonality: seasons[i].as_deref().and_then(Season::parse),
            dish_type: types[i].clone(),
            dietary: DietaryFlags {
                vegan: flag_cols[0][i],
                vegetarian: flag_cols[1][i],
                no_gluten: flag_cols[2][i],
                no_seafood: flag_cols[3][i],
                no_pork: flag_cols[4][i],
                no_dairy: flag_cols[5][i],
                no_nuts: flag_cols[6][i],
            },
            nutrients: Nutrients {
                calories: calories[i],
                protein: protein[i],
                carbohydrates: carbohydrates[i],
                fat: fat[i],
                sodium: sodium[i],
            },
            places: parse_places_list(places[i].as_deref()),
            history: histories[i].clone(),
            main_ingredients: ingredients[i].clone(),
            image_url: images[i].clone(),
        });
    }

    Ok(dishes)
}

fn load_places(path: &str) -> Result<Vec<Place>> {
    let df = read_csv(path)?;
    let t = PLACES_TABLE;

    let ids = str_values(&df, "id", t)?;
    let names = str_values(&df, "name", t)?;
    let ratings = f64_values(&df, "rating", t)?;
    let prices = str_values(&df, "price_level", t)?;
    let lats = f64_values(&df, "latitude", t)?;
    let lons = f64_values(&df, "longitude", t)?;
    let uris = str_values(&df, "googleMapsUri", t)?;

    let mut places = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let Some(id) = ids[i].clone() else { continue };

        places.push(Place {
            id,
            name: names[i].clone().unwrap_or_default(),
            rating: ratings[i].filter(|r| r.is_finite()),
            price_level: prices[i].as_deref().and_then(PriceLevel::parse),
            latitude: lats[i],
            longitude: lons[i],
            maps_uri: uris[i].clone(),
        });
    }

    Ok(places)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_places_list_variants() {
        assert_eq!(parse_places_list(Some("[1, 2]")), vec!["1", "2"]);
        assert_eq!(parse_places_list(Some("['a-1', 'b-2']")), vec!["a-1", "b-2"]);
        assert_eq!(parse_places_list(Some(r#"["x", "y"]"#)), vec!["x", "y"]);
        assert_eq!(parse_places_list(Some("[]")), Vec::<String>::new());
    }

    #[test]
    fn test_parse_places_list_fallback_to_empty() {
        assert_eq!(parse_places_list(None), Vec::<String>::new());
        assert_eq!(parse_places_list(Some("")), Vec::<String>::new());
        assert_eq!(parse_places_list(Some("not a list")), Vec::<String>::new());
        assert_eq!(parse_places_list(Some("[1, 2")), Vec::<String>::new());
    }

    #[test]
    fn test_join_index_lookup() {
        let catalog = DishCatalog::from_rows(
            vec![],
            vec![
                Place { id: "p1".into(), name: "First".into(), ..Place::default() },
                Place { id: "p2".into(), name: "Second".into(), ..Place::default() },
                // Duplicate ID: first occurrence wins.
                Place { id: "p1".into(), name: "Shadowed".into(), ..Place::default() },
            ],
        );
        assert_eq!(catalog.place("p1").map(|p| p.name.as_str()), Some("First"));
        assert_eq!(catalog.place("p2").map(|p| p.name.as_str()), Some("Second"));
        assert!(catalog.place("p9").is_none());
    }

    #[test]
    fn test_dish_lookup_by_name() {
        let catalog = DishCatalog::from_rows(
            vec![Dish { dish_name: "Ramen".into(), ..Dish::default() }],
            vec![],
        );
        assert!(catalog.dish("Ramen").is_some());
        assert!(catalog.dish("Udon").is_none());
    }

    #[test]
    #[ignore] // Requires data files to be present
    fn test_load_data() {
        let catalog = DishCatalog::load("data/all_dishes.csv", "data/all_places.csv")
            .expect("Failed to load catalog");
        assert!(!catalog.dishes().is_empty());
        assert!(!catalog.places().is_empty());
    }
}
