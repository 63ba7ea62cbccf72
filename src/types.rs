//! Shared row types and display vocabularies for the dish atlas.
//!
//! Both collections (dishes, places) are loaded once and never mutated;
//! every component takes read-only references to these rows.

use serde::Serialize;

/// One dish row. `dish_name` is the unique identifier.
#[derive(Debug, Clone, Default)]
pub struct Dish {
    pub dish_name: String,
    pub prefecture: Option<String>,
    pub area_name: Option<String>,
    /// Geographic centroid of the dish's home area.
    pub area_lat: Option<f64>,
    pub area_lon: Option<f64>,
    pub seasonality: Option<Season>,
    /// Free-form category string ("noodles", "hot pot", ...).
    pub dish_type: Option<String>,
    pub dietary: DietaryFlags,
    pub nutrients: Nutrients,
    /// Place identifiers, already parsed from the raw literal-list column.
    /// May reference places that do not resolve; those drop at join time.
    pub places: Vec<String>,
    pub history: Option<String>,
    pub main_ingredients: Option<String>,
    pub image_url: Option<String>,
}

/// One venue row. `id` joins against `Dish::places`.
#[derive(Debug, Clone, Default)]
pub struct Place {
    pub id: String,
    pub name: String,
    /// Star rating in [1, 5]; `None` means unrated, never coerced to 0.
    pub rating: Option<f64>,
    pub price_level: Option<PriceLevel>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub maps_uri: Option<String>,
}

/// Caller-supplied geographic location (e.g. from browser geolocation).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

// ============================================================================
// Seasonality
// ============================================================================

/// Fixed seasonality vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Season {
    AllSeason,
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// Canonical display order for the season facet dropdown.
    pub fn canonical_order() -> &'static [Season] {
        &[
            Season::AllSeason,
            Season::Spring,
            Season::Summer,
            Season::Fall,
            Season::Winter,
        ]
    }

    /// Parse a raw column value. Unrecognized strings map to `None`;
    /// the row is kept, it just never matches a season facet.
    pub fn parse(raw: &str) -> Option<Season> {
        match raw.trim().to_lowercase().as_str() {
            "all season" | "all-season" | "all_season" | "all seasons" => Some(Season::AllSeason),
            "spring" => Some(Season::Spring),
            "summer" => Some(Season::Summer),
            "fall" | "autumn" => Some(Season::Fall),
            "winter" => Some(Season::Winter),
            _ => None,
        }
    }

    /// Title-cased label for dropdown options.
    pub fn label(&self) -> &'static str {
        match self {
            Season::AllSeason => "All Season",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

// ============================================================================
// Dietary restrictions
// ============================================================================

/// The seven boolean dietary columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DietaryFlag {
    Vegan,
    Vegetarian,
    NoGluten,
    NoSeafood,
    NoPork,
    NoDairy,
    NoNuts,
}

impl DietaryFlag {
    pub fn all() -> &'static [DietaryFlag] {
        &[
            DietaryFlag::Vegan,
            DietaryFlag::Vegetarian,
            DietaryFlag::NoGluten,
            DietaryFlag::NoSeafood,
            DietaryFlag::NoPork,
            DietaryFlag::NoDairy,
            DietaryFlag::NoNuts,
        ]
    }

    /// Column name in the dishes table.
    pub fn column(&self) -> &'static str {
        match self {
            DietaryFlag::Vegan => "vegan",
            DietaryFlag::Vegetarian => "vegetarian",
            DietaryFlag::NoGluten => "no_gluten",
            DietaryFlag::NoSeafood => "no_seafood",
            DietaryFlag::NoPork => "no_pork",
            DietaryFlag::NoDairy => "no_dairy",
            DietaryFlag::NoNuts => "no_nuts",
        }
    }

    /// Human label for the facet dropdown.
    pub fn label(&self) -> &'static str {
        match self {
            DietaryFlag::Vegan => "Vegan",
            DietaryFlag::Vegetarian => "Vegetarian",
            DietaryFlag::NoGluten => "No Gluten",
            DietaryFlag::NoSeafood => "No Seafood",
            DietaryFlag::NoPork => "No Pork",
            DietaryFlag::NoDairy => "No Dairy",
            DietaryFlag::NoNuts => "No Nuts",
        }
    }

    /// Reverse lookup from a column name.
    pub fn from_column(name: &str) -> Option<DietaryFlag> {
        DietaryFlag::all().iter().copied().find(|f| f.column() == name)
    }
}

/// Dietary flags for one dish, from the seven boolean columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DietaryFlags {
    pub vegan: bool,
    pub vegetarian: bool,
    pub no_gluten: bool,
    pub no_seafood: bool,
    pub no_pork: bool,
    pub no_dairy: bool,
    pub no_nuts: bool,
}

impl DietaryFlags {
    /// Check whether one restriction is satisfied.
    pub fn has(&self, flag: DietaryFlag) -> bool {
        match flag {
            DietaryFlag::Vegan => self.vegan,
            DietaryFlag::Vegetarian => self.vegetarian,
            DietaryFlag::NoGluten => self.no_gluten,
            DietaryFlag::NoSeafood => self.no_seafood,
            DietaryFlag::NoPork => self.no_pork,
            DietaryFlag::NoDairy => self.no_dairy,
            DietaryFlag::NoNuts => self.no_nuts,
        }
    }
}

// ============================================================================
// Price tiers
// ============================================================================

/// Three-tier price vocabulary.
///
/// A tier string outside the vocabulary is preserved as `Unrecognized`
/// so the display layer can distinguish it from a missing value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PriceLevel {
    Inexpensive,
    Moderate,
    Expensive,
    Unrecognized(String),
}

impl PriceLevel {
    /// Parse a raw column value. Empty/whitespace means missing (`None`).
    pub fn parse(raw: &str) -> Option<PriceLevel> {
        let token = raw.trim();
        if token.is_empty() {
            return None;
        }
        match token.to_uppercase().as_str() {
            "PRICE_LEVEL_INEXPENSIVE" | "INEXPENSIVE" => Some(PriceLevel::Inexpensive),
            "PRICE_LEVEL_MODERATE" | "MODERATE" => Some(PriceLevel::Moderate),
            "PRICE_LEVEL_EXPENSIVE" | "EXPENSIVE" => Some(PriceLevel::Expensive),
            _ => Some(PriceLevel::Unrecognized(token.to_string())),
        }
    }

    /// Currency glyph for the recommendation table.
    pub fn glyph(&self) -> &str {
        match self {
            PriceLevel::Inexpensive => "¥",
            PriceLevel::Moderate => "¥¥",
            PriceLevel::Expensive => "¥¥¥",
            PriceLevel::Unrecognized(_) => "?",
        }
    }

    /// Rank used for column sorting; unrecognized tiers have no rank.
    pub fn rank(&self) -> Option<u8> {
        match self {
            PriceLevel::Inexpensive => Some(0),
            PriceLevel::Moderate => Some(1),
            PriceLevel::Expensive => Some(2),
            PriceLevel::Unrecognized(_) => None,
        }
    }
}

/// Display marker for an optional price tier.
/// Missing renders "unknown", distinct from the "?" unrecognized glyph.
pub fn price_display(level: Option<&PriceLevel>) -> &str {
    match level {
        Some(level) => level.glyph(),
        None => "unknown",
    }
}

// ============================================================================
// Rating bands
// ============================================================================

/// Three-band rating classification for table row coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RatingBand {
    Good, // >= 4.0
    Fair, // [3.0, 4.0)
    Poor, // < 3.0
}

impl RatingBand {
    /// Classify a rating. Unrated rows fall in no band and render neutral.
    pub fn classify(rating: Option<f64>) -> Option<RatingBand> {
        let r = rating?;
        if !r.is_finite() {
            return None;
        }
        Some(if r >= 4.0 {
            RatingBand::Good
        } else if r >= 3.0 {
            RatingBand::Fair
        } else {
            RatingBand::Poor
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            RatingBand::Good => "good",
            RatingBand::Fair => "fair",
            RatingBand::Poor => "poor",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            RatingBand::Good => "text-emerald-700 bg-emerald-50",
            RatingBand::Fair => "text-amber-700 bg-amber-50",
            RatingBand::Poor => "text-red-700 bg-red-50",
        }
    }
}

// ============================================================================
// Nutrients
// ============================================================================

/// Absolute nutrient values for one dish. Missing values stay `None`;
/// only the scale selector treats them as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Nutrients {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbohydrates: Option<f64>,
    pub fat: Option<f64>,
    pub sodium: Option<f64>,
}
