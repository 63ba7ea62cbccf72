//! Adaptive nutrient scale selection.
//!
//! Converts a dish's absolute nutrient values into percent-of-daily-target
//! figures and picks one of three radar-chart scaling regimes so that
//! low-magnitude dishes stay legible while typical dishes keep the familiar
//! "percent of daily value" framing. Values above 100% are flagged with
//! their true percentage and plotted capped at 100.

use serde::Serialize;

use crate::types::{Dish, Nutrients};

/// The five charted nutrients, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Nutrient {
    Calories,
    Protein,
    Carbohydrates,
    Fat,
    Sodium,
}

impl Nutrient {
    pub fn all() -> &'static [Nutrient] {
        &[
            Nutrient::Calories,
            Nutrient::Protein,
            Nutrient::Carbohydrates,
            Nutrient::Fat,
            Nutrient::Sodium,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Nutrient::Calories => "Calories",
            Nutrient::Protein => "Protein",
            Nutrient::Carbohydrates => "Carbohydrates",
            Nutrient::Fat => "Fat",
            Nutrient::Sodium => "Sodium",
        }
    }

    /// Fixed daily reference target.
    pub fn daily_target(&self) -> f64 {
        match self {
            Nutrient::Calories => 2000.0,      // kcal
            Nutrient::Protein => 50.0,         // g
            Nutrient::Carbohydrates => 275.0,  // g
            Nutrient::Fat => 70.0,             // g
            Nutrient::Sodium => 2300.0,        // mg
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Nutrient::Calories => "kcal",
            Nutrient::Protein | Nutrient::Carbohydrates | Nutrient::Fat => "g",
            Nutrient::Sodium => "mg",
        }
    }

    /// Absolute value for this nutrient in a dish's nutrient row.
    pub fn value_in(&self, nutrients: &Nutrients) -> Option<f64> {
        match self {
            Nutrient::Calories => nutrients.calories,
            Nutrient::Protein => nutrients.protein,
            Nutrient::Carbohydrates => nutrients.carbohydrates,
            Nutrient::Fat => nutrients.fat,
            Nutrient::Sodium => nutrients.sodium,
        }
    }
}

// ============================================================================
// Scale bands
// ============================================================================

/// One of three fixed chart scaling regimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScaleBand {
    Micro,  // max percent <= 30
    Small,  // max percent <= 45
    Normal, // everything else, and the standardized comparison scale
}

impl ScaleBand {
    /// Radial axis maximum for the chart.
    pub fn axis_max(&self) -> f64 {
        match self {
            ScaleBand::Micro => 32.0,
            ScaleBand::Small => 52.0,
            ScaleBand::Normal => 105.0,
        }
    }

    /// Grid line positions.
    pub fn grid_levels(&self) -> &'static [f64] {
        match self {
            ScaleBand::Micro => &[5.0, 10.0, 15.0, 20.0, 25.0, 30.0],
            ScaleBand::Small => &[10.0, 20.0, 30.0, 40.0, 50.0],
            ScaleBand::Normal => &[20.0, 40.0, 60.0, 80.0, 100.0],
        }
    }

    /// Fixed color identity (presentation constant, not computed).
    pub fn line_color(&self) -> &'static str {
        match self {
            ScaleBand::Micro => "#2a9d8f",
            ScaleBand::Small => "#e9c46a",
            ScaleBand::Normal => "#e76f51",
        }
    }

    pub fn fill_color(&self) -> &'static str {
        match self {
            ScaleBand::Micro => "rgba(42, 157, 143, 0.35)",
            ScaleBand::Small => "rgba(233, 196, 106, 0.35)",
            ScaleBand::Normal => "rgba(231, 111, 81, 0.35)",
        }
    }

    /// Human-readable caption shown under the chart.
    pub fn caption(&self) -> &'static str {
        match self {
            ScaleBand::Micro => "Zoomed view: all values within 30% of daily targets",
            ScaleBand::Small => "Zoomed view: all values within 45% of daily targets",
            ScaleBand::Normal => "Percent of daily value",
        }
    }
}

/// Ordered band thresholds, smallest first, first match wins.
/// Anything above the last upper bound falls into the normal band.
const BAND_CUTOFFS: &[(f64, ScaleBand)] = &[(30.0, ScaleBand::Micro), (45.0, ScaleBand::Small)];

/// Pick the band for a maximum percentage. `standardize` forces the normal
/// band so dishes share a uniform comparison scale.
pub fn select_band(max_percent: f64, standardize: bool) -> ScaleBand {
    if standardize {
        return ScaleBand::Normal;
    }
    for &(upper_bound, band) in BAND_CUTOFFS {
        if max_percent <= upper_bound {
            return band;
        }
    }
    ScaleBand::Normal
}

// ============================================================================
// Scale computation
// ============================================================================

/// Percent of daily target for one nutrient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NutrientPercent {
    pub nutrient: Nutrient,
    pub percent: f64,
}

/// A nutrient that exceeds 100% of its daily target. The flagged percent
/// is the true uncapped value; only the plotted value is clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExcessFlag {
    pub nutrient: Nutrient,
    pub percent: f64,
}

/// Chart geometry and annotations for one dish.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientScale {
    /// True percentages, one per nutrient in [`Nutrient::all`] order.
    pub percentages: Vec<NutrientPercent>,
    /// Values actually drawn; capped at 100 in the normal band.
    pub plotted: Vec<f64>,
    pub band: ScaleBand,
    pub axis_max: f64,
    pub grid_levels: &'static [f64],
    pub flagged_excess: Vec<ExcessFlag>,
}

/// Round to one decimal place.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Percent of a daily target, missing values treated as 0.
fn percent_of_target(value: Option<f64>, target: f64) -> f64 {
    round1(value.unwrap_or(0.0).max(0.0) / target * 100.0)
}

/// Compute the scale for one dish. Pure function of the dish's five
/// nutrient fields plus the `standardize` flag.
pub fn scale(dish: &Dish, standardize: bool) -> NutrientScale {
    let percentages: Vec<NutrientPercent> = Nutrient::all()
        .iter()
        .map(|&nutrient| NutrientPercent {
            nutrient,
            percent: percent_of_target(nutrient.value_in(&dish.nutrients), nutrient.daily_target()),
        })
        .collect();

    let max_percent = percentages
        .iter()
        .map(|p| p.percent)
        .fold(0.0_f64, f64::max);

    let band = select_band(max_percent, standardize);

    let mut flagged_excess = Vec::new();
    let plotted = percentages
        .iter()
        .map(|p| {
            if band == ScaleBand::Normal && p.percent > 100.0 {
                flagged_excess.push(ExcessFlag { nutrient: p.nutrient, percent: p.percent });
                100.0
            } else {
                p.percent
            }
        })
        .collect();

    NutrientScale {
        percentages,
        plotted,
        band,
        axis_max: band.axis_max(),
        grid_levels: band.grid_levels(),
        flagged_excess,
    }
}
