//! Facet filter engine.
//!
//! Narrows the dish collection by zero or more independent facets. Every
//! facet is optional (open world default); active facets AND together.
//! The facets operate on independent columns, so evaluation order never
//! changes the result.

use ahash::AHashSet;
use rayon::prelude::*;
use smallvec::SmallVec;

use crate::types::{Dish, DietaryFlag, Season};

/// One filter invocation's facet selections.
///
/// An empty set (or `None` dish name) imposes no constraint.
#[derive(Debug, Clone, Default)]
pub struct DishFilter {
    pub prefectures: AHashSet<String>,
    pub seasons: AHashSet<Season>,
    pub types: AHashSet<String>,
    /// A dish must satisfy every selected restriction (logical AND).
    pub dietary: SmallVec<[DietaryFlag; 7]>,
    /// Exact-identifier narrowing for the "jump to dish" case.
    pub dish_name: Option<String>,
}

impl DishFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefectures<I, S>(mut self, prefectures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefectures = prefectures.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_seasons<I: IntoIterator<Item = Season>>(mut self, seasons: I) -> Self {
        self.seasons = seasons.into_iter().collect();
        self
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_dietary<I: IntoIterator<Item = DietaryFlag>>(mut self, flags: I) -> Self {
        self.dietary = flags.into_iter().collect();
        self
    }

    pub fn with_dish_name<S: Into<String>>(mut self, name: S) -> Self {
        self.dish_name = Some(name.into());
        self
    }

    /// Whether one dish passes every active facet.
    pub fn matches(&self, dish: &Dish) -> bool {
        if !self.prefectures.is_empty() {
            match &dish.prefecture {
                Some(p) if self.prefectures.contains(p) => {}
                _ => return false,
            }
        }
        if !self.seasons.is_empty() {
            match dish.seasonality {
                Some(s) if self.seasons.contains(&s) => {}
                _ => return false,
            }
        }
        if !self.types.is_empty() {
            match &dish.dish_type {
                Some(t) if self.types.contains(t) => {}
                _ => return false,
            }
        }
        if !self.dietary.iter().all(|&flag| dish.dietary.has(flag)) {
            return false;
        }
        if let Some(name) = &self.dish_name {
            if dish.dish_name != *name {
                return false;
            }
        }
        true
    }

    /// Apply the filter, preserving input order. No match yields an empty
    /// collection, not an error.
    pub fn apply<'a>(&self, dishes: &'a [Dish]) -> Vec<&'a Dish> {
        dishes.par_iter().filter(|d| self.matches(d)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DietaryFlags;

    fn dish(name: &str, prefecture: &str, season: Season, kind: &str) -> Dish {
        Dish {
            dish_name: name.to_string(),
            prefecture: Some(prefecture.to_string()),
            seasonality: Some(season),
            dish_type: Some(kind.to_string()),
            ..Dish::default()
        }
    }

    fn sample() -> Vec<Dish> {
        let mut ramen = dish("Sapporo Ramen", "Hokkaido", Season::Winter, "noodles");
        ramen.dietary = DietaryFlags { no_nuts: true, ..DietaryFlags::default() };
        let mut soba = dish("Shinshu Soba", "Nagano", Season::AllSeason, "noodles");
        soba.dietary = DietaryFlags {
            vegetarian: true,
            no_seafood: true,
            no_nuts: true,
            ..DietaryFlags::default()
        };
        let jingisukan = dish("Jingisukan", "Hokkaido", Season::Summer, "grill");
        vec![ramen, soba, jingisukan]
    }

    #[test]
    fn test_open_world_default_keeps_everything() {
        let dishes = sample();
        assert_eq!(DishFilter::new().apply(&dishes).len(), dishes.len());
    }

    #[test]
    fn test_set_membership_facets() {
        let dishes = sample();
        let filter = DishFilter::new().with_prefectures(["Hokkaido"]);
        let names: Vec<_> = filter.apply(&dishes).iter().map(|d| d.dish_name.as_str()).collect();
        assert_eq!(names, ["Sapporo Ramen", "Jingisukan"]);
    }

    #[test]
    fn test_facets_and_together() {
        let dishes = sample();
        let filter = DishFilter::new()
            .with_prefectures(["Hokkaido"])
            .with_types(["noodles"]);
        let result = filter.apply(&dishes);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].dish_name, "Sapporo Ramen");
    }

    #[test]
    fn test_dietary_all_flags_required() {
        let dishes = sample();
        let one = DishFilter::new().with_dietary([DietaryFlag::NoNuts]);
        assert_eq!(one.apply(&dishes).len(), 2);

        let both = DishFilter::new().with_dietary([DietaryFlag::NoNuts, DietaryFlag::Vegetarian]);
        let result = both.apply(&dishes);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].dish_name, "Shinshu Soba");
    }

    #[test]
    fn test_exact_dish_name() {
        let dishes = sample();
        let jump = DishFilter::new().with_dish_name("Jingisukan");
        let result = jump.apply(&dishes);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].dish_name, "Jingisukan");

        // An exact name outside the other facets' survivors yields nothing.
        let conflicting = DishFilter::new()
            .with_types(["noodles"])
            .with_dish_name("Jingisukan");
        assert!(conflicting.apply(&dishes).is_empty());
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let dishes = sample();
        let filter = DishFilter::new().with_prefectures(["Okinawa"]);
        assert!(filter.apply(&dishes).is_empty());
    }

    #[test]
    fn test_idempotence() {
        let dishes = sample();
        let filter = DishFilter::new()
            .with_prefectures(["Hokkaido"])
            .with_seasons([Season::Winter]);
        let once: Vec<String> = filter
            .apply(&dishes)
            .iter()
            .map(|d| d.dish_name.clone())
            .collect();
        let survivors: Vec<Dish> = filter.apply(&dishes).into_iter().cloned().collect();
        let twice: Vec<String> = filter
            .apply(&survivors)
            .iter()
            .map(|d| d.dish_name.clone())
            .collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_commutativity() {
        let dishes = sample();
        let a = DishFilter::new()
            .with_prefectures(["Hokkaido"])
            .with_seasons([Season::Winter]);
        let b = DishFilter::new()
            .with_seasons([Season::Winter])
            .with_prefectures(["Hokkaido"]);
        let names =
            |f: &DishFilter| f.apply(&dishes).iter().map(|d| d.dish_name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&a), names(&b));
    }
}
