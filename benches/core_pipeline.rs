//! Benchmarks for the per-interaction hot paths: facet filtering across
//! the whole dish collection and nutrient scale selection per dish.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dish_atlas_rust::{scale, Dish, DietaryFlags, DishFilter, Nutrients, Season};

fn synthetic_dishes(n: usize) -> Vec<Dish> {
    let prefectures = ["Hokkaido", "Tokyo", "Osaka", "Fukuoka", "Okinawa"];
    let types = ["noodles", "hot pot", "sweets", "grill", "rice"];
    let seasons = [
        Season::AllSeason,
        Season::Spring,
        Season::Summer,
        Season::Fall,
        Season::Winter,
    ];

    (0..n)
        .map(|i| Dish {
            dish_name: format!("dish-{i}"),
            prefecture: Some(prefectures[i % prefectures.len()].to_string()),
            seasonality: Some(seasons[i % seasons.len()]),
            dish_type: Some(types[i % types.len()].to_string()),
            dietary: DietaryFlags {
                vegetarian: i % 3 == 0,
                no_nuts: i % 2 == 0,
                ..DietaryFlags::default()
            },
            nutrients: Nutrients {
                calories: Some((i % 1200) as f64),
                protein: Some((i % 60) as f64),
                carbohydrates: Some((i % 200) as f64),
                fat: Some((i % 80) as f64),
                sodium: Some((i % 3000) as f64),
            },
            area_lat: Some(30.0 + (i % 15) as f64),
            area_lon: Some(128.0 + (i % 18) as f64),
            ..Dish::default()
        })
        .collect()
}

fn bench_facet_filter(c: &mut Criterion) {
    let dishes = synthetic_dishes(10_000);
    let filter = DishFilter::new()
        .with_prefectures(["Hokkaido", "Tokyo"])
        .with_seasons([Season::Winter, Season::AllSeason])
        .with_dietary([dish_atlas_rust::DietaryFlag::NoNuts]);

    c.bench_function("facet_filter_10k", |b| {
        b.iter(|| black_box(filter.apply(black_box(&dishes))))
    });
}

fn bench_scale_selector(c: &mut Criterion) {
    let dishes = synthetic_dishes(1_000);

    c.bench_function("nutrient_scale_1k", |b| {
        b.iter(|| {
            for dish in &dishes {
                black_box(scale(black_box(dish), false));
            }
        })
    });
}

criterion_group!(benches, bench_facet_filter, bench_scale_selector);
criterion_main!(benches);
