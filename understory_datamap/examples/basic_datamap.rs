// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit-testing a cursor against a sampled curve.
//!
//! Run:
//! - `cargo run -p understory_datamap --example basic_datamap`

use kurbo::{Point, Rect};
use understory_datamap::{
    BruteForceMapper, DataMapper, DataSorting, MapperConfig, PointArray, SortOrder,
    SubdivisionDataMapper, SubdivisionLineDataMapper,
};

fn main() {
    let curve: Vec<Point> = (0..20_000)
        .map(|i| {
            let t = f64::from(i) * 0.005;
            Point::new(t, (t * 0.7).sin() * 25.0 + (t * 3.1).cos() * 4.0)
        })
        .collect();
    let data = PointArray::from_points(&curve);
    let config = MapperConfig::default().with_points_per_cell(64);

    let mut mappers: Vec<(&str, Box<dyn DataMapper>)> = vec![
        ("brute force", Box::new(BruteForceMapper::new(config))),
        ("subdivision", Box::new(SubdivisionDataMapper::new(config))),
        ("subdivision line", Box::new(SubdivisionLineDataMapper::new(config))),
    ];

    let cursor = Point::new(42.0, (42.0_f64 * 0.7).sin() * 25.0 + (42.0_f64 * 3.1).cos() * 4.0);
    let radius = 0.25;
    let lasso = Rect::new(10.0, -5.0, 12.0, 5.0);

    for (name, mapper) in &mut mappers {
        if let Err(e) = mapper.set_data(&data, DataSorting::Ascending) {
            eprintln!("{name}: {e}");
            continue;
        }
        let near = mapper.points_near(&[cursor], radius);
        let hits = near
            .points
            .iter()
            .filter(|p| p.distance(cursor) <= radius)
            .count();
        println!(
            "{name:>16}: {:>6} candidates, {hits} within {radius} of the cursor, {} region rects",
            near.len(),
            near.region.len()
        );

        let inside = mapper.points_in_rect(lasso);
        let exact = inside.points.iter().filter(|p| lasso.contains(**p)).count();
        println!("{:>16}  {:>6} candidates, {exact} inside {lasso:?}", "", inside.len());

        mapper.set_sort_order(SortOrder::Descending);
        let flipped = mapper.points_in_rect(lasso);
        let exact_flipped = flipped.points.iter().filter(|p| lasso.contains(**p)).count();
        assert_eq!(exact, exact_flipped, "order flip changed the answer");
    }
}
