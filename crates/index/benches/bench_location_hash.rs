use std::hint::black_box;
use std::time::Instant;

use glam::Vec3;
use lochash_index::{LocationHash, ToCoordinate};
use tracing_subscriber::EnvFilter;

type Bodies = LocationHash<16, f32, 3, u32>;

fn make_positions(count: usize, spacing: f32) -> Vec<Vec3> {
    let side = (count as f32).cbrt().ceil() as usize;
    (0..count)
        .map(|i| {
            let x = (i % side) as f32 * spacing;
            let y = ((i / side) % side) as f32 * spacing;
            let z = (i / (side * side)) as f32 * spacing;
            Vec3::new(x, y, z)
        })
        .collect()
}

fn make_index(positions: &[Vec3]) -> Bodies {
    let mut index = Bodies::new();
    for (id, position) in positions.iter().enumerate() {
        index.add_object(id as u32, position.to_coordinate());
    }
    index
}

fn bench_add(count: usize, iterations: usize) {
    let positions = make_positions(count, 4.0);

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(make_index(black_box(&positions)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  add ({count} bodies, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_relocate(count: usize, iterations: usize) {
    let mut positions = make_positions(count, 4.0);
    let mut index = make_index(&positions);
    let step = Vec3::new(5.0, 0.0, -3.0);

    let start = Instant::now();
    for i in 0..iterations {
        // alternate direction so bodies stay inside the populated volume
        let delta = if i % 2 == 0 { step } else { -step };
        for (id, position) in positions.iter_mut().enumerate() {
            let next = *position + delta;
            if index.relocate_object(id as u32, position.to_coordinate(), next.to_coordinate()) {
                *position = next;
            }
        }
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  relocate ({count} bodies, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_bounding_box(count: usize, half_width: f32, iterations: usize) {
    let index = make_index(&make_positions(count, 4.0));
    let center = Vec3::splat(20.0);
    let min = (center - half_width).to_coordinate();
    let max = (center + half_width).to_coordinate();

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(index.query_bounding_box(black_box(min), black_box(max)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  bounding box ({count} bodies, half-width {half_width}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_within_distance(count: usize, radius: f32, iterations: usize) {
    let index = make_index(&make_positions(count, 4.0));
    let center = Vec3::splat(20.0).to_coordinate();

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(index.query_within_distance(black_box(center), black_box(radius)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  within distance ({count} bodies, r={radius}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn main() {
    // RUST_LOG=lochash_index=trace shows bucket churn
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    println!("=== Location Hash Benchmarks ===\n");

    println!("Add:");
    bench_add(1000, 100);
    bench_add(10000, 10);
    bench_add(100000, 1);

    println!("\nRelocate:");
    bench_relocate(1000, 100);
    bench_relocate(10000, 10);

    println!("\nBounding box query:");
    bench_bounding_box(10000, 8.0, 10000);
    bench_bounding_box(10000, 32.0, 1000);
    bench_bounding_box(10000, 1000.0, 100);

    println!("\nDistance query:");
    bench_within_distance(10000, 8.0, 10000);
    bench_within_distance(10000, 32.0, 1000);

    println!("\n=== Done ===");
}
