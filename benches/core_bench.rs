use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ferguson_patch_editor::{EditorOptions, PatchCanvas};
use glam::Vec2;
use std::hint::black_box;

fn build_canvas(curve_resolution: u32) -> PatchCanvas {
    let mut options = EditorOptions::default();
    options.curve_resolution = curve_resolution;
    options.patch_resolution = curve_resolution;
    PatchCanvas::new(options, Vec2::new(800.0, 600.0)).expect("Canvas-Aufbau fehlgeschlagen")
}

fn bench_surface_eval(c: &mut Criterion) {
    let canvas = build_canvas(10);
    let patch = canvas.patch();

    c.bench_function("surface_eval_grid_32x32", |b| {
        b.iter(|| {
            let mut acc = Vec2::ZERO;
            for i in 0..32 {
                for j in 0..32 {
                    let u = i as f32 / 31.0;
                    let v = j as f32 / 31.0;
                    acc += patch.surface_point(black_box(u), black_box(v));
                }
            }
            black_box(acc)
        })
    });
}

fn bench_boundary_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("boundary_sampling");

    for &resolution in &[10u32, 100u32, 1000u32] {
        let canvas = build_canvas(resolution);
        group.bench_with_input(
            BenchmarkId::new("sample_boundaries", resolution),
            canvas.patch(),
            |b, patch| b.iter(|| black_box(patch.sample_boundaries().len())),
        );
    }

    group.finish();
}

fn bench_drag_hotpath(c: &mut Criterion) {
    c.bench_function("pointer_move_with_reprobe", |b| {
        let mut canvas = build_canvas(10);
        let p0 = canvas.patch().curve(0).p0();
        canvas.pointer_press(canvas.viewport().world_to_screen(p0));
        let targets: Vec<Vec2> = (0..16)
            .map(|i| {
                let offset = Vec2::new(0.01 * i as f32, -0.01 * i as f32);
                canvas.viewport().world_to_screen(p0 + offset)
            })
            .collect();

        b.iter(|| {
            for &target in &targets {
                canvas.pointer_move(black_box(target));
            }
            canvas.take_dirty_ranges().len()
        })
    });
}

criterion_group!(
    benches,
    bench_surface_eval,
    bench_boundary_sampling,
    bench_drag_hotpath
);
criterion_main!(benches);
