//! Benchmark for diamond-square synthesis.
//!
//! TARGET: 1025x1025 heightfield in under 50 ms
//!
//! Run with: cargo bench --package relief_procedural --bench synthesis_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use relief_procedural::{diamond_square, ControlGrid, GaussianNoise, ScriptedNoise, SynthesisParams};

fn control_grid(resolution_exponent: u32) -> ControlGrid {
    let heights = (0..25).map(|i| (i % 7) as f32 * 2.0).collect();
    ControlGrid::new(2, resolution_exponent, heights).expect("valid control grid")
}

fn benchmark_resolutions(c: &mut Criterion) {
    let params = SynthesisParams::default();
    let mut group = c.benchmark_group("diamond_square");
    group.sample_size(20);

    for exponent in [6u32, 8, 10] {
        let control = control_grid(exponent);
        let cells = (control.resolution() * control.resolution()) as u64;
        group.throughput(Throughput::Elements(cells));
        group.bench_with_input(BenchmarkId::from_parameter(control.resolution()), &control, |b, control| {
            b.iter(|| black_box(diamond_square(control, &params, GaussianNoise::seeded(42))));
        });
    }

    group.finish();
}

fn benchmark_noise_cost(c: &mut Criterion) {
    let control = control_grid(9);

    // Same grid with free noise isolates the cost of the passes themselves
    c.bench_function("diamond_square_513_scripted", |b| {
        b.iter(|| {
            black_box(diamond_square(
                &control,
                &SynthesisParams::noiseless(),
                ScriptedNoise::default(),
            ))
        });
    });
}

criterion_group!(benches, benchmark_resolutions, benchmark_noise_cost);
criterion_main!(benches);
