//! Benchmarks for the sampling hot path
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mpu60x0_logger::backend::simulated::generate;
use mpu60x0_logger::backend::SimulatedBackend;
use mpu60x0_logger::session::{
    PipelineSettings, RecordFormat, RecordWriter, SamplePipeline, SampleRecord,
};
use mpu60x0_logger::types::{AccelerationRange, AngularSpeedRange, RangeConfiguration};
use mpu60x0_logger::Device;

fn bench_generator(c: &mut Criterion) {
    let mut group = c.benchmark_group("generator");
    group.throughput(Throughput::Elements(1));

    for angular_speed in [false, true] {
        let ranges = RangeConfiguration::new(AccelerationRange::G8, AngularSpeedRange::Dps1000);
        group.bench_with_input(
            BenchmarkId::new("generate", if angular_speed { "with_gyro" } else { "accel_only" }),
            &angular_speed,
            |b, &angular_speed| {
                let mut n = 0u32;
                b.iter(|| {
                    n = n.wrapping_add(1);
                    black_box(generate(black_box(n), ranges, angular_speed))
                });
            },
        );
    }

    group.finish();
}

fn bench_device_read(c: &mut Criterion) {
    let mut device = match Device::new(0x68, Box::new(SimulatedBackend::new())) {
        Ok(device) => device,
        Err(e) => panic!("device creation failed: {}", e),
    };

    c.bench_function("device_read_data", |b| {
        b.iter(|| {
            let _ = device.read_data();
            black_box(device.get_acceleration())
        });
    });
}

fn bench_record_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_formatting");
    let record = SampleRecord::new([1.25, -1.25, 5.0], [123.4, -56.7, 8.9], 20.84);

    group.bench_function("text", |b| b.iter(|| black_box(record.to_line())));
    group.bench_function("json", |b| b.iter(|| black_box(record.to_json_line())));

    group.finish();
}

fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");

    for size in [100u32, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let buffer = Vec::with_capacity(64 * size as usize);
                let mut writer = RecordWriter::new(buffer, RecordFormat::Text);
                let mut pipeline = SamplePipeline::new(PipelineSettings {
                    sample_count: size,
                    ..Default::default()
                });
                black_box(pipeline.run(Box::new(SimulatedBackend::new()), &mut writer).is_ok())
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_generator,
    bench_device_read,
    bench_record_formatting,
    bench_session
);
criterion_main!(benches);
