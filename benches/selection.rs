use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fbmn_export::prelude::*;

/// Spectra spread over `num_features` features, several per feature
fn create_spectra(num_spectra: usize, num_features: usize, peaks_per_spectrum: usize) -> SpectrumCollection {
    (0..num_spectra)
        .map(|i| {
            let mut builder = SpectrumBuilder::new(150.0 + (i % 500) as f64 * 0.1, i as f64 * 0.5)
                .feature(format!("FT{:05}", i % num_features));
            for j in 0..peaks_per_spectrum {
                builder = builder.add_peak(50.0 + j as f64, ((i * 31 + j * 7) % 1000) as f64);
            }
            builder.build()
        })
        .collect()
}

fn create_table_inputs(num_features: usize) -> (FeatureSet, SampleIntensities) {
    let features = FeatureSet::from_features((0..num_features).map(|i| {
        Feature::new(
            format!("FT{:05}", i),
            ValueRange::spanning(150.0 + i as f64 * 0.01, 150.02 + i as f64 * 0.01),
            ValueRange::spanning(30.0, 40.0),
        )
    }))
    .unwrap();

    let samples: Vec<String> = (0..24).map(|s| format!("sample_{s:02}.mzML")).collect();
    let mut intensities = SampleIntensities::with_samples(samples.iter().cloned());
    for i in 0..num_features {
        for (s, sample) in samples.iter().enumerate() {
            let value = ((i + s) % 5 != 0).then_some((i * s) as f64);
            intensities.insert(format!("FT{:05}", i), sample.as_str(), value);
        }
    }
    (features, intensities)
}

/// Benchmark maximal-TIC representative selection
fn bench_representative_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("representative_selection");

    for num_spectra in [1_000, 10_000, 50_000] {
        let spectra = create_spectra(num_spectra, num_spectra / 4, 50);
        group.throughput(Throughput::Elements(num_spectra as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}spectra", num_spectra)),
            &spectra,
            |b, spectra| {
                let selector = RepresentativeSpectrumSelector::new();
                b.iter(|| black_box(selector.select(black_box(spectra))));
            },
        );
    }

    group.finish();
}

/// Benchmark feature table construction
fn bench_table_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_build");

    for num_features in [1_000, 10_000] {
        let (features, intensities) = create_table_inputs(num_features);
        group.throughput(Throughput::Elements(num_features as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}features", num_features)),
            &num_features,
            |b, _| {
                let builder = FeatureTableBuilder::new();
                b.iter(|| black_box(builder.build(&features, &intensities).unwrap()));
            },
        );
    }

    group.finish();
}

/// Benchmark the in-memory pipeline end to end
fn bench_pipeline_run(c: &mut Criterion) {
    let (features, intensities) = create_table_inputs(5_000);
    let spectra = create_spectra(20_000, 2_500, 50);
    let pipeline = ExportPipeline::default();

    c.bench_function("pipeline_run_5000features", |b| {
        b.iter(|| black_box(pipeline.run(&features, &intensities, &spectra).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_representative_selection,
    bench_table_build,
    bench_pipeline_run
);
criterion_main!(benches);
