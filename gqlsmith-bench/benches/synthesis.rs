//! Class synthesis benchmarks.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use gqlsmith_bench::fixtures::sample_metadata;
use gqlsmith_codegen::{ClassSynthesizer, Config, TypeResolver};
use gqlsmith_schema::{FieldAlternative, TypeCategory};
use std::hint::black_box;

fn benchmark_synthesize_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesize_model");
    let config = Config::new();

    for fields in [8, 64] {
        let metadata = sample_metadata(4, fields);
        let synthesizer = ClassSynthesizer::new(&metadata, &config);
        let model = &metadata.models[3];

        group.throughput(Throughput::Elements(model.fields.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(fields), model, |b, model| {
            b.iter(|| synthesizer.synthesize_model(black_box(model)))
        });
    }

    group.finish();
}

fn benchmark_synthesize_filter(c: &mut Criterion) {
    let config = Config::new();
    let metadata = sample_metadata(4, 32);
    let synthesizer = ClassSynthesizer::new(&metadata, &config);
    let shape = &metadata.input_shapes[7];

    c.bench_function("synthesize_filter_input", |b| {
        b.iter(|| synthesizer.synthesize_input(black_box(shape)))
    });
}

fn benchmark_resolve(c: &mut Criterion) {
    let alternatives = [
        FieldAlternative::new("IntFilter", TypeCategory::PlainObject),
        FieldAlternative::scalar("Int"),
        FieldAlternative::new("EntityRelationFilter", TypeCategory::RelationFilterObject),
        FieldAlternative::new("EntityWhereInput", TypeCategory::WholeEntityFilterObject),
        FieldAlternative::scalar(FieldAlternative::NULL_MARKER),
    ];

    c.bench_function("resolve_alternatives", |b| {
        b.iter(|| TypeResolver::resolve(black_box(&alternatives)))
    });
}

criterion_group!(
    benches,
    benchmark_synthesize_model,
    benchmark_synthesize_filter,
    benchmark_resolve
);
criterion_main!(benches);
