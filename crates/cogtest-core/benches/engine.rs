use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cogtest_core::config::AssessmentConfig;
use cogtest_core::hashing::{verify, AnswerKey, NormalizationMode};
use cogtest_core::model::{Item, ItemKind, Response};
use cogtest_core::plan::{assemble_plan, PlanVariant};
use cogtest_core::{generate_arithmetic_section, generate_language_section, grade_section};

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let now = Utc::now();

    group.bench_function("arithmetic_section", |b| {
        b.iter(|| generate_arithmetic_section(black_box("bench-seed")))
    });

    group.bench_function("sectioned_plan", |b| {
        let config = AssessmentConfig::default();
        b.iter(|| assemble_plan(black_box("bench-seed"), &config, now))
    });

    group.bench_function("hashed_plan_with_coding", |b| {
        let config = AssessmentConfig {
            variant: PlanVariant::Hashed,
            includes_coding: true,
            ..AssessmentConfig::default()
        };
        b.iter(|| assemble_plan(black_box("bench-seed"), &config, now))
    });

    group.finish();
}

fn bench_grading(c: &mut Criterion) {
    let mut group = c.benchmark_group("grade");

    let arith = generate_arithmetic_section("bench-seed");
    let echoes: Vec<Response> = arith
        .items
        .iter()
        .filter_map(|item| match item {
            Item::Arith(a) => Some(Response::raw(&a.id, ItemKind::Arith, &a.expected)),
            _ => None,
        })
        .collect();
    group.bench_function("arithmetic_echo", |b| {
        b.iter(|| grade_section(black_box(&arith), black_box(&echoes)))
    });

    let lang = generate_language_section("bench-seed");
    let essay = "I think the harvest matters because it shapes how people plan their days. \
        Many neighbors noticed the compost during the spring season.";
    let writing = vec![Response::text(
        "lang-microwrite-0",
        ItemKind::Microwrite,
        essay,
    )];
    group.bench_function("language_writing", |b| {
        b.iter(|| grade_section(black_box(&lang), black_box(&writing)))
    });

    let key = AnswerKey::seal("12.3456".into(), NormalizationMode::NumericRounded, Some(4));
    group.bench_function("verify_hashed", |b| {
        b.iter(|| verify(black_box("12.3456"), black_box(&key)))
    });

    group.finish();
}

criterion_group!(benches, bench_generation, bench_grading);
criterion_main!(benches);
