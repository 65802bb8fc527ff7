// Benchmarks for resolution bookkeeping
//
// Measures the pure work around each resolution attempt: building target
// descriptors, rendering candidate selectors, comparing snapshots, and the
// overhead of a bounded wait whose probe is ready immediately.

use criterion::{Criterion, criterion_group, criterion_main};
use landing_harness::snapshot::{Probe, Snapshot, expect_changed, expect_unchanged};
use landing_harness::wait::poll_until;
use landing_harness::{Strategy, TargetDescriptor, landing};
use std::time::Duration;

fn benchmark_selector_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("selector_rendering");

    group.bench_function("next_slide_selectors", |b| {
        let target = landing::next_slide();
        b.iter(|| std::hint::black_box(target.selectors()));
    });

    group.bench_function("scoped_css_selector", |b| {
        let strategy = Strategy::has_icon("button", "chevron-right").within("#testimonials");
        b.iter(|| std::hint::black_box(strategy.css_selector()));
    });

    group.bench_function("build_descriptor", |b| {
        b.iter(|| {
            let target = TargetDescriptor::builder("next-slide")
                .candidate(Strategy::tagged_class_fragment("button", "carousel-next"))
                .candidate(Strategy::has_icon("button", "chevron-right"))
                .candidate(Strategy::aria_label("button", "Next"))
                .candidate(Strategy::text("button", "Next"))
                .build();
            std::hint::black_box(target)
        });
    });

    group.bench_function("landing_catalog", |b| {
        b.iter(|| {
            let targets = [
                landing::theme_toggle(),
                landing::carousel_controls(),
                landing::subject_select(),
                landing::subject_options(),
                landing::submit_button(),
            ];
            std::hint::black_box(targets)
        });
    });

    group.finish();
}

fn benchmark_snapshot_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_comparison");

    let before = Snapshot::new(
        Probe::Style,
        Some("transform: translate3d(0px, 0px, 0px);".to_string()),
    );
    let after = Snapshot::new(
        Probe::Style,
        Some("transform: translate3d(-426.667px, 0px, 0px);".to_string()),
    );

    group.bench_function("expect_changed", |b| {
        b.iter(|| std::hint::black_box(expect_changed(&before, &after).is_ok()));
    });

    // Failure path formats both values into the error
    group.bench_function("expect_unchanged_failure", |b| {
        b.iter(|| std::hint::black_box(expect_unchanged(&before, &after).is_err()));
    });

    group.finish();
}

fn benchmark_bounded_wait(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("Failed to build runtime");

    c.bench_function("poll_until_ready", |b| {
        b.iter(|| {
            runtime.block_on(async {
                let outcome =
                    poll_until(Duration::from_secs(1), Duration::from_millis(10), || async {
                        Ok(Some(()))
                    })
                    .await;
                std::hint::black_box(outcome)
            })
        });
    });
}

criterion_group!(
    benches,
    benchmark_selector_rendering,
    benchmark_snapshot_comparison,
    benchmark_bounded_wait
);
criterion_main!(benches);
