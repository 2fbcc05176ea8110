use std::cell::Cell;
use std::hint::black_box;
use std::rc::Rc;

use barchart_rs::core::{BarStyle, BoxSize, DataPoint, LinearScale, compute_bar_geometry};
use barchart_rs::render::SvgRenderer;
use barchart_rs::sizing::ContainerElement;
use barchart_rs::{BarChart, BarChartConfig};
use criterion::{Criterion, criterion_group, criterion_main};

struct FixedContainer {
    size: Cell<BoxSize>,
}

impl ContainerElement for FixedContainer {
    fn bounding_box(&self) -> Option<BoxSize> {
        Some(self.size.get())
    }
}

fn generated_rows(count: usize) -> Vec<DataPoint> {
    (0..count)
        .map(|i| {
            let row = DataPoint::new().with("name", format!("c{i}"));
            if i % 97 == 0 {
                row.with("value", "n/a")
            } else {
                row.with("value", (i as f64 * 0.37).sin() * 500.0 + 250.0)
            }
        })
        .collect()
}

fn bench_linear_scale_map_and_ticks(c: &mut Criterion) {
    let scale = LinearScale::new(0.0, 10_000.0, 1_080.0, 0.0).expect("valid scale");

    c.bench_function("linear_scale_map_invert", |b| {
        b.iter(|| {
            let px = scale.map(black_box(4_321.123));
            let _ = scale.invert(px);
        })
    });

    c.bench_function("linear_scale_ticks_10", |b| {
        b.iter(|| {
            let _ = black_box(scale).ticks(black_box(10));
        })
    });
}

fn bench_bar_geometry_10k(c: &mut Criterion) {
    let rows = generated_rows(10_000);
    let style = BarStyle::default();

    c.bench_function("bar_geometry_10k", |b| {
        b.iter(|| {
            let _ = compute_bar_geometry(
                black_box(&rows),
                "name",
                "value",
                black_box(BoxSize::new(1_850.0, 1_020.0)),
                &style,
            );
        })
    });
}

fn bench_svg_render_500(c: &mut Criterion) {
    let container: Rc<dyn ContainerElement> = Rc::new(FixedContainer {
        size: Cell::new(BoxSize::new(1_600.0, 900.0)),
    });
    let config = BarChartConfig::new("name", "value").with_data(generated_rows(500));
    let mut chart = BarChart::new(config, Some(container)).expect("valid config");
    chart.recompute();
    let mut renderer = SvgRenderer::new();

    c.bench_function("bar_chart_svg_render_500", |b| {
        b.iter(|| {
            chart.render(&mut renderer).expect("svg render should succeed");
            black_box(renderer.document().len());
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_map_and_ticks,
    bench_bar_geometry_10k,
    bench_svg_render_500
);
criterion_main!(benches);
