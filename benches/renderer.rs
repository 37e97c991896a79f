use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use floorplan_renderer::config::{Config, LayoutConfig};
use floorplan_renderer::dxf::write_dxf;
use floorplan_renderer::geometry::build_scene;
use floorplan_renderer::layout::compute_layout;
use floorplan_renderer::parser::parse_plan;
use floorplan_renderer::render::render_svg;
use floorplan_renderer::render_plan;
use std::hint::black_box;

/// A house with the usual public rooms and `bedrooms` bedroom/bath pairs.
fn synthetic_plan(bedrooms: usize, courtyard: bool) -> String {
    let mut rooms = vec![
        r#"{"id":"living","name":"Living","type":"living","width":15,"depth":12,"area":180,"adjacent_to":["dining","kitchen"]}"#.to_string(),
        r#"{"id":"dining","name":"Dining","type":"dining","width":10,"depth":8,"area":80,"adjacent_to":["kitchen"]}"#.to_string(),
        r#"{"id":"kitchen","name":"Kitchen","type":"kitchen","width":10,"depth":8,"area":80}"#.to_string(),
    ];
    if courtyard {
        rooms.push(
            r#"{"id":"yard","name":"Courtyard","type":"courtyard","width":10,"depth":10,"area":100}"#
                .to_string(),
        );
    }
    for i in 0..bedrooms {
        rooms.push(format!(
            r#"{{"id":"bed{i}","name":"Bedroom {i}","type":"bedroom","width":12,"depth":12,"area":144}}"#
        ));
        rooms.push(format!(
            r#"{{"id":"bath{i}","name":"Bath {i}","type":"attached-bathroom","width":6,"depth":8,"area":48,"adjacent_to":["bed{i}"]}}"#
        ));
    }
    let depth = 40 + 8 * bedrooms;
    format!(
        r#"{{"plot":{{"width":60,"depth":{depth}}},"rooms":[{}],"staircase":{{"type":"u-shaped"}},"plumbing_shafts":[{{}}]}}"#,
        rooms.join(",")
    )
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for bedrooms in [2, 8, 32] {
        let input = synthetic_plan(bedrooms, false);
        group.bench_with_input(BenchmarkId::from_parameter(bedrooms), &input, |b, data| {
            b.iter(|| {
                let request = parse_plan(black_box(data)).expect("parse failed");
                black_box(request.rooms.len());
            });
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let config = LayoutConfig::default();
    for (name, bedrooms, courtyard) in [
        ("rows_small", 2, false),
        ("rows_medium", 8, false),
        ("rows_large", 32, false),
        ("courtyard_small", 2, true),
        ("courtyard_large", 32, true),
    ] {
        let request = parse_plan(&synthetic_plan(bedrooms, courtyard)).expect("parse failed");
        group.bench_with_input(BenchmarkId::from_parameter(name), &request, |b, request| {
            b.iter(|| {
                let layout = compute_layout(black_box(request), &config);
                black_box(layout.positions.len());
            });
        });
    }
    group.finish();
}

fn bench_writers(c: &mut Criterion) {
    let mut group = c.benchmark_group("writers");
    let config = Config::default();
    for bedrooms in [2, 8, 32] {
        let request = parse_plan(&synthetic_plan(bedrooms, false)).expect("parse failed");
        let layout = compute_layout(&request, &config.layout);
        let (scene, _) = build_scene(&request, &layout, &config.layout);
        group.bench_with_input(BenchmarkId::new("scene", bedrooms), &layout, |b, layout| {
            b.iter(|| {
                let (scene, _) = build_scene(&request, black_box(layout), &config.layout);
                black_box(scene.len());
            });
        });
        group.bench_with_input(BenchmarkId::new("svg", bedrooms), &scene, |b, scene| {
            b.iter(|| {
                let svg = render_svg(black_box(scene), &config.theme, &config.render);
                black_box(svg.len());
            });
        });
        group.bench_with_input(BenchmarkId::new("dxf", bedrooms), &scene, |b, scene| {
            b.iter(|| {
                let dxf = write_dxf(black_box(scene));
                black_box(dxf.len());
            });
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let config = Config::default();
    for bedrooms in [2, 8] {
        let input = synthetic_plan(bedrooms, bedrooms > 2);
        group.bench_with_input(BenchmarkId::from_parameter(bedrooms), &input, |b, data| {
            b.iter(|| {
                let output = render_plan(black_box(data), &config).expect("render failed");
                black_box(output.svg.len() + output.dxf.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_parse, bench_layout, bench_writers, bench_end_to_end
);
criterion_main!(benches);
