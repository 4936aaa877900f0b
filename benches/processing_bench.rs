//! Processing performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use prefixr::*;
use std::fs;
use tempfile::TempDir;

const SAMPLE: &str = r#"
/* layout */
.row { display: flex; flex-flow: row wrap; justify-content: space-between; }
.cell { flex: 1 1 auto; order: 2; align-self: center; }
.fade { transition: opacity 1s, transform 1s; transform: translateX(10px); }
.card { border-radius: 4px; box-shadow: 0 1px 2px #000; background: linear-gradient(to bottom, #fff, #eee); }
@media screen and (min-width: 600px) { .row { width: calc(100% - 20px); } }
@keyframes spin { from { transform: rotate(0) } to { transform: rotate(1turn) } }
"#;

fn large_sheet(copies: usize) -> String {
    let mut css = String::with_capacity(SAMPLE.len() * copies);
    for i in 0..copies {
        css.push_str(&SAMPLE.replace("spin", &format!("spin{}", i)));
    }
    css
}

fn bench_requirement_resolution(c: &mut Criterion) {
    c.bench_function("resolve_and_plan", |b| {
        b.iter(|| {
            let selected = resolve_requirements(black_box(&["last 2 versions", "ie 10", "> 1%"])).unwrap();
            build_plan(&selected)
        })
    });
}

fn bench_transform(c: &mut Criterion) {
    let plan = build_plan(&resolve_requirements(&["chrome 20", "ff 20", "ie 10", "opera 12"]).unwrap());
    let options = PrintOptions::default();

    let mut group = c.benchmark_group("transform");
    for copies in [1, 10, 100] {
        let css = large_sheet(copies);
        group.bench_with_input(BenchmarkId::from_parameter(copies), &css, |b, css| {
            b.iter(|| transform(black_box(css), &plan, &options).unwrap())
        });
    }
    group.finish();
}

fn bench_parse_and_print(c: &mut Criterion) {
    let css = large_sheet(100);
    c.bench_function("parse_print_round_trip", |b| {
        b.iter(|| {
            let ast = parse(black_box(&css), None).unwrap();
            print(&ast, &PrintOptions::compact())
        })
    });
}

fn bench_process_file(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("site.css");
    let output_path = temp_dir.path().join("site.out.css");
    fs::write(&input_path, large_sheet(10)).unwrap();

    let prefixer = Prefixer::new(&["last 2 versions"]).unwrap();
    c.bench_function("process_file", |b| {
        b.iter(|| prefixer.process_file(black_box(&input_path), black_box(&output_path)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_requirement_resolution,
    bench_transform,
    bench_parse_and_print,
    bench_process_file
);
criterion_main!(benches);
