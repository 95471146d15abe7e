//! Transpile Benchmark
//!
//! Measures whole-pipeline throughput (bytes/sec) and the cost of the
//! individual phases on generated sketches.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use sketchc::{CompilerOptions, compile};
use sketchc_scanner::{erase_generics, mask_source, split_to_atoms};

// =============================================================================
// Test Sources
// =============================================================================

const SIMPLE_SOURCE: &str = r#"
void setup() {
  size(200, 200);
  noStroke();
}

void draw() {
  background(0);
  ellipse(mouseX, mouseY, 20, 20);
}
"#;

const CLASSES_SOURCE: &str = r#"
interface Drawable { void draw(); }

abstract class Shape implements Drawable {
  float x, y;
  Shape(float x, float y) { this.x = x; this.y = y; }
  abstract float area();
  void moveBy(float dx, float dy) { x += dx; y += dy; }
}

class Circle extends Shape {
  float r;
  Circle(float x, float y, float r) { super(x, y); this.r = r; }
  float area() { return PI * r * r; }
  void draw() { ellipse(x, y, r * 2, r * 2); }
}

class Square extends Shape {
  float side;
  Square(float x, float y) { this(x, y, 10); }
  Square(float x, float y, float side) { super(x, y); this.side = side; }
  float area() { return side * side; }
  void draw() { rect(x, y, side, side); }
}

ArrayList<Shape> shapes = new ArrayList<Shape>();

void setup() {
  shapes.add(new Circle(10, 10, 5));
  shapes.add(new Square(20, 20));
}

void draw() {
  for (Shape s : shapes) {
    s.moveBy(1, 0);
    s.draw();
  }
  println("total: " + shapes.size());
}
"#;

/// A sketch with `classes` classes of `methods` methods each.
fn generate_large_source(classes: usize, methods: usize) -> String {
    let mut source = String::with_capacity(classes * methods * 80);
    source.push_str("// Generated sketch for transpile benchmarking\n\n");

    for c in 0..classes {
        if c == 0 {
            source.push_str("class Node0 {\n");
        } else {
            source.push_str(&format!("class Node{c} extends Node{} {{\n", c - 1));
        }
        source.push_str(&format!("  int value{c} = {c};\n"));
        for m in 0..methods {
            source.push_str(&format!(
                "  int m{m}(int a) {{ return a + value{c} * {m}; }}\n"
            ));
        }
        source.push_str("}\n\n");
    }

    source.push_str("void draw() {\n");
    for c in 0..classes {
        source.push_str(&format!("  Node{c} n{c} = new Node{c}();\n"));
        source.push_str(&format!("  println(n{c}.m0({c}));\n"));
    }
    source.push_str("}\n");
    source
}

// =============================================================================
// Pipeline Benchmarks
// =============================================================================

fn bench_compile_simple(c: &mut Criterion) {
    let options = CompilerOptions::default();
    c.bench_function("compile_simple", |b| {
        b.iter(|| black_box(compile(black_box(SIMPLE_SOURCE), &options)))
    });
}

fn bench_compile_classes(c: &mut Criterion) {
    let options = CompilerOptions::default();
    c.bench_function("compile_classes", |b| {
        b.iter(|| black_box(compile(black_box(CLASSES_SOURCE), &options)))
    });
}

/// Benchmark: Whole-pipeline throughput for various sizes
fn bench_compile_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_throughput");
    let options = CompilerOptions::default();

    for (classes, methods) in [(5, 5), (20, 5), (50, 10)] {
        let source = generate_large_source(classes, methods);
        let label = format!("{classes}cls_{methods}m");

        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::new("compile", &label), &source, |b, source| {
            b.iter(|| black_box(compile(source, &options)))
        });
    }

    group.finish();
}

/// Benchmark: Scanner phases alone (mask, generics, atoms)
fn bench_scanner_phases(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanner_phases");
    let source = generate_large_source(20, 5);
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("mask", |b| b.iter(|| black_box(mask_source(&source))));

    let masked = mask_source(&source);
    group.bench_function("erase_generics", |b| {
        b.iter(|| black_box(erase_generics(&masked.text)))
    });

    let erased = erase_generics(&masked.text);
    group.bench_function("split_to_atoms", |b| {
        b.iter(|| black_box(split_to_atoms(&erased.text)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_compile_simple,
    bench_compile_classes,
    bench_compile_throughput,
    bench_scanner_phases
);
criterion_main!(benches);
