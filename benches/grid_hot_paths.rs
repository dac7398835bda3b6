//! Benchmarks for the per-frame and per-event grid paths
//!
//! - hit testing under the pointer
//! - painting the grid canvas (full quality and draft)
//! - resizing large grids
//!
//! Run with: cargo bench grid_hot_paths

use grido::config::GridConfig;
use grido::model::naming::{Naming, RowOverrides, SectionConfig};
use grido::model::viewport::{GridGeometry, Point, Viewport};
use grido::model::{AppModel, Grid, Rect};
use grido::theme::Theme;
use grido::view::{self, paint_grid, Frame, GlyphCache, GridScene, TextPainter};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn model_with(rows: usize, cols: usize) -> AppModel {
    let config = GridConfig {
        default_rows: rows,
        default_cols: cols,
        ..GridConfig::default()
    };
    AppModel::new(config, Theme::default(), (1920, 1080), 1.0)
}

// ============================================================================
// Hit testing
// ============================================================================

#[divan::bench(args = [10, 100, 500])]
fn hit_test_sweep(size: usize) {
    let geometry = GridGeometry::new(size, size);
    let viewport = Viewport::default();
    let mut hits = 0usize;
    for i in 0..1000 {
        let p = Point::new((i * 7 % 1900) as f64, (i * 13 % 1000) as f64);
        if viewport.hit_test(&geometry, p).is_some() {
            hits += 1;
        }
    }
    divan::black_box(hits);
}

// ============================================================================
// Painting
// ============================================================================

fn paint(bencher: divan::Bencher, size: usize, draft: bool) {
    let model = model_with(size, size);
    let canvas = model.canvas_rect();
    let mut buffer = vec![0u32; 1920 * 1080];
    let mut cache = GlyphCache::new();

    bencher.bench_local(|| {
        let mut frame = Frame::new(&mut buffer, 1920, 1080);
        let mut text = TextPainter::new(None, &mut cache);
        let scene = GridScene {
            grid: &model.grid,
            naming: model.naming(),
            viewport: &model.viewport,
            hovered: None,
            theme: &model.theme.canvas,
            canvas,
            scale_factor: 1.0,
            draft,
        };
        paint_grid(&mut frame, &mut text, &scene);
    });
    divan::black_box(&buffer);
}

#[divan::bench(args = [10, 50, 200])]
fn paint_grid_settled(bencher: divan::Bencher, size: usize) {
    paint(bencher, size, false);
}

#[divan::bench(args = [10, 50, 200])]
fn paint_grid_draft(bencher: divan::Bencher, size: usize) {
    paint(bencher, size, true);
}

#[divan::bench]
fn render_whole_window(bencher: divan::Bencher) {
    let model = model_with(30, 40);
    let mut buffer = vec![0u32; 1920 * 1080];
    let mut cache = GlyphCache::new();

    bencher.bench_local(|| {
        let mut frame = Frame::new(&mut buffer, 1920, 1080);
        let mut text = TextPainter::new(None, &mut cache);
        view::render(&model, &mut frame, &mut text);
    });
}

// ============================================================================
// Grid edits
// ============================================================================

#[divan::bench(args = [50, 200])]
fn resize_grow_and_shrink(bencher: divan::Bencher, size: usize) {
    let config = SectionConfig::default();
    let overrides = RowOverrides::new();

    bencher.bench_local(|| {
        let mut grid = Grid::new(size, size, &Naming::new(&config, &overrides, size, size));
        let grown = size + size / 2;
        grid.resize(grown, grown, &Naming::new(&config, &overrides, grown, grown));
        grid.resize(size / 2, size, &Naming::new(&config, &overrides, size / 2, size));
        divan::black_box(&grid);
    });
}

#[divan::bench]
fn canvas_rect(bencher: divan::Bencher) {
    let model = model_with(10, 15);
    bencher.bench_local(|| divan::black_box::<Rect>(model.canvas_rect()));
}
