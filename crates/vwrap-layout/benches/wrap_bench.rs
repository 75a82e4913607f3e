//! Benchmarks for measure/arrange passes over large collections.
//!
//! Run with: cargo bench -p vwrap-layout

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use vwrap_layout::range::RangeRequest;
use vwrap_layout::{
    Axis, CacheLength, ContainerHost, GenerateError, Orientation, PanelConfig, RowLayout,
    ScrollInfo, Size, VirtualizingWrapPanel,
};

struct Tiles {
    count: usize,
}

impl ContainerHost for Tiles {
    type Container = usize;

    fn item_count(&self) -> usize {
        self.count
    }

    fn generate(&mut self, index: usize) -> Result<usize, GenerateError> {
        Ok(index)
    }

    fn prepare(&mut self, container: &mut usize, index: usize) {
        *container = index;
    }

    fn measure(&mut self, _container: &mut usize, _available: Size) -> Size {
        Size::new(48.0, 64.0)
    }
}

const VIEWPORT: Size = Size {
    width: 1280.0,
    height: 800.0,
};

// ============================================================================
// Range calculation
// ============================================================================

fn bench_flat_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("range/flat");

    for count in [1_000usize, 100_000, 1_000_000] {
        let layout = RowLayout::fit(
            Orientation::Vertical.axes(),
            Size::new(48.0, 64.0),
            VIEWPORT,
            count,
        );
        let extent = Size::new(VIEWPORT.width, 64.0 * layout.row_count as f64);
        let mut info = ScrollInfo::new();
        info.update(VIEWPORT, extent);
        info.set_offset(Axis::Vertical, extent.height / 2.0);

        for (name, cache) in [
            ("pixel", CacheLength::pixels(400.0, 400.0)),
            ("page", CacheLength::pages(1, 1)),
        ] {
            group.bench_with_input(BenchmarkId::new(name, count), &cache, |b, &cache| {
                b.iter(|| {
                    let request = RangeRequest {
                        layout: &layout,
                        scroll: &info,
                        cache,
                        virtualizing: true,
                    };
                    black_box(request.flat())
                })
            });
        }
    }

    group.finish();
}

// ============================================================================
// Full frames
// ============================================================================

fn bench_scroll_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("panel/scroll");

    for (name, recycling) in [("recycling", true), ("standard", false)] {
        let mut host = Tiles { count: 100_000 };
        let config = PanelConfig::default().with_recycling(recycling);
        let mut panel = VirtualizingWrapPanel::new(config);
        panel.measure(&mut host, VIEWPORT).expect("initial measure");

        group.bench_function(name, |b| {
            b.iter(|| {
                panel.wheel_down();
                panel.measure(&mut host, VIEWPORT).expect("measure");
                black_box(panel.arrange(&mut host, VIEWPORT));
            })
        });
    }

    group.finish();
}

fn bench_initial_measure(c: &mut Criterion) {
    let mut group = c.benchmark_group("panel/initial_measure");

    for count in [1_000usize, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut host = Tiles { count };
                let mut panel: VirtualizingWrapPanel<usize> = VirtualizingWrapPanel::default();
                black_box(panel.measure(&mut host, VIEWPORT).expect("measure"))
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_flat_range,
    bench_scroll_frames,
    bench_initial_measure
);
criterion_main!(benches);
