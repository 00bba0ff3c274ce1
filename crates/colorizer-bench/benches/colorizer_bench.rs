//! Benchmarks for palette building and frame colorization.
//!
//! Run with: `cargo bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use colorizer_core::{VideoFormat, VideoFrame, VideoFrameMut, VideoInfo};
use colorizer_lut::{Preset, build_table};
use colorizer_ops::{Colorizer, CutRange, VideoFilter};

/// Synthetic depth ramp, 16-bit little endian.
fn depth_frame(width: u32, height: u32) -> Vec<u8> {
    (0..width * height)
        .flat_map(|i| ((i * 7) as u16).to_le_bytes())
        .collect()
}

fn bench_build_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_table");
    for preset in Preset::all() {
        group.bench_with_input(BenchmarkId::from_parameter(preset), preset, |b, p| {
            b.iter(|| build_table(black_box(*p)))
        });
    }
    group.finish();
}

/// Benchmark a full frame through the negotiated colorizer.
fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");

    for (width, height) in [(320u32, 240u32), (640, 480), (1280, 720)] {
        group.throughput(Throughput::Elements((width * height) as u64));
        let label = format!("{}x{}", width, height);

        let src = depth_frame(width, height);
        let input = VideoInfo::new(VideoFormat::Gray16Le, width, height).unwrap();

        for (name, format, preset) in [
            ("jet_rgb", VideoFormat::Rgb, Preset::Jet),
            ("jet_bgrx", VideoFormat::Bgrx, Preset::Jet),
            ("jet_gbrp", VideoFormat::Gbrp, Preset::Jet),
            ("none_rgb", VideoFormat::Rgb, Preset::None),
        ] {
            let output = VideoInfo::new(format, width, height).unwrap();
            let colorizer = Colorizer::new();
            colorizer.set_preset(preset);
            colorizer.set_cut(CutRange::new(300, 4000));
            colorizer.negotiate(input, output).unwrap();
            let mut dst = vec![0u8; output.packed_size().unwrap()];

            group.bench_with_input(BenchmarkId::new(name, &label), &src, |b, src| {
                b.iter(|| {
                    let source = VideoFrame::from_packed(input, black_box(src)).unwrap();
                    let mut dest = VideoFrameMut::from_packed(output, &mut dst).unwrap();
                    colorizer.process(&source, &mut dest).unwrap();
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_build_table, bench_transform);
criterion_main!(benches);
