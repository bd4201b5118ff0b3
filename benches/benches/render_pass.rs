// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use quaff_format::ImageBuffer;
use quaff_format::synth::{encode, full_tree};
use quaff_raster::{Bitmap, FrameBuffers, Presentation};
use quaff_render::{RecordingSink, Renderer};
use quaff_view::{QuadPoint, ScreenSize, ViewState};

const SCREEN: ScreenSize = ScreenSize::new(240, 208);

fn image(height: u8) -> ImageBuffer {
    // Alternating rows so blits are neither empty nor solid.
    let leaf = [0x55, 0xAA, 0x55, 0xAA, 0x55, 0xAA, 0x55, 0xAA];
    ImageBuffer::new(encode(height, &full_tree(height, leaf)))
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("quaff_render");
    group.sample_size(50);

    let height = 10;
    let image = image(height);
    let center = QuadPoint::new(1 << (height - 1), 1 << (height - 1));

    for zoom in [1_u32, 4, 16, 64] {
        let view = ViewState::new(SCREEN, center, zoom);

        group.bench_function(format!("bitmap(h={height},zoom={zoom})"), |b| {
            let mut renderer = Renderer::new();
            let mut bitmap = Bitmap::new(SCREEN);
            b.iter(|| {
                bitmap.clear();
                let report = renderer.render(&image, &view, &mut bitmap);
                black_box(report);
            });
        });

        group.bench_function(format!("recording(h={height},zoom={zoom})"), |b| {
            let mut renderer = Renderer::new();
            let mut sink = RecordingSink::new();
            b.iter(|| {
                sink.clear();
                let report = renderer.render(&image, &view, &mut sink);
                black_box(report);
            });
        });
    }

    group.bench_function("double_buffered_frame", |b| {
        let view = ViewState::new(SCREEN, center, 4);
        let mut renderer = Renderer::new();
        let mut frames = FrameBuffers::new(SCREEN, Presentation::Double);
        b.iter(|| {
            frames.begin_frame();
            black_box(renderer.render(&image, &view, &mut frames));
            frames.present();
        });
    });

    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
