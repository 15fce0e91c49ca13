use criterion::{black_box, criterion_group, criterion_main, Criterion};
use doomgeneric_tty::input::InputDeriver;
use doomgeneric_tty::term::{ColorMode, FrameEncoder};
use doomgeneric_tty::types::{Pixel, PixelBuffer, DEFAULT_RESX, DEFAULT_RESY};

fn gradient() -> PixelBuffer {
    let mut fb = PixelBuffer::new(DEFAULT_RESX, DEFAULT_RESY);
    for y in 0..DEFAULT_RESY {
        for x in 0..DEFAULT_RESX {
            fb.set(x, y, Pixel::new(x as u8, y as u8, (x ^ y) as u8));
        }
    }
    fb
}

fn bench_encode_gradient(c: &mut Criterion) {
    let fb = gradient();
    let mut enc = FrameEncoder::new(DEFAULT_RESX, DEFAULT_RESY, ColorMode::Persistent);

    c.bench_function("encode_320x200_gradient", |b| {
        b.iter(|| {
            let len = enc.encode(black_box(&fb)).unwrap().len();
            enc.recycle();
            len
        })
    });
}

fn bench_encode_solid(c: &mut Criterion) {
    let mut fb = PixelBuffer::new(DEFAULT_RESX, DEFAULT_RESY);
    fb.fill(Pixel::new(90, 90, 90));
    let mut enc = FrameEncoder::new(DEFAULT_RESX, DEFAULT_RESY, ColorMode::Persistent);

    c.bench_function("encode_320x200_solid", |b| {
        b.iter(|| {
            let len = enc.encode(black_box(&fb)).unwrap().len();
            enc.recycle();
            len
        })
    });
}

fn bench_derive_events(c: &mut Criterion) {
    let mut d = InputDeriver::new();
    let bursts: [&[u8]; 3] = [b"wasd \x1b[A", b"wd\n", b""];

    c.bench_function("derive_events", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % bursts.len();
            d.advance(black_box(bursts[i])).len()
        })
    });
}

criterion_group!(
    benches,
    bench_encode_gradient,
    bench_encode_solid,
    bench_derive_events
);
criterion_main!(benches);
