use criterion::{criterion_group, criterion_main, Criterion};
use pixel_simd::{gray_to_bgra, yuv_to_bgra};
use pixel_simd_testing::{fill_random, PixelFormat, View};
use std::hint::black_box;

const WIDTH: usize = 1920;
const HEIGHT: usize = 1080;

fn bench_gray_to_bgra(c: &mut Criterion) {
    let mut gray = View::new(PixelFormat::Gray8, WIDTH, HEIGHT);
    fill_random(&mut gray, 1);
    let mut bgra = View::new(PixelFormat::Bgra32, WIDTH, HEIGHT);

    c.bench_function("gray_to_bgra 1920x1080", |b| {
        b.iter(|| unsafe {
            gray_to_bgra::gray_to_bgra(
                black_box(gray.as_ptr()),
                WIDTH,
                HEIGHT,
                gray.stride(),
                bgra.as_mut_ptr(),
                bgra.stride(),
                0xFF,
            );
        })
    });

    c.bench_function("gray_to_bgra scalar 1920x1080", |b| {
        b.iter(|| unsafe {
            gray_to_bgra::generic::gray_to_bgra(
                black_box(gray.as_ptr()),
                WIDTH,
                HEIGHT,
                gray.stride(),
                bgra.as_mut_ptr(),
                bgra.stride(),
                0xFF,
            );
        })
    });
}

fn bench_yuv420_to_bgra(c: &mut Criterion) {
    let mut y = View::new(PixelFormat::Gray8, WIDTH, HEIGHT);
    let mut u = View::new(PixelFormat::Gray8, WIDTH / 2, HEIGHT / 2);
    let mut v = View::new(PixelFormat::Gray8, WIDTH / 2, HEIGHT / 2);
    fill_random(&mut y, 1);
    fill_random(&mut u, 2);
    fill_random(&mut v, 3);
    let mut bgra = View::new(PixelFormat::Bgra32, WIDTH, HEIGHT);

    c.bench_function("yuv420p_to_bgra 1920x1080", |b| {
        b.iter(|| unsafe {
            yuv_to_bgra::yuv420p_to_bgra(
                black_box(y.as_ptr()),
                y.stride(),
                u.as_ptr(),
                u.stride(),
                v.as_ptr(),
                v.stride(),
                WIDTH,
                HEIGHT,
                bgra.as_mut_ptr(),
                bgra.stride(),
                0xFF,
            );
        })
    });
}

criterion_group!(benches, bench_gray_to_bgra, bench_yuv420_to_bgra);
criterion_main!(benches);
