use criterion::{black_box, criterion_group, criterion_main, Criterion};
use qrsmith::{build_symbol, Generator, Rgb};

fn bench_build_symbol(c: &mut Criterion) {
    c.bench_function("build_symbol_url", |b| {
        b.iter(|| build_symbol(black_box("https://qrcode.gomes.lol")).unwrap())
    });

    let long = "a".repeat(500);
    c.bench_function("build_symbol_500_chars", |b| {
        b.iter(|| build_symbol(black_box(&long)).unwrap())
    });
}

fn bench_generate_png(c: &mut Criterion) {
    let generator = Generator::new()
        .foreground(Rgb::new(0x32, 0xCD, 0x32))
        .background(Rgb::new(0x1E, 0x1E, 0x1E));
    c.bench_function("generate_png_url", |b| {
        b.iter(|| {
            generator
                .generate_png(black_box("https://qrcode.gomes.lol"))
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_build_symbol, bench_generate_png);
criterion_main!(benches);
