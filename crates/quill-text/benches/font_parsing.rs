use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use quill_text::BitmapFont;
use std::fmt::Write;

fn descriptor(glyphs: u32) -> String {
    let mut text = String::from(
        "info face=\"Bench\" size=16\ncommon lineHeight=18 base=14 scaleW=512 scaleH=512 pages=1\n\
         page id=0 file=\"bench_0.png\"\n",
    );
    for id in 32..32 + glyphs {
        let _ = writeln!(
            text,
            "char id={} x={} y={} width=9 height=14 xoffset=0 yoffset=2 xadvance=10 page=0 chnl=15",
            id,
            (id % 32) * 10,
            (id / 32) * 16
        );
    }
    for first in 32..32 + glyphs.min(64) {
        let _ = writeln!(text, "kerning first={} second={} amount=-1", first, first + 1);
    }
    text
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for glyphs in [96, 512] {
        let text = descriptor(glyphs);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(glyphs), &text, |b, text| {
            b.iter(|| black_box(BitmapFont::parse(black_box(text))));
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let font = BitmapFont::parse(&descriptor(96)).font;
    let text = "The quick brown fox jumps over the lazy dog. ".repeat(20);

    let mut group = c.benchmark_group("layout");
    group.throughput(Throughput::Elements(text.len() as u64));
    group.bench_function("line", |b| {
        b.iter(|| black_box(font.layout(black_box(&text), 0.0, 0.0).count()));
    });
    group.bench_function("measure", |b| {
        b.iter(|| black_box(font.measure(black_box(&text))));
    });
    group.finish();
}

criterion_group!(benches, bench_parse, bench_layout);
criterion_main!(benches);
