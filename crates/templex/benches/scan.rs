//! Benchmark – `templex::scan` and the reference tokenizer
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use templex::{SourceLexer, TokenKind, ValidSymbols, tokenize};

/// Builds a deterministic source file of roughly `target_len` bytes, mixing
/// both template flavours, statement blocks and free-form keywords.
fn make_source(target_len: usize) -> String {
    const UNIT: &str = concat!(
        "    // TODO tidy this up\n",
        "    log($\"user {user.name} has {count} \\{items}\");\n",
        "    page = $|<ul>\n",
        "            |{{ for (Item item : items) { $.add(item.render()); } }}\n",
        "            |</ul>\n",
        "            ;\n",
    );
    let mut s = String::with_capacity(target_len + UNIT.len());
    while s.len() < target_len {
        s.push_str(UNIT);
    }
    s
}

/// A long single-line body, scanned one token at a time by hand.
fn scan_body(body: &str) -> usize {
    let mut lexer = SourceLexer::new(body);
    let mut tokens = 0;
    let mut valid = ValidSymbols::SINGLELINE;
    while let Some(token) = lexer.scan(valid) {
        tokens += 1;
        valid = match token.kind {
            TokenKind::SinglelineEnd => break,
            TokenKind::SinglelineExprStart => {
                while lexer.rest().first().is_some_and(|&b| b != b'}') {
                    lexer.bump();
                }
                ValidSymbols::TEMPLATE_EXPR_END
            }
            _ => ValidSymbols::SINGLELINE,
        };
    }
    tokens
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_singleline");
    for &len in &[100usize, 10_000] {
        let mut body = "lorem ipsum {x} \\{dolor} ".repeat(len / 24);
        body.push('"');
        group.throughput(Throughput::Bytes(body.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &body, |b, body| {
            b.iter(|| black_box(scan_body(black_box(body))));
        });
    }
    group.finish();
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    for &len in &[1_000usize, 100_000] {
        let src = make_source(len);
        group.throughput(Throughput::Bytes(src.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &src, |b, src| {
            b.iter(|| {
                let tokens = tokenize(black_box(src)).expect("benchmark source tokenizes");
                black_box(tokens.len());
            });
        });
    }
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_scan, bench_tokenize }
criterion_main!(benches);
