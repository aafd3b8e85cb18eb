use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizforge_core::parser::{parse_questions, strip_code_fences};

fn ai_response(n: usize, fenced: bool) -> String {
    let items: Vec<String> = (0..n)
        .map(|i| {
            format!(
                r#"{{"id":"q{i}","type":"mcq","question":"Question {i}?","options":["A","B","C","D"],"correctAnswer":"A","explanation":"Because A."}}"#
            )
        })
        .collect();
    let body = format!("[{}]", items.join(","));
    if fenced {
        format!("Here are your questions:\n```json\n{body}\n```\nGood luck!")
    } else {
        body
    }
}

fn bench_parse_questions(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_questions");

    let bare_5 = ai_response(5, false);
    let fenced_5 = ai_response(5, true);
    let fenced_50 = ai_response(50, true);

    group.bench_function("bare_5", |b| {
        b.iter(|| parse_questions(black_box(&bare_5)))
    });

    group.bench_function("fenced_5", |b| {
        b.iter(|| parse_questions(black_box(&fenced_5)))
    });

    group.bench_function("fenced_50", |b| {
        b.iter(|| parse_questions(black_box(&fenced_50)))
    });

    group.bench_function("no_array", |b| {
        b.iter(|| parse_questions(black_box("I cannot help with that request.")))
    });

    group.finish();
}

fn bench_strip_fences(c: &mut Criterion) {
    let fenced_50 = ai_response(50, true);
    c.bench_function("strip_code_fences_50", |b| {
        b.iter(|| strip_code_fences(black_box(&fenced_50)))
    });
}

criterion_group!(benches, bench_parse_questions, bench_strip_fences);
criterion_main!(benches);
