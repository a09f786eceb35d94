// benches/parse.rs
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use scholar_watch::{
    config::consts::PAGE_SIZE,
    core::html::Page,
    specs::{self, papers, profile},
};

const ORIGIN: &str = "https://scholar.google.com";

fn load_sample() -> String {
    std::fs::read_to_string("tests/fixtures/profile.html").expect("read tests/fixtures/profile.html")
}

/// The sample with its first paper row repeated to a full page.
fn full_page(sample: &str) -> String {
    let start = sample.find(r#"<tr class="gsc_a_tr""#).expect("paper row in sample");
    let end = start + sample[start..].find("</tr>").expect("row end") + "</tr>".len();
    let rows = sample[start..end].repeat(PAGE_SIZE as usize);
    format!("{}{}{}", &sample[..start], rows, &sample[end..])
}

fn bench_profile(c: &mut Criterion) {
    let doc = load_sample();
    let big = full_page(&doc);

    c.bench_function("profile_page", |b| {
        b.iter(|| {
            let page = specs::parse_profile_page(black_box(&doc), ORIGIN, PAGE_SIZE).expect("parse");
            black_box(page.papers.len())
        })
    });

    c.bench_function("metrics_only", |b| {
        let page = Page::parse(&doc);
        b.iter(|| black_box(profile::parse_metrics(black_box(&page)).map(|m| m.total_citations)))
    });

    c.bench_function("papers_full_page", |b| {
        let page = Page::parse(&big);
        b.iter(|| {
            let rows = papers::parse_papers(black_box(&page), ORIGIN);
            black_box(rows.len())
        })
    });
}

criterion_group!(benches, bench_profile);
criterion_main!(benches);
