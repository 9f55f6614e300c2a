//! This bench test measures markdown rendering over a generated document
//! with a realistic mix of element types.

#![allow(missing_docs)]

use criterion::{Criterion, criterion_group, criterion_main};
use pyforge::{Document, Element, TableData, render::markdown};

/// Generates a document with `sections` repeated table/figure/reference
/// sections.
fn generate_document(sections: usize) -> Document {
    let mut doc = Document::new();
    doc.display("# Generated Document");
    for index in 0..sections {
        doc.display(Element::title(format!("## Section {index}"), None));
        doc.display("Some narrative text for the section.");

        let mut table = TableData::new(["Metric", "Value"]);
        for row in 0..10 {
            table.push_row([format!("metric_{row}"), format!("{}", row * index)]);
        }
        doc.display(Element::table(
            table,
            format!("Table {index}"),
            Some(format!("tbl-{index}")),
        ));
        doc.display(Element::reference(
            format!("tbl-{index}"),
            Some(format!("Table {index}")),
        ));
        doc.display(Element::citation(
            format!("source-{}", index % 7),
            Some(format!("Source {}", index % 7)),
        ));
    }
    doc
}

fn render_markdown(c: &mut Criterion) {
    let document = generate_document(100);
    c.bench_function("render markdown", |b| {
        b.iter(|| markdown::render(std::hint::black_box(document.snapshot())));
    });
}

criterion_group!(benches, render_markdown);
criterion_main!(benches);
