//! End-to-end tests of the document pipeline: module ordering, rerun
//! semantics, and markdown output.

use pyforge::{
    Category, Document, Element, Pipeline, TableData, demo,
    render::markdown,
};

fn sample_table() -> TableData {
    TableData::from_records(
        vec!["Name", "Age", "City"],
        vec![
            vec!["Alice", "25", "New York"],
            vec!["Bob", "30", "London"],
            vec!["Charlie", "35", "Paris"],
        ],
    )
}

#[test]
fn display_order_is_preserved_across_modules() {
    let pipeline = Pipeline::new()
        .with_module(Category::Report, "report_main", |doc| {
            doc.display("from report");
            Ok(())
        })
        .with_module(Category::Parameters, "parameters_main", |doc| {
            doc.display("from parameters");
            doc.display("also from parameters");
            Ok(())
        })
        .with_module(Category::Simulation, "simulation_main", |doc| {
            doc.display("from simulation");
            Ok(())
        });

    let document = pipeline.run().unwrap();
    let texts: Vec<String> = document
        .iter()
        .map(|element| match element {
            Element::RawText(text) => text.clone(),
            other => panic!("unexpected element: {other:?}"),
        })
        .collect();

    assert_eq!(
        texts,
        [
            "from parameters",
            "also from parameters",
            "from simulation",
            "from report",
        ]
    );
}

#[test]
fn rerun_contains_only_the_second_runs_content() {
    // Two consecutive view reruns: each run starts from an empty document,
    // so nothing from the first run leaks into the second.
    let pipeline = Pipeline::new().with_module(Category::Report, "report_main", |doc| {
        doc.display("run content");
        Ok(())
    });

    let first = pipeline.run().unwrap();
    let second = pipeline.run().unwrap();

    assert_eq!(second.len(), 1);
    assert_eq!(first, second);
}

#[test]
fn heading_then_table_scenario() {
    let mut doc = Document::new();
    doc.display("# Hello");
    doc.display(Element::table(
        sample_table(),
        "caption",
        Some("id1".to_string()),
    ));

    let rendered = markdown::render(doc.snapshot());

    let heading = rendered.markdown.find("# Hello").expect("heading present");
    let header_row = rendered
        .markdown
        .find("| Name | Age | City |")
        .expect("pipe table present");
    assert!(heading < header_row);
    assert!(rendered.markdown.contains("| Alice | 25 | New York |"));
    assert!(rendered.markdown.contains(": caption {#id1}"));
}

#[test]
fn missing_reference_degrades_instead_of_failing() {
    let mut doc = Document::new();
    doc.display(Element::reference(
        "missing_id",
        Some("see Table 2".to_string()),
    ));

    let rendered = markdown::render(doc.snapshot());
    assert!(
        rendered
            .markdown
            .contains("**[missing reference: missing_id]**")
    );
    assert_eq!(rendered.warnings.len(), 1);
}

#[test]
fn module_failure_discards_partial_output() {
    let pipeline = Pipeline::new()
        .with_module(Category::Parameters, "parameters_main", |doc| {
            doc.display("early content");
            Ok(())
        })
        .with_module(Category::Systems, "systems_broken", |_| {
            anyhow::bail!("parse failure")
        });

    assert!(pipeline.run().is_err());
}

#[test]
fn demo_document_renders_cleanly() {
    let document = demo::pipeline().run().unwrap();
    let rendered = markdown::render(document.snapshot());

    assert!(rendered.warnings.is_empty(), "{:?}", rendered.warnings);

    // Front matter first, conclusion last.
    assert!(rendered.markdown.starts_with("---\n"));
    assert!(rendered.markdown.contains("title: Heat Pump Design Report"));

    let params = rendered.markdown.find("# Heat Pump System Design").unwrap();
    let overview = rendered.markdown.find("## System Overview").unwrap();
    let performance = rendered.markdown.find("## Performance").unwrap();
    let conclusion = rendered.markdown.find("## Conclusion").unwrap();
    assert!(params < overview && overview < performance && performance < conclusion);

    // The cross-reference to the parameter table resolves.
    assert!(rendered.markdown.contains("[the parameter table](#tbl-params)"));
    // The citation gains a references section.
    assert!(rendered.markdown.contains("## References"));
    assert!(rendered.markdown.contains("[^1]: Borgnakke & Sonntag (2017)"));
}

#[test]
fn markdown_output_writes_to_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let output = tmp.path().join("report.md");

    let document = demo::pipeline().run().unwrap();
    let rendered = markdown::render(document.snapshot());
    rendered.write_to(&output).unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written, rendered.markdown);
}
