use crate::{Document, Element};

/// Emits the closing section of the report.
///
/// # Errors
///
/// This module is infallible; the signature matches the pipeline contract.
pub fn emit(doc: &mut Document) -> anyhow::Result<()> {
    crate::display!(
        doc,
        Element::title("## Conclusion", None),
        "This report summarises the basic design parameters and simulated \
         performance of the heat pump system. Sizing follows the usual \
         single-stage cycle treatment",
        Element::citation("borgnakke2017", Some("Borgnakke & Sonntag (2017)".to_string())),
        "Further iterations could refine transient behaviour and optimize \
         the refrigerant loop design.",
    );
    Ok(())
}
