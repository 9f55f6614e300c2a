use chrono::NaiveDate;

use crate::{Document, DocumentConfig, Element, Parameters, ParametersError, Quantity};

/// The key parameters of the heat pump, defined once.
///
/// # Errors
///
/// Returns an error if a declaration is invalid; the values below are
/// known good.
pub fn heat_pump_parameters() -> Result<Parameters, ParametersError> {
    let quantity = |magnitude, unit| {
        Quantity::new(magnitude, unit).expect("registry units are known good")
    };

    Parameters::builder("heat_pump")
        .quantity("heating_capacity", quantity(10_000.0, "W"))
        .number("cop", 4.0)
        .quantity("evaporator_temp", quantity(-5.0, "°C"))
        .quantity("condenser_temp", quantity(35.0, "°C"))
        .quantity("flow_rate", quantity(0.05, "kg/s"))
        .integer("design_life", 20)
        .build()
}

/// Opens the document: metadata, main title and the parameter table.
///
/// # Errors
///
/// Returns an error if the parameter set fails to build.
pub fn emit(doc: &mut Document) -> anyhow::Result<()> {
    let config = DocumentConfig::new("Heat Pump Design Report")
        .author("PyForge")
        .date(NaiveDate::from_ymd_opt(2025, 5, 18).expect("valid date"));

    let params = heat_pump_parameters()?;

    crate::display!(
        doc,
        config,
        Element::title("Heat Pump System Design", None),
        params.to_table("Core design parameters", Some("tbl-params")),
    );
    Ok(())
}
