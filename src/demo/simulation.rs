use crate::{Document, Element, Quantity, TableData};

use super::parameters::heat_pump_parameters;

/// Electrical power needed to reach the rated heating capacity at the
/// rated COP.
///
/// # Errors
///
/// Returns an error if the underlying parameter set fails to build.
pub fn electrical_input() -> anyhow::Result<Quantity> {
    let params = heat_pump_parameters()?;
    let capacity = params.quantity("heating_capacity")?;
    let cop = params.number("cop")?;
    Ok(capacity.clone() / cop)
}

/// Emits the performance estimate section.
///
/// # Errors
///
/// Returns an error if the simulation inputs cannot be built.
pub fn emit(doc: &mut Document) -> anyhow::Result<()> {
    let params = heat_pump_parameters()?;
    let input = electrical_input()?;
    let ratio = input.magnitude() / params.quantity("heating_capacity")?.magnitude();

    let mut table = TableData::new(["Metric", "Value"]);
    table.push_row(["Electrical Input".to_string(), input.to_string()]);
    table.push_row(["Implied Power Ratio".to_string(), format!("{ratio:.3}")]);

    crate::display!(
        doc,
        Element::title("## Performance", None),
        Element::table(table, "Performance estimates", Some("tbl-perf".to_string())),
        "The rated conditions are listed in ",
        Element::reference("tbl-params", Some("the parameter table".to_string())),
    );
    Ok(())
}
