use crate::{Document, Element, Requirement, System};

use super::parameters::heat_pump_parameters;

/// The heat pump system tree, with its top-level requirements.
///
/// # Errors
///
/// Returns an error if the underlying parameter set fails to build.
pub fn heat_pump_system() -> anyhow::Result<System> {
    let params = heat_pump_parameters()?;
    let capacity = params.quantity("heating_capacity")?;
    let condenser = params.quantity("condenser_temp")?;
    let cop = params.number("cop")?;

    let mut system = System::new(
        "Heat Pump System",
        format!("{capacity} heat output at COP {cop}"),
    )
    .with_requirement(Requirement::new(
        "Thermal Capacity",
        format!("Deliver {capacity} at {condenser}."),
    ))
    .with_requirement(Requirement::new(
        "Minimum Efficiency",
        format!("COP >= {cop} under rated conditions."),
    ));

    system.add_child(
        System::new("Refrigerant Loop", "Closed loop between the exchangers")
            .with_requirement(Requirement::new(
                "Mass Flow",
                format!("Sustain {} through the loop.", params.quantity("flow_rate")?),
            )),
    );

    Ok(system)
}

/// Emits the system overview section.
///
/// # Errors
///
/// Returns an error if the system tree cannot be built.
pub fn emit(doc: &mut Document) -> anyhow::Result<()> {
    crate::display!(
        doc,
        Element::title("## System Overview", None),
        heat_pump_system()?.to_markdown(),
    );
    Ok(())
}
