//! Crew assignment command handler

use crate::state::SharedState;

pub async fn cmd_assign_crew(state: &SharedState, run: bool) -> anyhow::Result<()> {
    let plan = if run {
        state.crew_service.assign(None).await?
    } else {
        state.crew_service.current().await
    };

    for vehicle in &plan.assignments {
        let status = if vehicle.fulfilled { "vollständig" } else { "unvollständig" };
        println!("{} ({status})", vehicle.vehicle);
        for seat in &vehicle.slots {
            let name = seat.assigned.as_ref().map_or("-", |p| p.name.as_str());
            println!("  {:<10} {name}", seat.position);
        }
    }

    println!("{:-<50}", "");
    println!(
        "{} von {} Fahrzeugen besetzt, {} Kameraden ohne Platz.",
        plan.total_fulfilled,
        plan.total_vehicles,
        plan.unassigned.len()
    );
    for warning in &plan.warnings {
        println!("  {warning}");
    }

    Ok(())
}
