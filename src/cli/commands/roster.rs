//! Roster command handlers

use crate::state::SharedState;

pub async fn cmd_list_vehicles(state: &SharedState) -> anyhow::Result<()> {
    let vehicles = state.roster_service.list_vehicles().await;

    if vehicles.is_empty() {
        println!("Keine Fahrzeuge erfasst.");
        return Ok(());
    }

    println!("Fahrzeuge ({} total)", vehicles.len());
    println!("{:-<60}", "");
    for vehicle in vehicles {
        println!(
            "{:>4}  {:<20} {:<28} {}",
            vehicle.id, vehicle.name, vehicle.radio_call_sign, vehicle.crew_capacity
        );
    }

    Ok(())
}

pub async fn cmd_list_kameraden(state: &SharedState) -> anyhow::Result<()> {
    let personnel = state.roster_service.list_personnel().await;

    if personnel.is_empty() {
        println!("Keine Kameraden erfasst.");
        return Ok(());
    }

    println!("Kameraden ({} total)", personnel.len());
    println!("{:-<60}", "");
    for person in personnel {
        let tags: Vec<&str> = person.qualifications.iter().map(|q| q.as_str()).collect();
        println!("{:>4}  {:<24} {}", person.id, person.name, tags.join(", "));
    }

    Ok(())
}

pub async fn cmd_seed_kameraden(state: &SharedState, confirmed: bool) -> anyhow::Result<()> {
    let current = state.roster_service.list_personnel().await.len();

    if !confirmed {
        println!("This replaces all {current} Kameraden with generated sample data.");
        println!("Re-run with --yes to proceed.");
        return Ok(());
    }

    let generated = state.roster_service.generate_personnel().await?;
    println!("{} Beispielkameraden generiert.", generated.len());
    Ok(())
}
