//! Staffing check command handler

use crate::services::readiness;
use crate::state::SharedState;

pub async fn cmd_check(state: &SharedState) -> anyhow::Result<()> {
    let personnel = state.roster_service.list_personnel().await;
    let settings = state.settings_service.settings().await;
    let incident = state.settings_service.incident().await;

    let report = readiness::evaluate(&personnel, &settings, &incident);

    println!("Einsatz: {} (Bedarf {})", incident.keyword, incident.crew_required);
    println!("{:-<50}", "");
    println!(
        "AGT         {:>4} / {}",
        report.available.agt, report.required.min_agt
    );
    println!(
        "Maschinist  {:>4} / {}",
        report.available.maschinist, report.required.min_maschinist
    );
    println!(
        "GF          {:>4} / {}",
        report.available.gf, report.required.min_gf
    );
    println!(
        "Gesamt      {:>4} / {}",
        report.available.total, report.required.crew_required
    );
    println!();

    if report.fulfilled {
        println!("Besetzung erfüllt.");
    } else {
        println!("Besetzung NICHT erfüllt:");
        for shortfall in report.shortfalls() {
            println!(
                "  {}: {} von {}",
                shortfall.requirement, shortfall.available, shortfall.required
            );
        }
    }

    Ok(())
}
