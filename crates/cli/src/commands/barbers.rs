//! Team (barber roster) commands.
//!
//! # Usage
//!
//! ```bash
//! queuemate barbers list --status active --search fade
//! queuemate barbers add -n Sam -s "Skin fade:45" -s "Beard trim"
//! queuemate barbers edit <id> -s "Skin fade:40"
//! queuemate barbers status <id> on-break
//! queuemate barbers delete <id> --yes
//! ```

use queuemate_client::{
    ConfirmationRequest, QueueMate, Resolution, Roster, RosterFilter, Screen, StatusFilter,
    resolve,
};
use queuemate_core::{BarberId, BarberStatus, ServiceDraft};

use super::require;
use super::shop::failed;
use crate::error::CliError;
use crate::{prompt, render};

async fn open_roster(app: &QueueMate) -> Result<Roster, CliError> {
    require(app, Screen::BarberManagement).await?;
    let mut roster = app.roster();
    roster
        .reload()
        .await
        .map_err(|e| failed(e, "Failed to fetch team members"))?;
    Ok(roster)
}

/// List the team with per-status counts.
pub async fn list(app: &QueueMate, status: StatusFilter, search: Option<String>) -> Result<(), CliError> {
    let roster = open_roster(app).await?;
    let filter = RosterFilter {
        status,
        search: search.unwrap_or_default(),
    };
    render::roster(&roster.filtered(&filter), &roster.counts());
    Ok(())
}

/// Add a team member.
pub async fn add(
    app: &QueueMate,
    name: &str,
    services: Vec<ServiceDraft>,
    status: BarberStatus,
) -> Result<(), CliError> {
    let mut roster = open_roster(app).await?;
    roster
        .add(name, services, status)
        .await
        .map_err(|e| failed(e, "Failed to add barber"))?;
    render::line(&format!("Added {}.", name.trim()));
    Ok(())
}

/// Edit a team member; omitted fields keep their current values.
pub async fn edit(
    app: &QueueMate,
    id: &BarberId,
    name: Option<String>,
    services: Vec<ServiceDraft>,
    status: Option<BarberStatus>,
) -> Result<(), CliError> {
    let mut roster = open_roster(app).await?;
    let current = roster
        .get(id)
        .ok_or_else(|| CliError::Invalid(format!("No team member with id {id}")))?;

    let name = name.unwrap_or_else(|| current.name.clone());
    let status = status.unwrap_or(current.status);
    let services = if services.is_empty() {
        current
            .services
            .iter()
            .map(|service| ServiceDraft::new(service.name.clone(), Some(service.duration)))
            .collect()
    } else {
        services
    };

    roster
        .edit(id, &name, services, status)
        .await
        .map_err(|e| failed(e, "Failed to update staff member"))?;
    render::line(&format!("Updated {}.", name.trim()));
    Ok(())
}

/// Change availability.
pub async fn set_status(app: &QueueMate, id: &BarberId, status: BarberStatus) -> Result<(), CliError> {
    let mut roster = open_roster(app).await?;
    roster
        .set_status(id, status)
        .await
        .map_err(|e| failed(e, "Failed to update status"))?;
    render::line(&format!("Status set to {status}."));
    Ok(())
}

/// Ask for confirmation, then delete.
pub async fn delete(app: &QueueMate, id: BarberId, yes: bool) -> Result<(), CliError> {
    require(app, Screen::BarberManagement).await?;

    let request = ConfirmationRequest::delete_barber(id);
    let decision = prompt::confirm(&request, yes)?;

    match resolve(request, decision, app.api())
        .await
        .map_err(|e| failed(e, "Failed to delete team member"))?
    {
        Resolution::BarberDeleted(_) => render::line("Team member deleted"),
        _ => render::line("Cancelled."),
    }
    Ok(())
}
