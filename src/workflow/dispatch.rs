use tracing::{info, warn};

use crate::context::AppContext;
use crate::domain::record::RecordId;
use crate::domain::technician::Technician;
use crate::domain::ticket::{self, Ticket};
use crate::domain::workload::Workload;
use crate::error::AppResult;

pub async fn unassigned_tickets(ctx: &AppContext) -> AppResult<Vec<Ticket>> {
    let tickets = ticket::unassigned(ctx.helpdesk.active_tickets().await?);
    info!(count = tickets.len(), "loaded unassigned tickets");
    Ok(tickets)
}

/// Tracked technicians in configured order, each with its open-ticket count.
/// A technician whose profile cannot be loaded is left out.
pub async fn technician_roster(ctx: &AppContext) -> AppResult<Vec<Technician>> {
    let tickets = ctx.helpdesk.active_tickets().await?;
    let workload = Workload::tally(&ctx.config.technicians, &tickets);

    let mut roster = Vec::with_capacity(ctx.config.technicians.len());
    for &id in &ctx.config.technicians {
        match ctx.helpdesk.contact(id).await {
            Ok(Some(profile)) => {
                let technician = Technician::from_profile(profile, workload.count(id));
                info!(
                    technician = id,
                    name = %technician.name,
                    tickets = technician.ticket_count,
                    "loaded technician"
                );
                roster.push(technician);
            }
            Ok(None) => warn!(technician = id, "technician not found in helpdesk"),
            Err(err) => warn!(technician = id, error = %err, "failed to load technician"),
        }
    }

    Ok(roster)
}

pub async fn assign_ticket(
    ctx: &AppContext,
    ticket: &RecordId,
    technician: &RecordId,
) -> AppResult<()> {
    ctx.helpdesk.transfer_ticket(ticket, technician).await?;
    info!(%ticket, %technician, "ticket assigned");
    Ok(())
}
