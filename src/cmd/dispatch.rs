use clap::Args;

use crate::context::AppContext;
use crate::domain::record::RecordId;
use crate::error::AppResult;
use crate::workflow::dispatch;

#[derive(Args, Debug, Clone)]
pub struct AssignArgs {
    /// Ticket to transfer.
    pub ticket: String,
    /// Technician receiving the ticket.
    pub technician: String,
}

pub async fn run_tickets(ctx: &AppContext) -> AppResult<()> {
    let tickets = dispatch::unassigned_tickets(ctx).await?;
    if tickets.is_empty() {
        println!("No unassigned tickets.");
        return Ok(());
    }

    for ticket in &tickets {
        let id = ticket
            .id
            .as_ref()
            .map(RecordId::to_string)
            .unwrap_or_else(|| "?".to_string());
        println!(
            "#{id} {} ({})",
            ticket.title_text(),
            ticket.client_name()
        );
    }
    Ok(())
}

pub async fn run_technicians(ctx: &AppContext) -> AppResult<()> {
    for technician in dispatch::technician_roster(ctx).await? {
        let id = technician
            .id
            .as_ref()
            .map(RecordId::to_string)
            .unwrap_or_else(|| "?".to_string());
        println!(
            "{} (ID: {id}) - {} open tickets",
            technician.name, technician.ticket_count
        );
    }
    Ok(())
}

pub async fn run_assign(ctx: &AppContext, args: AssignArgs) -> AppResult<()> {
    let ticket = parse_id(&args.ticket);
    let technician = parse_id(&args.technician);
    dispatch::assign_ticket(ctx, &ticket, &technician).await?;
    println!("Ticket {ticket} assigned to technician {technician}.");
    Ok(())
}

fn parse_id(raw: &str) -> RecordId {
    raw.trim()
        .parse()
        .map(RecordId::Number)
        .unwrap_or_else(|_| RecordId::Text(raw.trim().to_string()))
}
