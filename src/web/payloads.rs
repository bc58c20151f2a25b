use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::record::RecordId;
use crate::domain::technician::Technician;
use crate::domain::ticket::Ticket;

// Field names are the ones the dashboard page reads.

#[derive(Debug, Serialize)]
pub struct TicketView {
    pub id: Option<RecordId>,
    #[serde(rename = "titulo")]
    pub title: Option<Value>,
    #[serde(rename = "descricao")]
    pub description: Option<Value>,
    #[serde(rename = "cliente")]
    pub client: String,
}

impl From<Ticket> for TicketView {
    fn from(ticket: Ticket) -> Self {
        let client = ticket.client_name().to_string();
        Self {
            id: ticket.id,
            title: ticket.title,
            description: ticket.content,
            client,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TechnicianView {
    pub id: Option<RecordId>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "foto")]
    pub photo_url: String,
    #[serde(rename = "chamadosAtivos")]
    pub active_tickets: usize,
}

impl TechnicianView {
    pub fn new(technician: Technician, base_url: &str) -> Self {
        Self {
            photo_url: technician.avatar_url(base_url),
            id: technician.id,
            name: technician.name,
            active_tickets: technician.ticket_count,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignPayload {
    pub ticket_id: RecordId,
    pub technician_id: RecordId,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
