use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::domain::record::RecordId;
use crate::domain::technician::ContactProfile;
use crate::domain::ticket::Ticket;
use crate::error::{AppError, AppResult};
use crate::services::HelpdeskService;

pub type Transfers = Arc<Mutex<Vec<(RecordId, RecordId)>>>;

/// In-memory helpdesk for workflow and route tests.
#[derive(Default)]
pub struct FakeHelpdesk {
    tickets: Option<Vec<Ticket>>,
    contacts: HashMap<u64, ContactProfile>,
    failing_contacts: HashSet<u64>,
    reject_transfers: bool,
    transfers: Transfers,
}

impl FakeHelpdesk {
    pub fn with_tickets(tickets: Value) -> Self {
        Self {
            tickets: Some(serde_json::from_value(tickets).unwrap()),
            ..Self::default()
        }
    }

    /// Every ticket lookup fails.
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn with_contact(mut self, id: u64, profile: Value) -> Self {
        self.contacts
            .insert(id, serde_json::from_value(profile).unwrap());
        self
    }

    pub fn failing_contact(mut self, id: u64) -> Self {
        self.failing_contacts.insert(id);
        self
    }

    pub fn rejecting_transfers(mut self) -> Self {
        self.reject_transfers = true;
        self
    }

    pub fn transfers(&self) -> Transfers {
        Arc::clone(&self.transfers)
    }
}

#[async_trait]
impl HelpdeskService for FakeHelpdesk {
    async fn active_tickets(&self) -> AppResult<Vec<Ticket>> {
        self.tickets
            .clone()
            .ok_or_else(|| AppError::Helpdesk("tickets unavailable".to_string()))
    }

    async fn contact(&self, technician: u64) -> AppResult<Option<ContactProfile>> {
        if self.failing_contacts.contains(&technician) {
            return Err(AppError::Helpdesk(format!("contact {technician} unavailable")));
        }
        Ok(self.contacts.get(&technician).cloned())
    }

    async fn transfer_ticket(&self, ticket: &RecordId, technician: &RecordId) -> AppResult<()> {
        if self.reject_transfers {
            return Err(AppError::Helpdesk("transfer rejected".to_string()));
        }
        self.transfers
            .lock()
            .unwrap()
            .push((ticket.clone(), technician.clone()));
        Ok(())
    }
}

pub fn context(helpdesk: FakeHelpdesk, technicians: &[u64]) -> AppContext {
    let mut config = AppConfig::from_lookup(|_| None).unwrap();
    config.base_url = "https://acme.agidesk.com".to_string();
    config.technicians = technicians.to_vec();
    AppContext::new(config, Arc::new(helpdesk))
}
