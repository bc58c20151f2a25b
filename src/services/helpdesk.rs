use async_trait::async_trait;

use crate::domain::record::RecordId;
use crate::domain::technician::ContactProfile;
use crate::domain::ticket::Ticket;
use crate::error::AppResult;

#[async_trait]
pub trait HelpdeskService: Send + Sync {
    /// Active tickets of the configured team, assigned or not.
    async fn active_tickets(&self) -> AppResult<Vec<Ticket>>;
    /// Contact profile for one technician; `None` when the helpdesk has no match.
    async fn contact(&self, technician: u64) -> AppResult<Option<ContactProfile>>;
    async fn transfer_ticket(&self, ticket: &RecordId, technician: &RecordId) -> AppResult<()>;
}
