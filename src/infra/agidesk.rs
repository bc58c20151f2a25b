use async_trait::async_trait;
use reqwest::{
    Client, RequestBuilder, Response, Url,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::domain::record::RecordId;
use crate::domain::technician::ContactProfile;
use crate::domain::ticket::Ticket;
use crate::error::{AppError, AppResult};
use crate::services::HelpdeskService;

const TENANT_HEADER: &str = "X-Tenant-ID";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

pub struct AgideskClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    tenant: String,
    team_id: u64,
}

impl AgideskClient {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        // The tenant endpoints serve certificates that do not verify.
        let mut builder = Client::builder().danger_accept_invalid_certs(true);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| AppError::Configuration(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            tenant: config.tenant.clone(),
            team_id: config.team_id,
        })
    }

    fn api_key(&self) -> AppResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AppError::Configuration("Agidesk API key not configured".to_string()))
    }

    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|err| {
            AppError::Configuration(format!("invalid Agidesk URL '{}': {err}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                AppError::Configuration(format!("Agidesk URL '{}' cannot be a base", self.base_url))
            })?
            .pop_if_empty()
            .extend(["api", "v1"])
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> AppResult<RequestBuilder> {
        let api_key = self.api_key()?;
        Ok(request
            .header(AUTHORIZATION, format!("Bearer {api_key}"))
            .header(TENANT_HEADER, &self.tenant)
            .header(ACCEPT, "application/json")
            .query(&[("app_key", api_key)]))
    }

    async fn fetch<T, Q>(&self, segments: &[&str], query: &Q) -> AppResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        debug!(%url, "fetching from Agidesk");

        let request = self
            .authorized(self.http.get(url))?
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .query(query);
        let response = Self::send(request).await?;

        response
            .json()
            .await
            .map_err(|err| AppError::Helpdesk(format!("failed to parse Agidesk response: {err}")))
    }

    async fn send(request: RequestBuilder) -> AppResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|err| AppError::Helpdesk(format!("failed to call Agidesk: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Helpdesk(format!(
                "Agidesk responded with {status}: {body}"
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl HelpdeskService for AgideskClient {
    async fn active_tickets(&self) -> AppResult<Vec<Ticket>> {
        let team = self.team_id.to_string();
        let items: Vec<Value> = self
            .fetch(
                &["issues"],
                &[("team", team.as_str()), ("forecast", "teams"), ("active", "1")],
            )
            .await?;
        Ok(decode_tickets(items))
    }

    async fn contact(&self, technician: u64) -> AppResult<Option<ContactProfile>> {
        let id = technician.to_string();
        let contacts: Vec<ContactProfile> =
            self.fetch(&["contacts"], &[("id", id.as_str())]).await?;
        Ok(contacts.into_iter().next())
    }

    async fn transfer_ticket(&self, ticket: &RecordId, technician: &RecordId) -> AppResult<()> {
        let ticket_segment = ticket.to_string();
        let url = self.endpoint(&["tasks", ticket_segment.as_str(), "transfer"])?;
        debug!(%url, %technician, "transferring ticket");

        let body = TransferRequest {
            responsible_id: technician,
            team_id: self.team_id,
        };
        Self::send(self.authorized(self.http.put(url))?.json(&body)).await?;
        Ok(())
    }
}

/// Decodes issues one by one so a single odd record does not hide the rest.
fn decode_tickets(items: Vec<Value>) -> Vec<Ticket> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Ticket>(item) {
            Ok(ticket) => Some(ticket),
            Err(err) => {
                warn!("skipping undecodable Agidesk issue: {err}");
                None
            }
        })
        .collect()
}

#[derive(Serialize)]
struct TransferRequest<'a> {
    responsible_id: &'a RecordId,
    team_id: u64,
}
