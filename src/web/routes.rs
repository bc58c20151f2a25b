use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tracing::{error, warn};

use super::payloads::{
    AssignPayload, ErrorResponse, HealthResponse, MessageResponse, TechnicianView, TicketView,
};
use crate::context::AppContext;
use crate::workflow::dispatch;

pub const MESSAGE_ASSIGNED: &str = "Chamado atribuído com sucesso";
pub const ERROR_ASSIGN_FAILED: &str = "Falha ao atribuir chamado";
pub const ERROR_DASHBOARD_MISSING: &str = "Dashboard page not found";

// ============================================================================
// Dashboard
// ============================================================================

pub fn dashboard_routes() -> Router<AppContext> {
    Router::new().route("/", get(index))
}

async fn index(State(ctx): State<AppContext>) -> Response {
    match tokio::fs::read_to_string(&ctx.config.index_path).await {
        Ok(page) => Html(page).into_response(),
        Err(err) => {
            error!(
                path = %ctx.config.index_path.display(),
                "failed to read dashboard page: {err}"
            );
            (StatusCode::NOT_FOUND, ERROR_DASHBOARD_MISSING).into_response()
        }
    }
}

// ============================================================================
// API
// ============================================================================

pub fn api_routes() -> Router<AppContext> {
    Router::new()
        .route("/api/tickets", get(list_tickets))
        .route("/api/technicians", get(list_technicians))
        .route("/api/assign", post(assign))
}

/// Helpdesk failures degrade to an empty list so the page still renders.
async fn list_tickets(State(ctx): State<AppContext>) -> Json<Vec<TicketView>> {
    match dispatch::unassigned_tickets(&ctx).await {
        Ok(tickets) => Json(tickets.into_iter().map(TicketView::from).collect()),
        Err(err) => {
            error!("failed to load tickets: {err}");
            Json(Vec::new())
        }
    }
}

async fn list_technicians(State(ctx): State<AppContext>) -> Json<Vec<TechnicianView>> {
    match dispatch::technician_roster(&ctx).await {
        Ok(roster) => Json(
            roster
                .into_iter()
                .map(|technician| TechnicianView::new(technician, &ctx.config.base_url))
                .collect(),
        ),
        Err(err) => {
            error!("failed to load technicians: {err}");
            Json(Vec::new())
        }
    }
}

async fn assign(
    State(ctx): State<AppContext>,
    payload: Result<Json<AssignPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("rejected assign request: {rejection}");
            return bad_request(rejection.body_text());
        }
    };

    match dispatch::assign_ticket(&ctx, &payload.ticket_id, &payload.technician_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: MESSAGE_ASSIGNED,
            }),
        )
            .into_response(),
        Err(err) => {
            error!(
                ticket = %payload.ticket_id,
                technician = %payload.technician_id,
                "failed to assign ticket: {err}"
            );
            bad_request(ERROR_ASSIGN_FAILED.to_string())
        }
    }
}

fn bad_request(error: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response()
}

// ============================================================================
// Health
// ============================================================================

pub fn health_routes() -> Router<AppContext> {
    Router::new().route("/health", get(health))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use axum::{
        body::Body,
        http::{Request, header},
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::record::RecordId;
    use crate::web::router;
    use crate::workflow::testing::{FakeHelpdesk, context};

    fn helpdesk() -> FakeHelpdesk {
        FakeHelpdesk::with_tickets(json!([
            {"id": 10, "title": "Printer", "content": "Jammed", "contact": "Maria"},
            {"id": 11, "title": "VPN", "content": "Down", "contact": {"name": "Joao"}},
            {"id": 12, "title": "Email", "contact": {}, "responsible_id": ""},
            {"id": 13, "title": "Laptop", "responsible_id": "876"}
        ]))
        .with_contact(876, json!({"id": 876, "title": "Cicero", "avatar": {"path": "files/876.png"}}))
        .with_contact(7304, json!({"id": 7304, "title": "Wilner", "avatar": null}))
    }

    async fn call(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn assign_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/assign")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn lists_unassigned_tickets_for_the_dashboard() {
        let app = router(context(helpdesk(), &[876]));
        let (status, body) = call(app, get_request("/api/tickets")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                {"id": 10, "titulo": "Printer", "descricao": "Jammed", "cliente": "Maria"},
                {"id": 11, "titulo": "VPN", "descricao": "Down", "cliente": "Joao"},
                {"id": 12, "titulo": "Email", "descricao": null, "cliente": "Cliente não identificado"}
            ])
        );
    }

    #[tokio::test]
    async fn lists_technicians_with_photo_and_counts() {
        let app = router(context(helpdesk(), &[876, 7304]));
        let (status, body) = call(app, get_request("/api/technicians")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                {
                    "id": 876,
                    "nome": "Cicero",
                    "foto": "https://acme.agidesk.com/files/876.png",
                    "chamadosAtivos": 1
                },
                {"id": 7304, "nome": "Wilner", "foto": "", "chamadosAtivos": 0}
            ])
        );
    }

    #[tokio::test]
    async fn odd_field_types_do_not_hide_other_tickets() {
        let helpdesk = FakeHelpdesk::with_tickets(json!([
            {"id": 10, "title": "Printer", "contact": "Maria"},
            {"id": -3, "title": 12345, "content": {"html": "<p>VPN</p>"}},
            {"id": 4.5, "title": ["Email"], "responsible_id": "876"},
            {"id": 13, "title": "Laptop", "responsible_id": 876}
        ]))
        .with_contact(876, json!({"id": 876, "title": "Cicero"}));

        let app = router(context(helpdesk, &[876]));
        let (_, tickets) = call(app.clone(), get_request("/api/tickets")).await;
        assert_eq!(
            tickets,
            json!([
                {"id": 10, "titulo": "Printer", "descricao": null, "cliente": "Maria"},
                {
                    "id": -3,
                    "titulo": 12345,
                    "descricao": {"html": "<p>VPN</p>"},
                    "cliente": "Cliente não identificado"
                }
            ])
        );

        let (_, technicians) = call(app, get_request("/api/technicians")).await;
        assert_eq!(technicians[0]["nome"], "Cicero");
        assert_eq!(technicians[0]["chamadosAtivos"], 2);
    }

    #[tokio::test]
    async fn helpdesk_outage_yields_empty_lists() {
        let (status, body) = call(
            router(context(FakeHelpdesk::failing(), &[876])),
            get_request("/api/tickets"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, body) = call(
            router(context(FakeHelpdesk::failing(), &[876])),
            get_request("/api/technicians"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn assigns_ticket() {
        let helpdesk = helpdesk();
        let transfers = helpdesk.transfers();
        let app = router(context(helpdesk, &[876]));

        let (status, body) =
            call(app, assign_request(r#"{"ticketId": 10, "technicianId": "876"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": MESSAGE_ASSIGNED}));
        assert_eq!(
            transfers.lock().unwrap().as_slice(),
            &[(RecordId::Number(10), RecordId::Text("876".to_string()))]
        );
    }

    #[tokio::test]
    async fn failed_assignment_is_bad_request() {
        let app = router(context(helpdesk().rejecting_transfers(), &[876]));
        let (status, body) =
            call(app, assign_request(r#"{"ticketId": 10, "technicianId": 876}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": ERROR_ASSIGN_FAILED}));
    }

    #[tokio::test]
    async fn malformed_assignment_is_bad_request() {
        let helpdesk = helpdesk();
        let transfers = helpdesk.transfers();
        let app = router(context(helpdesk, &[876]));

        let (status, body) = call(app.clone(), assign_request(r#"{"ticketId": 10}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, _) = call(app, assign_request("not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(transfers.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn serves_dashboard_page() {
        let mut page = std::env::temp_dir();
        page.push(format!("dispatch-index-{}.html", std::process::id()));
        std::fs::File::create(&page)
            .unwrap()
            .write_all(b"<h1>Dispatch</h1>")
            .unwrap();

        let mut ctx = context(helpdesk(), &[876]);
        ctx.config.index_path = page.clone();
        let response = router(ctx).oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"<h1>Dispatch</h1>");

        std::fs::remove_file(page).ok();
    }

    #[tokio::test]
    async fn missing_dashboard_page_is_not_found() {
        let mut ctx = context(helpdesk(), &[876]);
        ctx.config.index_path = "does/not/exist.html".into();
        let response = router(ctx).oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn reports_health() {
        let (status, body) = call(router(context(helpdesk(), &[876])), get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
