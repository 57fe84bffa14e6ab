use actix_web::{
    HttpRequest, HttpResponse, get, post, put,
    web::{self, Path},
};
use tracing::instrument;

use crate::{
    api::{
        rest::{
            json_error_handler, query_error_handler, CommentAddRequest, CustomerAddRequest, CustomerMapRequest, CustomerMapResponse, CustomersListRequest, CustomersListResponse, DashboardQuery, TicketAddRequest, TicketPriorityRequest,
            TicketStatusRequest, TicketsListRequest, TicketsListResponse,
        },
        state::AppState,
    },
    model::{
        apperror::ApplicationError,
        customer::{CustomerAddInputType, CustomerMapInputType, CustomersListInputType},
        models::Section,
        ticket::{CommentAddInputType, Ticket, TicketAddInputType, TicketsListInputType},
    },
    service::{dashboard::summarize, sections::section_view},
};

/**
 * Registers every back office endpoint.
 *
 * Rejected JSON bodies and query strings are answered like any other validation error.
 */
pub fn configure(service_config: &mut web::ServiceConfig) {
    service_config
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(customers_list)
        .service(customer_add)
        .service(customer_get)
        .service(customers_map)
        .service(tickets_list)
        .service(ticket_add)
        .service(ticket_get)
        .service(ticket_status_update)
        .service(ticket_priority_update)
        .service(ticket_comment_add)
        .service(dashboard_get)
        .service(section_get);
}

/**
 * Endpoint to retrieve the customers matching a filter.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "listCustomers", trace_id = get_trace_id(&http_request), result))]
#[post("/api/services/v1_0/customers:list")]
pub async fn customers_list(http_request: HttpRequest, request_body: web::Json<CustomersListRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let filter = CustomersListInputType::from(request_body.into_inner());
    let customers = app_state.customer_service.list_customers(&filter);
    tracing::Span::current().record("result", customers.len());
    Ok(HttpResponse::Ok().json(CustomersListResponse { customers }))
}

/**
 * Add a new customer pending installation.
 */
#[instrument(level = "info", skip(http_request, request_body, app_state), fields(service = "addCustomer", trace_id = get_trace_id(&http_request), result))]
#[post("/api/services/v1_0/customers")]
pub async fn customer_add(http_request: HttpRequest, request_body: web::Json<CustomerAddRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let customer_add_input = CustomerAddInputType::from(request_body.into_inner()).validate()?;
    let customer = app_state.customer_service.add_customer(customer_add_input)?;
    tracing::Span::current().record("result", customer.id.as_str());
    Ok(HttpResponse::Created().json(customer))
}

/**
 * Endpoint to retrieve one customer.
 */
#[instrument(skip(http_request, app_state), fields(service = "getCustomer", trace_id = get_trace_id(&http_request), result))]
#[get("/api/services/v1_0/customers/{customerId}")]
pub async fn customer_get(path: Path<String>, http_request: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let customer = app_state.customer_service.get_customer(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(customer))
}

/**
 * Endpoint to retrieve the map markers matching a filter.
 */
#[instrument(skip(http_request, app_state), fields(service = "mapCustomers", trace_id = get_trace_id(&http_request), result))]
#[post("/api/services/v1_0/customers:map")]
pub async fn customers_map(http_request: HttpRequest, request_body: web::Json<CustomerMapRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let filter = CustomerMapInputType::from(request_body.into_inner());
    let markers = app_state.customer_service.map_markers(&filter);
    tracing::Span::current().record("result", markers.len());
    Ok(HttpResponse::Ok().json(CustomerMapResponse { markers }))
}

/**
 * Endpoint to retrieve the tickets matching a filter.
 */
#[instrument(skip(http_request, app_state), fields(service = "listTickets", trace_id = get_trace_id(&http_request), result))]
#[post("/api/services/v1_0/tickets:list")]
pub async fn tickets_list(http_request: HttpRequest, request_body: web::Json<TicketsListRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let filter = TicketsListInputType::from(request_body.into_inner());
    let tickets = app_state.ticket_service.list_tickets(&filter);
    tracing::Span::current().record("result", tickets.len());
    Ok(HttpResponse::Ok().json(TicketsListResponse { tickets }))
}

/**
 * Create a new open ticket.
 */
#[instrument(skip(http_request, app_state), fields(service = "addTicket", trace_id = get_trace_id(&http_request), result))]
#[post("/api/services/v1_0/tickets")]
pub async fn ticket_add(http_request: HttpRequest, request_body: web::Json<TicketAddRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let ticket_add_input = TicketAddInputType::from(request_body.into_inner()).validate()?;
    let ticket = app_state.ticket_service.create_ticket(ticket_add_input)?;
    tracing::Span::current().record("result", ticket.id.as_str());
    Ok(HttpResponse::Created().json(ticket))
}

/**
 * Endpoint to retrieve one ticket with its comments.
 */
#[instrument(skip(http_request, app_state), fields(service = "getTicket", trace_id = get_trace_id(&http_request), result))]
#[get("/api/services/v1_0/tickets/{ticketId}")]
pub async fn ticket_get(path: Path<String>, http_request: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let ticket = app_state.ticket_service.get_ticket(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(ticket))
}

/**
 * Change the status of a ticket.
 */
#[instrument(skip(http_request, app_state), fields(service = "updateTicketStatus", trace_id = get_trace_id(&http_request), result))]
#[put("/api/services/v1_0/tickets/{ticketId}/status")]
pub async fn ticket_status_update(path: Path<String>, http_request: HttpRequest, request_body: web::Json<TicketStatusRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let ticket = app_state.ticket_service.set_status(&path.into_inner(), request_body.status)?;
    Ok(ticket_response(ticket))
}

/**
 * Change the priority of a ticket.
 */
#[instrument(skip(http_request, app_state), fields(service = "updateTicketPriority", trace_id = get_trace_id(&http_request), result))]
#[put("/api/services/v1_0/tickets/{ticketId}/priority")]
pub async fn ticket_priority_update(path: Path<String>, http_request: HttpRequest, request_body: web::Json<TicketPriorityRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let ticket = app_state.ticket_service.set_priority(&path.into_inner(), request_body.priority)?;
    Ok(ticket_response(ticket))
}

/**
 * Append a comment to a ticket.
 */
#[instrument(skip(http_request, app_state), fields(service = "addTicketComment", trace_id = get_trace_id(&http_request), result))]
#[post("/api/services/v1_0/tickets/{ticketId}/comments")]
pub async fn ticket_comment_add(path: Path<String>, http_request: HttpRequest, request_body: web::Json<CommentAddRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let comment_add_input = CommentAddInputType::from((request_body.into_inner(), app_state.workspace.comment_author.as_str())).validate()?;
    let ticket = app_state.ticket_service.add_comment(&path.into_inner(), comment_add_input)?;
    Ok(ticket_response(ticket))
}

/**
 * Endpoint to retrieve the dashboard summary for a reporting period.
 */
#[instrument(skip(http_request, app_state), fields(service = "getDashboard", trace_id = get_trace_id(&http_request), result))]
#[get("/api/services/v1_0/dashboard")]
pub async fn dashboard_get(http_request: HttpRequest, query: web::Query<DashboardQuery>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let period = query.period.unwrap_or_default();
    let customers = app_state.customer_service.snapshot();
    let tickets = app_state.ticket_service.snapshot();
    let summary = summarize(&customers, &tickets, period, app_state.ticket_service.now(), app_state.workspace.recent_ticket_limit);
    Ok(HttpResponse::Ok().json(summary))
}

/**
 * Endpoint to retrieve the default view of a section. Unknown sections show the dashboard.
 */
#[instrument(skip(http_request, app_state), fields(service = "getSection", trace_id = get_trace_id(&http_request), result))]
#[get("/api/services/v1_0/sections/{section}")]
pub async fn section_get(path: Path<String>, http_request: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let section = Section::from_name(&path.into_inner());
    tracing::Span::current().record("result", section.label());
    let view = section_view(section, &app_state.customer_service, &app_state.ticket_service, app_state.workspace.recent_ticket_limit);
    Ok(HttpResponse::Ok().json(view))
}

/**
 * The updated ticket, or no content when an unknown ticket was ignored.
 */
fn ticket_response(ticket: Option<Ticket>) -> HttpResponse {
    match ticket {
        Some(ticket) => HttpResponse::Ok().json(ticket),
        None => HttpResponse::NoContent().finish(),
    }
}

/**
 * Retrieves the trace ID from the HTTP request headers.
 * If the trace ID is not present, a new UUID is generated.
 */
fn get_trace_id(http_request: &HttpRequest) -> String {
    http_request.headers().get("X-Trace-ID").and_then(|v| v.to_str().ok().map(std::string::ToString::to_string)).unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use actix_web::{
        App,
        http::StatusCode,
        test::{self, TestRequest},
    };
    use serde_json::{Value, json};

    use super::*;
    use crate::{
        model::{config::WorkspaceConfig, models::LookupMode},
        service::clock::SystemClock,
    };

    fn state(lookup_mode: LookupMode) -> web::Data<AppState> {
        let workspace = WorkspaceConfig { lookup_mode, ..WorkspaceConfig::default() };
        web::Data::new(AppState::from_workspace(workspace, Arc::new(SystemClock)).unwrap())
    }

    #[actix_web::test]
    async fn test_get_trace_id_exists() {
        let request = TestRequest::default().insert_header(("X-Trace-ID", "test")).to_http_request();
        let trace_id = get_trace_id(&request);
        assert_eq!(trace_id, "test");
    }

    #[actix_web::test]
    async fn test_get_trace_id_not_exists() {
        let request = TestRequest::default().to_http_request();
        let trace_id = get_trace_id(&request);
        assert!(!trace_id.is_empty());
    }

    #[actix_web::test]
    async fn test_customers_list_filters() {
        let app = test::init_service(App::new().app_data(state(LookupMode::Lenient)).configure(configure)).await;
        let request = TestRequest::post().uri("/api/services/v1_0/customers:list").set_json(json!({"status": "active", "connection": "linknet"})).to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        let ids: Vec<&str> = body["customers"].as_array().unwrap().iter().map(|customer| customer["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["CUST002", "CUST005"]);

        let request = TestRequest::post().uri("/api/services/v1_0/customers:list").set_json(json!({})).to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["customers"].as_array().unwrap().len(), 5);

        let request = TestRequest::post().uri("/api/services/v1_0/customers:list").set_json(json!({"query": "  "})).to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert!(body["customers"].as_array().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_customer_add() {
        let app = test::init_service(App::new().app_data(state(LookupMode::Lenient)).configure(configure)).await;
        let request = TestRequest::post()
            .uri("/api/services/v1_0/customers")
            .set_json(json!({
                "name": "Rina Wati",
                "phone": "086789012345",
                "email": "rina.wati@email.com",
                "address": "Jl. Kemang Raya No. 8, Jakarta Selatan",
                "package": "Paket Home 50 Mbps",
                "connection": "TBG",
                "device": {"modemBrand": "ZTE", "macAddress": "00:1A:2B:3C:4D:5E"}
            }))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["id"], "CUST006");
        assert_eq!(body["status"], "pending");
        assert_eq!(body["connection"], "TBG");
        assert_eq!(body["installationDate"], "Pending");
        assert_eq!(body["lastPayment"], "-");
        assert!(body.get("device").is_none());

        let request = TestRequest::post().uri("/api/services/v1_0/customers:map").set_json(json!({"status": "pending"})).to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["markers"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_customer_add_rejects_blank_name() {
        let app = test::init_service(App::new().app_data(state(LookupMode::Lenient)).configure(configure)).await;
        let request = TestRequest::post().uri("/api/services/v1_0/customers").set_json(json!({"name": " ", "phone": "1", "email": "a@b", "address": "x", "package": "p"})).to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["code"], 1002);
    }

    #[actix_web::test]
    async fn test_tickets_list_rejects_unknown_status() {
        let app = test::init_service(App::new().app_data(state(LookupMode::Lenient)).configure(configure)).await;
        let request = TestRequest::post().uri("/api/services/v1_0/tickets:list").set_json(json!({"status": "archived"})).to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["code"], 1002);
        assert!(body["message"].as_str().unwrap().contains("archived"));

        let request = TestRequest::post().uri("/api/services/v1_0/tickets:list").set_json(json!({"status": "open", "priority": "all"})).to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        let ids: Vec<&str> = body["tickets"].as_array().unwrap().iter().map(|ticket| ticket["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["TKT-001", "TKT-005"]);
    }

    #[actix_web::test]
    async fn test_ticket_lifecycle() {
        let app = test::init_service(App::new().app_data(state(LookupMode::Lenient)).configure(configure)).await;
        let request = TestRequest::post()
            .uri("/api/services/v1_0/tickets")
            .set_json(json!({"subject": "X", "customer": "Budi Santoso", "priority": "critical", "description": "Link down"}))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["id"], "TKT-006");
        assert_eq!(body["status"], "open");
        assert_eq!(body["assignee"], "Admin");
        assert!(body["comments"].as_array().unwrap().is_empty());

        let request = TestRequest::put().uri("/api/services/v1_0/tickets/TKT-006/status").set_json(json!({"status": "in_progress"})).to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["status"], "in_progress");

        let request = TestRequest::put().uri("/api/services/v1_0/tickets/TKT-006/priority").set_json(json!({"priority": "low"})).to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["priority"], "low");

        let request = TestRequest::post().uri("/api/services/v1_0/tickets/TKT-006/comments").set_json(json!({"content": "Teknisi dikirim"})).to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        let comments = body["comments"].as_array().unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0]["id"], "CMT-005");
        assert_eq!(comments[0]["author"], "Admin");

        let request = TestRequest::get().uri("/api/services/v1_0/tickets/TKT-006").to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["status"], "in_progress");
        assert_eq!(body["comments"].as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_rejected_bodies_use_error_contract() {
        let app = test::init_service(App::new().app_data(state(LookupMode::Lenient)).configure(configure)).await;
        let request = TestRequest::put().uri("/api/services/v1_0/tickets/TKT-001/status").set_json(json!({"status": "done"})).to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["code"], 1002);

        let request = TestRequest::post().uri("/api/services/v1_0/tickets").set_json(json!({"subject": "X", "customer": "Y", "description": "desc"})).to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["code"], 1002);

        let request = TestRequest::get().uri("/api/services/v1_0/dashboard?period=yearly").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["code"], 1002);
        assert!(body["message"].as_str().unwrap().contains("yearly"));
    }

    #[actix_web::test]
    async fn test_customer_get() {
        let app = test::init_service(App::new().app_data(state(LookupMode::Lenient)).configure(configure)).await;
        let request = TestRequest::get().uri("/api/services/v1_0/customers/CUST003").to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["name"], "Ahmad Hidayat");
        assert_eq!(body["connection"], "TBG");

        let request = TestRequest::get().uri("/api/services/v1_0/customers/CUST099").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["code"], 1003);
    }

    #[actix_web::test]
    async fn test_blank_comment_is_rejected() {
        let app = test::init_service(App::new().app_data(state(LookupMode::Lenient)).configure(configure)).await;
        let request = TestRequest::post().uri("/api/services/v1_0/tickets/TKT-001/comments").set_json(json!({"content": "   "})).to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_unknown_ticket_lenient() {
        let app = test::init_service(App::new().app_data(state(LookupMode::Lenient)).configure(configure)).await;
        let request = TestRequest::put().uri("/api/services/v1_0/tickets/TKT-999/status").set_json(json!({"status": "closed"})).to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let request = TestRequest::get().uri("/api/services/v1_0/tickets/TKT-999").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["code"], 1003);
    }

    #[actix_web::test]
    async fn test_unknown_ticket_strict() {
        let app = test::init_service(App::new().app_data(state(LookupMode::Strict)).configure(configure)).await;
        let request = TestRequest::post().uri("/api/services/v1_0/tickets/TKT-999/comments").set_json(json!({"content": "Halo"})).to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_dashboard_periods() {
        let app = test::init_service(App::new().app_data(state(LookupMode::Lenient)).configure(configure)).await;
        let request = TestRequest::get().uri("/api/services/v1_0/dashboard").to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["period"], "monthly");
        assert_eq!(body["ticketTrend"].as_array().unwrap().len(), 6);
        assert_eq!(body["activeCustomers"], 3);
        assert_eq!(body["recentTickets"].as_array().unwrap().len(), 5);
        assert_eq!(body["totalTickets"], 5);
        assert_eq!(body["ticketsByStatus"][0]["status"], "open");
        assert_eq!(body["ticketsByStatus"][0]["tickets"], 2);

        let request = TestRequest::get().uri("/api/services/v1_0/dashboard?period=weekly").to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["periodLabel"], "Mingguan");
        assert_eq!(body["ticketTrend"].as_array().unwrap().len(), 4);
    }

    #[actix_web::test]
    async fn test_sections() {
        let app = test::init_service(App::new().app_data(state(LookupMode::Lenient)).configure(configure)).await;
        let request = TestRequest::get().uri("/api/services/v1_0/sections/customers").to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["section"], "customers");
        assert_eq!(body["customers"].as_array().unwrap().len(), 5);

        let request = TestRequest::get().uri("/api/services/v1_0/sections/billing").to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["section"], "dashboard");
        assert_eq!(body["label"], "Dashboard");
    }
}
