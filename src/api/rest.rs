use actix_web::{
    HttpRequest, HttpResponse, ResponseError,
    error::{JsonPayloadError, QueryPayloadError},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::model::{
    apperror::{ApplicationError, ErrorType},
    customer::{Connection, Coordinates, Customer, CustomerAddInputType, CustomerMapInputType, CustomerStatus, CustomersListInputType, DEFAULT_COORDINATES, DeviceProvisioning, MapMarker},
    models::{Selection, StatsPeriod},
    ticket::{CommentAddInputType, Ticket, TicketAddInputType, TicketPriority, TicketStatus, TicketsListInputType},
};

/***************** Customers models *********************/

/**
 * Request structure for listing customers.
 *
 * Missing fields select everything.
 */
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomersListRequest {
    pub query: Option<String>,
    pub status: Option<Selection<CustomerStatus>>,
    pub connection: Option<Selection<Connection>>,
}

impl From<CustomersListRequest> for CustomersListInputType {
    fn from(request: CustomersListRequest) -> Self {
        CustomersListInputType { query: request.query.unwrap_or_default(), status: request.status.unwrap_or_default(), connection: request.connection.unwrap_or_default() }
    }
}

/**
 * Response structure for listing customers.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomersListResponse {
    pub customers: Vec<Customer>,
}

/**
 * Request structure for adding a customer.
 *
 * Missing text fields are read as empty and rejected by validation.
 */
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAddRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub package: String,
    pub connection: Option<Connection>,
    pub coordinates: Option<Coordinates>,
    pub device: Option<DeviceProvisioning>,
}

impl From<CustomerAddRequest> for CustomerAddInputType {
    fn from(request: CustomerAddRequest) -> Self {
        CustomerAddInputType {
            name: request.name,
            phone: request.phone,
            email: request.email,
            address: request.address,
            package: request.package,
            connection: request.connection.unwrap_or_default(),
            coordinates: request.coordinates.unwrap_or(DEFAULT_COORDINATES),
            device: request.device,
        }
    }
}

/**
 * Request structure for the customer map.
 */
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerMapRequest {
    pub query: Option<String>,
    pub status: Option<Selection<CustomerStatus>>,
}

impl From<CustomerMapRequest> for CustomerMapInputType {
    fn from(request: CustomerMapRequest) -> Self {
        CustomerMapInputType { query: request.query.unwrap_or_default(), status: request.status.unwrap_or_default() }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerMapResponse {
    pub markers: Vec<MapMarker>,
}

/***************** Tickets models *********************/

/**
 * Request structure for listing tickets.
 */
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketsListRequest {
    pub query: Option<String>,
    pub status: Option<Selection<TicketStatus>>,
    pub priority: Option<Selection<TicketPriority>>,
}

impl From<TicketsListRequest> for TicketsListInputType {
    fn from(request: TicketsListRequest) -> Self {
        TicketsListInputType { query: request.query.unwrap_or_default(), status: request.status.unwrap_or_default(), priority: request.priority.unwrap_or_default() }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketsListResponse {
    pub tickets: Vec<Ticket>,
}

/**
 * Request structure for creating a ticket.
 */
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketAddRequest {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub customer: String,
    pub priority: TicketPriority,
    /**
     * The tracker's default assignee is used when missing or blank.
     */
    pub assignee: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl From<TicketAddRequest> for TicketAddInputType {
    fn from(request: TicketAddRequest) -> Self {
        TicketAddInputType { subject: request.subject, customer: request.customer, priority: request.priority, assignee: request.assignee, description: request.description }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketStatusRequest {
    pub status: TicketStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketPriorityRequest {
    pub priority: TicketPriority,
}

/**
 * Request structure for commenting on a ticket.
 */
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAddRequest {
    /**
     * The configured comment author is used when missing or blank.
     */
    pub author: Option<String>,
    #[serde(default)]
    pub content: String,
}

impl From<(CommentAddRequest, &str)> for CommentAddInputType {
    fn from((request, default_author): (CommentAddRequest, &str)) -> Self {
        let author = request.author.filter(|author| !author.trim().is_empty()).unwrap_or_else(|| default_author.to_string());
        CommentAddInputType { author, content: request.content }
    }
}

/***************** Dashboard models *********************/

/**
 * Query parameters of the dashboard. The period defaults to monthly.
 */
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    pub period: Option<StatsPeriod>,
}

/***************** Error models *********************/

/**
 * Custom error response for the application.
 */
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /**
     * The error code associated with the error type.
     */
    pub code: u16,
    /**
     * A human-readable message describing the error.
     */
    pub message: String,
}

impl ResponseError for ApplicationError {
    /**
     * Generates an error response for the application error.
     */
    fn error_response(&self) -> HttpResponse {
        let error_response = ErrorResponse { code: get_error_code(&self.error_type), message: self.message.clone() };
        HttpResponse::build(get_statuscode(&self.error_type)).json(&error_response)
    }

    fn status_code(&self) -> StatusCode {
        get_statuscode(&self.error_type)
    }
}

/**
 * Turns a rejected JSON body, e.g. an unknown enum value or a missing field, into a validation error.
 */
pub fn json_error_handler(err: JsonPayloadError, _http_request: &HttpRequest) -> actix_web::Error {
    ApplicationError::validation(err.to_string()).into()
}

/**
 * Turns rejected query parameters into a validation error.
 */
pub fn query_error_handler(err: QueryPayloadError, _http_request: &HttpRequest) -> actix_web::Error {
    ApplicationError::validation(err.to_string()).into()
}

/**
* Maps application errors to HTTP status codes.
*
* # Arguments
* `application_error`: The type of error that occurred.
*
* # Returns
* The corresponding HTTP status code.
*/
fn get_statuscode(application_error: &ErrorType) -> StatusCode {
    match application_error {
        ErrorType::Initialization | ErrorType::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorType::Validation => StatusCode::BAD_REQUEST,
        ErrorType::NotFound => StatusCode::NOT_FOUND,
    }
}

/**
 * Maps application errors to error codes.
 *
 * # Arguments
 * `application_error`: The type of error that occurred.
 *
 * # Returns
 * The corresponding error code.
 */
fn get_error_code(application_error: &ErrorType) -> u16 {
    match application_error {
        ErrorType::Initialization => 1001,
        ErrorType::Validation => 1002,
        ErrorType::NotFound => 1003,
        ErrorType::Internal => 1004,
    }
}
