use std::sync::Arc;

use crate::{
    dao::{
        customers::CustomerDao,
        seed::{sample_customers, sample_tickets},
        tickets::TicketDao,
    },
    model::{apperror::ApplicationError, config::WorkspaceConfig},
    service::{clock::Clock, customers::CustomerService, tickets::TicketService},
};

/**
* Represents the application state shared across the Actix web application.
*/
pub struct AppState {
    /**
     * The customer directory.
     */
    pub customer_service: CustomerService,
    /**
     * The ticket tracker.
     */
    pub ticket_service: TicketService,
    /**
     * Defaults for assignees, comment authors and the dashboard.
     */
    pub workspace: WorkspaceConfig,
}

impl AppState {
    /**
     * Creates a new instance of `AppState`.
     *
     * # Arguments
     * `customer_service`: The customer directory.
     * `ticket_service`: The ticket tracker.
     * `workspace`: The workspace configuration.
     */
    pub fn new(customer_service: CustomerService, ticket_service: TicketService, workspace: WorkspaceConfig) -> Self {
        AppState { customer_service, ticket_service, workspace }
    }

    /**
     * Creates the state from the workspace configuration, with or without sample data.
     *
     * # Arguments
     * `workspace`: The workspace configuration.
     * `clock`: Source of ticket timestamps.
     *
     * # Returns
     * The state or an initialization error if the sample data is broken.
     */
    pub fn from_workspace(workspace: WorkspaceConfig, clock: Arc<dyn Clock>) -> Result<Self, ApplicationError> {
        let (customers, tickets) = if workspace.seed_sample_data { (sample_customers(), sample_tickets()?) } else { (Vec::new(), Vec::new()) };
        let customer_service = CustomerService::new(CustomerDao::new(customers));
        let ticket_service = TicketService::new(TicketDao::new(tickets), clock, workspace.lookup_mode, workspace.default_assignee.clone());
        Ok(AppState::new(customer_service, ticket_service, workspace))
    }
}
