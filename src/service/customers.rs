use parking_lot::RwLock;
use tracing::{debug, info, instrument};

use crate::{
    dao::customers::CustomerDao,
    model::{
        apperror::ApplicationError,
        customer::{Connection, Customer, CustomerAddInputType, CustomerMapInputType, CustomerStatus, CustomersListInputType, MapMarker},
        models::{Selection, TextQuery},
    },
};

/**
 * Filters customers by free text, status and connection.
 *
 * The query matches name, id or address case-insensitively; an empty query matches all.
 * All three conditions must hold. The result keeps the input order.
 *
 * # Arguments
 * `records`: The customers to filter. Left untouched.
 * `query`: Free text query.
 * `status`: Status selection.
 * `connection`: Connection selection.
 */
pub fn filter_customers(records: &[Customer], query: &str, status: Selection<CustomerStatus>, connection: Selection<Connection>) -> Vec<Customer> {
    let query = TextQuery::new(query);
    records
        .iter()
        .filter(|customer| query.matches_any(&[customer.name.as_str(), customer.id.as_str(), customer.address.as_str()]) && status.matches(&customer.status) && connection.matches(&customer.connection))
        .cloned()
        .collect()
}

/**
 * Filters customers for the map and projects them onto markers.
 *
 * Unlike the directory, the map query only looks at name and address.
 */
pub fn filter_map_markers(records: &[Customer], query: &str, status: Selection<CustomerStatus>) -> Vec<MapMarker> {
    let query = TextQuery::new(query);
    records
        .iter()
        .filter(|customer| query.matches_any(&[customer.name.as_str(), customer.address.as_str()]) && status.matches(&customer.status))
        .map(MapMarker::from)
        .collect()
}

/**
 * Represents the service for the customer directory.
 */
pub struct CustomerService {
    /**
     * The customer collection.
     */
    customer_dao: RwLock<CustomerDao>,
}

impl CustomerService {
    /**
     * Creates a new instance of `CustomerService`.
     *
     * # Arguments
     * `customer_dao`: The customer collection to own.
     */
    pub fn new(customer_dao: CustomerDao) -> Self {
        CustomerService { customer_dao: RwLock::new(customer_dao) }
    }

    /**
     * Lists the customers matching the filter.
     */
    #[instrument(level = "debug", skip(self), fields(result))]
    pub fn list_customers(&self, filter: &CustomersListInputType) -> Vec<Customer> {
        let customers = filter_customers(self.customer_dao.read().list(), &filter.query, filter.status, filter.connection);
        tracing::Span::current().record("result", customers.len());
        customers
    }

    /**
     * Lists map markers of the customers matching the filter.
     */
    #[instrument(level = "debug", skip(self), fields(result))]
    pub fn map_markers(&self, filter: &CustomerMapInputType) -> Vec<MapMarker> {
        let markers = filter_map_markers(self.customer_dao.read().list(), &filter.query, filter.status);
        tracing::Span::current().record("result", markers.len());
        markers
    }

    /**
     * Returns one customer.
     *
     * # Returns
     * The customer, or a not found error for an unknown id.
     */
    pub fn get_customer(&self, customer_id: &str) -> Result<Customer, ApplicationError> {
        self.customer_dao.read().find(customer_id).cloned().ok_or_else(|| ApplicationError::not_found(format!("Customer {customer_id} not found")))
    }

    /**
     * Adds a new customer.
     *
     * Device provisioning data is logged and then dropped.
     *
     * # Arguments
     * `customer_add_input`: The draft of the customer.
     *
     * # Returns
     * The stored customer, or a validation error if a required field is blank.
     */
    #[instrument(skip(self, customer_add_input), fields(customer_id))]
    pub fn add_customer(&self, customer_add_input: CustomerAddInputType) -> Result<Customer, ApplicationError> {
        let customer_add_input = customer_add_input.validate()?;
        if let Some(device) = &customer_add_input.device {
            debug!(
                modem_brand = %device.modem_brand,
                modem_model = %device.modem_model,
                serial_number = %device.serial_number,
                ont_serial_number = %device.ont_serial_number,
                mac_address = %device.mac_address,
                "Device provisioning data received"
            );
        }
        let customer = self.customer_dao.write().add_customer(customer_add_input);
        tracing::Span::current().record("customer_id", customer.id.as_str());
        info!(customer_id = %customer.id, "Customer added");
        Ok(customer)
    }

    /**
     * Returns a copy of every customer.
     */
    pub fn snapshot(&self) -> Vec<Customer> {
        self.customer_dao.read().list().to_vec()
    }

    pub fn count(&self) -> usize {
        self.customer_dao.read().count()
    }
}
