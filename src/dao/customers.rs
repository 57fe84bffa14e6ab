use crate::model::customer::{Customer, CustomerAddInputType};

/**
 * In-memory customer collection. Records keep their insertion order.
 */
#[derive(Debug, Default)]
pub struct CustomerDao {
    customers: Vec<Customer>,
}

impl CustomerDao {
    /**
     * Creates a new instance of `CustomerDao`.
     *
     * # Arguments
     * `customers`: Initial records, usually the sample data or empty.
     */
    pub fn new(customers: Vec<Customer>) -> Self {
        CustomerDao { customers }
    }

    pub fn list(&self) -> &[Customer] {
        &self.customers
    }

    pub fn count(&self) -> usize {
        self.customers.len()
    }

    pub fn find(&self, customer_id: &str) -> Option<&Customer> {
        self.customers.iter().find(|customer| customer.id == customer_id)
    }

    /**
     * Appends a new customer built from a validated draft.
     *
     * The id is `CUST` followed by the new record count, zero padded to three digits.
     * Records are never deleted, so the count never repeats.
     *
     * # Returns
     * The stored customer.
     */
    pub fn add_customer(&mut self, customer_add_input: CustomerAddInputType) -> Customer {
        let customer = customer_add_input.into_customer(Self::next_customer_id(self.customers.len()));
        self.customers.push(customer.clone());
        customer
    }

    fn next_customer_id(count: usize) -> String {
        format!("CUST{:03}", count + 1)
    }
}
