use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{
    apperror::ApplicationError,
    models::{Selection, require_text},
};

/**
 * Installation date shown until a technician installs the connection.
 */
pub const PENDING_INSTALLATION: &str = "Pending";

/**
 * Last payment shown for customers that never paid.
 */
pub const NO_PAYMENT: &str = "-";

/**
 * Map position used when a new customer has no coordinates (Jakarta centre).
 */
pub const DEFAULT_COORDINATES: Coordinates = Coordinates { lat: -6.2088, lng: 106.8456 };

/**
 * Geographic position of a customer. No range validation is performed.
 */
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/**
 * Subscription status of a customer.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CustomerStatus {
    Active,
    Inactive,
    Pending,
}

impl CustomerStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CustomerStatus::Active => "Aktif",
            CustomerStatus::Inactive => "Tidak Aktif",
            CustomerStatus::Pending => "Tertunda",
        }
    }
}

impl FromStr for CustomerStatus {
    type Err = ApplicationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "active" | "aktif" => Ok(CustomerStatus::Active),
            "inactive" | "tidak aktif" => Ok(CustomerStatus::Inactive),
            "pending" | "tertunda" => Ok(CustomerStatus::Pending),
            other => Err(ApplicationError::validation(format!("Unknown customer status: {other}"))),
        }
    }
}

impl<'de> Deserialize<'de> for CustomerStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/**
 * Upstream network provider a customer is connected through.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Connection {
    #[default]
    Telkom,
    Linknet,
    #[serde(rename = "TBG")]
    Tbg,
}

impl Connection {
    pub fn label(&self) -> &'static str {
        match self {
            Connection::Telkom => "Telkom",
            Connection::Linknet => "Linknet",
            Connection::Tbg => "TBG",
        }
    }
}

impl FromStr for Connection {
    type Err = ApplicationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "telkom" => Ok(Connection::Telkom),
            "linknet" => Ok(Connection::Linknet),
            "tbg" => Ok(Connection::Tbg),
            other => Err(ApplicationError::validation(format!("Unknown connection: {other}"))),
        }
    }
}

impl<'de> Deserialize<'de> for Connection {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/**
 * A customer record of the directory.
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /**
     * Identifier in the form `CUST###`. Assigned once, never changes.
     */
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub coordinates: Coordinates,
    pub status: CustomerStatus,
    /**
     * Service tier label, e.g. `Paket Home 20 Mbps`.
     */
    pub package: String,
    /**
     * Display string. `Pending` until installed.
     */
    pub installation_date: String,
    /**
     * Display string. `-` if no payment was received.
     */
    pub last_payment: String,
    pub connection: Connection,
}

/**
 * Device provisioning data entered together with a new customer.
 *
 * Accepted for logging only, it is not stored on the customer.
 */
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceProvisioning {
    pub modem_brand: String,
    pub modem_model: String,
    pub serial_number: String,
    pub ont_serial_number: String,
    pub mac_address: String,
}

/**
 * Draft of a new customer.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerAddInputType {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub package: String,
    pub connection: Connection,
    pub coordinates: Coordinates,
    pub device: Option<DeviceProvisioning>,
}

impl CustomerAddInputType {
    /**
     * Validates the draft. Name, phone, email, address and package must not be blank.
     *
     * # Returns
     * The validated draft or a validation error naming the first blank field.
     */
    pub fn validate(self) -> Result<Self, ApplicationError> {
        require_text("name", &self.name)?;
        require_text("phone", &self.phone)?;
        require_text("email", &self.email)?;
        require_text("address", &self.address)?;
        require_text("package", &self.package)?;
        Ok(self)
    }

    /**
     * Builds the customer record with system assigned lifecycle fields.
     *
     * # Arguments
     * `id`: The identifier assigned by the directory.
     */
    pub fn into_customer(self, id: String) -> Customer {
        Customer {
            id,
            name: self.name,
            address: self.address,
            phone: self.phone,
            email: self.email,
            coordinates: self.coordinates,
            status: CustomerStatus::Pending,
            package: self.package,
            installation_date: PENDING_INSTALLATION.to_string(),
            last_payment: NO_PAYMENT.to_string(),
            connection: self.connection,
        }
    }
}

/**
 * Filter of the customer directory.
 */
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomersListInputType {
    /**
     * Matched against name, id and address.
     */
    pub query: String,
    pub status: Selection<CustomerStatus>,
    pub connection: Selection<Connection>,
}

/**
 * Filter of the customer map.
 */
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerMapInputType {
    /**
     * Matched against name and address.
     */
    pub query: String,
    pub status: Selection<CustomerStatus>,
}

/**
 * A customer location shown on the map.
 */
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    pub id: String,
    pub name: String,
    pub address: String,
    pub status: CustomerStatus,
    pub package: String,
    pub coordinates: Coordinates,
}

impl From<&Customer> for MapMarker {
    fn from(customer: &Customer) -> Self {
        MapMarker {
            id: customer.id.clone(),
            name: customer.name.clone(),
            address: customer.address.clone(),
            status: customer.status,
            package: customer.package.clone(),
            coordinates: customer.coordinates,
        }
    }
}
