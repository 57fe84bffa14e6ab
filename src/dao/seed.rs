use chrono::{DateTime, NaiveDateTime, Utc};

use crate::model::{
    apperror::{ApplicationError, ErrorType},
    customer::{Connection, Coordinates, Customer, CustomerStatus, NO_PAYMENT, PENDING_INSTALLATION},
    ticket::{Comment, Ticket, TicketPriority, TicketStatus},
};

/**
 * Timestamp format of the sample data. Values are UTC.
 */
const SAMPLE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/**
 * Sample customers of the back office.
 */
pub fn sample_customers() -> Vec<Customer> {
    vec![
        customer("CUST001", "Budi Santoso", "Jl. Merdeka No. 123, Jakarta Selatan", "081234567890", "budi.santoso@email.com", (-6.2088, 106.8456), CustomerStatus::Active, "Paket Home 20 Mbps", "15 Jan 2023", "05 Jun 2023", Connection::Telkom),
        customer("CUST002", "Siti Rahayu", "Jl. Sudirman No. 45, Jakarta Pusat", "082345678901", "siti.rahayu@email.com", (-6.1944, 106.823), CustomerStatus::Active, "Paket Home 50 Mbps", "23 Feb 2023", "10 Jun 2023", Connection::Linknet),
        customer("CUST003", "Ahmad Hidayat", "Jl. Gatot Subroto No. 87, Jakarta Selatan", "083456789012", "ahmad.hidayat@email.com", (-6.235, 106.8294), CustomerStatus::Inactive, "Paket Home 100 Mbps", "05 Mar 2023", "01 May 2023", Connection::Tbg),
        customer("CUST004", "Dewi Lestari", "Jl. Thamrin No. 32, Jakarta Pusat", "084567890123", "dewi.lestari@email.com", (-6.1935, 106.8234), CustomerStatus::Pending, "Paket Home 20 Mbps", PENDING_INSTALLATION, NO_PAYMENT, Connection::Telkom),
        customer("CUST005", "Eko Prasetyo", "Jl. Kebon Jeruk No. 15, Jakarta Barat", "085678901234", "eko.prasetyo@email.com", (-6.1917, 106.774), CustomerStatus::Active, "Paket Home 50 Mbps", "12 Apr 2023", "02 Jun 2023", Connection::Linknet),
    ]
}

/**
 * Sample tickets of the back office, newest first in the order the tracker shows them.
 *
 * # Returns
 * The tickets or an initialization error if a sample timestamp is malformed.
 */
pub fn sample_tickets() -> Result<Vec<Ticket>, ApplicationError> {
    Ok(vec![
        Ticket {
            id: "TKT-001".to_string(),
            subject: "Koneksi Internet Terputus".to_string(),
            customer: "Budi Santoso".to_string(),
            status: TicketStatus::Open,
            priority: TicketPriority::High,
            created: at("2023-06-15T08:30:00")?,
            updated: at("2023-06-15T08:30:00")?,
            assignee: "Teknisi A".to_string(),
            description: "Pelanggan melaporkan koneksi internet terputus sejak pukul 07:00 pagi. Sudah mencoba restart perangkat namun masih belum berfungsi.".to_string(),
            comments: vec![comment("CMT-001", "Admin", "Tiket telah dibuat dan diteruskan ke tim teknisi.", "2023-06-15T08:35:00")?],
        },
        Ticket {
            id: "TKT-002".to_string(),
            subject: "Kecepatan Internet Lambat".to_string(),
            customer: "Siti Aminah".to_string(),
            status: TicketStatus::InProgress,
            priority: TicketPriority::Medium,
            created: at("2023-06-14T14:20:00")?,
            updated: at("2023-06-15T09:15:00")?,
            assignee: "Teknisi B".to_string(),
            description: "Pelanggan mengeluhkan kecepatan internet yang sangat lambat sejak 2 hari yang lalu. Hasil speedtest menunjukkan hanya 5Mbps dari paket 50Mbps.".to_string(),
            comments: vec![comment("CMT-002", "Teknisi B", "Sedang melakukan pengecekan jalur fiber dari ODP ke rumah pelanggan.", "2023-06-15T09:15:00")?],
        },
        Ticket {
            id: "TKT-003".to_string(),
            subject: "Pemasangan Baru".to_string(),
            customer: "Ahmad Hidayat".to_string(),
            status: TicketStatus::Closed,
            priority: TicketPriority::Low,
            created: at("2023-06-10T10:00:00")?,
            updated: at("2023-06-12T15:30:00")?,
            assignee: "Teknisi C".to_string(),
            description: "Permintaan pemasangan baru untuk paket Home 20Mbps di Jalan Merdeka No. 45.".to_string(),
            comments: vec![comment("CMT-003", "Teknisi C", "Pemasangan telah selesai dilakukan. Pelanggan sudah bisa menggunakan layanan internet.", "2023-06-12T15:30:00")?],
        },
        Ticket {
            id: "TKT-004".to_string(),
            subject: "Router Rusak".to_string(),
            customer: "Dewi Lestari".to_string(),
            status: TicketStatus::Resolved,
            priority: TicketPriority::Medium,
            created: at("2023-06-13T16:45:00")?,
            updated: at("2023-06-14T11:20:00")?,
            assignee: "Teknisi A".to_string(),
            description: "Router pelanggan tidak menyala. Lampu indikator power tidak menyala sama sekali.".to_string(),
            comments: vec![comment("CMT-004", "Teknisi A", "Router telah diganti dengan unit baru. Koneksi internet sudah normal kembali.", "2023-06-14T11:20:00")?],
        },
        Ticket {
            id: "TKT-005".to_string(),
            subject: "Upgrade Paket".to_string(),
            customer: "Rudi Hartono".to_string(),
            status: TicketStatus::Open,
            priority: TicketPriority::Low,
            created: at("2023-06-15T09:10:00")?,
            updated: at("2023-06-15T09:10:00")?,
            assignee: "Admin".to_string(),
            description: "Pelanggan ingin upgrade paket dari Home 20Mbps ke Home 50Mbps.".to_string(),
            comments: vec![],
        },
    ])
}

#[allow(clippy::too_many_arguments)]
fn customer(
    id: &str,
    name: &str,
    address: &str,
    phone: &str,
    email: &str,
    (lat, lng): (f64, f64),
    status: CustomerStatus,
    package: &str,
    installation_date: &str,
    last_payment: &str,
    connection: Connection,
) -> Customer {
    Customer {
        id: id.to_string(),
        name: name.to_string(),
        address: address.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
        coordinates: Coordinates { lat, lng },
        status,
        package: package.to_string(),
        installation_date: installation_date.to_string(),
        last_payment: last_payment.to_string(),
        connection,
    }
}

fn comment(id: &str, author: &str, content: &str, timestamp: &str) -> Result<Comment, ApplicationError> {
    Ok(Comment { id: id.to_string(), author: author.to_string(), content: content.to_string(), timestamp: at(timestamp)? })
}

fn at(timestamp: &str) -> Result<DateTime<Utc>, ApplicationError> {
    NaiveDateTime::parse_from_str(timestamp, SAMPLE_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|err| ApplicationError::new(ErrorType::Initialization, format!("Invalid sample timestamp {timestamp}: {err}")))
}
