use serde::Serialize;

use crate::{
    model::{
        customer::{Customer, CustomerMapInputType, CustomersListInputType, MapMarker},
        models::{Section, StatsPeriod},
        ticket::{Ticket, TicketsListInputType},
    },
    service::{
        customers::CustomerService,
        dashboard::{DashboardSummary, summarize},
        tickets::TicketService,
    },
};

/**
 * Unfiltered content of one back office section.
 */
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "section", rename_all = "camelCase")]
pub enum SectionView {
    Dashboard { label: &'static str, summary: DashboardSummary },
    Customers { label: &'static str, customers: Vec<Customer> },
    Map { label: &'static str, markers: Vec<MapMarker> },
    Tickets { label: &'static str, tickets: Vec<Ticket> },
}

/**
 * Builds the default view of a section.
 *
 * # Arguments
 * `section`: The selected section.
 * `customer_service`: Source of customers.
 * `ticket_service`: Source of tickets and of the current time.
 * `recent_limit`: Number of recent tickets on the dashboard.
 */
pub fn section_view(section: Section, customer_service: &CustomerService, ticket_service: &TicketService, recent_limit: usize) -> SectionView {
    let label = section.label();
    match section {
        Section::Dashboard => SectionView::Dashboard {
            label,
            summary: summarize(&customer_service.snapshot(), &ticket_service.snapshot(), StatsPeriod::default(), ticket_service.now(), recent_limit),
        },
        Section::Customers => SectionView::Customers { label, customers: customer_service.list_customers(&CustomersListInputType::default()) },
        Section::Map => SectionView::Map { label, markers: customer_service.map_markers(&CustomerMapInputType::default()) },
        Section::Tickets => SectionView::Tickets { label, tickets: ticket_service.list_tickets(&TicketsListInputType::default()) },
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::*;
    use crate::{
        dao::{
            customers::CustomerDao,
            seed::{sample_customers, sample_tickets},
            tickets::TicketDao,
        },
        model::models::LookupMode,
        service::clock::SystemClock,
    };

    fn services() -> (CustomerService, TicketService) {
        (CustomerService::new(CustomerDao::new(sample_customers())), TicketService::new(TicketDao::new(sample_tickets().unwrap()), Arc::new(SystemClock), LookupMode::Lenient, "Admin".to_string()))
    }

    #[test]
    fn test_section_views() {
        let (customers, tickets) = services();
        match section_view(Section::Map, &customers, &tickets, 5) {
            SectionView::Map { label, markers } => {
                assert_eq!(label, "Peta Pelanggan");
                assert_eq!(markers.len(), 5);
            }
            other => panic!("unexpected view {other:?}"),
        }
        match section_view(Section::from_name("unknown"), &customers, &tickets, 2) {
            SectionView::Dashboard { summary, .. } => assert_eq!(summary.recent_tickets.len(), 2),
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn test_section_view_serialization() {
        let (customers, tickets) = services();
        let view = section_view(Section::Tickets, &customers, &tickets, 5);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["section"], "tickets");
        assert_eq!(json["label"], "Tiket Gangguan");
        assert_eq!(json["tickets"].as_array().unwrap().len(), 5);
    }
}
