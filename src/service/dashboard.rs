use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{
    customer::{Customer, CustomerStatus},
    models::StatsPeriod,
    ticket::{Ticket, TicketPriority, TicketStatus},
};

/**
 * Summary statistics of the back office for one reporting period.
 */
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub period: StatsPeriod,
    pub period_label: &'static str,
    pub active_customers: usize,
    pub pending_installations: usize,
    pub total_tickets: usize,
    /**
     * Ticket count per status, in lifecycle order.
     */
    pub tickets_by_status: Vec<StatusCount>,
    /**
     * Tickets that are open or in progress.
     */
    pub outstanding_tickets: usize,
    /**
     * Outstanding tickets with high or critical priority.
     */
    pub urgent_tickets: usize,
    /**
     * Ticket activity per bucket, oldest bucket first.
     */
    pub ticket_trend: Vec<TrendBucket>,
    pub package_distribution: Vec<PackageShare>,
    /**
     * Newest tickets first.
     */
    pub recent_tickets: Vec<RecentTicket>,
}

/**
 * Ticket activity within `[start, end)`.
 */
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendBucket {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /**
     * Tickets created in the bucket.
     */
    pub opened: usize,
    /**
     * Resolved or closed tickets last updated in the bucket.
     */
    pub settled: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: TicketStatus,
    pub label: &'static str,
    pub tickets: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageShare {
    pub package: String,
    pub customers: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentTicket {
    pub id: String,
    pub subject: String,
    pub customer: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub created: DateTime<Utc>,
}

impl From<&Ticket> for RecentTicket {
    fn from(ticket: &Ticket) -> Self {
        RecentTicket {
            id: ticket.id.clone(),
            subject: ticket.subject.clone(),
            customer: ticket.customer.clone(),
            status: ticket.status,
            priority: ticket.priority,
            created: ticket.created,
        }
    }
}

/**
 * Derives the dashboard summary from the current collections.
 *
 * # Arguments
 * `customers`: All customers.
 * `tickets`: All tickets.
 * `period`: Reporting period, selects the trend buckets.
 * `now`: End of the last trend bucket.
 * `recent_limit`: Maximum number of recent tickets.
 */
pub fn summarize(customers: &[Customer], tickets: &[Ticket], period: StatsPeriod, now: DateTime<Utc>, recent_limit: usize) -> DashboardSummary {
    let outstanding: Vec<&Ticket> = tickets.iter().filter(|ticket| ticket.status.is_outstanding()).collect();
    DashboardSummary {
        period,
        period_label: period.label(),
        active_customers: customers.iter().filter(|customer| customer.status == CustomerStatus::Active).count(),
        pending_installations: customers.iter().filter(|customer| customer.status == CustomerStatus::Pending).count(),
        total_tickets: tickets.len(),
        tickets_by_status: TicketStatus::ALL
            .into_iter()
            .map(|status| StatusCount { status, label: status.label(), tickets: tickets.iter().filter(|ticket| ticket.status == status).count() })
            .collect(),
        outstanding_tickets: outstanding.len(),
        urgent_tickets: outstanding.iter().filter(|ticket| ticket.priority.is_urgent()).count(),
        ticket_trend: ticket_trend(tickets, period, now),
        package_distribution: package_distribution(customers),
        recent_tickets: recent_tickets(tickets, recent_limit),
    }
}

fn ticket_trend(tickets: &[Ticket], period: StatsPeriod, now: DateTime<Utc>) -> Vec<TrendBucket> {
    let (count, width) = period.buckets();
    (0..count)
        .map(|index| {
            let start = now - width * i32::try_from(count - index).unwrap_or(i32::MAX);
            let end = start + width;
            let last = index + 1 == count;
            // The last bucket is closed so that activity at `now` is counted.
            let within = |instant: DateTime<Utc>| instant >= start && (instant < end || (last && instant == end));
            TrendBucket {
                start,
                end,
                opened: tickets.iter().filter(|ticket| within(ticket.created)).count(),
                settled: tickets.iter().filter(|ticket| matches!(ticket.status, TicketStatus::Resolved | TicketStatus::Closed) && within(ticket.updated)).count(),
            }
        })
        .collect()
}

fn package_distribution(customers: &[Customer]) -> Vec<PackageShare> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for customer in customers {
        *counts.entry(customer.package.as_str()).or_default() += 1;
    }
    let total = customers.len();
    #[allow(clippy::cast_precision_loss)]
    let mut shares: Vec<PackageShare> = counts
        .into_iter()
        .map(|(package, count)| PackageShare { package: package.to_string(), customers: count, percent: count as f64 * 100.0 / total as f64 })
        .collect();
    shares.sort_by(|a, b| b.customers.cmp(&a.customers).then_with(|| a.package.cmp(&b.package)));
    shares
}

fn recent_tickets(tickets: &[Ticket], limit: usize) -> Vec<RecentTicket> {
    let mut newest: Vec<&Ticket> = tickets.iter().collect();
    newest.sort_by(|a, b| b.created.cmp(&a.created));
    newest.into_iter().take(limit).map(RecentTicket::from).collect()
}
