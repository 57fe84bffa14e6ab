use crate::model::ticket::Ticket;

/**
 * Prefix of ticket identifiers.
 */
const TICKET_PREFIX: &str = "TKT-";

/**
 * Prefix of comment identifiers.
 */
const COMMENT_PREFIX: &str = "CMT-";

/**
 * In-memory ticket collection, newest tickets first.
 *
 * Ticket and comment ids come from monotonic sequences that continue after
 * the highest id found in the initial records.
 */
#[derive(Debug)]
pub struct TicketDao {
    tickets: Vec<Ticket>,
    ticket_sequence: u64,
    comment_sequence: u64,
}

impl Default for TicketDao {
    fn default() -> Self {
        TicketDao::new(Vec::new())
    }
}

impl TicketDao {
    /**
     * Creates a new instance of `TicketDao`.
     *
     * # Arguments
     * `tickets`: Initial records, usually the sample data or empty.
     */
    pub fn new(tickets: Vec<Ticket>) -> Self {
        let ticket_sequence = tickets.iter().filter_map(|ticket| sequence_of(&ticket.id, TICKET_PREFIX)).max().unwrap_or(0);
        let comment_sequence = tickets
            .iter()
            .flat_map(|ticket| ticket.comments.iter())
            .filter_map(|comment| sequence_of(&comment.id, COMMENT_PREFIX))
            .max()
            .unwrap_or(0);
        TicketDao { tickets, ticket_sequence, comment_sequence }
    }

    pub fn list(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn find(&self, ticket_id: &str) -> Option<&Ticket> {
        self.tickets.iter().find(|ticket| ticket.id == ticket_id)
    }

    pub fn find_mut(&mut self, ticket_id: &str) -> Option<&mut Ticket> {
        self.tickets.iter_mut().find(|ticket| ticket.id == ticket_id)
    }

    /**
     * Stores a ticket in front of all existing tickets.
     */
    pub fn insert_first(&mut self, ticket: Ticket) {
        self.tickets.insert(0, ticket);
    }

    pub fn next_ticket_id(&mut self) -> String {
        self.ticket_sequence += 1;
        format!("{TICKET_PREFIX}{:03}", self.ticket_sequence)
    }

    pub fn next_comment_id(&mut self) -> String {
        self.comment_sequence += 1;
        format!("{COMMENT_PREFIX}{:03}", self.comment_sequence)
    }
}

/**
 * Extracts the numeric part of an id such as `TKT-007`.
 */
fn sequence_of(id: &str, prefix: &str) -> Option<u64> {
    id.strip_prefix(prefix).and_then(|number| number.parse().ok())
}

#[cfg(test)]
mod test {
    use chrono::Utc;

    use super::*;
    use crate::model::ticket::{Comment, TicketPriority, TicketStatus};

    fn ticket(id: &str, comment_ids: &[&str]) -> Ticket {
        let now = Utc::now();
        Ticket {
            id: id.to_string(),
            subject: "Subject".to_string(),
            customer: "Customer".to_string(),
            status: TicketStatus::Open,
            priority: TicketPriority::Low,
            created: now,
            updated: now,
            assignee: "Admin".to_string(),
            description: "Description".to_string(),
            comments: comment_ids
                .iter()
                .map(|id| Comment { id: (*id).to_string(), author: "Admin".to_string(), content: "Noted".to_string(), timestamp: now })
                .collect(),
        }
    }

    #[test]
    fn test_sequences_continue_after_existing_ids() {
        let mut dao = TicketDao::new(vec![ticket("TKT-002", &["CMT-004"]), ticket("TKT-007", &["CMT-001", "CMT-002"]), ticket("legacy", &["note"])]);
        assert_eq!(dao.next_ticket_id(), "TKT-008");
        assert_eq!(dao.next_ticket_id(), "TKT-009");
        assert_eq!(dao.next_comment_id(), "CMT-005");
    }

    #[test]
    fn test_sequences_start_at_one() {
        let mut dao = TicketDao::default();
        assert_eq!(dao.next_ticket_id(), "TKT-001");
        assert_eq!(dao.next_comment_id(), "CMT-001");
    }

    #[test]
    fn test_insert_first_and_find() {
        let mut dao = TicketDao::new(vec![ticket("TKT-001", &[])]);
        dao.insert_first(ticket("TKT-002", &[]));
        assert_eq!(dao.list().first().unwrap().id, "TKT-002");
        assert!(dao.find("TKT-001").is_some());
        assert!(dao.find_mut("TKT-999").is_none());
    }
}
