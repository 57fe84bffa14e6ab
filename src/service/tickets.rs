use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{info, instrument, warn};

use crate::{
    dao::tickets::TicketDao,
    model::{
        apperror::ApplicationError,
        models::{LookupMode, Selection, TextQuery},
        ticket::{Comment, CommentAddInputType, Ticket, TicketAddInputType, TicketPriority, TicketStatus, TicketsListInputType},
    },
    service::clock::Clock,
};

/**
 * Filters tickets by free text, status and priority.
 *
 * The query matches subject, customer or id case-insensitively; an empty query matches all.
 * The result keeps the input order.
 */
pub fn filter_tickets(records: &[Ticket], query: &str, status: Selection<TicketStatus>, priority: Selection<TicketPriority>) -> Vec<Ticket> {
    let query = TextQuery::new(query);
    records
        .iter()
        .filter(|ticket| query.matches_any(&[ticket.subject.as_str(), ticket.customer.as_str(), ticket.id.as_str()]) && status.matches(&ticket.status) && priority.matches(&ticket.priority))
        .cloned()
        .collect()
}

/**
 * Returns the collection with the status of one ticket replaced.
 *
 * An unknown id yields a collection equal to the input.
 */
pub fn set_status(records: &[Ticket], ticket_id: &str, status: TicketStatus, now: DateTime<Utc>) -> Vec<Ticket> {
    update_ticket(records, ticket_id, |ticket| ticket.set_status(status, now))
}

/**
 * Returns the collection with the priority of one ticket replaced.
 *
 * An unknown id yields a collection equal to the input.
 */
pub fn set_priority(records: &[Ticket], ticket_id: &str, priority: TicketPriority, now: DateTime<Utc>) -> Vec<Ticket> {
    update_ticket(records, ticket_id, |ticket| ticket.set_priority(priority, now))
}

/**
 * Returns the updated ticket and the collection with a comment appended to that ticket.
 *
 * An unknown id yields no ticket and a collection equal to the input.
 */
pub fn add_comment(records: &[Ticket], ticket_id: &str, comment: Comment, now: DateTime<Utc>) -> (Option<Ticket>, Vec<Ticket>) {
    let mut comment = Some(comment);
    let updated = update_ticket(records, ticket_id, |ticket| {
        if let Some(comment) = comment.take() {
            ticket.push_comment(comment, now);
        }
    });
    (updated.iter().find(|ticket| ticket.id == ticket_id).cloned(), updated)
}

/**
 * Returns the collection with the ticket in front of all others.
 */
pub fn create_ticket(records: &[Ticket], ticket: Ticket) -> Vec<Ticket> {
    std::iter::once(ticket).chain(records.iter().cloned()).collect()
}

fn update_ticket(records: &[Ticket], ticket_id: &str, mut update: impl FnMut(&mut Ticket)) -> Vec<Ticket> {
    records
        .iter()
        .cloned()
        .map(|mut ticket| {
            if ticket.id == ticket_id {
                update(&mut ticket);
            }
            ticket
        })
        .collect()
}

/**
 * Represents the service for the ticket tracker.
 */
pub struct TicketService {
    /**
     * The ticket collection and its id sequences.
     */
    ticket_dao: RwLock<TicketDao>,
    /**
     * Source of ticket and comment timestamps.
     */
    clock: Arc<dyn Clock>,
    /**
     * How unknown ticket ids are treated by mutations.
     */
    lookup_mode: LookupMode,
    /**
     * Assignee of new tickets that name none.
     */
    default_assignee: String,
}

impl TicketService {
    /**
     * Creates a new instance of `TicketService`.
     *
     * # Arguments
     * `ticket_dao`: The ticket collection to own.
     * `clock`: Source of timestamps.
     * `lookup_mode`: Lenient or strict handling of unknown ids.
     * `default_assignee`: Assignee of new tickets that name none.
     */
    pub fn new(ticket_dao: TicketDao, clock: Arc<dyn Clock>, lookup_mode: LookupMode, default_assignee: String) -> Self {
        TicketService { ticket_dao: RwLock::new(ticket_dao), clock, lookup_mode, default_assignee }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /**
     * Lists the tickets matching the filter.
     */
    #[instrument(level = "debug", skip(self), fields(result))]
    pub fn list_tickets(&self, filter: &TicketsListInputType) -> Vec<Ticket> {
        let tickets = filter_tickets(self.ticket_dao.read().list(), &filter.query, filter.status, filter.priority);
        tracing::Span::current().record("result", tickets.len());
        tickets
    }

    /**
     * Returns one ticket with its comments.
     *
     * # Returns
     * The ticket, or a not found error regardless of the lookup mode.
     */
    pub fn get_ticket(&self, ticket_id: &str) -> Result<Ticket, ApplicationError> {
        self.ticket_dao.read().find(ticket_id).cloned().ok_or_else(|| ApplicationError::not_found(format!("Ticket {ticket_id} not found")))
    }

    /**
     * Creates an open ticket without comments and puts it in front of the others.
     *
     * A missing or blank assignee is replaced by the default assignee.
     */
    #[instrument(skip(self, ticket_add_input), fields(ticket_id))]
    pub fn create_ticket(&self, ticket_add_input: TicketAddInputType) -> Result<Ticket, ApplicationError> {
        let ticket_add_input = ticket_add_input.validate()?;
        let mut ticket_dao = self.ticket_dao.write();
        let ticket = ticket_add_input.into_ticket(ticket_dao.next_ticket_id(), self.clock.now(), &self.default_assignee);
        ticket_dao.insert_first(ticket.clone());
        tracing::Span::current().record("ticket_id", ticket.id.as_str());
        info!(ticket_id = %ticket.id, priority = ?ticket.priority, "Ticket created");
        Ok(ticket)
    }

    /**
     * Changes the status of a ticket. Any status may follow any other.
     *
     * # Returns
     * The updated ticket, `None` for an unknown id in lenient mode, or a not found error in strict mode.
     */
    #[instrument(skip(self))]
    pub fn set_status(&self, ticket_id: &str, status: TicketStatus) -> Result<Option<Ticket>, ApplicationError> {
        let now = self.clock.now();
        self.update(ticket_id, |ticket| ticket.set_status(status, now))
    }

    /**
     * Changes the priority of a ticket.
     *
     * # Returns
     * The updated ticket, `None` for an unknown id in lenient mode, or a not found error in strict mode.
     */
    #[instrument(skip(self))]
    pub fn set_priority(&self, ticket_id: &str, priority: TicketPriority) -> Result<Option<Ticket>, ApplicationError> {
        let now = self.clock.now();
        self.update(ticket_id, |ticket| ticket.set_priority(priority, now))
    }

    /**
     * Appends a comment to a ticket.
     *
     * The content must not be blank. The comment id is only consumed when the ticket exists.
     *
     * # Returns
     * The updated ticket, `None` for an unknown id in lenient mode, or a not found error in strict mode.
     */
    #[instrument(skip(self, comment_add_input))]
    pub fn add_comment(&self, ticket_id: &str, comment_add_input: CommentAddInputType) -> Result<Option<Ticket>, ApplicationError> {
        let comment_add_input = comment_add_input.validate()?;
        let now = self.clock.now();
        let mut ticket_dao = self.ticket_dao.write();
        if ticket_dao.find(ticket_id).is_none() {
            return self.unknown_ticket(ticket_id);
        }
        let comment = Comment { id: ticket_dao.next_comment_id(), author: comment_add_input.author, content: comment_add_input.content, timestamp: now };
        let comment_id = comment.id.clone();
        let ticket = ticket_dao.find_mut(ticket_id).map(|ticket| {
            ticket.push_comment(comment, now);
            ticket.clone()
        });
        info!(ticket_id, comment_id = %comment_id, "Comment added");
        Ok(ticket)
    }

    /**
     * Returns a copy of every ticket.
     */
    pub fn snapshot(&self) -> Vec<Ticket> {
        self.ticket_dao.read().list().to_vec()
    }

    fn update(&self, ticket_id: &str, update: impl FnOnce(&mut Ticket)) -> Result<Option<Ticket>, ApplicationError> {
        let mut ticket_dao = self.ticket_dao.write();
        match ticket_dao.find_mut(ticket_id) {
            Some(ticket) => {
                update(ticket);
                info!(ticket_id, status = ?ticket.status, priority = ?ticket.priority, "Ticket updated");
                Ok(Some(ticket.clone()))
            }
            None => self.unknown_ticket(ticket_id),
        }
    }

    fn unknown_ticket(&self, ticket_id: &str) -> Result<Option<Ticket>, ApplicationError> {
        match self.lookup_mode {
            LookupMode::Lenient => {
                warn!(ticket_id, "Ignoring change of unknown ticket");
                Ok(None)
            }
            LookupMode::Strict => Err(ApplicationError::not_found(format!("Ticket {ticket_id} not found"))),
        }
    }
}
