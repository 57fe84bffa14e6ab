use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{
    apperror::ApplicationError,
    models::{Selection, require_text},
};

/**
 * Status of a trouble ticket. Any status may follow any other status.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    /**
     * Every status in lifecycle order.
     */
    pub const ALL: [TicketStatus; 4] = [TicketStatus::Open, TicketStatus::InProgress, TicketStatus::Resolved, TicketStatus::Closed];

    pub fn label(&self) -> &'static str {
        match self {
            TicketStatus::Open => "Baru Dibuka",
            TicketStatus::InProgress => "Dalam Proses",
            TicketStatus::Resolved => "Terselesaikan",
            TicketStatus::Closed => "Ditutup",
        }
    }

    /**
     * True while somebody still has to work on the ticket.
     */
    pub fn is_outstanding(&self) -> bool {
        matches!(self, TicketStatus::Open | TicketStatus::InProgress)
    }
}

impl FromStr for TicketStatus {
    type Err = ApplicationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "open" | "baru dibuka" => Ok(TicketStatus::Open),
            "in_progress" | "dalam proses" => Ok(TicketStatus::InProgress),
            "resolved" | "terselesaikan" => Ok(TicketStatus::Resolved),
            "closed" | "ditutup" => Ok(TicketStatus::Closed),
            other => Err(ApplicationError::validation(format!("Unknown ticket status: {other}"))),
        }
    }
}

impl<'de> Deserialize<'de> for TicketStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/**
 * Priority of a trouble ticket.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl TicketPriority {
    pub fn label(&self) -> &'static str {
        match self {
            TicketPriority::Low => "Rendah",
            TicketPriority::Medium => "Sedang",
            TicketPriority::High => "Tinggi",
            TicketPriority::Critical => "Kritis",
        }
    }

    pub fn is_urgent(&self) -> bool {
        matches!(self, TicketPriority::High | TicketPriority::Critical)
    }
}

impl FromStr for TicketPriority {
    type Err = ApplicationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "low" | "rendah" => Ok(TicketPriority::Low),
            "medium" | "sedang" => Ok(TicketPriority::Medium),
            "high" | "tinggi" => Ok(TicketPriority::High),
            "critical" | "kritis" => Ok(TicketPriority::Critical),
            other => Err(ApplicationError::validation(format!("Unknown ticket priority: {other}"))),
        }
    }
}

impl<'de> Deserialize<'de> for TicketPriority {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/**
 * A comment on a ticket. Owned by its ticket, never edited or removed.
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/**
 * A trouble ticket or service request.
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /**
     * Identifier in the form `TKT-###`.
     */
    pub id: String,
    pub subject: String,
    /**
     * Free text customer name.
     */
    pub customer: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub created: DateTime<Utc>,
    /**
     * Refreshed on every mutation, never earlier than `created`.
     */
    pub updated: DateTime<Utc>,
    pub assignee: String,
    pub description: String,
    /**
     * Comments in chronological order.
     */
    pub comments: Vec<Comment>,
}

impl Ticket {
    pub fn set_status(&mut self, status: TicketStatus, now: DateTime<Utc>) {
        self.status = status;
        self.touch(now);
    }

    pub fn set_priority(&mut self, priority: TicketPriority, now: DateTime<Utc>) {
        self.priority = priority;
        self.touch(now);
    }

    pub fn push_comment(&mut self, comment: Comment, now: DateTime<Utc>) {
        self.comments.push(comment);
        self.touch(now);
    }

    // A clock stepping backwards must not move `updated` behind earlier values.
    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated = now.max(self.updated).max(self.created);
    }
}

/**
 * Draft of a new ticket.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct TicketAddInputType {
    pub subject: String,
    pub customer: String,
    pub priority: TicketPriority,
    /**
     * Missing or blank means the tracker's default assignee.
     */
    pub assignee: Option<String>,
    pub description: String,
}

impl TicketAddInputType {
    /**
     * Validates the draft. Subject, customer and description must not be blank.
     */
    pub fn validate(self) -> Result<Self, ApplicationError> {
        require_text("subject", &self.subject)?;
        require_text("customer", &self.customer)?;
        require_text("description", &self.description)?;
        Ok(self)
    }

    /**
     * Builds an open ticket without comments.
     *
     * # Arguments
     * `id`: The identifier assigned by the tracker.
     * `now`: Creation time, also used as the first `updated` value.
     * `default_assignee`: Used when the draft names no assignee.
     */
    pub fn into_ticket(self, id: String, now: DateTime<Utc>, default_assignee: &str) -> Ticket {
        let assignee = self.assignee.filter(|assignee| !assignee.trim().is_empty()).unwrap_or_else(|| default_assignee.to_string());
        Ticket {
            id,
            subject: self.subject,
            customer: self.customer,
            status: TicketStatus::Open,
            priority: self.priority,
            created: now,
            updated: now,
            assignee,
            description: self.description,
            comments: Vec::new(),
        }
    }
}

/**
 * Validated input for a new comment.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct CommentAddInputType {
    pub author: String,
    pub content: String,
}

impl CommentAddInputType {
    pub fn validate(self) -> Result<Self, ApplicationError> {
        require_text("content", &self.content)?;
        require_text("author", &self.author)?;
        Ok(self)
    }
}

/**
 * Filter of the ticket tracker.
 */
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketsListInputType {
    /**
     * Matched against subject, customer and id.
     */
    pub query: String,
    pub status: Selection<TicketStatus>,
    pub priority: Selection<TicketPriority>,
}
