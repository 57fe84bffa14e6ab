use clap::{Parser, command};
use serde::{Deserialize, Serialize};

use crate::model::models::LookupMode;

/**
 * Command-line arguments for the application.
 */
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct ApplicationArguments {
    /**
     * Path to the configuration file.
     */
    #[arg(short, long)]
    pub config_file: String,
}

/**
 * Represents the configuration for the application.
 */
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /**
     * Logging configuration for the application.
     */
    pub logging: LoggingConfig,
    /**
     * Server configuration for the application.
     */
    pub server: Server,
    /**
     * Workspace behaviour. Defaults apply when the section is missing.
     */
    #[serde(default)]
    pub workspace: WorkspaceConfig,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /**
     * Whether to log the target of the log message.
     */
    pub target: bool,
    /**
     * Whether to log thread IDs .
     */
    pub thread_ids: bool,
    /**
     * Whether to log thread names.
     */
    pub thread_names: bool,
    /**
     * Whether to log line numbers.
     */
    pub line_number: bool,
    /**
     * Whether to log the log level.
     */
    pub level: bool,
    /**
     * Whether to use ANSI colors in logs.
     */
    pub ansi: bool,
    /**
     * Whether to log the source file.
     */
    pub file: bool,
    /**
     * Path to the log file. Logs go to stdout when absent.
     */
    pub logfile: Option<String>,
    /**
     * Additional directives for logging configuration.
     */
    pub directives: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            target: true,
            thread_ids: false,
            thread_names: false,
            line_number: true,
            level: true,
            ansi: true,
            file: false,
            logfile: None,
            directives: vec!["wiznet_admin=info".to_string()],
        }
    }
}

/**
 * Represents the server configuration for the application.
 */
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    /**
     * Number of worker threads for the server.
     */
    pub workers: usize,
    /**
     * HTTP port for the server.
     */
    pub http_port: u16,
}

/**
 * Behaviour of the in-memory customer directory and ticket tracker.
 */
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkspaceConfig {
    /**
     * Whether the collections start with the sample customers and tickets.
     */
    pub seed_sample_data: bool,
    /**
     * How ticket mutations treat unknown ticket ids.
     */
    pub lookup_mode: LookupMode,
    /**
     * Assignee used when a new ticket names none.
     */
    pub default_assignee: String,
    /**
     * Author used when a comment names none.
     */
    pub comment_author: String,
    /**
     * Number of tickets listed as recent on the dashboard.
     */
    pub recent_ticket_limit: usize,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        WorkspaceConfig {
            seed_sample_data: true,
            lookup_mode: LookupMode::Lenient,
            default_assignee: "Admin".to_string(),
            comment_author: "Admin".to_string(),
            recent_ticket_limit: 5,
        }
    }
}
