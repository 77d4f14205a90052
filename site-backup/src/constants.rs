//! Application-wide defaults for the scheduler, controller, mail and logging

//! Central repository for configuration defaults and fixed message text
//!
//! This module organizes constants by category so that config defaults,
//! log lines and notification wording have a single source of truth.

use std::time::Duration;

/// Scheduler defaults
pub mod schedule {
    use super::Duration;

    /// Interval between checks for a due backup run
    pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

    /// Default weekday of the weekly backup slot
    pub const DEFAULT_WEEKDAY: &str = "saturday";

    /// Default time of day of the weekly backup slot
    pub const DEFAULT_TIME: &str = "22:00";

    /// How many weeks ahead to search for a valid slot (DST gaps)
    pub const MAX_WEEKS_LOOKAHEAD: u64 = 3;
}

/// Controller API constants
pub mod controller {
    /// Default controller API endpoint
    pub const DEFAULT_BASE_URL: &str = "https://api.elcapitan.cloudgenix.com";

    /// Header carrying the static auth token
    pub const AUTH_HEADER: &str = "x-auth-token";

    /// Profile endpoint used to resolve the tenant for a token
    pub const PROFILE_PATH: &str = "/v2.1/api/profile";

    /// API version of the site listing endpoint
    pub const SITES_API_VERSION: &str = "v4.7";

    /// Default per-request timeout in seconds
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 60;
}

/// Mail submission constants
pub mod mail {
    /// Default SMTP submission host
    pub const DEFAULT_SMTP_HOST: &str = "smtp.office365.com";

    /// Default SMTP submission port (STARTTLS)
    pub const DEFAULT_SMTP_PORT: u16 = 587;

    /// Subject of the summary mail when every active site was backed up
    pub const SUCCESS_SUBJECT: &str = "SD-WAN Backup Success Notification";

    /// Subject of the summary mail when at least one site failed
    pub const FAILURE_SUBJECT: &str = "SD-WAN Backup Failure Notification";
}

/// Pull command defaults
pub mod pull {
    /// Default external export command
    pub const DEFAULT_COMMAND: &str = "pull_site";

    /// Environment variable the token is handed over in
    pub const DEFAULT_TOKEN_ENV: &str = "X_AUTH_TOKEN";

    /// Placeholder replaced with the site name in command arguments
    pub const SITE_PLACEHOLDER: &str = "{site}";

    /// Placeholder replaced with the backup directory in command arguments
    pub const DIRECTORY_PLACEHOLDER: &str = "{directory}";
}

/// Logging defaults
pub mod logging {
    /// Directory the rolling log file is written to
    pub const DEFAULT_DIRECTORY: &str = "logs";

    /// Base name of the rolling log file
    pub const DEFAULT_FILE_NAME: &str = "download_log.txt";

    /// Size at which the log file is rotated
    pub const DEFAULT_MAX_BYTES: usize = 5_000_000;

    /// Number of rotated log files kept next to the live one
    pub const DEFAULT_BACKUP_COUNT: usize = 2;

    /// Timestamp format used in run start/finish log lines
    pub const RUN_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";
}

/// Default configuration locations
pub mod paths {
    /// Directory holding main.toml and secrets.toml
    pub const CONFIG_DIR: &str = "config";

    /// Main configuration file name
    pub const MAIN_CONFIG: &str = "main.toml";

    /// Secrets file name
    pub const SECRETS_FILE: &str = "secrets.toml";
}
