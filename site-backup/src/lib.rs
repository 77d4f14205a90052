pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod controller;
pub mod errors;
pub mod logging;
pub mod pull;
pub mod scheduler;
pub mod services;

// Re-export commonly used types
pub use bootstrap::{bootstrap, BootstrapContext};
pub use config::{Config, ConfigManager};
pub use controller::{ControllerClient, Site, SiteLister};
pub use pull::{CommandPuller, SitePuller};
pub use scheduler::{BackupScheduler, WeeklySchedule};
pub use services::{BackupRunner, Notifier, RunResult, SmtpMailer};
