pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, CliConfig, MailerConfig};
pub use core::{mailer::MailgunNotifier, report::Report, wizard::Wizard};
pub use utils::activity::FileActivityLog;
pub use utils::error::{CapdocError, Result};
