pub mod mailer;
pub mod report;
pub mod wizard;
pub mod xlsx;

pub use crate::domain::model::{
    Artifact, Category, DispatchOutcome, InstitutionKind, Selection, Session, Step,
};
pub use crate::domain::ports::{ActivityLog, Notifier, Storage};
pub use crate::utils::error::Result;
