//! Portal record types
//!
//! Each collection shown in the portal is a typed struct implementing
//! [`Record`](crate::core::Record), paired with a validated creation payload
//! implementing [`NewRecord`].

pub mod award;
pub mod board_post;
pub mod leave;
pub mod member;
pub mod paper;
pub mod patent;
pub mod project;

pub use award::{Award, NewAward};
pub use board_post::{BoardPost, NewBoardPost};
pub use leave::{Leave, NewLeave};
pub use member::{Member, NewMember};
pub use paper::{NewPaper, Paper};
pub use patent::{NewPatent, Patent};
pub use project::{NewProject, Project};

use crate::core::{LabdeskError, Record, Viewer};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Payload accepted by `POST /{collection}`
pub trait NewRecord: DeserializeOwned + Validate + Send + 'static {
    /// The record this payload creates
    type Record: Record;

    /// Checks spanning several fields, run after field validation
    fn check(&self) -> Result<(), LabdeskError> {
        Ok(())
    }

    /// Build the record; the creating viewer becomes its owner where
    /// ownership applies
    fn into_record(self, viewer: &Viewer) -> Self::Record;

    /// Validate and build in one step
    fn validated(self, viewer: &Viewer) -> Result<Self::Record, LabdeskError> {
        self.validate().map_err(LabdeskError::from_validation)?;
        self.check()?;
        Ok(self.into_record(viewer))
    }
}

/// Rejects date ranges ending before they start
pub(crate) fn check_date_order(
    start: chrono::NaiveDate,
    end: Option<chrono::NaiveDate>,
) -> Result<(), LabdeskError> {
    match end {
        Some(end) if end < start => Err(LabdeskError::Validation {
            message: format!("end date {} is before start date {}", end, start),
            fields: None,
        }),
        _ => Ok(()),
    }
}
