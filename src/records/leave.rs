//! Leave requests

use crate::core::{LabdeskError, Record, SearchField, Viewer};
use crate::records::{NewRecord, check_date_order};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leave {
    pub id: Uuid,
    pub requester: String,
    /// "annual", "sick", "official", ...
    pub kind: String,
    pub reason: String,
    /// "pending", "approved", "rejected"
    pub status: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub half_day: bool,
    pub requester_id: Option<Uuid>,
}

impl Leave {
    /// Length of the leave in days.
    ///
    /// Both ends count, so a leave from the 1st to the 3rd lasts 3 days.
    /// A half-day leave on a single date lasts 0.5 days. A missing end date
    /// means a single-day leave. Returns `None` when the range is reversed.
    pub fn duration_days(&self) -> Option<f64> {
        let end = self.end_date.unwrap_or(self.start_date);
        let days = (end - self.start_date).num_days();
        if days < 0 {
            return None;
        }

        if days == 0 && self.half_day {
            Some(0.5)
        } else {
            Some((days + 1) as f64)
        }
    }
}

impl Record for Leave {
    fn resource_name() -> &'static str {
        "leaves"
    }

    fn key(&self) -> Uuid {
        self.id
    }

    fn search_fields() -> &'static [SearchField<Self>] {
        const FIELDS: &[SearchField<Leave>] = &[
            SearchField::text("requester", |l| Some(l.requester.as_str())),
            SearchField::text("kind", |l| Some(l.kind.as_str())),
            SearchField::text("reason", |l| Some(l.reason.as_str())),
            SearchField::text_column("status", |l| Some(l.status.as_str())),
            SearchField::date("start_date", |l| Some(l.start_date)),
            SearchField::date("end_date", |l| l.end_date),
        ];
        FIELDS
    }

    fn sort_field() -> &'static str {
        "start_date"
    }

    fn category(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn owner_id(&self) -> Option<Uuid> {
        self.requester_id
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewLeave {
    #[validate(length(min = 1, max = 100))]
    pub requester: String,
    #[validate(length(min = 1, max = 50))]
    pub kind: String,
    #[validate(length(max = 1000))]
    pub reason: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub half_day: bool,
}

impl NewRecord for NewLeave {
    type Record = Leave;

    fn check(&self) -> Result<(), LabdeskError> {
        check_date_order(self.start_date, self.end_date)?;
        let multi_day = self.end_date.is_some_and(|end| end != self.start_date);
        if self.half_day && multi_day {
            return Err(LabdeskError::Validation {
                message: "a half-day leave must start and end on the same date".to_string(),
                fields: None,
            });
        }
        Ok(())
    }

    fn into_record(self, viewer: &Viewer) -> Leave {
        Leave {
            id: Uuid::new_v4(),
            requester: self.requester,
            kind: self.kind.trim().to_lowercase(),
            reason: self.reason,
            status: "pending".to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
            half_day: self.half_day,
            requester_id: viewer.member_id,
        }
    }
}
