//! Research projects

use crate::core::{LabdeskError, Record, SearchField, Viewer};
use crate::records::{NewRecord, check_date_order};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub manager: String,
    pub sponsor: String,
    /// Free-form lifecycle label ("ongoing", "completed", ...)
    pub status: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub members: Vec<String>,
    pub owner_id: Option<Uuid>,
}

impl Record for Project {
    fn resource_name() -> &'static str {
        "projects"
    }

    fn key(&self) -> Uuid {
        self.id
    }

    fn search_fields() -> &'static [SearchField<Self>] {
        const FIELDS: &[SearchField<Project>] = &[
            SearchField::text("title", |p| Some(p.title.as_str())),
            SearchField::text("manager", |p| Some(p.manager.as_str())),
            SearchField::text("sponsor", |p| Some(p.sponsor.as_str())),
            SearchField::text("status", |p| Some(p.status.as_str())),
            SearchField::date("start_date", |p| Some(p.start_date)),
            SearchField::date("end_date", |p| p.end_date),
            SearchField::list("members", |p| p.members.as_slice()),
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
        self.owner_id
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewProject {
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    #[validate(length(min = 1, max = 100))]
    pub manager: String,
    #[validate(length(min = 1, max = 200))]
    pub sponsor: String,
    #[validate(length(min = 1, max = 50))]
    pub status: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub members: Vec<String>,
}

impl NewRecord for NewProject {
    type Record = Project;

    fn check(&self) -> Result<(), LabdeskError> {
        check_date_order(self.start_date, self.end_date)
    }

    fn into_record(self, viewer: &Viewer) -> Project {
        Project {
            id: Uuid::new_v4(),
            title: self.title,
            manager: self.manager,
            sponsor: self.sponsor,
            status: self.status.trim().to_lowercase(),
            start_date: self.start_date,
            end_date: self.end_date,
            members: self.members,
            owner_id: viewer.member_id,
        }
    }
}
