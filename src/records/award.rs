//! Awards received by lab members

use crate::core::{Record, SearchField, Viewer};
use crate::records::NewRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Award {
    pub id: Uuid,
    pub title: String,
    pub organization: String,
    pub recipient: String,
    pub category: Option<String>,
    pub awarded_on: NaiveDate,
    pub owner_id: Option<Uuid>,
}

impl Record for Award {
    fn resource_name() -> &'static str {
        "awards"
    }

    fn key(&self) -> Uuid {
        self.id
    }

    fn search_fields() -> &'static [SearchField<Self>] {
        const FIELDS: &[SearchField<Award>] = &[
            SearchField::text("title", |a| Some(a.title.as_str())),
            SearchField::text("organization", |a| Some(a.organization.as_str())),
            SearchField::text("recipient", |a| Some(a.recipient.as_str())),
            SearchField::text_column("category", |a| a.category.as_deref()),
            SearchField::date("awarded_on", |a| Some(a.awarded_on)),
        ];
        FIELDS
    }

    fn sort_field() -> &'static str {
        "awarded_on"
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn owner_id(&self) -> Option<Uuid> {
        self.owner_id
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewAward {
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    #[validate(length(min = 1, max = 200))]
    pub organization: String,
    #[validate(length(min = 1, max = 100))]
    pub recipient: String,
    #[validate(length(max = 50))]
    pub category: Option<String>,
    pub awarded_on: NaiveDate,
}

impl NewRecord for NewAward {
    type Record = Award;

    fn into_record(self, viewer: &Viewer) -> Award {
        Award {
            id: Uuid::new_v4(),
            title: self.title,
            organization: self.organization,
            recipient: self.recipient,
            category: self
                .category
                .map(|c| c.trim().to_lowercase())
                .filter(|c| !c.is_empty()),
            awarded_on: self.awarded_on,
            owner_id: viewer.member_id,
        }
    }
}
