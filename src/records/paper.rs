//! Publications

use crate::core::{Record, SearchField, Viewer};
use crate::records::NewRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A published paper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    pub id: Uuid,
    pub title: String,
    pub journal: String,
    pub authors: Vec<String>,
    pub published_on: NaiveDate,
    #[serde(default)]
    pub citations: u32,
    /// Journal impact factor, as reported; no rounding is applied
    pub impact_factor: Option<f64>,
    /// The lab member's role on the paper (e.g. "first", "corresponding")
    pub author_role: Option<String>,
    pub owner_id: Option<Uuid>,
}

impl Record for Paper {
    fn resource_name() -> &'static str {
        "papers"
    }

    fn key(&self) -> Uuid {
        self.id
    }

    fn search_fields() -> &'static [SearchField<Self>] {
        const FIELDS: &[SearchField<Paper>] = &[
            SearchField::text("title", |p| Some(p.title.as_str())),
            SearchField::text("journal", |p| Some(p.journal.as_str())),
            SearchField::list("authors", |p| p.authors.as_slice()),
            SearchField::date("published_on", |p| Some(p.published_on)),
            SearchField::integer("citations", |p| Some(i64::from(p.citations))),
            SearchField::float("impact_factor", |p| p.impact_factor),
            SearchField::text_column("author_role", |p| p.author_role.as_deref()),
        ];
        FIELDS
    }

    fn sort_field() -> &'static str {
        "published_on"
    }

    fn category(&self) -> Option<&str> {
        self.author_role.as_deref()
    }

    fn owner_id(&self) -> Option<Uuid> {
        self.owner_id
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewPaper {
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    #[validate(length(min = 1, max = 200))]
    pub journal: String,
    #[validate(length(min = 1))]
    pub authors: Vec<String>,
    pub published_on: NaiveDate,
    #[serde(default)]
    pub citations: u32,
    #[validate(range(min = 0.0))]
    pub impact_factor: Option<f64>,
    pub author_role: Option<String>,
}

impl NewRecord for NewPaper {
    type Record = Paper;

    fn into_record(self, viewer: &Viewer) -> Paper {
        Paper {
            id: Uuid::new_v4(),
            title: self.title.trim().to_string(),
            journal: self.journal.trim().to_string(),
            authors: self.authors,
            published_on: self.published_on,
            citations: self.citations,
            impact_factor: self.impact_factor,
            author_role: self.author_role.map(|r| r.trim().to_lowercase()),
            owner_id: viewer.member_id,
        }
    }
}
