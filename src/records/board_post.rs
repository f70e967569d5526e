//! Notice board posts

use crate::core::{Record, SearchField, Viewer};
use crate::records::NewRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardPost {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub body: String,
    /// "notice", "seminar", "general", ...
    pub category: String,
    pub posted_at: DateTime<Utc>,
    pub author_id: Option<Uuid>,
}

impl Record for BoardPost {
    fn resource_name() -> &'static str {
        "board-posts"
    }

    fn key(&self) -> Uuid {
        self.id
    }

    fn search_fields() -> &'static [SearchField<Self>] {
        const FIELDS: &[SearchField<BoardPost>] = &[
            SearchField::text("title", |p| Some(p.title.as_str())),
            SearchField::text("author", |p| Some(p.author.as_str())),
            SearchField::text("body", |p| Some(p.body.as_str())),
            SearchField::text_column("category", |p| Some(p.category.as_str())),
            SearchField::timestamp("posted_at", |p| Some(p.posted_at)),
        ];
        FIELDS
    }

    fn sort_field() -> &'static str {
        "posted_at"
    }

    fn category(&self) -> Option<&str> {
        Some(self.category.as_str())
    }

    fn owner_id(&self) -> Option<Uuid> {
        self.author_id
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewBoardPost {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 100))]
    pub author: String,
    #[validate(length(min = 1, max = 20000))]
    pub body: String,
    #[validate(length(min = 1, max = 50))]
    pub category: String,
}

impl NewRecord for NewBoardPost {
    type Record = BoardPost;

    fn into_record(self, viewer: &Viewer) -> BoardPost {
        BoardPost {
            id: Uuid::new_v4(),
            title: self.title,
            author: self.author,
            body: self.body,
            category: self.category.trim().to_lowercase(),
            posted_at: Utc::now(),
            author_id: viewer.member_id,
        }
    }
}
