//! Patents

use crate::core::{Record, SearchField, Viewer};
use crate::records::NewRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patent {
    pub id: Uuid,
    pub title: String,
    pub application_number: String,
    pub inventors: Vec<String>,
    /// "filed", "registered", "abandoned", ...
    pub status: String,
    pub filed_on: Option<NaiveDate>,
    pub owner_id: Option<Uuid>,
}

impl Record for Patent {
    fn resource_name() -> &'static str {
        "patents"
    }

    fn key(&self) -> Uuid {
        self.id
    }

    fn search_fields() -> &'static [SearchField<Self>] {
        const FIELDS: &[SearchField<Patent>] = &[
            SearchField::text("title", |p| Some(p.title.as_str())),
            SearchField::text("application_number", |p| Some(p.application_number.as_str())),
            SearchField::list("inventors", |p| p.inventors.as_slice()),
            SearchField::text("status", |p| Some(p.status.as_str())),
            SearchField::date("filed_on", |p| p.filed_on),
        ];
        FIELDS
    }

    fn sort_field() -> &'static str {
        "filed_on"
    }

    fn category(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn owner_id(&self) -> Option<Uuid> {
        self.owner_id
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewPatent {
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    #[validate(length(min = 1, max = 50))]
    pub application_number: String,
    #[validate(length(min = 1))]
    pub inventors: Vec<String>,
    #[validate(length(min = 1, max = 50))]
    pub status: String,
    pub filed_on: Option<NaiveDate>,
}

impl NewRecord for NewPatent {
    type Record = Patent;

    fn into_record(self, viewer: &Viewer) -> Patent {
        Patent {
            id: Uuid::new_v4(),
            title: self.title,
            application_number: self.application_number.trim().to_string(),
            inventors: self.inventors,
            status: self.status.trim().to_lowercase(),
            filed_on: self.filed_on,
            owner_id: viewer.member_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Column, SortDirection, filter, sort};

    fn patent(title: &str, number: &str, filed_on: Option<NaiveDate>) -> Patent {
        Patent {
            id: Uuid::new_v4(),
            title: title.to_string(),
            application_number: number.to_string(),
            inventors: vec!["Jung Woo".to_string()],
            status: "filed".to_string(),
            filed_on,
            owner_id: None,
        }
    }

    #[test]
    fn test_search_application_number() {
        let patents = vec![
            patent("Battery Anode", "10-2023-0012345", None),
            patent("Thin Film", "10-2024-0099999", None),
        ];
        let found = filter(patents, "2024", &Column::All);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Thin Film");
    }

    #[test]
    fn test_unfiled_patents_sort_last_descending() {
        let patents = vec![
            patent("Pending", "A", None),
            patent("Old", "B", NaiveDate::from_ymd_opt(2021, 1, 4)),
            patent("New", "C", NaiveDate::from_ymd_opt(2024, 8, 9)),
        ];
        let titles: Vec<_> = sort(patents, SortDirection::Desc)
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["New", "Old", "Pending"]);
    }
}
