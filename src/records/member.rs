//! Member directory

use crate::core::{Record, SearchField, Viewer};
use crate::records::NewRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub affiliation: String,
    pub position: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub joined_on: Option<NaiveDate>,
}

impl Record for Member {
    fn resource_name() -> &'static str {
        "members"
    }

    fn key(&self) -> Uuid {
        self.id
    }

    fn search_fields() -> &'static [SearchField<Self>] {
        const FIELDS: &[SearchField<Member>] = &[
            SearchField::text("name", |m| Some(m.name.as_str())),
            SearchField::text("email", |m| Some(m.email.as_str())),
            SearchField::text("affiliation", |m| Some(m.affiliation.as_str())),
            SearchField::text("position", |m| Some(m.position.as_str())),
            SearchField::list_column("roles", |m| m.roles.as_slice()),
            SearchField::date("joined_on", |m| m.joined_on),
        ];
        FIELDS
    }

    fn sort_field() -> &'static str {
        "name"
    }

    fn category(&self) -> Option<&str> {
        Some(self.position.as_str())
    }

    /// A member owns their own directory entry
    fn owner_id(&self) -> Option<Uuid> {
        Some(self.id)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewMember {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 200))]
    pub affiliation: String,
    #[validate(length(min = 1, max = 100))]
    pub position: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub joined_on: Option<NaiveDate>,
}

impl NewRecord for NewMember {
    type Record = Member;

    fn into_record(self, _viewer: &Viewer) -> Member {
        Member {
            id: Uuid::new_v4(),
            name: self.name,
            email: self.email.to_lowercase(),
            affiliation: self.affiliation,
            position: self.position,
            roles: self
                .roles
                .into_iter()
                .map(|r| r.trim().to_lowercase())
                .filter(|r| !r.is_empty())
                .collect(),
            joined_on: self.joined_on,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Column, SortDirection, filter, sort};

    fn member(name: &str, email: &str) -> Member {
        NewMember {
            name: name.to_string(),
            email: email.to_string(),
            affiliation: "Materials Lab".to_string(),
            position: "researcher".to_string(),
            roles: vec![" Admin ".to_string(), "".to_string()],
            joined_on: None,
        }
        .into_record(&Viewer::anonymous())
    }

    #[test]
    fn test_names_sort_case_insensitively() {
        let members = vec![
            member("bora", "b@lab.org"),
            member("Ahn", "a@lab.org"),
            member("Cho", "c@lab.org"),
        ];
        let names: Vec<_> = sort(members, SortDirection::Asc)
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["Ahn", "bora", "Cho"]);
    }

    #[test]
    fn test_roles_are_column_only() {
        let members = vec![member("Ahn", "a@lab.org")];
        assert!(filter(members.clone(), "admin", &Column::All).is_empty());
        assert_eq!(filter(members, "admin", &Column::parse("roles")).len(), 1);
    }

    #[test]
    fn test_payload_normalizes_roles_and_email() {
        let m = member("Ahn", "Ahn@Lab.org");
        assert_eq!(m.roles, vec!["admin"]);
        assert_eq!(m.email, "ahn@lab.org");
        assert_eq!(m.owner_id(), Some(m.id));
    }

    #[test]
    fn test_invalid_email_rejected() {
        let payload = NewMember {
            name: "Ahn".to_string(),
            email: "not-an-email".to_string(),
            affiliation: "Lab".to_string(),
            position: "researcher".to_string(),
            roles: vec![],
            joined_on: None,
        };
        assert!(payload.validated(&Viewer::anonymous()).is_err());
    }
}
