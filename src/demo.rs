//! Demo records loaded when `seed_demo_data` is enabled

use crate::records::{Award, BoardPost, Leave, Member, Paper, Patent, Project};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0)
        .single()
        .unwrap_or_default()
}

fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn members() -> Vec<Member> {
    [
        ("Han Seojin", "seojin.han@lab.example", "professor", &["admin"][..]),
        ("Oh Daeun", "daeun.oh@lab.example", "postdoc", &[][..]),
        ("Yoon Jae", "jae.yoon@lab.example", "phd student", &[][..]),
        ("Shin Hana", "hana.shin@lab.example", "ms student", &[][..]),
        ("baek Sora", "sora.baek@lab.example", "researcher", &[][..]),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, email, position, roles))| Member {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: email.to_string(),
        affiliation: "Applied Materials Lab".to_string(),
        position: position.to_string(),
        roles: names(roles),
        joined_on: Some(date(2019 + i as i32, 3, 1)),
    })
    .collect()
}

pub fn projects() -> Vec<Project> {
    vec![
        Project {
            id: Uuid::new_v4(),
            title: "Flexible Sensor Grid".to_string(),
            manager: "Han Seojin".to_string(),
            sponsor: "National Research Foundation".to_string(),
            status: "ongoing".to_string(),
            start_date: date(2023, 3, 1),
            end_date: Some(date(2026, 2, 28)),
            members: names(&["Oh Daeun", "Yoon Jae"]),
            owner_id: None,
        },
        Project {
            id: Uuid::new_v4(),
            title: "Solid Electrolyte Screening".to_string(),
            manager: "Oh Daeun".to_string(),
            sponsor: "Ministry of Industry".to_string(),
            status: "completed".to_string(),
            start_date: date(2021, 6, 1),
            end_date: Some(date(2023, 5, 31)),
            members: names(&["Shin Hana"]),
            owner_id: None,
        },
    ]
}

pub fn papers() -> Vec<Paper> {
    vec![
        Paper {
            id: Uuid::new_v4(),
            title: "Stretchable electrodes for skin-mounted sensing".to_string(),
            journal: "Advanced Materials".to_string(),
            authors: names(&["Yoon Jae", "Oh Daeun", "Han Seojin"]),
            published_on: date(2024, 4, 12),
            citations: 31,
            impact_factor: Some(29.4),
            author_role: Some("first".to_string()),
            owner_id: None,
        },
        Paper {
            id: Uuid::new_v4(),
            title: "Grain boundary transport in garnet electrolytes".to_string(),
            journal: "ACS Energy Letters".to_string(),
            authors: names(&["Shin Hana", "Han Seojin"]),
            published_on: date(2022, 11, 2),
            citations: 78,
            impact_factor: Some(22.0),
            author_role: Some("corresponding".to_string()),
            owner_id: None,
        },
        Paper {
            id: Uuid::new_v4(),
            title: "A survey of printable conductors".to_string(),
            journal: "Journal of Materials Chemistry C".to_string(),
            authors: names(&["baek Sora"]),
            published_on: date(2023, 7, 20),
            citations: 5,
            impact_factor: None,
            author_role: None,
            owner_id: None,
        },
    ]
}

pub fn patents() -> Vec<Patent> {
    vec![Patent {
        id: Uuid::new_v4(),
        title: "Stretchable electrode and manufacturing method".to_string(),
        application_number: "10-2024-0031337".to_string(),
        inventors: names(&["Yoon Jae", "Han Seojin"]),
        status: "filed".to_string(),
        filed_on: Some(date(2024, 2, 7)),
        owner_id: None,
    }]
}

pub fn awards() -> Vec<Award> {
    vec![Award {
        id: Uuid::new_v4(),
        title: "Best Poster Award".to_string(),
        organization: "Korean Institute of Metals".to_string(),
        recipient: "Shin Hana".to_string(),
        category: Some("student".to_string()),
        awarded_on: date(2024, 10, 25),
        owner_id: None,
    }]
}

pub fn board_posts() -> Vec<BoardPost> {
    vec![
        BoardPost {
            id: Uuid::new_v4(),
            title: "Group meeting moved to Thursday".to_string(),
            author: "Han Seojin".to_string(),
            body: "This week's group meeting is in room 302 on Thursday 10am.".to_string(),
            category: "notice".to_string(),
            posted_at: at(2024, 11, 4, 9),
            author_id: None,
        },
        BoardPost {
            id: Uuid::new_v4(),
            title: "Seminar: printable electronics".to_string(),
            author: "Oh Daeun".to_string(),
            body: "Guest talk followed by lab tour.".to_string(),
            category: "seminar".to_string(),
            posted_at: at(2024, 11, 6, 14),
            author_id: None,
        },
    ]
}

pub fn leaves() -> Vec<Leave> {
    vec![Leave {
        id: Uuid::new_v4(),
        requester: "Yoon Jae".to_string(),
        kind: "annual".to_string(),
        reason: "family event".to_string(),
        status: "approved".to_string(),
        start_date: date(2024, 3, 1),
        end_date: Some(date(2024, 3, 3)),
        half_day: false,
        requester_id: None,
    }]
}
