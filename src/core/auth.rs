//! Access control and bearer-token capabilities
//!
//! Two concerns live here:
//! - [`TokenSource`]: where outgoing API calls get their bearer token. It is
//!   handed to every calling function through an explicit context object,
//!   never read from a global.
//! - [`Viewer`] and [`AccessPolicy`]: who is looking at a record and whether
//!   they may change it (author/owner or a privileged role).

use anyhow::Result;
use async_trait::async_trait;
use axum::http::HeaderMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Header carrying the viewing member's id
pub const MEMBER_ID_HEADER: &str = "x-member-id";

/// Header carrying the viewing member's comma-separated roles
pub const MEMBER_ROLES_HEADER: &str = "x-member-roles";

/// Supplies the current bearer token for outgoing API calls
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Current token, or `None` when the session has none
    async fn bearer_token(&self) -> Result<Option<String>>;
}

/// A fixed token (or no token at all)
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

#[async_trait]
impl TokenSource for StaticToken {
    async fn bearer_token(&self) -> Result<Option<String>> {
        Ok(self.0.clone())
    }
}

/// A token that can be replaced at runtime (login, refresh, logout)
#[derive(Debug, Clone, Default)]
pub struct SharedToken {
    token: Arc<RwLock<Option<String>>>,
}

impl SharedToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current token
    pub fn set(&self, token: Option<String>) -> Result<()> {
        let mut guard = self
            .token
            .write()
            .map_err(|e| anyhow::anyhow!("Failed to acquire write lock: {}", e))?;
        *guard = token;
        Ok(())
    }
}

#[async_trait]
impl TokenSource for SharedToken {
    async fn bearer_token(&self) -> Result<Option<String>> {
        let guard = self
            .token
            .read()
            .map_err(|e| anyhow::anyhow!("Failed to acquire read lock: {}", e))?;
        Ok(guard.clone())
    }
}

/// The member viewing or mutating a record
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Viewer {
    pub member_id: Option<Uuid>,
    pub roles: Vec<String>,
}

impl Viewer {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn member(member_id: Uuid, roles: &[&str]) -> Self {
        Self {
            member_id: Some(member_id),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    /// Read the viewer from request headers.
    ///
    /// A missing or malformed member id yields an anonymous viewer.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let member_id = headers
            .get(MEMBER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v.trim()).ok());

        let roles = headers
            .get(MEMBER_ROLES_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| {
                v.split(',')
                    .map(|r| r.trim().to_lowercase())
                    .filter(|r| !r.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self { member_id, roles }
    }

    pub fn is_authenticated(&self) -> bool {
        self.member_id.is_some()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Who may mutate a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Anyone
    Public,

    /// Any identified member
    Authenticated,

    /// Members holding one of these roles
    HasRole(Vec<String>),

    /// The record's owner, or a member holding one of these roles
    OwnerOrRole(Vec<String>),
}

impl AccessPolicy {
    /// Check a viewer against this policy for a record owned by `owner`
    pub fn allows(&self, viewer: &Viewer, owner: Option<Uuid>) -> bool {
        match self {
            AccessPolicy::Public => true,
            AccessPolicy::Authenticated => viewer.is_authenticated(),
            AccessPolicy::HasRole(roles) => roles.iter().any(|r| viewer.has_role(r)),
            AccessPolicy::OwnerOrRole(roles) => {
                let is_owner = matches!((viewer.member_id, owner), (Some(v), Some(o)) if v == o);
                is_owner || roles.iter().any(|r| viewer.has_role(r))
            }
        }
    }

    /// Parse policy from string (for YAML config)
    ///
    /// `public`, `authenticated`, `role:<name>`, `owner_or_role:<name>`.
    /// Anything else falls back to `authenticated`.
    pub fn parse_policy(s: &str) -> Self {
        match s {
            "public" => AccessPolicy::Public,
            "authenticated" => AccessPolicy::Authenticated,
            s => {
                if let Some(role) = s.strip_prefix("owner_or_role:") {
                    AccessPolicy::OwnerOrRole(vec![role.to_string()])
                } else if let Some(role) = s.strip_prefix("role:") {
                    AccessPolicy::HasRole(vec![role.to_string()])
                } else {
                    AccessPolicy::Authenticated
                }
            }
        }
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        AccessPolicy::OwnerOrRole(vec!["admin".to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn test_static_token() {
        let token = StaticToken::new("abc");
        assert_eq!(token.bearer_token().await.unwrap().as_deref(), Some("abc"));
        assert!(StaticToken::none().bearer_token().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_shared_token_replacement() {
        let token = SharedToken::new();
        assert!(token.bearer_token().await.unwrap().is_none());

        let handle = token.clone();
        handle.set(Some("fresh".to_string())).unwrap();
        assert_eq!(token.bearer_token().await.unwrap().as_deref(), Some("fresh"));

        handle.set(None).unwrap();
        assert!(token.bearer_token().await.unwrap().is_none());
    }

    #[test]
    fn test_viewer_from_headers() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(MEMBER_ID_HEADER, HeaderValue::from_str(&id.to_string()).unwrap());
        headers.insert(MEMBER_ROLES_HEADER, HeaderValue::from_static("Admin, pi ,"));

        let viewer = Viewer::from_headers(&headers);
        assert_eq!(viewer.member_id, Some(id));
        assert_eq!(viewer.roles, vec!["admin", "pi"]);
        assert!(viewer.is_authenticated());
    }

    #[test]
    fn test_viewer_bad_id_is_anonymous() {
        let mut headers = HeaderMap::new();
        headers.insert(MEMBER_ID_HEADER, HeaderValue::from_static("not-a-uuid"));
        let viewer = Viewer::from_headers(&headers);
        assert!(!viewer.is_authenticated());
        assert_eq!(Viewer::from_headers(&HeaderMap::new()), Viewer::anonymous());
    }

    #[test]
    fn test_owner_or_role() {
        let owner = Uuid::new_v4();
        let policy = AccessPolicy::default();

        assert!(policy.allows(&Viewer::member(owner, &[]), Some(owner)));
        assert!(policy.allows(&Viewer::member(Uuid::new_v4(), &["admin"]), Some(owner)));
        assert!(!policy.allows(&Viewer::member(Uuid::new_v4(), &["student"]), Some(owner)));
        assert!(!policy.allows(&Viewer::anonymous(), Some(owner)));
        // No owner recorded: only the role can pass
        assert!(!policy.allows(&Viewer::member(owner, &[]), None));
    }

    #[test]
    fn test_simple_policies() {
        let member = Viewer::member(Uuid::new_v4(), &["pi"]);
        assert!(AccessPolicy::Public.allows(&Viewer::anonymous(), None));
        assert!(AccessPolicy::Authenticated.allows(&member, None));
        assert!(!AccessPolicy::Authenticated.allows(&Viewer::anonymous(), None));
        assert!(AccessPolicy::HasRole(vec!["pi".into()]).allows(&member, None));
        assert!(!AccessPolicy::HasRole(vec!["admin".into()]).allows(&member, None));
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!(AccessPolicy::parse_policy("public"), AccessPolicy::Public);
        assert_eq!(
            AccessPolicy::parse_policy("role:admin"),
            AccessPolicy::HasRole(vec!["admin".to_string()])
        );
        assert_eq!(
            AccessPolicy::parse_policy("owner_or_role:pi"),
            AccessPolicy::OwnerOrRole(vec!["pi".to_string()])
        );
        assert_eq!(AccessPolicy::parse_policy("???"), AccessPolicy::Authenticated);
    }
}
