//! Jira Server administration client
//!
//! Typed services over the Jira Server REST API (`/rest/api/2`) for the
//! entities a provider manages: permission schemes and their grants, project
//! roles, groups, issue types and screens.
//!
//! # Example
//!
//! ```no_run
//! use jira_server::{AuthScheme, GrantHolder, GrantService, GrantSpec, JiraClient, SchemeRef, ServerConnection};
//!
//! # async fn run() -> jira_server::Result<()> {
//! let connection = ServerConnection::new("jira.example.com", AuthScheme::Bearer, "token")?;
//! let client = JiraClient::new(connection)?;
//!
//! let grants = GrantService::new(client);
//! let grant = grants
//!     .create(&GrantSpec {
//!         permission_scheme: SchemeRef::Name("Team Scheme".to_string()),
//!         permission: "BROWSE_PROJECTS".to_string(),
//!         holder: GrantHolder::project_role("Developers"),
//!     })
//!     .await?;
//! assert_eq!(grant.holder.parameter, "Developers");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod connection;
pub mod error;
pub mod grant;
pub mod group;
pub mod issue_type;
pub mod permission_scheme;
pub mod project_role;
pub mod screen;

pub use client::{JiraClient, REQUEST_TIMEOUT};
pub use connection::{AuthScheme, ServerConnection};
pub use error::{Error, Result};
pub use grant::{
    find_matching_grant, ApiGrant, Grant, GrantApiHolder, GrantHolder, GrantService, GrantSpec,
    ResolvedGrant, PROJECT_ROLE_HOLDER,
};
pub use group::{Group, GroupRequest, GroupService};
pub use issue_type::{IssueType, IssueTypeRequest, IssueTypeService, STANDARD_ISSUE_TYPE};
pub use permission_scheme::{
    PermissionScheme, PermissionSchemeRequest, PermissionSchemeService, SchemeRef,
};
pub use project_role::{ProjectRole, ProjectRoleRequest, ProjectRoleService};
pub use screen::{Screen, ScreenRequest, ScreenService};
