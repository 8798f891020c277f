//! Issue type service
//!
//! Creating an issue type takes two calls: the create endpoint ignores the
//! avatar, so a follow-up update sets description and avatar.

use crate::client::JiraClient;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Discriminator sent on every create
pub const STANDARD_ISSUE_TYPE: &str = "standard";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueType {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "avatarId", default)]
    pub avatar_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueTypeRequest {
    pub name: String,
    pub description: String,
    #[serde(rename = "avatarId", skip_serializing_if = "Option::is_none")]
    pub avatar_id: Option<i64>,
}

#[derive(Debug, Serialize)]
struct IssueTypeCreateBody<'a> {
    name: &'a str,
    description: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Clone)]
pub struct IssueTypeService {
    client: JiraClient,
}

impl IssueTypeService {
    pub fn new(client: JiraClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<IssueType>> {
        self.client.get_json("issuetype", &[]).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<IssueType> {
        let types = self.list().await?;
        match types.into_iter().find(|t| t.id == id) {
            Some(issue_type) => Ok(issue_type),
            None => {
                warn!(id, "issue type not found");
                Err(Error::not_found(format!("issue type {}", id)))
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<IssueType> {
        let types = self.list().await?;
        match types.into_iter().find(|t| t.name == name) {
            Some(issue_type) => Ok(issue_type),
            None => {
                warn!(name, "issue type not found");
                Err(Error::not_found(format!("issue type '{}'", name)))
            }
        }
    }

    /// Create a standard issue type, then apply description and avatar
    ///
    /// Returns the create response. If the follow-up update fails the new
    /// type stays on the server and the error is returned.
    #[instrument(skip(self), fields(name = %request.name))]
    pub async fn create(&self, request: &IssueTypeRequest) -> Result<IssueType> {
        let body = IssueTypeCreateBody {
            name: &request.name,
            description: &request.description,
            kind: STANDARD_ISSUE_TYPE,
        };

        let created: IssueType = self.client.post_json("issuetype", &body).await?;
        info!(id = %created.id, name = %created.name, "Created issue type");

        let updated = self.update(&created.id, request).await?;
        debug!(id = %updated.id, avatar_id = ?updated.avatar_id, "Applied issue type avatar");

        Ok(created)
    }

    #[instrument(skip(self, request))]
    pub async fn update(&self, id: &str, request: &IssueTypeRequest) -> Result<IssueType> {
        let current = self.get(id).await?;
        let updated: IssueType = self
            .client
            .put_json(&format!("issuetype/{}", current.id), request)
            .await?;
        info!(id = %updated.id, "Updated issue type");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        let current = self.get(id).await?;
        self.client
            .delete(&format!("issuetype/{}", current.id), &[])
            .await?;
        info!(id, "Deleted issue type");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_body_forces_standard() {
        let body = IssueTypeCreateBody {
            name: "Bug",
            description: "d",
            kind: STANDARD_ISSUE_TYPE,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"name": "Bug", "description": "d", "type": "standard"})
        );
    }

    #[test]
    fn test_update_body_field_names() {
        let request = IssueTypeRequest {
            name: "Bug".to_string(),
            description: "d".to_string(),
            avatar_id: Some(7),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"name": "Bug", "description": "d", "avatarId": 7})
        );
    }

    #[test]
    fn test_issue_type_decoding() {
        let json = r#"{
            "self": "https://jira/rest/api/2/issuetype/1",
            "id": "1",
            "description": "A problem",
            "iconUrl": "https://jira/images/icons/bug.png",
            "name": "Bug",
            "subtask": false,
            "avatarId": 10303
        }"#;

        let issue_type: IssueType = serde_json::from_str(json).unwrap();
        assert_eq!(issue_type.id, "1");
        assert_eq!(issue_type.avatar_id, Some(10303));
    }
}
