//! Group service
//!
//! Groups are keyed by name. Listing goes through the group picker, which
//! filters by substring on the server; exact matching happens here.

use crate::client::JiraClient;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRequest {
    pub name: String,
}

/// `GET /groups/picker` response
#[derive(Debug, Deserialize)]
struct GroupPickerResponse {
    #[serde(default)]
    groups: Vec<Group>,
}

#[derive(Debug, Clone)]
pub struct GroupService {
    client: JiraClient,
}

impl GroupService {
    pub fn new(client: JiraClient) -> Self {
        Self { client }
    }

    /// Groups whose name contains `query`
    #[instrument(skip(self))]
    pub async fn list(&self, query: &str) -> Result<Vec<Group>> {
        let picker: GroupPickerResponse = self
            .client
            .get_json("groups/picker", &[("query", query)])
            .await?;
        Ok(picker.groups)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, name: &str) -> Result<Group> {
        let groups = self.list(name).await?;
        match groups.into_iter().find(|g| g.name == name) {
            Some(group) => Ok(group),
            None => {
                warn!(name, "group not found");
                Err(Error::not_found(format!("group '{}'", name)))
            }
        }
    }

    #[instrument(skip(self), fields(name = %request.name))]
    pub async fn create(&self, request: &GroupRequest) -> Result<Group> {
        let created: Group = self.client.post_json("group", request).await?;
        info!(name = %created.name, "Created group");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, name: &str) -> Result<()> {
        let current = self.get(name).await?;
        self.client
            .delete("group", &[("groupname", current.name.as_str())])
            .await?;
        info!(name, "Deleted group");
        Ok(())
    }
}
