//! Screen service

use crate::client::JiraClient;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screen {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenRequest {
    pub name: String,
    pub description: String,
}

/// Newer servers page the list; older ones return a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScreenList {
    Paged {
        #[serde(default)]
        values: Vec<Screen>,
        #[serde(rename = "isLast", default = "last_page")]
        is_last: bool,
    },
    Plain(Vec<Screen>),
}

fn last_page() -> bool {
    true
}

#[derive(Debug, Clone)]
pub struct ScreenService {
    client: JiraClient,
}

impl ScreenService {
    pub fn new(client: JiraClient) -> Self {
        Self { client }
    }

    /// Screens matching `querystring` (empty lists everything)
    ///
    /// Follows `startAt` until the server reports the last page.
    #[instrument(skip(self))]
    pub async fn list(&self, querystring: &str) -> Result<Vec<Screen>> {
        let mut screens = Vec::new();
        let mut start_at = 0usize;

        loop {
            let start = start_at.to_string();
            let page: ScreenList = self
                .client
                .get_json(
                    "screens",
                    &[("querystring", querystring), ("startAt", start.as_str())],
                )
                .await?;

            match page {
                ScreenList::Plain(list) => {
                    screens.extend(list);
                    break;
                }
                ScreenList::Paged { values, is_last } => {
                    let fetched = values.len();
                    screens.extend(values);
                    if is_last || fetched == 0 {
                        break;
                    }
                    start_at += fetched;
                }
            }
        }

        debug!(count = screens.len(), "listed screens");
        Ok(screens)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Screen> {
        let screens = self.list("").await?;
        match screens.into_iter().find(|s| s.id == id) {
            Some(screen) => Ok(screen),
            None => {
                warn!(id, "screen not found");
                Err(Error::not_found(format!("screen {}", id)))
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<Screen> {
        let screens = self.list(name).await?;
        match screens.into_iter().find(|s| s.name == name) {
            Some(screen) => Ok(screen),
            None => {
                warn!(name, "screen not found");
                Err(Error::not_found(format!("screen '{}'", name)))
            }
        }
    }

    #[instrument(skip(self), fields(name = %request.name))]
    pub async fn create(&self, request: &ScreenRequest) -> Result<Screen> {
        let created: Screen = self.client.post_json("screens", request).await?;
        info!(id = created.id, name = %created.name, "Created screen");
        Ok(created)
    }

    #[instrument(skip(self, request))]
    pub async fn update(&self, id: i64, request: &ScreenRequest) -> Result<Screen> {
        let current = self.get(id).await?;
        let updated: Screen = self
            .client
            .put_json(&format!("screens/{}", current.id), request)
            .await?;
        info!(id = updated.id, "Updated screen");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<()> {
        let current = self.get(id).await?;
        self.client
            .delete(&format!("screens/{}", current.id), &[])
            .await?;
        info!(id, "Deleted screen");
        Ok(())
    }
}
