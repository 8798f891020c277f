//! Provider registry
//!
//! Every resource adapter, keyed by resource type name. All adapters share
//! one [`JiraClient`].

use crate::config::ProviderConfig;
use crate::resources::{
    DynResource, GrantResource, GroupResource, IssueTypeResource, PermissionSchemeResource,
    ProjectRoleResource, ScreenResource,
};
use crate::{ProviderError, Result};
use jira_server::{
    GrantService, GroupService, IssueTypeService, JiraClient, PermissionSchemeService,
    ProjectRoleService, ScreenService,
};
use std::collections::BTreeMap;
use tracing::{debug, info};

pub struct Provider {
    resources: BTreeMap<&'static str, Box<dyn DynResource>>,
}

impl Provider {
    /// Validate the configuration and connect
    ///
    /// Fails before any request when domain, method or token are missing.
    pub fn configure(config: &ProviderConfig) -> Result<Self> {
        let connection = config.connection()?;
        let client = JiraClient::new(connection)?;
        info!(base_url = %client.base_url(), "Configured Jira Server provider");
        Ok(Self::new(client))
    }

    pub fn new(client: JiraClient) -> Self {
        let mut provider = Self {
            resources: BTreeMap::new(),
        };

        provider.register(PermissionSchemeResource::new(PermissionSchemeService::new(
            client.clone(),
        )));
        provider.register(ProjectRoleResource::new(ProjectRoleService::new(
            client.clone(),
        )));
        provider.register(GrantResource::new(GrantService::new(client.clone())));
        provider.register(GroupResource::new(GroupService::new(client.clone())));
        provider.register(IssueTypeResource::new(IssueTypeService::new(
            client.clone(),
        )));
        provider.register(ScreenResource::new(ScreenService::new(client)));

        provider
    }

    fn register(&mut self, resource: impl DynResource + 'static) {
        let name = resource.type_name();
        debug!(resource = name, "Registered resource");
        self.resources.insert(name, Box::new(resource));
    }

    /// Look up a resource adapter by type name
    pub fn resource(&self, type_name: &str) -> Result<&dyn DynResource> {
        self.resources
            .get(type_name)
            .map(|r| r.as_ref())
            .ok_or_else(|| ProviderError::UnknownResource(type_name.to_string()))
    }

    /// Registered type names, sorted
    pub fn resource_types(&self) -> Vec<&'static str> {
        self.resources.keys().copied().collect()
    }
}
