//! Permission scheme grant resolution
//!
//! Callers describe a grant by name: the scheme by id or name, the holder by
//! project role name. The grant endpoints speak ids only and offer no lookup by
//! grant id, so this service resolves names to ids before each call, finds
//! existing grants by listing the scheme's grants and matching on
//! (permission, holder type, holder id), and puts the caller's names back onto
//! every result.

use crate::client::JiraClient;
use crate::permission_scheme::{PermissionSchemeService, SchemeRef};
use crate::project_role::ProjectRoleService;
use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, instrument, warn};

/// Holder type for project role grants
pub const PROJECT_ROLE_HOLDER: &str = "projectrole";

/// Grant holder as callers see it
///
/// `parameter` is the role name on the caller side. In decoded server
/// responses it carries the role id as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantHolder {
    #[serde(rename = "type")]
    pub holder_type: String,
    #[serde(default, deserialize_with = "deserialize_parameter")]
    pub parameter: String,
}

impl GrantHolder {
    pub fn new(holder_type: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self {
            holder_type: holder_type.into(),
            parameter: parameter.into(),
        }
    }

    pub fn project_role(role_name: impl Into<String>) -> Self {
        Self::new(PROJECT_ROLE_HOLDER, role_name)
    }
}

/// Grant holder on the wire: the parameter is the role id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrantApiHolder {
    #[serde(rename = "type")]
    pub holder_type: String,
    pub parameter: i64,
}

/// A grant exactly as the server lists it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiGrant {
    pub id: i64,
    #[serde(default)]
    pub permission: String,
    pub holder: GrantHolder,
}

#[derive(Debug, Deserialize)]
struct ApiGrantList {
    #[serde(default)]
    permissions: Vec<ApiGrant>,
}

#[derive(Debug, Serialize)]
struct GrantApiRequest<'a> {
    permission: &'a str,
    holder: GrantApiHolder,
}

/// Name-keyed description of a grant, used for create, get and delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantSpec {
    pub permission_scheme: SchemeRef,
    pub permission: String,
    pub holder: GrantHolder,
}

/// A grant with the caller's names re-attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub id: i64,
    pub permission_scheme: SchemeRef,
    pub permission: String,
    pub holder: GrantHolder,
}

/// Server ids behind a name-keyed grant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedGrant {
    pub permission_scheme_id: i64,
    pub holder_id: i64,
}

/// Server-side holder parameters are strings, numbers, or absent
/// (e.g. `anyone`); normalize to a string.
fn deserialize_parameter<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// Find the grant matching (permission, holder type, holder id)
///
/// Permission keys compare exactly, holder types ignore case. The scan covers
/// the whole list, so with duplicates the last match is returned. A match with
/// an empty permission counts as no match.
pub fn find_matching_grant<'a>(
    grants: &'a [ApiGrant],
    permission: &str,
    holder_type: &str,
    holder_id: i64,
) -> Option<&'a ApiGrant> {
    let holder_id = holder_id.to_string();
    let holder_type = holder_type.to_lowercase();

    let mut found = None;
    for grant in grants {
        if grant.permission == permission
            && grant.holder.holder_type.to_lowercase() == holder_type
            && grant.holder.parameter == holder_id
        {
            found = Some(grant);
        }
    }

    found.filter(|g| !g.permission.is_empty())
}

/// Grant service built on the permission scheme and project role services
#[derive(Debug, Clone)]
pub struct GrantService {
    client: JiraClient,
    schemes: PermissionSchemeService,
    roles: ProjectRoleService,
}

impl GrantService {
    pub fn new(client: JiraClient) -> Self {
        Self {
            schemes: PermissionSchemeService::new(client.clone()),
            roles: ProjectRoleService::new(client.clone()),
            client,
        }
    }

    /// Translate a scheme reference and holder name into server ids
    ///
    /// Fails with a not-found error naming whichever reference is missing.
    #[instrument(skip(self))]
    pub async fn resolve(&self, scheme: &SchemeRef, holder: &str) -> Result<ResolvedGrant> {
        let scheme = self.schemes.resolve(scheme).await?;
        let role = self.roles.resolve_reference(holder).await?;

        debug!(
            permission_scheme_id = scheme.id,
            holder_id = role.id,
            "resolved grant references"
        );

        Ok(ResolvedGrant {
            permission_scheme_id: scheme.id,
            holder_id: role.id,
        })
    }

    /// All grants of a scheme, in server order
    #[instrument(skip(self))]
    pub async fn list(&self, scheme: &SchemeRef) -> Result<Vec<ApiGrant>> {
        let scheme = self.schemes.resolve(scheme).await?;
        self.list_for_scheme(scheme.id).await
    }

    async fn list_for_scheme(&self, scheme_id: i64) -> Result<Vec<ApiGrant>> {
        let list: ApiGrantList = self
            .client
            .get_json(&format!("permissionscheme/{}/permission", scheme_id), &[])
            .await?;
        debug!(scheme_id, count = list.permissions.len(), "listed grants");
        Ok(list.permissions)
    }

    #[instrument(skip(self), fields(permission = %spec.permission))]
    pub async fn create(&self, spec: &GrantSpec) -> Result<Grant> {
        let resolved = self
            .resolve(&spec.permission_scheme, &spec.holder.parameter)
            .await?;

        let body = GrantApiRequest {
            permission: &spec.permission,
            holder: GrantApiHolder {
                holder_type: spec.holder.holder_type.clone(),
                parameter: resolved.holder_id,
            },
        };

        let created: ApiGrant = self
            .client
            .post_json(
                &format!("permissionscheme/{}/permission", resolved.permission_scheme_id),
                &body,
            )
            .await?;

        info!(
            grant_id = created.id,
            permission_scheme_id = resolved.permission_scheme_id,
            "Created permission scheme grant"
        );

        Ok(with_caller_names(created, spec))
    }

    /// Find the grant described by `spec`
    #[instrument(skip(self), fields(permission = %spec.permission))]
    pub async fn get(&self, spec: &GrantSpec) -> Result<Grant> {
        let (_, grant) = self.find(spec).await?;
        Ok(grant)
    }

    async fn find(&self, spec: &GrantSpec) -> Result<(ResolvedGrant, Grant)> {
        let resolved = self
            .resolve(&spec.permission_scheme, &spec.holder.parameter)
            .await?;
        let grants = self.list_for_scheme(resolved.permission_scheme_id).await?;

        match find_matching_grant(
            &grants,
            &spec.permission,
            &spec.holder.holder_type,
            resolved.holder_id,
        ) {
            Some(grant) => Ok((resolved, with_caller_names(grant.clone(), spec))),
            None => {
                warn!(
                    permission_scheme_id = resolved.permission_scheme_id,
                    holder_id = resolved.holder_id,
                    "permission scheme grant not found"
                );
                Err(Error::NotFound(
                    "failed to find permission scheme grant".to_string(),
                ))
            }
        }
    }

    #[instrument(skip(self), fields(permission = %spec.permission))]
    pub async fn delete(&self, spec: &GrantSpec) -> Result<()> {
        let (resolved, grant) = self.find(spec).await?;
        let scheme_id = resolved.permission_scheme_id;

        self.client
            .delete(
                &format!("permissionscheme/{}/permission/{}", scheme_id, grant.id),
                &[],
            )
            .await?;

        info!(
            grant_id = grant.id,
            permission_scheme_id = scheme_id,
            "Deleted permission scheme grant"
        );
        Ok(())
    }
}

fn with_caller_names(grant: ApiGrant, spec: &GrantSpec) -> Grant {
    Grant {
        id: grant.id,
        permission_scheme: spec.permission_scheme.clone(),
        permission: grant.permission,
        holder: GrantHolder {
            holder_type: grant.holder.holder_type,
            parameter: spec.holder.parameter.clone(),
        },
    }
}
