// File: site-backup/src/controller/client.rs
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use super::{Authenticator, Site, SiteLister, TenantContext};
use crate::constants::controller::{AUTH_HEADER, PROFILE_PATH, SITES_API_VERSION};
use crate::errors::ControllerError;

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    tenant_id: Option<String>,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SiteListResponse {
    #[serde(default)]
    items: Vec<Site>,
}

/// Unauthenticated handle on the controller API
#[derive(Clone)]
pub struct ControllerClient {
    client: Client,
    base_url: String,
}

impl ControllerClient {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, ControllerError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| ControllerError::Transport {
                url: base_url.to_string(),
                reason: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Bind this client to a token and the tenant it resolved to
    pub fn session(self, token: String, tenant: TenantContext) -> ControllerSession {
        ControllerSession {
            client: self,
            token,
            tenant,
        }
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        token: &str,
    ) -> Result<T, ControllerError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(AUTH_HEADER, token)
            .send()
            .await
            .map_err(|e| ControllerError::Transport {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let response = Self::check_status(&url, response).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| ControllerError::InvalidResponse {
                url,
                reason: e.to_string(),
            })
    }

    async fn check_status(url: &str, response: Response) -> Result<Response, ControllerError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ControllerError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            message: controller_error_message(&body),
        })
    }
}

impl Authenticator for ControllerClient {
    async fn authenticate(&self, token: &str) -> Result<TenantContext, ControllerError> {
        let profile: ProfileResponse = self.get_json(PROFILE_PATH, token).await?;

        let tenant_id = profile
            .tenant_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(ControllerError::NoTenant)?;

        info!("Authenticated against {} as tenant {}", self.base_url, tenant_id);

        Ok(TenantContext {
            tenant_id,
            operator_email: profile.email,
        })
    }
}

/// Controller client bound to one tenant and token
pub struct ControllerSession {
    client: ControllerClient,
    token: String,
    tenant: TenantContext,
}

impl ControllerSession {
    pub fn tenant(&self) -> &TenantContext {
        &self.tenant
    }
}

impl SiteLister for ControllerSession {
    async fn list_sites(&self) -> Result<Vec<Site>, ControllerError> {
        let path = format!(
            "/{}/api/tenants/{}/sites",
            SITES_API_VERSION, self.tenant.tenant_id
        );
        let listing: SiteListResponse = self.client.get_json(&path, &self.token).await?;

        debug!(
            "Controller returned {} sites for tenant {}",
            listing.items.len(),
            self.tenant.tenant_id
        );

        Ok(listing.items)
    }
}

/// Extract `_error[].message` from a controller error body, falling back to the raw text
fn controller_error_message(body: &str) -> String {
    let messages: Vec<String> = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("_error").and_then(|e| e.as_array()).cloned())
        .unwrap_or_default()
        .iter()
        .filter_map(|e| {
            let message = e.get("message").and_then(|m| m.as_str())?;
            match e.get("code").and_then(|c| c.as_str()) {
                Some(code) => Some(format!("{}: {}", code, message)),
                None => Some(message.to_string()),
            }
        })
        .collect();

    if messages.is_empty() {
        body.trim().to_string()
    } else {
        messages.join("; ")
    }
}
