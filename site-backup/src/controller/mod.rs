//! SDN controller API access
//!
//! The backup run only needs two things from the controller: proof that the
//! static token belongs to a tenant, and that tenant's site list. Both are
//! expressed as traits so the runner and bootstrap can be driven by fakes.

pub mod client;
pub use client::{ControllerClient, ControllerSession};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;

use crate::errors::ControllerError;

/// Administrative state of a site as reported by the controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AdminState {
    Active,
    Disabled,
    Monitor,
    Other(String),
}

impl AdminState {
    pub fn is_active(&self) -> bool {
        matches!(self, AdminState::Active)
    }
}

impl From<String> for AdminState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "active" => AdminState::Active,
            "disabled" => AdminState::Disabled,
            "monitor" => AdminState::Monitor,
            _ => AdminState::Other(value),
        }
    }
}

impl From<AdminState> for String {
    fn from(state: AdminState) -> Self {
        state.to_string()
    }
}

impl fmt::Display for AdminState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminState::Active => write!(f, "active"),
            AdminState::Disabled => write!(f, "disabled"),
            AdminState::Monitor => write!(f, "monitor"),
            AdminState::Other(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub name: String,
    pub admin_state: AdminState,
}

impl Site {
    pub fn new(name: impl Into<String>, admin_state: AdminState) -> Self {
        Self {
            name: name.into(),
            admin_state,
        }
    }
}

/// Tenant resolved from a successful token login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantContext {
    pub tenant_id: String,
    pub operator_email: Option<String>,
}

/// Resolves a static token to the tenant it belongs to
pub trait Authenticator {
    fn authenticate(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<TenantContext, ControllerError>> + Send;
}

/// Lists every site of the authenticated tenant
pub trait SiteLister {
    fn list_sites(&self) -> impl Future<Output = Result<Vec<Site>, ControllerError>> + Send;
}
