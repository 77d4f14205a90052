//! Common site listings used across tests

use site_backup::controller::{AdminState, Site, TenantContext};

pub const TEST_TOKEN: &str = "test-auth-token";
pub const TEST_TENANT_ID: &str = "1234567890";
pub const TEST_RECIPIENT: &str = "netops@example.com";

pub fn active(name: &str) -> Site {
    Site::new(name, AdminState::Active)
}

pub fn disabled(name: &str) -> Site {
    Site::new(name, AdminState::Disabled)
}

pub fn monitor(name: &str) -> Site {
    Site::new(name, AdminState::Monitor)
}

pub fn test_tenant() -> TenantContext {
    TenantContext {
        tenant_id: TEST_TENANT_ID.to_string(),
        operator_email: Some("operator@example.com".to_string()),
    }
}
