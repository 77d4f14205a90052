//! Mock controller API for testing authentication and site listing
//!
//! This simulates the profile and sites endpoints without a real controller.

use serde_json::{json, Value};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Mock controller server
pub struct MockControllerServer {
    pub server: MockServer,
    pub base_url: String,
}

impl MockControllerServer {
    /// Create a new mock controller server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self { server, base_url }
    }

    /// Mock a profile lookup that resolves `token` to `tenant_id`
    pub async fn mock_profile(&self, token: &str, tenant_id: &str) {
        Mock::given(method("GET"))
            .and(path("/v2.1/api/profile"))
            .and(header("x-auth-token", token))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tenant_id": tenant_id,
                "email": "operator@example.com",
                "first_name": "Test",
                "last_name": "Operator"
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock a profile that answers 200 but carries no tenant
    pub async fn mock_profile_without_tenant(&self) {
        Mock::given(method("GET"))
            .and(path("/v2.1/api/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "email": "operator@example.com"
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock an expired or unknown token
    pub async fn mock_unauthorized(&self) {
        Mock::given(method("GET"))
            .and(path("/v2.1/api/profile"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "_error": [{"code": "UNAUTHORIZED", "message": "Invalid token"}]
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock the site listing for `tenant_id`; `sites` is a list of (name, admin_state)
    pub async fn mock_sites(&self, tenant_id: &str, sites: &[(&str, &str)]) {
        let items: Vec<Value> = sites
            .iter()
            .enumerate()
            .map(|(i, (name, state))| {
                json!({
                    "id": format!("site-{}", i),
                    "name": name,
                    "admin_state": state,
                    "element_cluster_role": "SPOKE",
                    "address": {"city": "Berlin"}
                })
            })
            .collect();

        Mock::given(method("GET"))
            .and(path(format!("/v4.7/api/tenants/{}/sites", tenant_id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_etag": 1,
                "count": items.len(),
                "items": items
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock a controller outage on the sites endpoint
    pub async fn mock_sites_unavailable(&self, tenant_id: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/v4.7/api/tenants/{}/sites", tenant_id)))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
            .mount(&self.server)
            .await;
    }
}
