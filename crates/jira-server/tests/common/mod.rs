//! Shared helpers for the wiremock-backed tests
#![allow(dead_code)]

use jira_server::{AuthScheme, JiraClient, ServerConnection};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "test-token-123";

pub fn client_for(server: &MockServer) -> JiraClient {
    let connection = ServerConnection::new(server.uri(), AuthScheme::Bearer, TOKEN)
        .expect("valid connection");
    JiraClient::new(connection).expect("Failed to create client")
}

pub fn api(p: &str) -> String {
    format!("/rest/api/2/{}", p)
}

pub fn schemes() -> Value {
    json!({
        "permissionSchemes": [
            {"id": 10000, "name": "Default Permission Scheme", "description": "default"},
            {"id": 10100, "name": "PS1", "description": "desc"}
        ]
    })
}

pub fn roles() -> Value {
    json!([
        {"id": 10002, "name": "Administrators", "description": "admins"},
        {"id": 10100, "name": "Developers", "description": "devs"}
    ])
}

pub async fn mount_get(server: &MockServer, p: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(api(p)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_schemes_and_roles(server: &MockServer) {
    mount_get(server, "permissionscheme", schemes()).await;
    mount_get(server, "role", roles()).await;
}
