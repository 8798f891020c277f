//! Entity services against a mock Jira server

mod common;

use common::{api, client_for, mount_get, schemes};
use jira_server::{
    AuthScheme, Error, GroupRequest, GroupService, IssueTypeRequest, IssueTypeService, JiraClient,
    PermissionSchemeRequest, PermissionSchemeService, ProjectRoleRequest, ProjectRoleService,
    ScreenRequest, ScreenService, ServerConnection,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod permission_scheme_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_sends_auth_and_accept_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(api("permissionscheme")))
            .and(header("Authorization", "Bearer test-token-123"))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(schemes()))
            .expect(1)
            .mount(&server)
            .await;

        let service = PermissionSchemeService::new(client_for(&server));
        let listed = service.list().await.unwrap();
        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn test_basic_auth_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(api("permissionscheme")))
            .and(header("Authorization", "Basic dXNlcjpwYXNz"))
            .respond_with(ResponseTemplate::new(200).set_body_json(schemes()))
            .expect(1)
            .mount(&server)
            .await;

        let connection =
            ServerConnection::new(server.uri(), AuthScheme::Basic, "dXNlcjpwYXNz").unwrap();
        let service = PermissionSchemeService::new(JiraClient::new(connection).unwrap());
        service.list().await.unwrap();
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(api("permissionscheme")))
            .and(body_json(json!({"name": "PS1", "description": "desc"})))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"id": 10100, "name": "PS1", "description": "desc"})),
            )
            .mount(&server)
            .await;
        mount_get(&server, "permissionscheme", schemes()).await;

        let service = PermissionSchemeService::new(client_for(&server));
        let created = service
            .create(&PermissionSchemeRequest {
                name: "PS1".to_string(),
                description: "desc".to_string(),
            })
            .await
            .unwrap();
        let fetched = service.get(created.id).await.unwrap();

        assert_eq!(fetched.name, "PS1");
        assert_eq!(fetched.description, "desc");
    }

    #[tokio::test]
    async fn test_find_by_name() {
        let server = MockServer::start().await;
        mount_get(&server, "permissionscheme", schemes()).await;

        let service = PermissionSchemeService::new(client_for(&server));
        assert_eq!(service.find_by_name("PS1").await.unwrap().id, 10100);
        assert!(service.find_by_name("ps1").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_update_keeps_server_name_when_empty() {
        let server = MockServer::start().await;
        mount_get(&server, "permissionscheme", schemes()).await;
        Mock::given(method("PUT"))
            .and(path(api("permissionscheme/10100")))
            .and(body_json(json!({"name": "PS1", "description": "new"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"id": 10100, "name": "PS1", "description": "new"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let service = PermissionSchemeService::new(client_for(&server));
        let updated = service
            .update(
                10100,
                &PermissionSchemeRequest {
                    name: String::new(),
                    description: "new".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.description, "new");
    }

    #[tokio::test]
    async fn test_delete_of_missing_scheme_issues_no_delete() {
        let server = MockServer::start().await;
        mount_get(&server, "permissionscheme", schemes()).await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        let service = PermissionSchemeService::new(client_for(&server));
        let err = service.delete(424242).await.unwrap_err();
        assert!(err.is_not_found(), "{err}");
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(api("permissionscheme")))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let service = PermissionSchemeService::new(client_for(&server));
        let err = service.list().await.unwrap_err();
        assert!(err.is_decode(), "{err}");
    }

    #[tokio::test]
    async fn test_unauthorized_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(api("permissionscheme")))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let service = PermissionSchemeService::new(client_for(&server));
        let err = service.list().await.unwrap_err();
        assert!(matches!(err, Error::Auth(_)), "{err}");
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let connection =
            ServerConnection::new("http://127.0.0.1:1", AuthScheme::Bearer, "t").unwrap();
        let service = PermissionSchemeService::new(JiraClient::new(connection).unwrap());

        let err = service.list().await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)), "{err}");
    }
}

mod project_role_tests {
    use super::*;

    #[tokio::test]
    async fn test_update_puts_to_item_endpoint() {
        let server = MockServer::start().await;
        mount_get(&server, "role", common::roles()).await;
        Mock::given(method("PUT"))
            .and(path(api("role/10100")))
            .and(body_json(json!({"name": "Developers", "description": "builders"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"id": 10100, "name": "Developers", "description": "builders"}),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let service = ProjectRoleService::new(client_for(&server));
        let updated = service
            .update(
                10100,
                &ProjectRoleRequest {
                    name: "Developers".to_string(),
                    description: "builders".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.description, "builders");
    }

    #[tokio::test]
    async fn test_update_of_missing_role_is_not_found() {
        let server = MockServer::start().await;
        mount_get(&server, "role", common::roles()).await;

        let service = ProjectRoleService::new(client_for(&server));
        let err = service
            .update(
                1,
                &ProjectRoleRequest {
                    name: "x".to_string(),
                    description: "y".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_create_and_delete() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(api("role")))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"id": 10100, "name": "Developers", "description": "devs"}),
            ))
            .mount(&server)
            .await;
        mount_get(&server, "role", common::roles()).await;
        Mock::given(method("DELETE"))
            .and(path(api("role/10100")))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let service = ProjectRoleService::new(client_for(&server));
        let created = service
            .create(&ProjectRoleRequest {
                name: "Developers".to_string(),
                description: "devs".to_string(),
            })
            .await
            .unwrap();
        service.delete(created.id).await.unwrap();
    }
}

mod group_tests {
    use super::*;

    fn picker() -> serde_json::Value {
        json!({
            "header": "Showing 2 of 2 matching groups",
            "total": 2,
            "groups": [
                {"name": "qa-team-leads", "html": "<b>qa-team</b>-leads"},
                {"name": "qa-team", "html": "<b>qa-team</b>"}
            ]
        })
    }

    #[tokio::test]
    async fn test_get_requires_exact_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(api("groups/picker")))
            .and(query_param("query", "qa-team"))
            .respond_with(ResponseTemplate::new(200).set_body_json(picker()))
            .mount(&server)
            .await;

        let service = GroupService::new(client_for(&server));
        assert_eq!(service.get("qa-team").await.unwrap().name, "qa-team");
    }

    #[tokio::test]
    async fn test_create_posts_name() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(api("group")))
            .and(body_json(json!({"name": "qa-team"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "name": "qa-team",
                "self": "https://jira/rest/api/2/group?groupname=qa-team",
                "users": {"size": 0, "items": []}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let service = GroupService::new(client_for(&server));
        let created = service
            .create(&GroupRequest {
                name: "qa-team".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.name, "qa-team");
    }

    #[tokio::test]
    async fn test_delete_uses_groupname_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(api("groups/picker")))
            .respond_with(ResponseTemplate::new(200).set_body_json(picker()))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path(api("group")))
            .and(query_param("groupname", "qa-team"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let service = GroupService::new(client_for(&server));
        service.delete("qa-team").await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_group_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(api("groups/picker")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"total": 0, "groups": []})),
            )
            .mount(&server)
            .await;

        let service = GroupService::new(client_for(&server));
        assert!(service.get("nobody").await.unwrap_err().is_not_found());
    }
}

mod issue_type_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_forces_standard_then_sets_avatar() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(api("issuetype")))
            .and(body_json(
                json!({"name": "Bug", "description": "d", "type": "standard"}),
            ))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "10100", "name": "Bug", "description": "d", "avatarId": 10300
            })))
            .expect(1)
            .mount(&server)
            .await;
        mount_get(
            &server,
            "issuetype",
            json!([
                {"id": "1", "name": "Task", "description": "", "avatarId": 10318},
                {"id": "10100", "name": "Bug", "description": "d", "avatarId": 10300}
            ]),
        )
        .await;
        Mock::given(method("PUT"))
            .and(path(api("issuetype/10100")))
            .and(body_json(json!({"name": "Bug", "description": "d", "avatarId": 7})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "10100", "name": "Bug", "description": "d", "avatarId": 7
            })))
            .expect(1)
            .mount(&server)
            .await;

        let service = IssueTypeService::new(client_for(&server));
        let created = service
            .create(&IssueTypeRequest {
                name: "Bug".to_string(),
                description: "d".to_string(),
                avatar_id: Some(7),
            })
            .await
            .unwrap();

        // The create response is returned, not the update response
        assert_eq!(created.id, "10100");
        assert_eq!(created.avatar_id, Some(10300));
    }

    #[tokio::test]
    async fn test_failed_update_after_create_surfaces() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(api("issuetype")))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "10100", "name": "Bug", "description": "d"
            })))
            .mount(&server)
            .await;
        mount_get(
            &server,
            "issuetype",
            json!([{"id": "10100", "name": "Bug", "description": "d"}]),
        )
        .await;
        Mock::given(method("PUT"))
            .and(path(api("issuetype/10100")))
            .respond_with(ResponseTemplate::new(400).set_body_json(
                json!({"errorMessages": [], "errors": {"avatarId": "invalid"}}),
            ))
            .mount(&server)
            .await;

        let service = IssueTypeService::new(client_for(&server));
        let err = service
            .create(&IssueTypeRequest {
                name: "Bug".to_string(),
                description: "d".to_string(),
                avatar_id: Some(-1),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn test_find_by_name_and_delete() {
        let server = MockServer::start().await;
        mount_get(
            &server,
            "issuetype",
            json!([{"id": "10100", "name": "Bug", "description": "d"}]),
        )
        .await;
        Mock::given(method("DELETE"))
            .and(path(api("issuetype/10100")))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let service = IssueTypeService::new(client_for(&server));
        let found = service.find_by_name("Bug").await.unwrap();
        service.delete(&found.id).await.unwrap();
    }
}

mod screen_tests {
    use super::*;

    #[tokio::test]
    async fn test_find_by_name_uses_querystring() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(api("screens")))
            .and(query_param("querystring", "Bug Screen"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "maxResults": 100, "startAt": 0, "total": 2, "isLast": true,
                "values": [
                    {"id": 10001, "name": "Bug Screen Extended", "description": ""},
                    {"id": 10002, "name": "Bug Screen", "description": "bugs"}
                ]
            })))
            .mount(&server)
            .await;

        let service = ScreenService::new(client_for(&server));
        assert_eq!(service.find_by_name("Bug Screen").await.unwrap().id, 10002);
    }

    #[tokio::test]
    async fn test_get_follows_pages_until_last() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(api("screens")))
            .and(query_param("startAt", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "maxResults": 1, "startAt": 0, "total": 2, "isLast": false,
                "values": [{"id": 1, "name": "Default Screen", "description": ""}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(api("screens")))
            .and(query_param("startAt", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "maxResults": 1, "startAt": 1, "total": 2, "isLast": true,
                "values": [{"id": 2, "name": "Resolve Issue Screen", "description": ""}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let service = ScreenService::new(client_for(&server));
        let screen = service.get(2).await.unwrap();
        assert_eq!(screen.name, "Resolve Issue Screen");
    }

    #[tokio::test]
    async fn test_update_and_delete_by_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(api("screens")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 10002, "name": "Bug Screen", "description": "bugs"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path(api("screens/10002")))
            .and(body_json(json!({"name": "Bug Screen", "description": "all bugs"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"id": 10002, "name": "Bug Screen", "description": "all bugs"}),
            ))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path(api("screens/10002")))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let service = ScreenService::new(client_for(&server));
        let updated = service
            .update(
                10002,
                &ScreenRequest {
                    name: "Bug Screen".to_string(),
                    description: "all bugs".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.description, "all bugs");
        service.delete(10002).await.unwrap();
    }
}
