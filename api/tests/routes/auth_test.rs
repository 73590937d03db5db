#[cfg(test)]
mod tests {
    use crate::helpers::{create_user, empty_request, json_request, make_test_app, send};
    use axum::http::{Request, StatusCode};
    use db::models::user::Role;
    use serde_json::json;
    use serial_test::serial;

    /// Test Case: Student registration returns the user and a usable token
    #[tokio::test]
    #[serial]
    async fn test_register_student_success() {
        let (app, _state, _tmp) = make_test_app().await;

        let body = json!({
            "username": "u20230001",
            "name": "Li Wei",
            "email": "li.wei@example.com",
            "password": "secret1",
            "role": "student"
        });
        let (status, json) = send(&app, json_request("POST", "/api/auth/register", None, body)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["user"]["username"], "u20230001");
        assert_eq!(json["data"]["user"]["role"], "student");
        assert!(json["data"]["user"].get("password_hash").is_none());

        let token = json["data"]["token"].as_str().unwrap().to_string();
        let req = Request::builder()
            .method("GET")
            .uri("/api/auth/me")
            .header("Authorization", format!("Bearer {}", token))
            .body(axum::body::Body::empty())
            .unwrap();
        let (status, me) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["data"]["email"], "li.wei@example.com");
    }

    /// Test Case: Admin accounts cannot be self-registered
    #[tokio::test]
    #[serial]
    async fn test_register_admin_rejected() {
        let (app, _state, _tmp) = make_test_app().await;

        let body = json!({
            "username": "root",
            "email": "root@example.com",
            "password": "secret1",
            "role": "admin"
        });
        let (status, json) = send(&app, json_request("POST", "/api/auth/register", None, body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(json["data"]["code"], "validation_error");
    }

    /// Test Case: Duplicate username or email yields 409
    #[tokio::test]
    #[serial]
    async fn test_register_duplicate_conflict() {
        let (app, state, _tmp) = make_test_app().await;
        create_user(state.db(), "taken", Role::Student).await;

        let body = json!({
            "username": "someone",
            "email": "taken@example.com",
            "password": "secret1"
        });
        let (status, json) = send(&app, json_request("POST", "/api/auth/register", None, body)).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["data"]["code"], "conflict");
    }

    /// Test Case: Short passwords and malformed emails fail validation
    #[tokio::test]
    #[serial]
    async fn test_register_validation_failure() {
        let (app, _state, _tmp) = make_test_app().await;

        let body = json!({
            "username": "u1",
            "email": "not-an-email",
            "password": "123"
        });
        let (status, json) = send(&app, json_request("POST", "/api/auth/register", None, body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = json["message"].as_str().unwrap();
        assert!(message.contains("Invalid email format"));
        assert!(message.contains("Password must be at least 6 characters"));
    }

    /// Test Case: Login works with either username or email
    #[tokio::test]
    #[serial]
    async fn test_login_by_username_or_email() {
        let (app, state, _tmp) = make_test_app().await;
        let user = create_user(state.db(), "teach", Role::Teacher).await;

        for identifier in ["teach", "teach@example.com"] {
            let body = json!({ "identifier": identifier, "password": "password123" });
            let (status, json) = send(&app, json_request("POST", "/api/auth/login", None, body)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(json["data"]["user"]["id"], user.id);
            assert_eq!(json["data"]["user"]["role"], "teacher");
            assert!(json["data"]["token"].as_str().is_some());
        }
    }

    /// Test Case: Wrong password is rejected with 401
    #[tokio::test]
    #[serial]
    async fn test_login_wrong_password() {
        let (app, state, _tmp) = make_test_app().await;
        create_user(state.db(), "stud", Role::Student).await;

        let body = json!({ "identifier": "stud", "password": "nope" });
        let (status, json) = send(&app, json_request("POST", "/api/auth/login", None, body)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["data"]["code"], "invalid_credentials");
    }

    /// Test Case: /auth/me requires a token
    #[tokio::test]
    #[serial]
    async fn test_me_requires_token() {
        let (app, _state, _tmp) = make_test_app().await;

        let (status, json) = send(&app, empty_request("GET", "/api/auth/me", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["success"], false);

        let req = Request::builder()
            .method("GET")
            .uri("/api/auth/me")
            .header("Authorization", "Bearer garbage")
            .body(axum::body::Body::empty())
            .unwrap();
        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
