#[cfg(test)]
mod tests {
    use crate::helpers::{create_user, empty_request, json_request, make_test_app, send};
    use axum::http::StatusCode;
    use db::models::user::Role;
    use serde_json::json;
    use serial_test::serial;

    /// Test Case: Admin creates accounts of any role
    #[tokio::test]
    #[serial]
    async fn test_create_user_as_admin() {
        let (app, state, _tmp) = make_test_app().await;
        let admin = create_user(state.db(), "admin", Role::Admin).await;

        let body = json!({
            "username": "second_admin",
            "name": "Second Admin",
            "email": "second@example.com",
            "password": "secret1",
            "role": "admin"
        });
        let (status, json) = send(&app, json_request("POST", "/api/users", Some(&admin), body.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["role"], "admin");

        let (status, _) = send(&app, json_request("POST", "/api/users", Some(&admin), body)).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    /// Test Case: Non-admins cannot manage users
    #[tokio::test]
    #[serial]
    async fn test_users_forbidden_for_non_admin() {
        let (app, state, _tmp) = make_test_app().await;
        let teacher = create_user(state.db(), "teach", Role::Teacher).await;

        let (status, json) = send(&app, empty_request("GET", "/api/users", Some(&teacher))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["message"], "Admin access required");
    }

    /// Test Case: Listing filters by role and pages
    #[tokio::test]
    #[serial]
    async fn test_list_users_filter_and_paging() {
        let (app, state, _tmp) = make_test_app().await;
        let admin = create_user(state.db(), "admin", Role::Admin).await;
        for i in 0..3 {
            create_user(state.db(), &format!("s{i}"), Role::Student).await;
        }
        create_user(state.db(), "t0", Role::Teacher).await;

        let (status, json) = send(
            &app,
            empty_request("GET", "/api/users?role=student&page=2&per_page=2", Some(&admin)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["total"], 3);
        assert_eq!(json["data"]["page"], 2);
        assert_eq!(json["data"]["users"].as_array().unwrap().len(), 1);
        assert_eq!(json["data"]["users"][0]["username"], "s2");

        let (status, _) = send(&app, empty_request("GET", "/api/users?per_page=500", Some(&admin))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    /// Test Case: Single user lookup
    #[tokio::test]
    #[serial]
    async fn test_get_user() {
        let (app, state, _tmp) = make_test_app().await;
        let admin = create_user(state.db(), "admin", Role::Admin).await;
        let student = create_user(state.db(), "stud", Role::Student).await;

        let (status, json) = send(&app, empty_request("GET", &format!("/api/users/{}", student.id), Some(&admin))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["username"], "stud");
        assert!(json["data"].get("password_hash").is_none());

        let (status, _) = send(&app, empty_request("GET", "/api/users/9999", Some(&admin))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
