#[cfg(test)]
mod tests {
    use crate::helpers::{create_user, empty_request, json_request, make_test_app, send};
    use axum::http::StatusCode;
    use db::models::user::Role;
    use serde_json::json;
    use serial_test::serial;

    /// Test Case: Each role gets its own tagged dashboard
    #[tokio::test]
    #[serial]
    async fn test_dashboard_per_role() {
        let (app, state, _tmp) = make_test_app().await;
        let teacher = create_user(state.db(), "teach", Role::Teacher).await;
        let student = create_user(state.db(), "stud", Role::Student).await;
        let admin = create_user(state.db(), "admin", Role::Admin).await;

        let (_, topic) = send(
            &app,
            json_request("POST", "/api/topics", Some(&teacher), json!({ "title": "Dash", "max_students": 2 })),
        )
        .await;
        send(&app, empty_request("POST", &format!("/api/topics/{}/select", topic["data"]["id"]), Some(&student))).await;

        let (status, json) = send(&app, empty_request("GET", "/api/me/dashboard", Some(&student))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["role"], "student");
        assert_eq!(json["data"]["topic"]["title"], "Dash");
        assert_eq!(json["data"]["progress"]["completed_stages"], 1);

        let (_, json) = send(&app, empty_request("GET", "/api/me/dashboard", Some(&teacher))).await;
        assert_eq!(json["data"]["role"], "teacher");
        assert_eq!(json["data"]["topic_count"], 1);
        assert_eq!(json["data"]["student_count"], 1);

        let (_, json) = send(&app, empty_request("GET", "/api/me/dashboard", Some(&admin))).await;
        assert_eq!(json["data"]["role"], "admin");
        assert_eq!(json["data"]["users"]["teachers"], 1);
        assert_eq!(json["data"]["total_selections"], 1);

        let (status, _) = send(&app, empty_request("GET", "/api/me/dashboard", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    /// Test Case: Teachers list the students holding their topics
    #[tokio::test]
    #[serial]
    async fn test_my_students() {
        let (app, state, _tmp) = make_test_app().await;
        let teacher = create_user(state.db(), "teach", Role::Teacher).await;
        let student = create_user(state.db(), "stud", Role::Student).await;

        let (_, topic) = send(
            &app,
            json_request("POST", "/api/topics", Some(&teacher), json!({ "title": "Supervised", "max_students": 1 })),
        )
        .await;
        send(&app, empty_request("POST", &format!("/api/topics/{}/select", topic["data"]["id"]), Some(&student))).await;

        let (status, json) = send(&app, empty_request("GET", "/api/me/students", Some(&teacher))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"][0]["username"], "stud");
        assert_eq!(json["data"][0]["topic_title"], "Supervised");
        assert_eq!(json["data"][0]["progress"]["completion_percent"], 16);

        let (status, _) = send(&app, empty_request("GET", "/api/me/students", Some(&student))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
