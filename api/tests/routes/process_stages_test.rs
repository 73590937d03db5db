#[cfg(test)]
mod tests {
    use crate::helpers::{create_user, empty_request, json_request, make_test_app, send};
    use axum::http::StatusCode;
    use db::models::user::Role;
    use serde_json::json;
    use serial_test::serial;

    /// Test Case: Admin creates and advances stages; everyone reads them in date order
    #[tokio::test]
    #[serial]
    async fn test_process_stage_lifecycle() {
        let (app, state, _tmp) = make_test_app().await;
        let admin = create_user(state.db(), "admin", Role::Admin).await;
        let student = create_user(state.db(), "stud", Role::Student).await;

        let later = json!({ "name": "Midterm check", "start_date": "2025-04-01", "end_date": "2025-04-20" });
        let (status, json) = send(&app, json_request("POST", "/api/process-stages", Some(&admin), later)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["status"], "pending");
        let midterm_id = json["data"]["id"].clone();

        let earlier = json!({
            "name": "Topic selection",
            "start_date": "2025-02-20",
            "end_date": "2025-03-10",
            "status": "completed"
        });
        send(&app, json_request("POST", "/api/process-stages", Some(&admin), earlier)).await;

        let (status, json) = send(
            &app,
            json_request("PUT", &format!("/api/process-stages/{midterm_id}"), Some(&admin), json!({ "status": "in_progress" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "in_progress");

        let (status, json) = send(&app, empty_request("GET", "/api/process-stages", Some(&student))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"][0]["name"], "Topic selection");
        assert_eq!(json["data"][1]["status"], "in_progress");
    }

    /// Test Case: Dates out of order, non-admin writes and unknown ids are refused
    #[tokio::test]
    #[serial]
    async fn test_process_stage_rejections() {
        let (app, state, _tmp) = make_test_app().await;
        let admin = create_user(state.db(), "admin", Role::Admin).await;
        let teacher = create_user(state.db(), "teach", Role::Teacher).await;

        let backwards = json!({ "name": "Oops", "start_date": "2025-05-01", "end_date": "2025-04-01" });
        let (status, _) = send(&app, json_request("POST", "/api/process-stages", Some(&admin), backwards)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let ok = json!({ "name": "Fine", "start_date": "2025-05-01", "end_date": "2025-05-02" });
        let (status, _) = send(&app, json_request("POST", "/api/process-stages", Some(&teacher), ok)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(
            &app,
            json_request("PUT", "/api/process-stages/9999", Some(&admin), json!({ "status": "completed" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
