#[cfg(test)]
mod tests {
    use crate::helpers::{
        create_user, empty_request, json_request, make_test_app, multipart_body,
        multipart_request, send,
    };
    use axum::http::StatusCode;
    use db::models::user::Role;
    use serde_json::json;
    use serial_test::serial;

    /// Test Case: Progress follows selection, uploads and reviews end to end
    #[tokio::test]
    #[serial]
    async fn test_progress_workflow() {
        let (app, state, _tmp) = make_test_app().await;
        let teacher = create_user(state.db(), "teach", Role::Teacher).await;
        let student = create_user(state.db(), "stud", Role::Student).await;

        let (status, json) = send(&app, empty_request("GET", "/api/progress", Some(&student))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["completed_stages"], 0);
        assert_eq!(json["data"]["total_stages"], 6);
        assert_eq!(json["data"]["stages"]["topic_selection"]["status"], "pending");

        let (_, topic) = send(
            &app,
            json_request("POST", "/api/topics", Some(&teacher), json!({ "title": "T", "max_students": 1 })),
        )
        .await;
        send(&app, empty_request("POST", &format!("/api/topics/{}/select", topic["data"]["id"]), Some(&student))).await;

        let (boundary, body) = multipart_body(&[("title", "Proposal")], Some(("p.pdf", b"p".as_slice())));
        let (_, proposal) = send(&app, multipart_request("/api/proposal/submit", &student, &boundary, body)).await;
        let (boundary, body) = multipart_body(&[("title", "Midterm")], Some(("m.pdf", b"m".as_slice())));
        send(&app, multipart_request("/api/midterm/submit", &student, &boundary, body)).await;

        let review = json!({ "score": 85, "feedback": "Good", "result": "pass" });
        let (status, _) = send(
            &app,
            json_request("POST", &format!("/api/proposal/{}/review", proposal["data"]["id"]), Some(&teacher), review),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, json) = send(&app, empty_request("GET", &format!("/api/progress/{}", student.id), Some(&teacher))).await;
        assert_eq!(status, StatusCode::OK);
        let stages = &json["data"]["stages"];
        assert_eq!(stages["topic_selection"]["status"], "completed");
        assert_eq!(stages["proposal"]["status"], "completed");
        assert_eq!(stages["proposal"]["score"], 85);
        assert_eq!(stages["midterm"]["status"], "in-progress");
        assert_eq!(stages["midterm"]["note"], "under review");
        assert_eq!(stages["first_review"]["status"], "pending");
        assert_eq!(json["data"]["completed_stages"], 2);
        assert_eq!(json["data"]["completion_percent"], 33);

        let (_, own) = send(&app, empty_request("GET", "/api/progress", Some(&student))).await;
        assert_eq!(own["data"], json["data"]);
    }

    /// Test Case: Only the supervising teacher (or an admin) sees a student's progress
    #[tokio::test]
    #[serial]
    async fn test_progress_access_rules() {
        let (app, state, _tmp) = make_test_app().await;
        let outsider = create_user(state.db(), "outsider", Role::Teacher).await;
        let admin = create_user(state.db(), "admin", Role::Admin).await;
        let student = create_user(state.db(), "stud", Role::Student).await;
        let other_student = create_user(state.db(), "other", Role::Student).await;
        let uri = format!("/api/progress/{}", student.id);

        let (status, json) = send(&app, empty_request("GET", &uri, Some(&outsider))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["data"]["code"], "unauthorized");

        let (status, _) = send(&app, empty_request("GET", &uri, Some(&other_student))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, empty_request("GET", &uri, Some(&admin))).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, empty_request("GET", &format!("/api/progress/{}", outsider.id), Some(&admin))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, empty_request("GET", "/api/progress", Some(&admin))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
