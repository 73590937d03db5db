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

    /// Test Case: Aggregates reflect topics, selections and reviews
    #[tokio::test]
    #[serial]
    async fn test_statistics_as_admin() {
        let (app, state, _tmp) = make_test_app().await;
        let admin = create_user(state.db(), "admin", Role::Admin).await;
        let teacher = create_user(state.db(), "teach", Role::Teacher).await;
        let student = create_user(state.db(), "stud", Role::Student).await;

        let (_, topic) = send(
            &app,
            json_request(
                "POST",
                "/api/topics",
                Some(&teacher),
                json!({ "title": "Stats", "topic_type": "system_design", "max_students": 1 }),
            ),
        )
        .await;
        send(&app, empty_request("POST", &format!("/api/topics/{}/select", topic["data"]["id"]), Some(&student))).await;

        let (boundary, body) = multipart_body(&[("title", "P")], Some(("p.pdf", b"p".as_slice())));
        let (_, proposal) = send(&app, multipart_request("/api/proposal/submit", &student, &boundary, body)).await;
        send(
            &app,
            json_request(
                "POST",
                &format!("/api/proposal/{}/review", proposal["data"]["id"]),
                Some(&teacher),
                json!({ "score": 92, "feedback": "Excellent", "result": "pass" }),
            ),
        )
        .await;

        let (status, json) = send(&app, empty_request("GET", "/api/statistics", Some(&admin))).await;
        assert_eq!(status, StatusCode::OK);
        let data = &json["data"];
        assert_eq!(data["users"]["students"], 1);
        assert_eq!(data["users"]["teachers"], 1);
        assert_eq!(data["users"]["admins"], 1);
        assert_eq!(data["total_topics"], 1);
        assert_eq!(data["total_selections"], 1);

        let system_design = data["topics_by_type"]
            .as_array()
            .unwrap()
            .iter()
            .find(|t| t["topic_type"] == "system_design")
            .unwrap();
        assert_eq!(system_design["count"], 1);

        assert_eq!(data["stages"][0]["stage"], "proposal");
        assert_eq!(data["stages"][0]["submitted"], 1);
        assert_eq!(data["stages"][0]["passed"], 1);
        assert_eq!(data["average_passing_score"], 92.0);
        assert_eq!(data["score_distribution"][0]["range"], "90-100");
        assert_eq!(data["score_distribution"][0]["count"], 1);
    }

    /// Test Case: Statistics are admin-only
    #[tokio::test]
    #[serial]
    async fn test_statistics_forbidden_for_teacher() {
        let (app, state, _tmp) = make_test_app().await;
        let teacher = create_user(state.db(), "teach", Role::Teacher).await;

        let (status, _) = send(&app, empty_request("GET", "/api/statistics", Some(&teacher))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
