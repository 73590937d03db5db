#[cfg(test)]
mod tests {
    use crate::helpers::{
        TestApp, create_user, empty_request, json_request, make_test_app, multipart_body,
        multipart_request, send,
    };
    use axum::http::StatusCode;
    use db::models::{review, user::{Model as UserModel, Role}};
    use sea_orm::{EntityTrait, PaginatorTrait};
    use serde_json::{Value, json};
    use serial_test::serial;

    struct TestData {
        teacher: UserModel,
        student: UserModel,
        outsider: UserModel,
        admin: UserModel,
    }

    /// A teacher with one topic selected by `student`; `outsider` supervises nobody.
    async fn setup(app: &TestApp, db: &sea_orm::DatabaseConnection) -> TestData {
        let teacher = create_user(db, "teach", Role::Teacher).await;
        let student = create_user(db, "stud", Role::Student).await;
        let outsider = create_user(db, "outsider", Role::Teacher).await;
        let admin = create_user(db, "admin", Role::Admin).await;

        let (_, topic) = send(
            app,
            json_request("POST", "/api/topics", Some(&teacher), json!({ "title": "Caching", "max_students": 2 })),
        )
        .await;
        let (status, _) = send(
            app,
            empty_request("POST", &format!("/api/topics/{}/select", topic["data"]["id"]), Some(&student)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        TestData { teacher, student, outsider, admin }
    }

    async fn upload(app: &TestApp, path: &str, student: &UserModel, fields: &[(&str, &str)]) -> (StatusCode, Value) {
        let (boundary, body) = multipart_body(fields, Some(("doc.pdf", b"%PDF-1.4 test".as_slice())));
        send(app, multipart_request(path, student, &boundary, body)).await
    }

    /// Test Case: Proposal upload stores the file and starts pending review
    #[tokio::test]
    #[serial]
    async fn test_submit_proposal_success() {
        let (app, state, tmp) = make_test_app().await;
        let data = setup(&app, state.db()).await;

        let (status, json) = upload(&app, "/api/proposal/submit", &data.student, &[("title", "Adaptive Caching")]).await;

        assert_eq!(status, StatusCode::CREATED, "{json}");
        assert_eq!(json["data"]["stage"], "proposal");
        assert_eq!(json["data"]["status"], "pending_review");
        assert_eq!(json["data"]["original_filename"], "doc.pdf");

        let reference = json["data"]["file_reference"].as_str().unwrap();
        let stored = tmp.path().join(reference);
        assert_eq!(std::fs::read(stored).unwrap(), b"%PDF-1.4 test");
    }

    /// Test Case: Missing title or file is a validation error
    #[tokio::test]
    #[serial]
    async fn test_submit_requires_title_and_file() {
        let (app, state, _tmp) = make_test_app().await;
        let data = setup(&app, state.db()).await;

        let (status, json) = upload(&app, "/api/proposal/submit", &data.student, &[]).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Title is required");

        let (boundary, body) = multipart_body(&[("title", "No file")], None);
        let (status, json) = send(&app, multipart_request("/api/proposal/submit", &data.student, &boundary, body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["data"]["code"], "validation_error");
    }

    /// Test Case: Thesis uploads carry their stage; early stages are refused
    #[tokio::test]
    #[serial]
    async fn test_submit_thesis_stage_handling() {
        let (app, state, _tmp) = make_test_app().await;
        let data = setup(&app, state.db()).await;

        let (status, _) = upload(&app, "/api/thesis/submit", &data.student, &[("title", "Draft")]).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) = upload(
            &app,
            "/api/thesis/submit",
            &data.student,
            &[("title", "Draft"), ("stage", "first_review")],
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["stage"], "first_review");

        let (status, json) = upload(
            &app,
            "/api/thesis/submit",
            &data.student,
            &[("title", "Second"), ("stage", "second_review")],
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["stage"], "second_review");

        let (status, _) = upload(
            &app,
            "/api/thesis/submit",
            &data.student,
            &[("title", "Wrong"), ("stage", "proposal")],
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) = send(&app, empty_request("GET", "/api/thesis/my-thesis", Some(&data.student))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
        assert_eq!(json["data"][0]["title"], "Second");
    }

    /// Test Case: Teachers cannot upload
    #[tokio::test]
    #[serial]
    async fn test_submit_forbidden_for_teacher() {
        let (app, state, _tmp) = make_test_app().await;
        let data = setup(&app, state.db()).await;

        let (status, _) = upload(&app, "/api/midterm/submit", &data.teacher, &[("title", "Mine")]).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    /// Test Case: A score outside 0..=100 is rejected and nothing is stored
    #[tokio::test]
    #[serial]
    async fn test_review_score_out_of_range() {
        let (app, state, _tmp) = make_test_app().await;
        let data = setup(&app, state.db()).await;
        let (_, submitted) = upload(&app, "/api/proposal/submit", &data.student, &[("title", "P")]).await;
        let uri = format!("/api/proposal/{}/review", submitted["data"]["id"]);

        let body = json!({ "score": 150, "feedback": "Great", "result": "pass" });
        let (status, json) = send(&app, json_request("POST", &uri, Some(&data.teacher), body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["data"]["code"], "validation_error");
        assert_eq!(review::Entity::find().count(state.db()).await.unwrap(), 0);
    }

    /// Test Case: Supervisor review passes the stage and shows in history
    #[tokio::test]
    #[serial]
    async fn test_review_by_supervisor() {
        let (app, state, _tmp) = make_test_app().await;
        let data = setup(&app, state.db()).await;
        let (_, submitted) = upload(&app, "/api/proposal/submit", &data.student, &[("title", "P")]).await;
        let id = submitted["data"]["id"].clone();

        let body = json!({ "score": 85, "feedback": "Good", "result": "pass" });
        let (status, json) = send(
            &app,
            json_request("POST", &format!("/api/proposal/{id}/review"), Some(&data.teacher), body),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["stage"], "proposal");
        assert_eq!(json["data"]["reviewer_id"], data.teacher.id);

        let (status, json) = send(&app, empty_request("GET", &format!("/api/proposal/{id}"), Some(&data.student))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "passed");
        assert_eq!(json["data"]["reviews"][0]["score"], 85);
        assert_eq!(json["data"]["reviews"][0]["reviewer_name"], "teach name");
    }

    /// Test Case: Unknown result values and blank feedback are rejected
    #[tokio::test]
    #[serial]
    async fn test_review_invalid_result() {
        let (app, state, _tmp) = make_test_app().await;
        let data = setup(&app, state.db()).await;
        let (_, submitted) = upload(&app, "/api/midterm/submit", &data.student, &[("title", "M")]).await;
        let uri = format!("/api/midterm/{}/review", submitted["data"]["id"]);

        let body = json!({ "score": 70, "feedback": "Ok", "result": "maybe" });
        let (status, _) = send(&app, json_request("POST", &uri, Some(&data.teacher), body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let body = json!({ "score": 70, "feedback": "", "result": "revise" });
        let (status, _) = send(&app, json_request("POST", &uri, Some(&data.teacher), body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    /// Test Case: Non-supervising teachers cannot review or view; admins can
    #[tokio::test]
    #[serial]
    async fn test_review_and_view_permissions() {
        let (app, state, _tmp) = make_test_app().await;
        let data = setup(&app, state.db()).await;
        let (_, submitted) = upload(&app, "/api/proposal/submit", &data.student, &[("title", "P")]).await;
        let id = submitted["data"]["id"].clone();
        let body = json!({ "score": 60, "feedback": "Needs work", "result": "revise" });

        let (status, json) = send(
            &app,
            json_request("POST", &format!("/api/proposal/{id}/review"), Some(&data.outsider), body.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["data"]["code"], "unauthorized");

        let (status, _) = send(&app, empty_request("GET", &format!("/api/proposal/{id}"), Some(&data.outsider))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(
            &app,
            json_request("POST", &format!("/api/proposal/{id}/review"), Some(&data.admin), body),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, json) = send(&app, empty_request("GET", &format!("/api/proposal/{id}"), Some(&data.teacher))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "needs_revision");
    }

    /// Test Case: A midterm is not reachable through the proposal routes
    #[tokio::test]
    #[serial]
    async fn test_kind_mismatch_is_not_found() {
        let (app, state, _tmp) = make_test_app().await;
        let data = setup(&app, state.db()).await;
        let (_, submitted) = upload(&app, "/api/midterm/submit", &data.student, &[("title", "M")]).await;

        let (status, _) = send(
            &app,
            empty_request("GET", &format!("/api/proposal/{}", submitted["data"]["id"]), Some(&data.student)),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    /// Test Case: Full listings are scoped by supervision and closed to students
    #[tokio::test]
    #[serial]
    async fn test_list_all_proposals_scoping() {
        let (app, state, _tmp) = make_test_app().await;
        let data = setup(&app, state.db()).await;
        upload(&app, "/api/proposal/submit", &data.student, &[("title", "P1")]).await;
        upload(&app, "/api/proposal/submit", &data.student, &[("title", "P2")]).await;

        let (status, json) = send(&app, empty_request("GET", "/api/proposal/all-proposals", Some(&data.teacher))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
        assert_eq!(json["data"][0]["student_username"], "stud");

        let (_, json) = send(&app, empty_request("GET", "/api/proposal/all-proposals", Some(&data.outsider))).await;
        assert!(json["data"].as_array().unwrap().is_empty());

        let (_, json) = send(&app, empty_request("GET", "/api/proposal/all-proposals?query=nobody", Some(&data.admin))).await;
        assert!(json["data"].as_array().unwrap().is_empty());

        let (status, _) = send(&app, empty_request("GET", "/api/proposal/all-proposals", Some(&data.student))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, json) = send(&app, empty_request("GET", "/api/proposal/my-proposals", Some(&data.student))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"][0]["title"], "P2");
    }
}
