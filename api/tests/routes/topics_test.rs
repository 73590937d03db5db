#[cfg(test)]
mod tests {
    use crate::helpers::{TestApp, create_user, empty_request, json_request, make_test_app, send};
    use axum::http::StatusCode;
    use db::models::{topic, user::{Model as UserModel, Role}};
    use sea_orm::EntityTrait;
    use serde_json::{Value, json};
    use serial_test::serial;

    async fn create_topic(app: &TestApp, teacher: &UserModel, title: &str, max: i32) -> Value {
        let body = json!({
            "title": title,
            "topic_type": "system_design",
            "difficulty": "hard",
            "description": "Build it",
            "max_students": max
        });
        let (status, json) = send(app, json_request("POST", "/api/topics", Some(teacher), body)).await;
        assert_eq!(status, StatusCode::CREATED, "{json}");
        json["data"].clone()
    }

    /// Test Case: Teachers publish topics; students may not
    #[tokio::test]
    #[serial]
    async fn test_create_topic_permissions() {
        let (app, state, _tmp) = make_test_app().await;
        let teacher = create_user(state.db(), "teach", Role::Teacher).await;
        let student = create_user(state.db(), "stud", Role::Student).await;

        let created = create_topic(&app, &teacher, "Distributed Caches", 2).await;
        assert_eq!(created["teacher_id"], teacher.id);
        assert_eq!(created["selected_count"], 0);

        let body = json!({ "title": "Nope", "max_students": 1 });
        let (status, _) = send(&app, json_request("POST", "/api/topics", Some(&student), body)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let body = json!({ "title": "", "max_students": 0 });
        let (status, json) = send(&app, json_request("POST", "/api/topics", Some(&teacher), body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["data"]["code"], "validation_error");
    }

    /// Test Case: Listing requires a token and accepts a trailing slash
    #[tokio::test]
    #[serial]
    async fn test_list_topics_with_filters() {
        let (app, state, _tmp) = make_test_app().await;
        let teacher = create_user(state.db(), "teach", Role::Teacher).await;
        let student = create_user(state.db(), "stud", Role::Student).await;
        create_topic(&app, &teacher, "Alpha", 1).await;
        let beta = create_topic(&app, &teacher, "Beta", 2).await;

        let (status, _) = send(&app, empty_request("GET", "/api/topics", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, json) = send(&app, empty_request("GET", "/api/topics/", Some(&student))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
        assert_eq!(json["data"][0]["teacher_name"], "teach name");
        assert_eq!(json["data"][0]["status"], "open");

        let uri = format!("/api/topics/{}/select", beta["id"]);
        let (status, _) = send(&app, empty_request("POST", &uri, Some(&student))).await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, json) = send(&app, empty_request("GET", "/api/topics?query=Bet", Some(&student))).await;
        let items = json["data"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["is_selected"], true);
        assert_eq!(items[0]["selected_count"], 1);
    }

    /// Test Case: A one-seat topic admits exactly one student
    #[tokio::test]
    #[serial]
    async fn test_select_topic_capacity() {
        let (app, state, _tmp) = make_test_app().await;
        let teacher = create_user(state.db(), "teach", Role::Teacher).await;
        let first = create_user(state.db(), "first", Role::Student).await;
        let second = create_user(state.db(), "second", Role::Student).await;
        let topic = create_topic(&app, &teacher, "Solo", 1).await;
        let uri = format!("/api/topics/{}/select", topic["id"]);

        let (status, json) = send(&app, empty_request("POST", &uri, Some(&first))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["student_id"], first.id);

        let (status, json) = send(&app, empty_request("POST", &uri, Some(&second))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["data"]["code"], "capacity_exceeded");

        let (status, json) = send(&app, empty_request("POST", &uri, Some(&first))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["data"]["code"], "already_selected");

        let stored = topic::Entity::find_by_id(topic["id"].as_i64().unwrap())
            .one(state.db())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.selected_count, 1);

        let (_, json) = send(&app, empty_request("GET", &format!("/api/topics/{}", topic["id"]), Some(&second))).await;
        assert_eq!(json["data"]["status"], "full");
    }

    /// Test Case: Only students select topics; unknown topics are 404
    #[tokio::test]
    #[serial]
    async fn test_select_topic_guards() {
        let (app, state, _tmp) = make_test_app().await;
        let teacher = create_user(state.db(), "teach", Role::Teacher).await;
        let student = create_user(state.db(), "stud", Role::Student).await;
        let topic = create_topic(&app, &teacher, "Guarded", 3).await;

        let uri = format!("/api/topics/{}/select", topic["id"]);
        let (status, _) = send(&app, empty_request("POST", &uri, Some(&teacher))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, json) = send(&app, empty_request("POST", "/api/topics/9999/select", Some(&student))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["data"]["code"], "not_found");
    }

    /// Test Case: Deselecting frees the seat; deleting an occupied topic is refused
    #[tokio::test]
    #[serial]
    async fn test_deselect_and_delete_topic() {
        let (app, state, _tmp) = make_test_app().await;
        let teacher = create_user(state.db(), "teach", Role::Teacher).await;
        let student = create_user(state.db(), "stud", Role::Student).await;
        let topic = create_topic(&app, &teacher, "Temporary", 1).await;
        let topic_uri = format!("/api/topics/{}", topic["id"]);
        let select_uri = format!("{topic_uri}/select");

        send(&app, empty_request("POST", &select_uri, Some(&student))).await;

        let (status, json) = send(&app, empty_request("DELETE", &topic_uri, Some(&teacher))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["data"]["code"], "topic_in_use");

        let (status, _) = send(&app, empty_request("DELETE", &select_uri, Some(&student))).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, empty_request("DELETE", &select_uri, Some(&student))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, empty_request("DELETE", &topic_uri, Some(&teacher))).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, empty_request("GET", &topic_uri, Some(&student))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    /// Test Case: Only the owner edits, and capacity cannot drop below current selections
    #[tokio::test]
    #[serial]
    async fn test_update_topic_rules() {
        let (app, state, _tmp) = make_test_app().await;
        let owner = create_user(state.db(), "owner", Role::Teacher).await;
        let other = create_user(state.db(), "other", Role::Teacher).await;
        let s1 = create_user(state.db(), "s1", Role::Student).await;
        let s2 = create_user(state.db(), "s2", Role::Student).await;
        let topic = create_topic(&app, &owner, "Shared", 3).await;
        let topic_uri = format!("/api/topics/{}", topic["id"]);

        for s in [&s1, &s2] {
            send(&app, empty_request("POST", &format!("{topic_uri}/select"), Some(s))).await;
        }

        let (status, _) = send(&app, json_request("PUT", &topic_uri, Some(&other), json!({ "title": "Mine" }))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, json) = send(&app, json_request("PUT", &topic_uri, Some(&owner), json!({ "max_students": 1 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["data"]["code"], "validation_error");

        let (status, json) = send(
            &app,
            json_request("PUT", &topic_uri, Some(&owner), json!({ "title": "Renamed", "max_students": 2 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["title"], "Renamed");
        assert_eq!(json["data"]["max_students"], 2);
    }

    /// Test Case: my-topics lists the selecting students
    #[tokio::test]
    #[serial]
    async fn test_my_topics_lists_students() {
        let (app, state, _tmp) = make_test_app().await;
        let teacher = create_user(state.db(), "teach", Role::Teacher).await;
        let student = create_user(state.db(), "stud", Role::Student).await;
        let topic = create_topic(&app, &teacher, "Mine", 2).await;
        send(&app, empty_request("POST", &format!("/api/topics/{}/select", topic["id"]), Some(&student))).await;

        let (status, json) = send(&app, empty_request("GET", "/api/topics/my-topics", Some(&teacher))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"][0]["title"], "Mine");
        assert_eq!(json["data"][0]["students"][0]["username"], "stud");

        let (status, _) = send(&app, empty_request("GET", "/api/topics/my-topics", Some(&student))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
