#[cfg(test)]
mod tests {
    use crate::helpers::{create_user, empty_request, json_request, make_test_app, send};
    use axum::http::StatusCode;
    use db::models::user::Role;
    use serde_json::json;
    use serial_test::serial;

    /// Test Case: Admin schedules a slot; participants see it under /me/defense
    #[tokio::test]
    #[serial]
    async fn test_create_slot_and_view_as_participant() {
        let (app, state, _tmp) = make_test_app().await;
        let admin = create_user(state.db(), "admin", Role::Admin).await;
        let chair = create_user(state.db(), "chair", Role::Teacher).await;
        let member = create_user(state.db(), "member", Role::Teacher).await;
        let student = create_user(state.db(), "stud", Role::Student).await;
        let bystander = create_user(state.db(), "bystander", Role::Student).await;

        let body = json!({
            "date": "2025-06-12",
            "time_range": "09:00-11:00",
            "location": "Room 301",
            "group_name": "Group A",
            "committee": [
                { "member_id": chair.id, "role": "chair" },
                { "member_id": member.id }
            ],
            "students": [ { "student_id": student.id, "scheduled_time": "09:00" } ]
        });
        let (status, json) = send(&app, json_request("POST", "/api/defense", Some(&admin), body)).await;
        assert_eq!(status, StatusCode::CREATED, "{json}");
        assert_eq!(json["data"]["location"], "Room 301");
        assert_eq!(json["data"]["committee"][0]["role"], "chair");
        assert_eq!(json["data"]["committee"][1]["role"], "member");
        assert_eq!(json["data"]["students"][0]["username"], "stud");

        let (status, json) = send(&app, empty_request("GET", "/api/me/defense", Some(&student))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"].as_array().unwrap().len(), 1);

        let (_, json) = send(&app, empty_request("GET", "/api/me/defense", Some(&member))).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);

        let (_, json) = send(&app, empty_request("GET", "/api/me/defense", Some(&bystander))).await;
        assert!(json["data"].as_array().unwrap().is_empty());

        let (status, _) = send(&app, empty_request("GET", "/api/me/defense", Some(&admin))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    /// Test Case: Defense management is admin-only
    #[tokio::test]
    #[serial]
    async fn test_defense_routes_are_admin_only() {
        let (app, state, _tmp) = make_test_app().await;
        let teacher = create_user(state.db(), "teach", Role::Teacher).await;

        let (status, _) = send(&app, empty_request("GET", "/api/defense", Some(&teacher))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, empty_request("GET", "/api/defense", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    /// Test Case: Committee members must be teachers, students must be students
    #[tokio::test]
    #[serial]
    async fn test_create_slot_role_validation() {
        let (app, state, _tmp) = make_test_app().await;
        let admin = create_user(state.db(), "admin", Role::Admin).await;
        let student = create_user(state.db(), "stud", Role::Student).await;

        let body = json!({
            "date": "2025-06-12",
            "time_range": "09:00-11:00",
            "location": "Room 301",
            "committee": [ { "member_id": student.id } ]
        });
        let (status, json) = send(&app, json_request("POST", "/api/defense", Some(&admin), body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["data"]["code"], "validation_error");

        let (_, json) = send(&app, empty_request("GET", "/api/defense", Some(&admin))).await;
        assert!(json["data"].as_array().unwrap().is_empty());
    }

    /// Test Case: Committee and student lists are replaced wholesale
    #[tokio::test]
    #[serial]
    async fn test_replace_committee_and_students() {
        let (app, state, _tmp) = make_test_app().await;
        let admin = create_user(state.db(), "admin", Role::Admin).await;
        let t1 = create_user(state.db(), "t1", Role::Teacher).await;
        let t2 = create_user(state.db(), "t2", Role::Teacher).await;
        let s1 = create_user(state.db(), "s1", Role::Student).await;
        let s2 = create_user(state.db(), "s2", Role::Student).await;

        let body = json!({
            "date": "2025-06-13",
            "time_range": "14:00-16:00",
            "location": "Lab 2",
            "committee": [ { "member_id": t1.id, "role": "chair" } ],
            "students": [ { "student_id": s1.id } ]
        });
        let (_, created) = send(&app, json_request("POST", "/api/defense", Some(&admin), body)).await;
        let slot_uri = format!("/api/defense/{}", created["data"]["id"]);

        let body = json!({ "committee": [ { "member_id": t2.id, "role": "secretary" } ] });
        let (status, json) = send(&app, json_request("PUT", &format!("{slot_uri}/committee"), Some(&admin), body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["committee"].as_array().unwrap().len(), 1);
        assert_eq!(json["data"]["committee"][0]["member_id"], t2.id);

        let body = json!({ "students": [ { "student_id": s2.id }, { "student_id": s1.id } ] });
        let (status, json) = send(&app, json_request("PUT", &format!("{slot_uri}/students"), Some(&admin), body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["students"][0]["student_id"], s2.id);
        assert_eq!(json["data"]["students"][0]["order_index"], 1);
        assert_eq!(json["data"]["students"][1]["student_id"], s1.id);
        assert_eq!(json["data"]["students"][1]["order_index"], 2);

        let (status, json) = send(&app, empty_request("GET", &slot_uri, Some(&admin))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["students"].as_array().unwrap().len(), 2);

        let (status, _) = send(&app, empty_request("GET", "/api/defense/9999", Some(&admin))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
