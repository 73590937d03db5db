use crate::seed::Seeder;
use db::models::user::Role;
use fake::{
    Fake,
    faker::{internet::en::SafeEmail, name::en::Name},
};
use sea_orm::DatabaseConnection;
use services::{
    ServiceResult,
    user::{self as user_service, CreateUser},
};
use std::pin::Pin;

pub struct UserSeeder;

fn account(username: &str, name: &str, email: &str, role: Role) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        password: "password123".to_string(),
        role,
    }
}

impl Seeder for UserSeeder {
    fn seed<'a>(
        &'a self,
        db: &'a DatabaseConnection,
    ) -> Pin<Box<dyn Future<Output = ServiceResult<()>> + Send + 'a>> {
        Box::pin(async move {
            // Fixed accounts; re-running the seeder leaves them untouched.
            let fixed = [
                account("admin", "Portal Admin", "admin@example.com", Role::Admin),
                account("teacher", "Dr. Chen", "teacher@example.com", Role::Teacher),
                account("teacher2", "Prof. Okafor", "teacher2@example.com", Role::Teacher),
                account("student", "Li Wei", "student@example.com", Role::Student),
            ];
            for params in fixed {
                let _ = user_service::create_user(db, params).await;
            }

            for _ in 0..12 {
                let username = format!("u{:08}", fastrand::u32(..100_000_000));
                let name: String = Name().fake();
                let email: String = SafeEmail().fake();
                let _ = user_service::create_user(
                    db,
                    account(&username, &name, &email, Role::Student),
                )
                .await;
            }

            Ok(())
        })
    }
}
