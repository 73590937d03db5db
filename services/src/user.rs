use crate::{ServiceError, ServiceResult};
use db::models::user::{self, Role};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub query: Option<String>,
    pub page: u64,
    pub per_page: u64,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct UserPage {
    pub users: Vec<user::Model>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

async fn insert(db: &DatabaseConnection, params: CreateUser) -> ServiceResult<user::Model> {
    let username = params.username.trim();
    let email = params.email.trim();
    let name = params.name.trim();
    if username.is_empty() || email.is_empty() || name.is_empty() {
        return Err(ServiceError::validation(
            "Username, name and email are required",
        ));
    }

    if user::Model::username_or_email_taken(db, username, email).await? {
        return Err(ServiceError::Conflict(
            "A user with this username or email already exists".into(),
        ));
    }

    let created = user::Model::create(db, username, name, email, &params.password, params.role)
        .await
        .map_err(|e| match e.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => ServiceError::Conflict(
                "A user with this username or email already exists".into(),
            ),
            _ => ServiceError::Database(e),
        })?;

    tracing::info!(user_id = created.id, role = %created.role, "User created");
    Ok(created)
}

/// Public sign-up. Only student and teacher accounts can be self-registered.
pub async fn register(db: &DatabaseConnection, params: CreateUser) -> ServiceResult<user::Model> {
    if params.role == Role::Admin {
        return Err(ServiceError::validation(
            "Only student and teacher accounts can be registered",
        ));
    }
    insert(db, params).await
}

/// Admin-side creation; any role.
pub async fn create_user(db: &DatabaseConnection, params: CreateUser) -> ServiceResult<user::Model> {
    insert(db, params).await
}

/// Checks credentials. `identifier` may be the username or the email.
/// Returns `None` on any mismatch so callers cannot tell which part failed.
pub async fn authenticate(
    db: &DatabaseConnection,
    identifier: &str,
    password: &str,
) -> ServiceResult<Option<user::Model>> {
    let Some(found) = user::Model::find_by_login(db, identifier.trim()).await? else {
        return Ok(None);
    };
    if found.verify_password(password) {
        Ok(Some(found))
    } else {
        tracing::warn!(user_id = found.id, "Failed login attempt");
        Ok(None)
    }
}

pub async fn get_user(db: &DatabaseConnection, user_id: i64) -> ServiceResult<user::Model> {
    user::Model::get_by_id(db, user_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("User not found"))
}

pub async fn list_users(db: &DatabaseConnection, filter: UserFilter) -> ServiceResult<UserPage> {
    let page = filter.page.max(1);
    let per_page = filter.per_page.clamp(1, 100);

    let mut query = user::Entity::find().order_by_asc(user::Column::Id);
    if let Some(role) = filter.role {
        query = query.filter(user::Column::Role.eq(role));
    }
    if let Some(q) = filter.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        query = query.filter(
            Condition::any()
                .add(user::Column::Username.contains(q))
                .add(user::Column::Name.contains(q))
                .add(user::Column::Email.contains(q)),
        );
    }

    let paginator = query.paginate(db, per_page);
    let total = paginator.num_items().await?;
    let users = paginator.fetch_page(page - 1).await?;

    Ok(UserPage {
        users,
        page,
        per_page,
        total,
    })
}
