//! Database models for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use finboard_core::users::{NewUser, User, UserCredentials};

#[derive(Queryable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub user_id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUserDB {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
}

impl From<UserDB> for UserCredentials {
    fn from(db: UserDB) -> Self {
        Self {
            user: User {
                user_id: db.user_id,
                username: db.username,
                email: db.email,
                full_name: db.full_name,
                is_active: db.is_active,
                created_at: db.created_at,
            },
            password_hash: db.password_hash,
        }
    }
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        UserCredentials::from(db).user
    }
}

impl From<NewUser> for NewUserDB {
    fn from(domain: NewUser) -> Self {
        Self {
            username: domain.username,
            email: domain.email,
            password_hash: domain.password_hash,
            full_name: domain.full_name,
        }
    }
}
