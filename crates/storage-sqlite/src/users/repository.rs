use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use finboard_core::users::{NewUser, User, UserCredentials, UserRepositoryTrait};
use finboard_core::Result;

use super::model::{NewUserDB, UserDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::users;

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        UserRepository { pool, writer }
    }

    fn find_row(&self, username: &str) -> Result<Option<UserDB>> {
        let mut conn = get_connection(&self.pool)?;
        users::table
            .filter(users::username.eq(username))
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self.find_row(username)?.map(User::from))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(users::table
            .filter(users::email.eq(email))
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?
            .map(User::from))
    }

    fn find_credentials(&self, username: &str) -> Result<Option<UserCredentials>> {
        Ok(self.find_row(username)?.map(UserCredentials::from))
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        let row: NewUserDB = new_user.into();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                Ok(diesel::insert_into(users::table)
                    .values(&row)
                    .returning(UserDB::as_returning())
                    .get_result::<UserDB>(conn)
                    .into_core()?
                    .into())
            })
            .await
    }
}
