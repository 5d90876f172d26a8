//! Database model for users.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use planmore_core::users::User;

use crate::convert::parse_datetime_tolerant;

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub created_at: String,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            created_at: parse_datetime_tolerant(&db.created_at, "created_at"),
            id: db.id,
            email: db.email,
            name: db.name,
        }
    }
}
