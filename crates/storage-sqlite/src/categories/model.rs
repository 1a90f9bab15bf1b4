//! Database models for categories.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use finboard_core::categories::{Category, NewCategory};
use finboard_core::Error;

/// Database model for categories
#[derive(Queryable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CategoryDB {
    pub category_id: i32,
    pub name: String,
    pub category_type: String,
    pub created_at: NaiveDateTime,
}

/// Database model for creating a new category
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategoryDB {
    pub name: String,
    pub category_type: String,
}

impl TryFrom<CategoryDB> for Category {
    type Error = Error;

    fn try_from(db: CategoryDB) -> Result<Self, Self::Error> {
        Ok(Self {
            category_id: db.category_id,
            name: db.name,
            category_type: db.category_type.parse()?,
            created_at: db.created_at,
        })
    }
}

impl From<NewCategory> for NewCategoryDB {
    fn from(domain: NewCategory) -> Self {
        Self {
            name: domain.name,
            category_type: domain.category_type.as_str().to_string(),
        }
    }
}
