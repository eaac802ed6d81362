use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::Serialize;

use crate::author::Author;
use crate::error::AppError;
use crate::soft_delete::{Lifecycle, SoftDelete};

/// A published piece of work. Like and comment totals are not stored here,
/// see [`crate::work_stats`].
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "works")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub file_url: String,
    pub thumbnail_url: Option<String>,
    pub code_shared: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub code_content: Option<String>,
    pub views: i32,
    pub user_id: Option<i32>,
    pub is_guest: bool,
    pub guest_nickname: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    User,
    #[sea_orm(has_many = "super::work_tag::Entity")]
    WorkTag,
    #[sea_orm(has_many = "super::like::Entity")]
    Like,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::work_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkTag.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::work_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::work_tag::Relation::Work.def().rev())
    }
}

impl Related<super::like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Like.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        let now = Utc::now();
        Self {
            code_shared: Set(false),
            views: Set(0),
            is_guest: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..ActiveModelTrait::default()
        }
    }
}

impl SoftDelete for Entity {
    fn id_column() -> Column {
        Column::Id
    }

    fn deleted_at_column() -> Column {
        Column::DeletedAt
    }
}

impl Model {
    pub fn author(&self) -> Result<Author, AppError> {
        Author::from_columns(self.user_id, self.is_guest, self.guest_nickname.as_deref())
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.deleted_at.into()
    }
}

impl ActiveModel {
    pub fn set_author(&mut self, author: Author) {
        let (user_id, is_guest, guest_nickname) = author.into_columns();
        self.user_id = Set(user_id);
        self.is_guest = Set(is_guest);
        self.guest_nickname = Set(guest_nickname);
    }
}
