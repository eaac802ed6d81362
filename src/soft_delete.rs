//! Soft delete for users, works and comments.
//!
//! Rows are never removed; `deleted_at` marks them gone. Nothing filters
//! automatically, so ordinary reads go through [`SoftDelete::find_active`]
//! and friends, and only administrative code uses
//! [`SoftDelete::find_with_deleted_by_id`].

use chrono::Utc;
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Select};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Active,
    Deleted(chrono::DateTime<Utc>),
}

impl Lifecycle {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl From<Option<chrono::DateTime<Utc>>> for Lifecycle {
    fn from(deleted_at: Option<chrono::DateTime<Utc>>) -> Self {
        match deleted_at {
            Some(at) => Self::Deleted(at),
            None => Self::Active,
        }
    }
}

pub trait SoftDelete: EntityTrait {
    fn id_column() -> Self::Column;

    fn deleted_at_column() -> Self::Column;

    fn find_active() -> Select<Self> {
        Self::find().filter(Self::deleted_at_column().is_null())
    }

    fn find_active_by_id(id: i32) -> Select<Self> {
        Self::find_active().filter(Self::id_column().eq(id))
    }

    fn find_with_deleted_by_id(id: i32) -> Select<Self> {
        Self::find().filter(Self::id_column().eq(id))
    }
}

/// Marks an active row deleted. `Ok(false)` when there was nothing active to mark.
pub async fn soft_delete<E, C>(db: &C, id: i32) -> Result<bool, DbErr>
where
    E: SoftDelete,
    C: ConnectionTrait,
{
    let res = E::update_many()
        .col_expr(E::deleted_at_column(), Expr::value(Utc::now()))
        .filter(E::id_column().eq(id))
        .filter(E::deleted_at_column().is_null())
        .exec(db)
        .await?;
    debug!(
        "soft delete {} #{}: {} row(s)",
        E::default().table_name(),
        id,
        res.rows_affected
    );
    Ok(res.rows_affected > 0)
}

pub async fn restore<E, C>(db: &C, id: i32) -> Result<bool, DbErr>
where
    E: SoftDelete,
    C: ConnectionTrait,
{
    let res = E::update_many()
        .col_expr(
            E::deleted_at_column(),
            Expr::value(Option::<chrono::DateTime<Utc>>::None),
        )
        .filter(E::id_column().eq(id))
        .filter(E::deleted_at_column().is_not_null())
        .exec(db)
        .await?;
    Ok(res.rows_affected > 0)
}
