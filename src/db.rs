use log::info;
use sea_orm::sea_query::Index;
use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, DbErr, EntityName, EntityTrait, Schema,
};
use std::fs::{self, OpenOptions};
use std::path::Path;

use crate::config::AppConfig;
use crate::entity::{comment, external_account, like, tag, user, work, work_tag};
use crate::soft_delete::SoftDelete;

pub async fn connect_db(config: &AppConfig) -> Result<DatabaseConnection, DbErr> {
    if config.is_sqlite() {
        ensure_sqlite_path(config);
    }
    let url = config.database_url();
    let db = Database::connect(&url).await?;
    init_schema(&db).await?;
    Ok(db)
}

fn ensure_sqlite_path(config: &AppConfig) {
    let raw = config.database_url();
    let path = raw
        .strip_prefix("sqlite://")
        .or_else(|| raw.strip_prefix("sqlite:"))
        .unwrap_or(raw.as_str());
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path.contains(":memory:") {
        return;
    }
    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let _ = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path);
}

/// Creates any missing table, parents before the tables that reference them.
pub async fn init_schema<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    create_table(db, user::Entity).await?;
    create_deleted_at_index(db, user::Entity).await?;
    create_table(db, external_account::Entity).await?;
    create_table(db, tag::Entity).await?;
    create_table(db, work::Entity).await?;
    create_deleted_at_index(db, work::Entity).await?;
    create_table(db, work_tag::Entity).await?;
    create_table(db, like::Entity).await?;
    create_table(db, comment::Entity).await?;
    create_deleted_at_index(db, comment::Entity).await?;
    info!("database schema ready");
    Ok(())
}

async fn create_table<C, E>(db: &C, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let mut stmt = Schema::new(backend).create_table_from_entity(entity);
    stmt.if_not_exists();
    db.execute(backend.build(&stmt)).await?;
    Ok(())
}

/// Every default read filters on `deleted_at`.
async fn create_deleted_at_index<C, E>(db: &C, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: SoftDelete,
{
    let backend = db.get_database_backend();
    let stmt = Index::create()
        .if_not_exists()
        .name(format!("idx_{}_deleted_at", entity.table_name()))
        .table(entity)
        .col(E::deleted_at_column())
        .to_owned();
    db.execute(backend.build(&stmt)).await?;
    Ok(())
}
