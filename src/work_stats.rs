use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter};
use serde::Serialize;

use crate::entity::{comment, like, work};
use crate::soft_delete::SoftDelete;

/// A work plus its computed totals, shaped for API responses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WorkWithCounts {
    #[serde(flatten)]
    pub work: work::Model,
    pub likes_count: u64,
    pub comments_count: u64,
}

pub async fn likes_count<C: ConnectionTrait>(db: &C, work_id: i32) -> Result<u64, DbErr> {
    like::Entity::find()
        .filter(like::Column::WorkId.eq(work_id))
        .count(db)
        .await
}

pub async fn comments_count<C: ConnectionTrait>(db: &C, work_id: i32) -> Result<u64, DbErr> {
    comment::Entity::find_active()
        .filter(comment::Column::WorkId.eq(work_id))
        .count(db)
        .await
}

pub async fn with_counts<C: ConnectionTrait>(
    db: &C,
    work: work::Model,
) -> Result<WorkWithCounts, DbErr> {
    let likes_count = likes_count(db, work.id).await?;
    let comments_count = comments_count(db, work.id).await?;
    Ok(WorkWithCounts {
        work,
        likes_count,
        comments_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::author::Author;
    use crate::db::tests::{insert_user, insert_work, temp_db};
    use crate::soft_delete::soft_delete;
    use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

    async fn add_like(
        db: &DatabaseConnection,
        user_id: i32,
        work_id: i32,
    ) -> Result<like::Model, DbErr> {
        like::ActiveModel {
            user_id: Set(user_id),
            work_id: Set(work_id),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    async fn comment_on(db: &DatabaseConnection, work_id: i32, author: Author) -> comment::Model {
        let mut active = comment::ActiveModel {
            content: Set("great".to_string()),
            work_id: Set(work_id),
            ..Default::default()
        };
        active.set_author(author);
        active.insert(db).await.unwrap()
    }

    #[actix_rt::test]
    async fn likes_counted_per_work() {
        let (_dir, db) = temp_db().await;
        let alice = insert_user(&db, "alice@example.com").await;
        let bob = insert_user(&db, "bob@example.com").await;
        let first = insert_work(&db, Author::registered(alice.id)).await;
        let second = insert_work(&db, Author::registered(bob.id)).await;

        add_like(&db, alice.id, first.id).await.unwrap();
        add_like(&db, bob.id, first.id).await.unwrap();
        add_like(&db, alice.id, second.id).await.unwrap();

        assert_eq!(likes_count(&db, first.id).await.unwrap(), 2);
        assert_eq!(likes_count(&db, second.id).await.unwrap(), 1);
    }

    #[actix_rt::test]
    async fn duplicate_like_rejected() {
        let (_dir, db) = temp_db().await;
        let alice = insert_user(&db, "alice@example.com").await;
        let piece = insert_work(&db, Author::registered(alice.id)).await;

        add_like(&db, alice.id, piece.id).await.unwrap();
        assert!(add_like(&db, alice.id, piece.id).await.is_err());
        assert_eq!(likes_count(&db, piece.id).await.unwrap(), 1);
    }

    #[actix_rt::test]
    async fn deleted_comments_not_counted() {
        let (_dir, db) = temp_db().await;
        let alice = insert_user(&db, "alice@example.com").await;
        let piece = insert_work(&db, Author::guest("visitor")).await;

        comment_on(&db, piece.id, Author::registered(alice.id)).await;
        let doomed = comment_on(&db, piece.id, Author::guest("troll")).await;
        soft_delete::<comment::Entity, _>(&db, doomed.id).await.unwrap();

        let counted = with_counts(&db, piece.clone()).await.unwrap();
        assert_eq!(counted.comments_count, 1);
        assert_eq!(counted.likes_count, 0);
        assert_eq!(counted.work, piece);
    }

    #[actix_rt::test]
    async fn serialized_shape_flattens_work() {
        let (_dir, db) = temp_db().await;
        let piece = insert_work(&db, Author::guest("visitor")).await;
        let json = serde_json::to_value(with_counts(&db, piece).await.unwrap()).unwrap();

        assert_eq!(json["title"], "Untitled");
        assert_eq!(json["is_guest"], true);
        assert_eq!(json["likes_count"], 0);
        assert_eq!(json["comments_count"], 0);
        assert!(json.get("deleted_at").is_none());
    }
}
