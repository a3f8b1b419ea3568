//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionError, TransactionTrait,
};

use postdesk_core::domain::filter::{Criterion, PostFilter};
use postdesk_core::domain::pagination::PageRequest;
use postdesk_core::domain::{NewCategory, NewPost, Post, PostId};
use postdesk_core::error::RepoError;
use postdesk_core::ports::{BaseRepository, CategoryRepository, PostRepository};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

impl CategoryRepository for PostgresCategoryRepository {}

/// PostgreSQL post repository.
///
/// Reads join the owning category so posts come back fully hydrated.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BaseRepository<Post, NewPost, PostId> for PostgresPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .find_also_related(CategoryEntity)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(|(model, category)| post::with_category(model, category)))
    }

    async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let active_model: post::ActiveModel = new_post.into();
        let model = active_model.insert(&self.db).await.map_err(map_db_err)?;

        tracing::debug!(post_id = model.id, "Inserted post");
        Ok(model.into())
    }

    async fn delete(&self, id: PostId) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn update(&self, post: &Post) -> Result<Post, RepoError> {
        let active_model: post::ActiveModel = post.into();
        let model = active_model.update(&self.db).await.map_err(map_db_err)?;

        Ok(Post {
            category: post.category.clone(),
            ..model.into()
        })
    }

    async fn insert_with_category(
        &self,
        new_post: NewPost,
        new_category: NewCategory,
    ) -> Result<Post, RepoError> {
        let mut active_post: post::ActiveModel = new_post.into();
        let active_category: category::ActiveModel = new_category.into();

        let (model, category) = self
            .db
            .transaction::<_, _, DbErr>(|txn| {
                Box::pin(async move {
                    let category = active_category.insert(txn).await?;
                    active_post.category_id = Set(Some(category.id));
                    let model = active_post.insert(txn).await?;
                    Ok((model, category))
                })
            })
            .await
            .map_err(map_transaction_err)?;

        tracing::debug!(
            post_id = model.id,
            category_id = category.id,
            "Inserted post with new category"
        );
        Ok(post::with_category(model, Some(category)))
    }

    async fn update_with_category(
        &self,
        post: &Post,
        new_category: NewCategory,
    ) -> Result<Post, RepoError> {
        let mut active_post: post::ActiveModel = post.into();
        let active_category: category::ActiveModel = new_category.into();

        let (model, category) = self
            .db
            .transaction::<_, _, DbErr>(|txn| {
                Box::pin(async move {
                    let category = active_category.insert(txn).await?;
                    active_post.category_id = Set(Some(category.id));
                    let model = active_post.update(txn).await?;
                    Ok((model, category))
                })
            })
            .await
            .map_err(map_transaction_err)?;

        Ok(post::with_category(model, Some(category)))
    }

    async fn find_page(
        &self,
        filter: &PostFilter,
        page: &PageRequest,
    ) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(?filter, ?page, "Listing posts");

        let mut query = PostEntity::find();
        for criterion in filter.criteria() {
            query = match criterion {
                Criterion::IdEquals(id) => query.filter(post::Column::Id.eq(*id)),
                // LIKE is case-sensitive on PostgreSQL.
                Criterion::TitleContains(needle) => query.filter(
                    Expr::col((PostEntity, post::Column::Title))
                        .like(LikeExpr::new(contains_pattern(needle)).escape('\\')),
                ),
            };
        }

        let rows = query
            .order_by_asc(post::Column::Id)
            .limit(page.limit)
            .offset(page.offset)
            .find_also_related(CategoryEntity)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows
            .into_iter()
            .map(|(model, category)| post::with_category(model, category))
            .collect())
    }

    async fn count(&self, online: Option<bool>) -> Result<u64, RepoError> {
        let mut query = PostEntity::find();
        if let Some(online) = online {
            query = query.filter(post::Column::Online.eq(online));
        }

        query.count(&self.db).await.map_err(map_db_err)
    }

    async fn set_online(&self, id: PostId, online: bool) -> Result<(), RepoError> {
        let result = PostEntity::update_many()
            .col_expr(post::Column::Online, Expr::value(online))
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

/// `LIKE` pattern matching `needle` literally anywhere in the value.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn map_transaction_err(err: TransactionError<DbErr>) -> RepoError {
    match err {
        TransactionError::Connection(err) | TransactionError::Transaction(err) => map_db_err(err),
    }
}
