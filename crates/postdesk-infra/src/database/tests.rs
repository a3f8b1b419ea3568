#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::database::entity::{category, post};
    use crate::database::postgres_repo::{PostgresCategoryRepository, PostgresPostRepository};
    use postdesk_core::domain::filter::{Criterion, PostFilter};
    use postdesk_core::domain::pagination::PaginationPolicy;
    use postdesk_core::domain::{Category, NewCategory, NewPost, Post};
    use postdesk_core::error::RepoError;
    use postdesk_core::ports::{BaseRepository, CategoryRepository, PostRepository};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Statement, Value};

    fn post_model(id: i32, category_id: Option<i32>) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id,
            title: "Test Post".to_owned(),
            slug: "test-post".to_owned(),
            content: "Content".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
            category_id,
            online: None,
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id_joins_category() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[(
                post_model(5, Some(2)),
                category::Model {
                    id: 2,
                    name: "News".to_owned(),
                },
            )]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let post: Post = repo.find_by_id(5).await.unwrap().unwrap();

        assert_eq!(post.id, 5);
        assert_eq!(post.title, "Test Post");
        assert_eq!(
            post.category,
            Some(Category {
                id: 2,
                name: "News".to_owned()
            })
        );
    }

    #[tokio::test]
    async fn test_insert_category_returns_generated_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[category::Model {
                id: 11,
                name: "Tech".to_owned(),
            }]])
            .into_connection();

        let repo: Box<dyn CategoryRepository> = Box::new(PostgresCategoryRepository::new(db));

        let created = repo.insert(NewCategory::new("Tech")).await.unwrap();

        assert_eq!(created.id, 11);
        assert_eq!(created.name, "Tech");
    }

    #[tokio::test]
    async fn test_count_reads_aggregate() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[BTreeMap::from([("num_items", Value::BigInt(Some(3)))])]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        assert_eq!(repo.count(Some(true)).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_set_online_on_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let err = repo.set_online(404, true).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_reports_missing_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        assert!(repo.delete(1).await.is_ok());
        assert!(matches!(repo.delete(1).await, Err(RepoError::NotFound)));
    }

    fn single_statement(db: sea_orm::DatabaseConnection) -> Statement {
        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
        log[0].statements()[0].clone()
    }

    #[tokio::test]
    async fn test_title_filter_escapes_like_wildcards() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<post::Model>::new()])
            .into_connection();
        let repo = PostgresPostRepository::new(db.clone());

        let filter = PostFilter::default().with(Criterion::TitleContains("a_c%\\".into()));
        let page = PaginationPolicy::default().resolve(None, None).unwrap();
        assert!(repo.find_page(&filter, &page).await.unwrap().is_empty());

        let statement = single_statement(db);
        assert!(statement.sql.contains("ESCAPE"), "{}", statement.sql);
        let values = statement.values.unwrap().0;
        assert_eq!(
            values[0],
            Value::String(Some(Box::new("%a\\_c\\%\\\\%".to_owned())))
        );
    }

    #[tokio::test]
    async fn test_last_reachable_page_binds_signed_offset() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<post::Model>::new()])
            .into_connection();
        let repo = PostgresPostRepository::new(db.clone());

        let page = PaginationPolicy::default()
            .resolve(Some("4611686018427387904"), None)
            .unwrap();
        repo.find_page(&PostFilter::default(), &page).await.unwrap();

        let values = single_statement(db).values.unwrap().0;
        let offset = values
            .iter()
            .find_map(|value| match value {
                Value::BigUnsigned(Some(n)) if *n > 2 => Some(*n),
                _ => None,
            })
            .unwrap();
        assert!(i64::try_from(offset).is_ok());
    }

    #[tokio::test]
    async fn test_insert_with_category_runs_in_one_transaction() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[category::Model {
                id: 7,
                name: "Releases".to_owned(),
            }]])
            .append_query_results([[post_model(3, Some(7))]])
            .into_connection();
        let repo = PostgresPostRepository::new(db.clone());

        let created = repo
            .insert_with_category(
                NewPost::new("Version one".into(), "v1".into(), "".into(), None),
                NewCategory::new("Releases"),
            )
            .await
            .unwrap();

        assert_eq!(created.id, 3);
        assert_eq!(created.category.map(|c| c.id), Some(7));

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
        let sql: Vec<_> = log[0].statements().iter().map(|s| s.sql.as_str()).collect();
        assert!(sql.first().is_some_and(|s| s.starts_with("BEGIN")), "{sql:?}");
        assert!(sql.last().is_some_and(|s| s.starts_with("COMMIT")), "{sql:?}");
        assert!(sql.iter().any(|s| s.starts_with(r#"INSERT INTO "categories""#)));
        assert!(sql.iter().any(|s| s.starts_with(r#"INSERT INTO "posts""#)));
    }
}
