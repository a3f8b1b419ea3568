use async_trait::async_trait;

use crate::domain::filter::PostFilter;
use crate::domain::pagination::PageRequest;
use crate::domain::{Category, CategoryId, NewCategory, NewPost, Post, PostId};
use crate::error::RepoError;

/// Generic repository trait defining the CRUD operations shared by entities.
///
/// `N` is the not-yet-persisted form of `T`; the storage assigns the id.
#[async_trait]
pub trait BaseRepository<T, N, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity and return it with its generated ID.
    async fn insert(&self, entity: N) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Fails with `RepoError::NotFound` when absent.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, NewPost, PostId> {
    /// Overwrite the stored row with `post`, including `updated_at`.
    async fn update(&self, post: &Post) -> Result<Post, RepoError>;

    /// Insert `category` and `post` filed under it, atomically.
    ///
    /// `post.category_id` is replaced by the id of the new category.
    async fn insert_with_category(
        &self,
        post: NewPost,
        category: NewCategory,
    ) -> Result<Post, RepoError>;

    /// Insert `category` and overwrite `post` filed under it, atomically.
    ///
    /// Nothing is written when the post does not exist.
    async fn update_with_category(
        &self,
        post: &Post,
        category: NewCategory,
    ) -> Result<Post, RepoError>;

    /// One page of posts matching `filter`, ordered by id.
    async fn find_page(
        &self,
        filter: &PostFilter,
        page: &PageRequest,
    ) -> Result<Vec<Post>, RepoError>;

    /// Count posts whose `online` flag equals `online`, or all posts for `None`.
    async fn count(&self, online: Option<bool>) -> Result<u64, RepoError>;

    /// Set the `online` flag without touching any other column.
    async fn set_online(&self, id: PostId, online: bool) -> Result<(), RepoError>;
}

/// Category repository. Deleting a category detaches its posts.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, NewCategory, CategoryId> {}
