//! In-memory post and category storage sharing one locked state.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use postdesk_core::domain::filter::PostFilter;
use postdesk_core::domain::pagination::PageRequest;
use postdesk_core::domain::{Category, CategoryId, NewCategory, NewPost, Post, PostId};
use postdesk_core::error::RepoError;
use postdesk_core::ports::{BaseRepository, CategoryRepository, PostRepository};

/// A post as stored: the category is kept as a foreign key.
struct PostRow {
    id: PostId,
    title: String,
    slug: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    category_id: Option<CategoryId>,
    online: Option<bool>,
}

#[derive(Default)]
struct StoreState {
    posts: BTreeMap<PostId, PostRow>,
    categories: BTreeMap<CategoryId, Category>,
    last_post_id: PostId,
    last_category_id: CategoryId,
}

impl StoreState {
    fn hydrate(&self, row: &PostRow) -> Post {
        Post {
            id: row.id,
            title: row.title.clone(),
            slug: row.slug.clone(),
            content: row.content.clone(),
            created_at: row.created_at,
            updated_at: row.updated_at,
            category: row
                .category_id
                .and_then(|id| self.categories.get(&id).cloned()),
            online: row.online,
        }
    }

    fn insert_post(&mut self, post: NewPost) -> Result<Post, RepoError> {
        self.check_category(post.category_id)?;

        self.last_post_id += 1;
        let row = PostRow {
            id: self.last_post_id,
            title: post.title,
            slug: post.slug,
            content: post.content,
            created_at: post.created_at,
            updated_at: post.updated_at,
            category_id: post.category_id,
            online: None,
        };
        let created = self.hydrate(&row);
        self.posts.insert(row.id, row);
        Ok(created)
    }

    fn update_post(&mut self, post: &Post) -> Result<Post, RepoError> {
        self.check_category(post.category_id())?;

        let row = self.posts.get_mut(&post.id).ok_or(RepoError::NotFound)?;
        row.title = post.title.clone();
        row.slug = post.slug.clone();
        row.content = post.content.clone();
        row.updated_at = post.updated_at;
        row.category_id = post.category_id();
        row.online = post.online;

        Ok(self.hydrate(&self.posts[&post.id]))
    }

    fn insert_category(&mut self, category: NewCategory) -> Category {
        self.last_category_id += 1;
        let created = Category {
            id: self.last_category_id,
            name: category.name,
        };
        self.categories.insert(created.id, created.clone());
        created
    }

    fn check_category(&self, category_id: Option<CategoryId>) -> Result<(), RepoError> {
        match category_id {
            Some(id) if !self.categories.contains_key(&id) => Err(RepoError::Constraint(format!(
                "category {id} does not exist"
            ))),
            _ => Ok(()),
        }
    }
}

/// In-memory storage using ordered maps behind an async RwLock.
///
/// Note: Data is lost on process restart.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        InMemoryPostRepository {
            state: self.state.clone(),
        }
    }

    pub fn categories(&self) -> InMemoryCategoryRepository {
        InMemoryCategoryRepository {
            state: self.state.clone(),
        }
    }
}

pub struct InMemoryPostRepository {
    state: Arc<RwLock<StoreState>>,
}

pub struct InMemoryCategoryRepository {
    state: Arc<RwLock<StoreState>>,
}

#[async_trait]
impl BaseRepository<Post, NewPost, PostId> for InMemoryPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let state = self.state.read().await;
        Ok(state.posts.get(&id).map(|row| state.hydrate(row)))
    }

    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        self.state.write().await.insert_post(post)
    }

    async fn delete(&self, id: PostId) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        state
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn update(&self, post: &Post) -> Result<Post, RepoError> {
        self.state.write().await.update_post(post)
    }

    async fn insert_with_category(
        &self,
        mut post: NewPost,
        category: NewCategory,
    ) -> Result<Post, RepoError> {
        let mut state = self.state.write().await;
        post.category_id = Some(state.insert_category(category).id);
        state.insert_post(post)
    }

    async fn update_with_category(
        &self,
        post: &Post,
        category: NewCategory,
    ) -> Result<Post, RepoError> {
        let mut state = self.state.write().await;
        if !state.posts.contains_key(&post.id) {
            return Err(RepoError::NotFound);
        }
        let category = state.insert_category(category);
        state.update_post(&Post {
            category: Some(category),
            ..post.clone()
        })
    }

    async fn find_page(
        &self,
        filter: &PostFilter,
        page: &PageRequest,
    ) -> Result<Vec<Post>, RepoError> {
        let state = self.state.read().await;
        let offset = usize::try_from(page.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit).unwrap_or(usize::MAX);

        Ok(state
            .posts
            .values()
            .map(|row| state.hydrate(row))
            .filter(|post| filter.matches(post))
            .skip(offset)
            .take(limit)
            .collect())
    }

    async fn count(&self, online: Option<bool>) -> Result<u64, RepoError> {
        let state = self.state.read().await;
        let count = state
            .posts
            .values()
            .filter(|row| online.is_none_or(|wanted| row.online == Some(wanted)))
            .count();
        Ok(count as u64)
    }

    async fn set_online(&self, id: PostId, online: bool) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        let row = state.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        row.online = Some(online);
        Ok(())
    }
}

#[async_trait]
impl BaseRepository<Category, NewCategory, CategoryId> for InMemoryCategoryRepository {
    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, RepoError> {
        Ok(self.state.read().await.categories.get(&id).cloned())
    }

    async fn insert(&self, category: NewCategory) -> Result<Category, RepoError> {
        Ok(self.state.write().await.insert_category(category))
    }

    async fn delete(&self, id: CategoryId) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        state.categories.remove(&id).ok_or(RepoError::NotFound)?;
        // Same as `ON DELETE SET NULL` on the posts foreign key.
        for row in state.posts.values_mut() {
            if row.category_id == Some(id) {
                row.category_id = None;
            }
        }
        Ok(())
    }
}

impl CategoryRepository for InMemoryCategoryRepository {}
