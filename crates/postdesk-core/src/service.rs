//! Post service - runs each resource operation against the storage ports.
//!
//! Validation and lookups happen here so the HTTP handlers stay thin
//! wrappers that only parse requests and project responses.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::filter::{PostFilter, online_condition};
use crate::domain::pagination::PaginationPolicy;
use crate::domain::projection::{CategoryWrite, PostWrite};
use crate::domain::validation::{ValidationGroup, ValidationRules};
use crate::domain::{Category, NewCategory, NewPost, Post, PostId};
use crate::error::{DomainError, RepoError};
use crate::ports::{CategoryRepository, PostRepository};

pub struct PostService {
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
    pagination: PaginationPolicy,
    validation: ValidationRules,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, categories: Arc<dyn CategoryRepository>) -> Self {
        Self {
            posts,
            categories,
            pagination: PaginationPolicy::default(),
            validation: ValidationRules::default(),
        }
    }

    pub fn with_pagination(mut self, pagination: PaginationPolicy) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn with_validation(mut self, validation: ValidationRules) -> Self {
        self.validation = validation;
        self
    }

    pub fn pagination(&self) -> &PaginationPolicy {
        &self.pagination
    }

    /// One page of posts matching the filter parameters in `params`.
    pub async fn list(&self, params: &HashMap<String, String>) -> Result<Vec<Post>, DomainError> {
        let filter = PostFilter::from_query(params)?;
        let page = self.pagination.from_query(params)?;
        if page.limit == 0 {
            return Ok(Vec::new());
        }
        Ok(self.posts.find_page(&filter, &page).await?)
    }

    pub async fn get(&self, id: PostId) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "Post",
                id,
            })
    }

    pub async fn create(&self, input: PostWrite) -> Result<Post, DomainError> {
        self.validation.check(&input, ValidationGroup::Create)?;

        let category = match input.category {
            Some(Some(nested)) => Some(self.resolve_category(nested).await?),
            _ => None,
        };

        let mut new_post = NewPost::new(
            input.title.unwrap_or_default(),
            input.slug.unwrap_or_default(),
            input.content.unwrap_or_default(),
            None,
        );
        match category {
            Some(NestedCategory::New(new_category)) => {
                Ok(self.posts.insert_with_category(new_post, new_category).await?)
            }
            Some(NestedCategory::Existing(category)) => {
                new_post.category_id = Some(category.id);
                let mut post = self.posts.insert(new_post).await?;
                post.category = Some(category);
                Ok(post)
            }
            None => Ok(self.posts.insert(new_post).await?),
        }
    }

    /// Apply the fields present in `input` to an existing post.
    ///
    /// Absent fields keep their stored value; `updated_at` is refreshed.
    pub async fn update(&self, id: PostId, input: PostWrite) -> Result<Post, DomainError> {
        self.validation.check(&input, ValidationGroup::Default)?;

        let mut post = self.get(id).await?;
        if let Some(title) = input.title {
            post.title = title;
        }
        if let Some(slug) = input.slug {
            post.slug = slug;
        }
        if let Some(content) = input.content {
            post.content = content;
        }
        post.touch();

        let saved = match input.category {
            Some(Some(nested)) => match self.resolve_category(nested).await? {
                NestedCategory::Existing(category) => {
                    post.category = Some(category);
                    self.posts.update(&post).await
                }
                NestedCategory::New(new_category) => {
                    self.posts.update_with_category(&post, new_category).await
                }
            },
            Some(None) => {
                post.category = None;
                self.posts.update(&post).await
            }
            None => self.posts.update(&post).await,
        };
        saved.map_err(missing("Post", id))
    }

    pub async fn delete(&self, id: PostId) -> Result<(), DomainError> {
        self.posts.delete(id).await.map_err(missing("Post", id))
    }

    /// Number of posts matching the count operation's `online` parameter.
    pub async fn count(&self, online: Option<&str>) -> Result<u64, DomainError> {
        Ok(self.posts.count(online_condition(online)).await?)
    }

    /// Mark a post as online and return its id.
    pub async fn publish(&self, id: PostId) -> Result<PostId, DomainError> {
        let post = self.get(id).await?;
        if post.online != Some(true) {
            self.posts
                .set_online(id, true)
                .await
                .map_err(missing("Post", id))?;
        }
        Ok(post.id)
    }

    /// Look up a category referenced by id, or prepare the nested new one.
    async fn resolve_category(&self, nested: CategoryWrite) -> Result<NestedCategory, DomainError> {
        match nested.id {
            Some(id) => self
                .categories
                .find_by_id(id)
                .await?
                .map(NestedCategory::Existing)
                .ok_or(DomainError::NotFound {
                    entity_type: "Category",
                    id,
                }),
            None => Ok(NestedCategory::New(NewCategory::new(
                nested.name.unwrap_or_default(),
            ))),
        }
    }
}

/// Category carried by a post payload.
enum NestedCategory {
    Existing(Category),
    /// Inserted in the same write as the post.
    New(NewCategory),
}

fn missing(entity_type: &'static str, id: i32) -> impl FnOnce(RepoError) -> DomainError {
    move |err| match err {
        RepoError::NotFound => DomainError::NotFound { entity_type, id },
        other => DomainError::Storage(other),
    }
}
