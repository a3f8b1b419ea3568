use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::{Category, CategoryId};

pub type PostId = i32;

/// Post entity - an administrated article, optionally filed under a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category: Option<Category>,
    /// `None` means the status was never set, which is distinct from `Some(false)`.
    pub online: Option<bool>,
}

impl Post {
    pub fn category_id(&self) -> Option<CategoryId> {
        self.category.as_ref().map(|c| c.id)
    }

    /// Stamp the post as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// A post that has not been persisted yet; the storage assigns its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub category_id: Option<CategoryId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewPost {
    /// Create a new post with both timestamps set to now and no online status.
    pub fn new(
        title: String,
        slug: String,
        content: String,
        category_id: Option<CategoryId>,
    ) -> Self {
        let now = Utc::now();
        Self {
            title,
            slug,
            content,
            category_id,
            created_at: now,
            updated_at: now,
        }
    }
}
