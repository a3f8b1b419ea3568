use serde::{Deserialize, Serialize};

pub type CategoryId = i32;

/// Category entity - the parent a post can be filed under.
///
/// Posts own the relation; a category's posts are derived from their
/// `category` reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
