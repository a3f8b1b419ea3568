//! View projections: which post fields each operation context exposes.
//!
//! Reads go through [`project`], which renders a post restricted to the
//! fields of a [`ProjectionContext`]. Writes go through [`PostWrite`], which
//! only carries write-context fields; anything else in the payload is
//! dropped during deserialization.

use chrono::SecondsFormat;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value, json};
use validator::Validate;

use super::category::CategoryId;
use super::post::Post;

/// A serializable post field, named as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PostField {
    Id,
    Title,
    Slug,
    Content,
    CreatedAt,
    Category,
    Online,
}

impl PostField {
    pub const fn name(self) -> &'static str {
        match self {
            PostField::Id => "id",
            PostField::Title => "title",
            PostField::Slug => "slug",
            PostField::Content => "content",
            PostField::CreatedAt => "createdAt",
            PostField::Category => "category",
            PostField::Online => "online",
        }
    }
}

const COLLECTION_READ: &[PostField] = &[
    PostField::Id,
    PostField::Title,
    PostField::Slug,
    PostField::Online,
];

const ITEM_READ: &[PostField] = &[
    PostField::Id,
    PostField::Title,
    PostField::Slug,
    PostField::Content,
    PostField::CreatedAt,
    PostField::Category,
];

const WRITE: &[PostField] = &[
    PostField::Title,
    PostField::Slug,
    PostField::Content,
    PostField::Category,
];

/// Named set of fields (de)serialized by an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectionContext {
    CollectionRead,
    ItemRead,
    Write,
}

impl ProjectionContext {
    pub const ALL: [ProjectionContext; 3] = [
        ProjectionContext::CollectionRead,
        ProjectionContext::ItemRead,
        ProjectionContext::Write,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ProjectionContext::CollectionRead => "collection-read",
            ProjectionContext::ItemRead => "item-read",
            ProjectionContext::Write => "write",
        }
    }

    /// Fields of this context, in rendering order.
    pub const fn fields(self) -> &'static [PostField] {
        match self {
            ProjectionContext::CollectionRead => COLLECTION_READ,
            ProjectionContext::ItemRead => ITEM_READ,
            ProjectionContext::Write => WRITE,
        }
    }

    pub fn allows(self, field: PostField) -> bool {
        self.fields().contains(&field)
    }
}

/// Render `post` as a JSON object holding exactly the fields of `context`.
pub fn project(post: &Post, context: ProjectionContext) -> Map<String, Value> {
    context
        .fields()
        .iter()
        .map(|&field| (field.name().to_string(), field_value(post, field)))
        .collect()
}

fn field_value(post: &Post, field: PostField) -> Value {
    match field {
        PostField::Id => json!(post.id),
        PostField::Title => json!(post.title),
        PostField::Slug => json!(post.slug),
        PostField::Content => json!(post.content),
        PostField::CreatedAt => json!(
            post.created_at
                .to_rfc3339_opts(SecondsFormat::Secs, false)
        ),
        PostField::Category => match &post.category {
            Some(category) => json!({ "id": category.id, "name": category.name }),
            None => Value::Null,
        },
        PostField::Online => json!(post.online),
    }
}

/// Inbound post payload for create and update.
///
/// Only write-context fields exist here, so `id`, timestamps, `online` and
/// any unknown key sent by a client are ignored rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct PostWrite {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(max = 255))]
    pub slug: Option<String>,
    #[validate(length(max = 255))]
    pub content: Option<String>,
    /// `None`: key absent. `Some(None)`: explicit `null`, detaches the category.
    #[serde(default, deserialize_with = "present")]
    pub category: Option<Option<CategoryWrite>>,
}

/// Nested category inside a post payload.
///
/// With an `id` the existing category is reused; without one a new category
/// is created from `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct CategoryWrite {
    pub id: Option<CategoryId>,
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use chrono::{TimeZone, Utc};

    fn sample_post() -> Post {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        Post {
            id: 7,
            title: "Hello world".into(),
            slug: "hello-world".into(),
            content: "Body".into(),
            created_at: at,
            updated_at: at,
            category: Some(Category {
                id: 3,
                name: "News".into(),
            }),
            online: None,
        }
    }

    fn keys(map: &Map<String, Value>) -> Vec<&str> {
        map.keys().map(String::as_str).collect()
    }

    #[test]
    fn collection_read_exposes_list_fields_only() {
        let out = project(&sample_post(), ProjectionContext::CollectionRead);
        let mut got = keys(&out);
        got.sort();
        assert_eq!(got, vec!["id", "online", "slug", "title"]);
        assert_eq!(out["online"], Value::Null);
    }

    #[test]
    fn item_read_exposes_detail_fields_without_online() {
        let out = project(&sample_post(), ProjectionContext::ItemRead);
        let mut got = keys(&out);
        got.sort();
        assert_eq!(
            got,
            vec!["category", "content", "createdAt", "id", "slug", "title"]
        );
        assert_eq!(out["category"], json!({ "id": 3, "name": "News" }));
        assert_eq!(out["createdAt"], json!("2024-03-01T12:30:00+00:00"));
    }

    #[test]
    fn content_and_online_never_share_a_read_context() {
        assert!(ProjectionContext::ItemRead.allows(PostField::Content));
        assert!(!ProjectionContext::CollectionRead.allows(PostField::Content));
        assert!(ProjectionContext::CollectionRead.allows(PostField::Online));
        assert!(!ProjectionContext::ItemRead.allows(PostField::Online));
    }

    #[test]
    fn write_context_excludes_generated_fields() {
        for field in [PostField::Id, PostField::CreatedAt, PostField::Online] {
            assert!(!ProjectionContext::Write.allows(field), "{field:?}");
        }
    }

    #[test]
    fn write_payload_ignores_unknown_and_read_only_fields() {
        let input: PostWrite = serde_json::from_value(json!({
            "title": "A title",
            "id": 99,
            "online": true,
            "createdAt": "2020-01-01T00:00:00+00:00",
            "tags": ["x"]
        }))
        .unwrap();

        assert_eq!(input.title.as_deref(), Some("A title"));
        assert_eq!(input.slug, None);
        assert_eq!(input.category, None);
    }

    #[test]
    fn write_payload_distinguishes_null_category_from_absent() {
        let cleared: PostWrite = serde_json::from_value(json!({ "category": null })).unwrap();
        assert_eq!(cleared.category, Some(None));

        let nested: PostWrite =
            serde_json::from_value(json!({ "category": { "name": "Tech" } })).unwrap();
        assert_eq!(
            nested.category,
            Some(Some(CategoryWrite {
                id: None,
                name: Some("Tech".into())
            }))
        );
    }
}
