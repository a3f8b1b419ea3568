//! Post entity for SeaORM.

use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::entity::prelude::*;

use postdesk_core::domain::{NewPost, Post};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub category_id: Option<i32>,
    pub online: Option<bool>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Category,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post, without its category.
impl From<Model> for Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            slug: model.slug,
            content: model.content,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            category: None,
            online: model.online,
        }
    }
}

/// Build the domain Post from a row joined with its category.
pub fn with_category(model: Model, category: Option<super::category::Model>) -> Post {
    Post {
        category: category.map(Into::into),
        ..model.into()
    }
}

/// Conversion from a new domain post to an insertable ActiveModel.
impl From<NewPost> for ActiveModel {
    fn from(post: NewPost) -> Self {
        Self {
            id: NotSet,
            title: Set(post.title),
            slug: Set(post.slug),
            content: Set(post.content),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
            category_id: Set(post.category_id),
            online: Set(None),
        }
    }
}

/// Conversion from a stored domain post to an ActiveModel updating every column.
impl From<&Post> for ActiveModel {
    fn from(post: &Post) -> Self {
        Self {
            id: Unchanged(post.id),
            title: Set(post.title.clone()),
            slug: Set(post.slug.clone()),
            content: Set(post.content.clone()),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
            category_id: Set(post.category_id()),
            online: Set(post.online),
        }
    }
}
