//! Field constraints checked on post write payloads.
//!
//! Length and blankness come from the `Validate` derives on [`PostWrite`]
//! and [`CategoryWrite`]; the rules below only add what depends on the
//! validation group or on whether a nested category is referenced by id.

use std::borrow::Cow;

use validator::{Validate, ValidationError, ValidationErrors};

use super::projection::{CategoryWrite, PostWrite};
use crate::error::DomainError;

pub const TITLE_MAX_LENGTH: usize = 255;
pub const TITLE_MIN_LENGTH_ON_CREATE: usize = 5;
pub const SLUG_MAX_LENGTH: usize = 255;
pub const CONTENT_MAX_LENGTH: usize = 255;
pub const CATEGORY_NAME_MAX_LENGTH: usize = 255;

const NOT_NULL: &str = "This value should not be null.";
const NOT_BLANK: &str = "This value should not be blank.";

/// Constraint groups; `Create` adds the rules that only apply to new posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationGroup {
    Default,
    Create,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    /// Enforce the minimum title length of the `Create` group.
    pub enforce_title_min_length: bool,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            enforce_title_min_length: true,
        }
    }
}

impl ValidationRules {
    /// Check a write payload, failing on the first violated constraint.
    pub fn check(&self, input: &PostWrite, group: ValidationGroup) -> Result<(), DomainError> {
        let create = group == ValidationGroup::Create;
        if create && input.title.is_none() {
            return Err(DomainError::validation("title", NOT_NULL));
        }

        input.validate().map_err(|errors| {
            first_violation(
                &errors,
                &[
                    ("title", "title", input.title.as_deref(), TITLE_MAX_LENGTH),
                    ("slug", "slug", input.slug.as_deref(), SLUG_MAX_LENGTH),
                    ("content", "content", input.content.as_deref(), CONTENT_MAX_LENGTH),
                ],
            )
        })?;

        let too_short = |title: &String| title.chars().count() < TITLE_MIN_LENGTH_ON_CREATE;
        if create && self.enforce_title_min_length && input.title.as_ref().is_some_and(too_short) {
            return Err(DomainError::validation(
                "title",
                format!(
                    "This value is too short. It should have {} characters or more.",
                    TITLE_MIN_LENGTH_ON_CREATE
                ),
            ));
        }

        if let Some(Some(category)) = &input.category {
            check_category(category)?;
        }
        Ok(())
    }
}

// A category referenced by id is reused as-is, so only new ones need a name.
fn check_category(category: &CategoryWrite) -> Result<(), DomainError> {
    if category.id.is_some() {
        return Ok(());
    }
    if category.name.is_none() {
        return Err(DomainError::validation("category.name", NOT_NULL));
    }
    category.validate().map_err(|errors| {
        first_violation(
            &errors,
            &[(
                "name",
                "category.name",
                category.name.as_deref(),
                CATEGORY_NAME_MAX_LENGTH,
            )],
        )
    })
}

/// Report the first failing field, in `fields` order.
///
/// Each entry is the derive's field name, the reported property path, the
/// submitted value and the field's maximum length.
fn first_violation(
    errors: &ValidationErrors,
    fields: &[(&str, &'static str, Option<&str>, usize)],
) -> DomainError {
    let field_errors = errors.field_errors();
    fields
        .iter()
        .find_map(|&(name, path, value, max)| {
            let error = field_errors.get(name)?.first()?;
            Some(DomainError::validation(path, describe(error, value, max)))
        })
        .unwrap_or_else(|| DomainError::validation("post", errors.to_string()))
}

fn describe(error: &ValidationError, value: Option<&str>, max: usize) -> Cow<'static, str> {
    if let Some(message) = &error.message {
        return message.clone();
    }
    match (&*error.code, value) {
        ("length", Some(value)) if value.is_empty() => Cow::Borrowed(NOT_BLANK),
        ("length", _) => Cow::Owned(format!(
            "This value is too long. It should have {max} characters or less."
        )),
        (code, _) => Cow::Owned(format!("This value is not valid ({code}).")),
    }
}
