//! Collection filters accepted by the post list operation.

use std::collections::HashMap;

use super::post::{Post, PostId};
use super::projection::PostField;
use crate::error::DomainError;

/// How a filter value is matched against the stored field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Exact,
    /// Case-sensitive substring match.
    Partial,
}

impl FilterMode {
    pub const fn name(self) -> &'static str {
        match self {
            FilterMode::Exact => "exact",
            FilterMode::Partial => "partial",
        }
    }
}

/// A query parameter the list operation understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterRule {
    pub param: &'static str,
    pub field: PostField,
    pub mode: FilterMode,
}

pub const POST_FILTERS: [FilterRule; 2] = [
    FilterRule {
        param: "id",
        field: PostField::Id,
        mode: FilterMode::Exact,
    },
    FilterRule {
        param: "title",
        field: PostField::Title,
        mode: FilterMode::Partial,
    },
];

/// A single storage predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    IdEquals(PostId),
    TitleContains(String),
}

impl Criterion {
    fn parse(rule: &FilterRule, value: &str) -> Result<Self, DomainError> {
        match (rule.field, rule.mode) {
            (PostField::Id, FilterMode::Exact) => value
                .trim()
                .parse()
                .map(Criterion::IdEquals)
                .map_err(|_| {
                    DomainError::MalformedInput(format!(
                        "filter `{}` expects an integer, got `{value}`",
                        rule.param
                    ))
                }),
            (PostField::Title, FilterMode::Partial) => {
                Ok(Criterion::TitleContains(value.to_string()))
            }
            (field, mode) => Err(DomainError::MalformedInput(format!(
                "unsupported filter {mode:?} on `{}`",
                field.name()
            ))),
        }
    }

    pub fn field(&self) -> PostField {
        match self {
            Criterion::IdEquals(_) => PostField::Id,
            Criterion::TitleContains(_) => PostField::Title,
        }
    }

    pub fn mode(&self) -> FilterMode {
        match self {
            Criterion::IdEquals(_) => FilterMode::Exact,
            Criterion::TitleContains(_) => FilterMode::Partial,
        }
    }

    pub fn matches(&self, post: &Post) -> bool {
        match self {
            Criterion::IdEquals(id) => post.id == *id,
            Criterion::TitleContains(needle) => post.title.contains(needle.as_str()),
        }
    }
}

/// Conjunction of criteria applied to the post collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    criteria: Vec<Criterion>,
}

impl PostFilter {
    /// Build a filter from raw query parameters.
    ///
    /// Parameters that are not filters are ignored, as are empty values.
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, DomainError> {
        let mut criteria = Vec::new();
        for rule in &POST_FILTERS {
            match params.get(rule.param) {
                Some(value) if !value.is_empty() => criteria.push(Criterion::parse(rule, value)?),
                _ => {}
            }
        }
        Ok(Self { criteria })
    }

    pub fn with(mut self, criterion: Criterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.criteria.iter().all(|c| c.matches(post))
    }
}

/// Condition applied by the count operation for its `online` parameter.
///
/// `"1"` selects published posts, any other present value selects posts
/// explicitly set offline, and an absent parameter counts everything.
pub fn online_condition(param: Option<&str>) -> Option<bool> {
    param.map(|value| value == "1")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn unknown_parameters_are_ignored() {
        let filter = PostFilter::from_query(&params(&[("slug", "x"), ("page", "2")])).unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn maps_parameters_to_modes() {
        let filter = PostFilter::from_query(&params(&[("id", "5"), ("title", "foo")])).unwrap();
        let modes: Vec<_> = filter
            .criteria()
            .iter()
            .map(|c| (c.field(), c.mode()))
            .collect();
        assert_eq!(
            modes,
            vec![
                (PostField::Id, FilterMode::Exact),
                (PostField::Title, FilterMode::Partial)
            ]
        );
    }

    #[test]
    fn non_integer_id_is_malformed() {
        let err = PostFilter::from_query(&params(&[("id", "five")])).unwrap_err();
        assert!(matches!(err, DomainError::MalformedInput(_)));
    }

    #[test]
    fn title_match_is_case_sensitive_substring() {
        let criterion = Criterion::TitleContains("foo".into());
        let mut post = crate::domain::fixtures::post(1, "a food blog");
        assert!(criterion.matches(&post));
        post.title = "A FOOD BLOG".into();
        assert!(!criterion.matches(&post));
    }

    #[test]
    fn wildcard_characters_match_literally() {
        let criterion = Criterion::TitleContains("a_c%".into());
        assert!(!criterion.matches(&crate::domain::fixtures::post(1, "abcX")));
        assert!(criterion.matches(&crate::domain::fixtures::post(2, "fifty a_c% off")));
    }

    #[test]
    fn online_parameter_semantics() {
        assert_eq!(online_condition(None), None);
        assert_eq!(online_condition(Some("1")), Some(true));
        assert_eq!(online_condition(Some("0")), Some(false));
        assert_eq!(online_condition(Some("yes")), Some(false));
        assert_eq!(online_condition(Some("")), Some(false));
    }
}
