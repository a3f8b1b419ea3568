//! Page size policy for collection responses.

use std::collections::HashMap;

use crate::error::DomainError;

pub const PAGE_PARAM: &str = "page";
pub const ITEMS_PER_PAGE_PARAM: &str = "itemsPerPage";

const MAX_OFFSET: u64 = i64::MAX as u64;

/// Bounds and defaults for the size of a listed page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationPolicy {
    pub items_per_page: u64,
    pub maximum_items_per_page: u64,
    /// Whether clients may pick the page size with `itemsPerPage`.
    pub client_items_per_page: bool,
}

impl Default for PaginationPolicy {
    fn default() -> Self {
        Self {
            items_per_page: 2,
            maximum_items_per_page: 2,
            client_items_per_page: true,
        }
    }
}

/// A resolved page: 1-based number, effective size and row offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
    pub offset: u64,
}

impl PaginationPolicy {
    pub fn from_query(&self, params: &HashMap<String, String>) -> Result<PageRequest, DomainError> {
        self.resolve(
            params.get(PAGE_PARAM).map(String::as_str),
            params.get(ITEMS_PER_PAGE_PARAM).map(String::as_str),
        )
    }

    /// Resolve the requested page, clamping the page size to the maximum.
    pub fn resolve(
        &self,
        page: Option<&str>,
        items_per_page: Option<&str>,
    ) -> Result<PageRequest, DomainError> {
        let page = match page {
            Some(raw) => {
                let page = parse_integer(PAGE_PARAM, raw)?;
                if page < 1 {
                    return Err(DomainError::MalformedInput(format!(
                        "`{PAGE_PARAM}` must be greater than or equal to 1"
                    )));
                }
                page as u64
            }
            None => 1,
        };

        let requested = match items_per_page {
            Some(raw) if self.client_items_per_page => {
                let size = parse_integer(ITEMS_PER_PAGE_PARAM, raw)?;
                if size < 0 {
                    return Err(DomainError::MalformedInput(format!(
                        "`{ITEMS_PER_PAGE_PARAM}` must not be negative"
                    )));
                }
                size as u64
            }
            _ => self.items_per_page,
        };

        let limit = requested.min(self.maximum_items_per_page);
        // Row offsets are bound as signed 64-bit integers.
        let offset = (page - 1)
            .checked_mul(limit)
            .filter(|&offset| offset <= MAX_OFFSET)
            .ok_or_else(|| {
                DomainError::MalformedInput(format!("`{PAGE_PARAM}` {page} is out of range"))
            })?;

        Ok(PageRequest {
            page,
            limit,
            offset,
        })
    }
}

fn parse_integer(param: &str, raw: &str) -> Result<i64, DomainError> {
    raw.trim().parse().map_err(|_| {
        DomainError::MalformedInput(format!("`{param}` expects an integer, got `{raw}`"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_two() {
        let page = PaginationPolicy::default().resolve(None, None).unwrap();
        assert_eq!(
            page,
            PageRequest {
                page: 1,
                limit: 2,
                offset: 0
            }
        );
    }

    #[test]
    fn clamps_requested_size_to_maximum() {
        let page = PaginationPolicy::default()
            .resolve(Some("3"), Some("100"))
            .unwrap();
        assert_eq!(page.limit, 2);
        assert_eq!(page.offset, 4);
    }

    #[test]
    fn smaller_requested_size_is_honoured() {
        let policy = PaginationPolicy {
            items_per_page: 10,
            maximum_items_per_page: 30,
            client_items_per_page: true,
        };
        let page = policy.resolve(Some("2"), Some("5")).unwrap();
        assert_eq!((page.limit, page.offset), (5, 5));
    }

    #[test]
    fn client_size_ignored_when_disabled() {
        let policy = PaginationPolicy {
            client_items_per_page: false,
            ..PaginationPolicy::default()
        };
        assert_eq!(policy.resolve(None, Some("1")).unwrap().limit, 2);
    }

    #[test]
    fn page_beyond_largest_offset_is_rejected() {
        let policy = PaginationPolicy::default();

        let last = policy.resolve(Some("4611686018427387904"), None).unwrap();
        assert_eq!(last.offset, 9_223_372_036_854_775_806);

        for page in ["4611686018427387905", "9223372036854775807"] {
            let err = policy.resolve(Some(page), None).unwrap_err();
            assert!(matches!(err, DomainError::MalformedInput(_)), "{page}");
        }
    }

    #[test]
    fn rejects_invalid_numbers() {
        let policy = PaginationPolicy::default();
        for (page, size) in [
            (Some("0"), None),
            (Some("-1"), None),
            (Some("two"), None),
            (None, Some("-5")),
            (None, Some("many")),
        ] {
            let err = policy.resolve(page, size).unwrap_err();
            assert!(
                matches!(err, DomainError::MalformedInput(_)),
                "{page:?} {size:?}"
            );
        }
    }
}
