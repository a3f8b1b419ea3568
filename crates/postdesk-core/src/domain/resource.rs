//! The post resource descriptor: the table of exposed operations.
//!
//! The table is built and validated once at start-up. The HTTP layer
//! registers its routes by walking it in order, which is why the validation
//! rejects a literal path that an earlier parametric path would capture.

use thiserror::Error;

use super::projection::ProjectionContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Count,
    Get,
    Update,
    Delete,
    Publish,
}

impl Operation {
    pub const fn name(self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Count => "count",
            Operation::Get => "get",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Publish => "publish",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpVerb {
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Delete => "DELETE",
        }
    }
}

/// Shape of a request or response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Body {
    Empty,
    Projection(ProjectionContext),
    Integer,
}

impl Body {
    pub const fn name(self) -> &'static str {
        match self {
            Body::Empty => "empty",
            Body::Projection(context) => context.name(),
            Body::Integer => "integer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationSpec {
    pub operation: Operation,
    pub verb: HttpVerb,
    /// Path relative to the API root; `{name}` segments are parameters.
    pub path: &'static str,
    pub input: Body,
    pub output: Body,
    pub paginated: bool,
    pub success_status: u16,
    pub summary: &'static str,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("{verb} {path} is declared by both `{first}` and `{second}`")]
    DuplicateRoute {
        verb: &'static str,
        path: &'static str,
        first: &'static str,
        second: &'static str,
    },

    #[error("{verb} {path} (`{shadowed}`) is captured by earlier route {by}")]
    ShadowedRoute {
        verb: &'static str,
        path: &'static str,
        shadowed: &'static str,
        by: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct ResourceDescriptor {
    pub name: &'static str,
    operations: Vec<OperationSpec>,
}

impl ResourceDescriptor {
    /// Validate an operation table, keeping its order.
    pub fn new(
        name: &'static str,
        operations: Vec<OperationSpec>,
    ) -> Result<Self, DescriptorError> {
        for (i, later) in operations.iter().enumerate() {
            for earlier in operations[..i].iter().filter(|e| e.verb == later.verb) {
                if earlier.path == later.path {
                    return Err(DescriptorError::DuplicateRoute {
                        verb: later.verb.as_str(),
                        path: later.path,
                        first: earlier.operation.name(),
                        second: later.operation.name(),
                    });
                }
                if captures(earlier.path, later.path) {
                    return Err(DescriptorError::ShadowedRoute {
                        verb: later.verb.as_str(),
                        path: later.path,
                        shadowed: later.operation.name(),
                        by: earlier.path,
                    });
                }
            }
        }
        Ok(Self { name, operations })
    }

    /// The post resource: generic CRUD plus the count and publish actions.
    pub fn posts() -> Result<Self, DescriptorError> {
        use ProjectionContext::*;

        Self::new(
            "Post",
            vec![
                OperationSpec {
                    operation: Operation::List,
                    verb: HttpVerb::Get,
                    path: "/posts",
                    input: Body::Empty,
                    output: Body::Projection(CollectionRead),
                    paginated: true,
                    success_status: 200,
                    summary: "List posts.",
                },
                OperationSpec {
                    operation: Operation::Create,
                    verb: HttpVerb::Post,
                    path: "/posts",
                    input: Body::Projection(Write),
                    output: Body::Projection(ItemRead),
                    paginated: false,
                    success_status: 201,
                    summary: "Create a post.",
                },
                OperationSpec {
                    operation: Operation::Count,
                    verb: HttpVerb::Get,
                    path: "/posts/count",
                    input: Body::Empty,
                    output: Body::Integer,
                    paginated: false,
                    success_status: 200,
                    summary: "Get counts of posts.",
                },
                OperationSpec {
                    operation: Operation::Get,
                    verb: HttpVerb::Get,
                    path: "/posts/{id}",
                    input: Body::Empty,
                    output: Body::Projection(ItemRead),
                    paginated: false,
                    success_status: 200,
                    summary: "Retrieve a post.",
                },
                OperationSpec {
                    operation: Operation::Update,
                    verb: HttpVerb::Put,
                    path: "/posts/{id}",
                    input: Body::Projection(Write),
                    output: Body::Projection(ItemRead),
                    paginated: false,
                    success_status: 200,
                    summary: "Replace a post.",
                },
                OperationSpec {
                    operation: Operation::Delete,
                    verb: HttpVerb::Delete,
                    path: "/posts/{id}",
                    input: Body::Empty,
                    output: Body::Empty,
                    paginated: false,
                    success_status: 204,
                    summary: "Remove a post.",
                },
                OperationSpec {
                    operation: Operation::Publish,
                    verb: HttpVerb::Post,
                    path: "/posts/{id}/publish",
                    input: Body::Empty,
                    output: Body::Integer,
                    paginated: false,
                    success_status: 200,
                    summary: "Pass post status online.",
                },
            ],
        )
    }

    pub fn operations(&self) -> &[OperationSpec] {
        &self.operations
    }

    pub fn operation(&self, operation: Operation) -> Option<&OperationSpec> {
        self.operations.iter().find(|s| s.operation == operation)
    }
}

/// Whether a request for `path` would be routed to `pattern`.
fn captures(pattern: &str, path: &str) -> bool {
    let pattern: Vec<_> = pattern.split('/').collect();
    let path: Vec<_> = path.split('/').collect();
    pattern.len() == path.len()
        && pattern
            .iter()
            .zip(&path)
            .all(|(p, s)| is_parameter(p) || (!is_parameter(s) && p == s))
}

fn is_parameter(segment: &str) -> bool {
    segment.starts_with('{') && segment.ends_with('}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(operation: Operation, verb: HttpVerb, path: &'static str) -> OperationSpec {
        OperationSpec {
            operation,
            verb,
            path,
            input: Body::Empty,
            output: Body::Empty,
            paginated: false,
            success_status: 200,
            summary: "",
        }
    }

    #[test]
    fn post_table_is_valid_and_complete() {
        let descriptor = ResourceDescriptor::posts().unwrap();
        let rows: Vec<_> = descriptor
            .operations()
            .iter()
            .map(|s| (s.operation.name(), s.verb.as_str(), s.path, s.paginated))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("list", "GET", "/posts", true),
                ("create", "POST", "/posts", false),
                ("count", "GET", "/posts/count", false),
                ("get", "GET", "/posts/{id}", false),
                ("update", "PUT", "/posts/{id}", false),
                ("delete", "DELETE", "/posts/{id}", false),
                ("publish", "POST", "/posts/{id}/publish", false),
            ]
        );
    }

    #[test]
    fn contexts_per_operation() {
        let descriptor = ResourceDescriptor::posts().unwrap();
        let create = descriptor.operation(Operation::Create).unwrap();
        assert_eq!(create.input, Body::Projection(ProjectionContext::Write));
        assert_eq!(create.output, Body::Projection(ProjectionContext::ItemRead));
        assert_eq!(
            descriptor.operation(Operation::Publish).unwrap().output,
            Body::Integer
        );
        assert_eq!(
            descriptor.operation(Operation::Count).unwrap().output,
            Body::Integer
        );
    }

    #[test]
    fn rejects_duplicate_routes() {
        let err = ResourceDescriptor::new(
            "Post",
            vec![
                spec(Operation::Get, HttpVerb::Get, "/posts/{id}"),
                spec(Operation::Count, HttpVerb::Get, "/posts/{id}"),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, DescriptorError::DuplicateRoute { .. }));
    }

    #[test]
    fn rejects_literal_route_after_parametric_one() {
        let err = ResourceDescriptor::new(
            "Post",
            vec![
                spec(Operation::Get, HttpVerb::Get, "/posts/{id}"),
                spec(Operation::Count, HttpVerb::Get, "/posts/count"),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            DescriptorError::ShadowedRoute {
                verb: "GET",
                path: "/posts/count",
                shadowed: "count",
                by: "/posts/{id}",
            }
        );
    }

    #[test]
    fn different_verbs_do_not_conflict() {
        assert!(
            ResourceDescriptor::new(
                "Post",
                vec![
                    spec(Operation::Get, HttpVerb::Get, "/posts/{id}"),
                    spec(Operation::Publish, HttpVerb::Post, "/posts/count"),
                ],
            )
            .is_ok()
        );
    }
}
