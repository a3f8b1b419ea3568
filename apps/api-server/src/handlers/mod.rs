//! HTTP handlers and route configuration.

mod docs;
mod health;
mod posts;


use actix_web::http::Method;
use actix_web::web;
use postdesk_core::domain::resource::{HttpVerb, Operation, ResourceDescriptor};

use crate::middleware::error::AppError;

/// Configure all application routes.
///
/// Post routes are registered in the order of the descriptor's operation
/// table, so a literal path listed before a parametric one takes precedence.
pub fn configure_routes(cfg: &mut web::ServiceConfig, descriptor: &ResourceDescriptor) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        // `/posts/abc` names no post, whatever the verb.
        web::PathConfig::default()
            .error_handler(|_err, req| AppError::NotFound(req.path().to_string()).into()),
    );

    let mut scope = web::scope("/api")
        .route("", web::get().to(docs::describe))
        .route("/health", web::get().to(health::health_check));

    for spec in descriptor.operations() {
        let route = web::method(method(spec.verb));
        let route = match spec.operation {
            Operation::List => route.to(posts::list),
            Operation::Create => route.to(posts::create),
            Operation::Count => route.to(posts::count),
            Operation::Get => route.to(posts::get),
            Operation::Update => route.to(posts::update),
            Operation::Delete => route.to(posts::delete),
            Operation::Publish => route.to(posts::publish),
        };
        tracing::debug!(
            operation = spec.operation.name(),
            "Registered {} /api{}",
            spec.verb.as_str(),
            spec.path
        );
        scope = scope.route(spec.path, route);
    }

    cfg.service(scope);
}

fn method(verb: HttpVerb) -> Method {
    match verb {
        HttpVerb::Get => Method::GET,
        HttpVerb::Post => Method::POST,
        HttpVerb::Put => Method::PUT,
        HttpVerb::Delete => Method::DELETE,
    }
}
