//! Self-description of the post resource.

use actix_web::{HttpResponse, web};
use postdesk_core::domain::filter::POST_FILTERS;
use postdesk_core::domain::pagination::{ITEMS_PER_PAGE_PARAM, PAGE_PARAM};
use postdesk_core::domain::projection::ProjectionContext;
use postdesk_shared::dto::{
    ContextDocument, FilterDocument, OperationDocument, PaginationDocument, ResourceDocument,
};

use crate::state::AppState;

/// GET /api
pub async fn describe(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(document(&state))
}

fn document(state: &AppState) -> ResourceDocument {
    let operations = state
        .descriptor
        .operations()
        .iter()
        .map(|spec| OperationDocument {
            name: spec.operation.name().to_string(),
            method: spec.verb.as_str().to_string(),
            path: format!("/api{}", spec.path),
            summary: spec.summary.to_string(),
            input: spec.input.name().to_string(),
            output: spec.output.name().to_string(),
            paginated: spec.paginated,
            success_status: spec.success_status,
        })
        .collect();

    let contexts = ProjectionContext::ALL
        .iter()
        .map(|context| ContextDocument {
            name: context.name().to_string(),
            fields: context.fields().iter().map(|f| f.name().to_string()).collect(),
        })
        .collect();

    let filters = POST_FILTERS
        .iter()
        .map(|rule| FilterDocument {
            parameter: rule.param.to_string(),
            field: rule.field.name().to_string(),
            strategy: rule.mode.name().to_string(),
        })
        .collect();

    let policy = state.posts.pagination();
    ResourceDocument {
        resource: state.descriptor.name.to_string(),
        operations,
        contexts,
        filters,
        pagination: PaginationDocument {
            page_parameter: PAGE_PARAM.to_string(),
            items_per_page_parameter: ITEMS_PER_PAGE_PARAM.to_string(),
            items_per_page: policy.items_per_page,
            maximum_items_per_page: policy.maximum_items_per_page,
            client_items_per_page: policy.client_items_per_page,
        },
    }
}
