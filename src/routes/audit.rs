use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::Deserialize;
use tera::{Context, Tera};

use crate::forms::filters::AuditFilterQuery;
use crate::forms::products::parse_product_id;
use crate::repository::HttpRepository;
use crate::routes::{base_context, parse_query, render_template};
use crate::services::audit as audit_service;

#[get("/audit")]
pub async fn show_audit(
    req: HttpRequest,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let filters = parse_query::<AuditFilterQuery>(req.query_string()).into_state();

    match audit_service::load_audit_page(repo.get_ref(), filters).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "audit");
            context.insert("filters", &data.filters);
            context.insert("has_filters", &data.filters.has_filters());
            context.insert("show_suggestions", &data.filters.wants_suggestions());
            context.insert("rows", &data.rows);
            context.insert("suggestions", &data.suggestions);
            context.insert("actions", &data.actions);

            render_template(&tera, "audit/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load audit entries: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct LabelQuery {
    title: Option<String>,
}

/// HTML fragment with the resolved product label of one audit row.
#[get("/audit/product-label/{product_id}")]
pub async fn product_label(
    req: HttpRequest,
    product_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Ok(product_id) = parse_product_id(&product_id) else {
        return HttpResponse::BadRequest().finish();
    };
    let query = parse_query::<LabelQuery>(req.query_string());

    let label =
        audit_service::resolve_label(repo.get_ref(), &product_id, query.title.as_deref()).await;

    let mut context = Context::new();
    context.insert("label", &label);
    context.insert("product_id", &product_id);

    render_template(&tera, "audit/product_label.html", &context)
}
