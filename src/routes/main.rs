use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::repository::HttpRepository;
use crate::routes::{base_context, render_template};
use crate::services::dashboard as dashboard_service;

#[get("/")]
pub async fn show_dashboard(
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = dashboard_service::load_dashboard(repo.get_ref()).await;

    let mut context = base_context(&flash_messages, "dashboard");
    context.insert("total_products", &data.total_products);
    context.insert("category_count", &data.category_count);
    context.insert("audit_count", &data.audit_count);
    context.insert("inventory_value", &data.inventory_value);
    context.insert("recent_products", &data.recent_products);
    context.insert("recent_audit", &data.recent_audit);

    render_template(&tera, "main/index.html", &context)
}
