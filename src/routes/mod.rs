//! HTTP handlers and the helpers they share.

use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use serde::de::DeserializeOwned;
use tera::{Context, Tera};

use crate::services::ServiceError;

pub mod audit;
pub mod categories;
pub mod main;
pub mod products;

/// Maps a flash message level to the Bootstrap alert class.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Context shared by every full page: pending toasts and the active nav item.
pub fn base_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Failed to render template '{template}': {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Parses a query string, falling back to the defaults when it is malformed.
pub fn parse_query<T>(query_string: &str) -> T
where
    T: DeserializeOwned + Default,
{
    serde_html_form::from_str(query_string).unwrap_or_else(|e| {
        log::warn!("Ignoring malformed query string '{query_string}': {e}");
        T::default()
    })
}

/// Flashes the outcome of a failed mutation. `action` completes the sentence
/// "Error al ..." for backend failures.
pub fn flash_service_error(err: ServiceError, action: &str) {
    match err {
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            FlashMessage::error(message).send();
        }
        ServiceError::NotFound => {
            FlashMessage::error("El registro ya no existe.").send();
        }
        ServiceError::Backend(message) => {
            log::error!("Backend rejected '{action}': {message}");
            FlashMessage::error(format!("Error al {action}: {message}")).send();
        }
    }
}
