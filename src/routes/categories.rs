use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::categories::{CategoryForm, parse_category_id};
use crate::repository::HttpRepository;
use crate::routes::{base_context, flash_service_error, redirect, render_template};
use crate::services::{ServiceError, categories as categories_service};

#[get("/categories")]
pub async fn show_categories(
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match categories_service::list_categories_with_counts(repo.get_ref()).await {
        Ok(categories) => {
            let mut context = base_context(&flash_messages, "categories");
            context.insert("categories", &categories);

            render_template(&tera, "categories/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list categories: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/categories")]
pub async fn create_category(
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<CategoryForm>,
) -> impl Responder {
    match categories_service::create_category(repo.get_ref(), form).await {
        Ok(()) => FlashMessage::success("Categoría creada.").send(),
        Err(err) => flash_service_error(err, "crear la categoría"),
    }
    redirect("/categories")
}

#[get("/categories/{category_id}/edit")]
pub async fn edit_category(
    category_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let category_id = match parse_category_id(&category_id) {
        Ok(category_id) => category_id,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/categories");
        }
    };

    match categories_service::get_category(repo.get_ref(), &category_id).await {
        Ok(category) => {
            let mut context = base_context(&flash_messages, "categories");
            context.insert("category", &category);

            render_template(&tera, "categories/edit.html", &context)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Categoría no encontrada.").send();
            redirect("/categories")
        }
        Err(err) => {
            log::error!("Failed to load category {category_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/categories/{category_id}/edit")]
pub async fn update_category(
    category_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<CategoryForm>,
) -> impl Responder {
    let category_id = match parse_category_id(&category_id) {
        Ok(category_id) => category_id,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/categories");
        }
    };

    match categories_service::update_category(repo.get_ref(), &category_id, form).await {
        Ok(()) => {
            FlashMessage::success("Categoría actualizada.").send();
            redirect("/categories")
        }
        Err(err) => {
            flash_service_error(err, "actualizar la categoría");
            redirect(&format!("/categories/{category_id}/edit"))
        }
    }
}

#[post("/categories/{category_id}/delete")]
pub async fn delete_category(
    category_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
) -> impl Responder {
    let category_id = match parse_category_id(&category_id) {
        Ok(category_id) => category_id,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/categories");
        }
    };

    match categories_service::delete_category(repo.get_ref(), &category_id).await {
        Ok(()) => FlashMessage::success("Categoría eliminada.").send(),
        Err(err) => flash_service_error(err, "eliminar la categoría"),
    }
    redirect("/categories")
}
