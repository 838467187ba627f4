use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::products::{ProductFormData, ProductRow};
use crate::forms::filters::ProductFilterQuery;
use crate::forms::products::{ProductForm, StockForm, parse_product_id};
use crate::models::config::ServerConfig;
use crate::pagination::Paginated;
use crate::repository::HttpRepository;
use crate::routes::{base_context, flash_service_error, parse_query, redirect, render_template};
use crate::services::{ServiceError, products as products_service};

fn product_url(product_id: &str) -> String {
    format!("/products/{product_id}")
}

#[get("/products")]
pub async fn show_products(
    req: HttpRequest,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let filters = parse_query::<ProductFilterQuery>(req.query_string()).into_state();
    let data =
        products_service::load_products_page(repo.get_ref(), filters, server_config.page_size)
            .await;

    let displayed = data.displayed;
    let rows = displayed
        .products
        .into_iter()
        .map(ProductRow::from)
        .collect::<Vec<_>>();
    let products = Paginated::from_zero_based(rows, displayed.page, displayed.total_pages);

    let mut context = base_context(&flash_messages, "products");
    context.insert("filters", &data.filters);
    context.insert("has_filters", &data.filters.has_filters());
    context.insert("active_filter", &displayed.filter);
    context.insert("error", &displayed.error);
    context.insert("total_elements", &displayed.total_elements);
    context.insert("products", &products);
    context.insert("categories", &data.categories);

    render_template(&tera, "products/index.html", &context)
}

fn render_product_form(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    data: ProductFormData,
) -> HttpResponse {
    let mut context = base_context(flash_messages, "products");
    context.insert("product_id", &data.product_id);
    context.insert("form", &data.form);
    context.insert("categories", &data.categories);

    render_template(tera, "products/form.html", &context)
}

#[get("/products/new")]
pub async fn new_product(
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match products_service::load_product_form(repo.get_ref(), None).await {
        Ok(data) => render_product_form(&tera, &flash_messages, data),
        Err(err) => {
            log::error!("Failed to load the product form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/products")]
pub async fn create_product(
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<ProductForm>,
) -> impl Responder {
    match products_service::create_product(repo.get_ref(), form).await {
        Ok(()) => {
            FlashMessage::success("Producto creado.").send();
            redirect("/products")
        }
        Err(err) => {
            flash_service_error(err, "crear el producto");
            redirect("/products/new")
        }
    }
}

#[get("/products/{product_id}")]
pub async fn show_product(
    product_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let product_id = match parse_product_id(&product_id) {
        Ok(product_id) => product_id,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/products");
        }
    };

    match products_service::get_product_details(repo.get_ref(), &product_id).await {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "products");
            context.insert("product", &data.product);
            context.insert("history", &data.history);
            context.insert("history_error", &data.history_error);

            render_template(&tera, "products/show.html", &context)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Producto no encontrado.").send();
            redirect("/products")
        }
        Err(err) => {
            log::error!("Failed to load product {product_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/products/{product_id}/edit")]
pub async fn edit_product(
    product_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let product_id = match parse_product_id(&product_id) {
        Ok(product_id) => product_id,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/products");
        }
    };

    match products_service::load_product_form(repo.get_ref(), Some(&product_id)).await {
        Ok(data) => render_product_form(&tera, &flash_messages, data),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Producto no encontrado.").send();
            redirect("/products")
        }
        Err(err) => {
            log::error!("Failed to load product {product_id} for editing: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/products/{product_id}/edit")]
pub async fn update_product(
    product_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<ProductForm>,
) -> impl Responder {
    let product_id = match parse_product_id(&product_id) {
        Ok(product_id) => product_id,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/products");
        }
    };

    match products_service::update_product(repo.get_ref(), &product_id, form).await {
        Ok(()) => {
            FlashMessage::success("Producto actualizado.").send();
            redirect(&product_url(&product_id))
        }
        Err(err) => {
            flash_service_error(err, "actualizar el producto");
            redirect(&format!("{}/edit", product_url(&product_id)))
        }
    }
}

#[post("/products/{product_id}/stock")]
pub async fn update_stock(
    product_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<StockForm>,
) -> impl Responder {
    let product_id = match parse_product_id(&product_id) {
        Ok(product_id) => product_id,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/products");
        }
    };

    match products_service::update_stock(repo.get_ref(), &product_id, form).await {
        Ok(()) => {
            FlashMessage::success("Stock actualizado.").send();
        }
        Err(err) => flash_service_error(err, "actualizar el stock"),
    }
    redirect(&product_url(&product_id))
}

#[post("/products/{product_id}/delete")]
pub async fn delete_product(
    product_id: web::Path<String>,
    repo: web::Data<HttpRepository>,
) -> impl Responder {
    let product_id = match parse_product_id(&product_id) {
        Ok(product_id) => product_id,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/products");
        }
    };

    match products_service::delete_product(repo.get_ref(), &product_id).await {
        Ok(()) => {
            FlashMessage::success("Producto eliminado.").send();
            redirect("/products")
        }
        Err(err) => {
            flash_service_error(err, "eliminar el producto");
            redirect(&product_url(&product_id))
        }
    }
}
