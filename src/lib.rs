#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::HttpRepository;
#[cfg(feature = "server")]
use crate::routes::audit::{product_label, show_audit};
#[cfg(feature = "server")]
use crate::routes::categories::{
    create_category, delete_category, edit_category, show_categories, update_category,
};
#[cfg(feature = "server")]
use crate::routes::main::show_dashboard;
#[cfg(feature = "server")]
use crate::routes::products::{
    create_product, delete_product, edit_product, new_product, show_product, show_products,
    update_product, update_stock,
};

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod pagination;
#[cfg(feature = "server")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let repo = HttpRepository::new(&server_config.backend_url, server_config.connect_timeout())
        .map_err(|e| std::io::Error::other(format!("Failed to create backend client: {e}")))?;
    log::info!("Using catalog backend at {}", server_config.backend_url);

    let secret_key = Key::try_from(server_config.secret.as_bytes())
        .map_err(|e| std::io::Error::other(format!("Invalid secret: {e}")))?;

    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(show_dashboard)
            .service(show_products)
            .service(new_product)
            .service(create_product)
            .service(show_product)
            .service(edit_product)
            .service(update_product)
            .service(update_stock)
            .service(delete_product)
            .service(show_categories)
            .service(create_category)
            .service(edit_category)
            .service(update_category)
            .service(delete_category)
            .service(show_audit)
            .service(product_label)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
