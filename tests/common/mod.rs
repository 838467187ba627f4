//! Loopback catalog backend used by the integration tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_web::{App, HttpResponse, HttpServer, web};
use serde_json::{Value, json};

/// Requests received by the fake backend, as `METHOD path?query body`.
pub type RequestLog = Arc<Mutex<Vec<String>>>;

pub struct FakeBackend {
    pub base_url: String,
    pub requests: RequestLog,
}

impl FakeBackend {
    /// Starts the backend on an ephemeral port of the loopback interface.
    pub fn start() -> Self {
        let requests = RequestLog::default();
        let log = requests.clone();

        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(log.clone()))
                .service(
                    web::scope("/api")
                        .route("/categories", web::get().to(list_categories))
                        .route("/categories", web::post().to(record))
                        .route("/categories/{id}", web::get().to(get_category))
                        .route("/categories/{id}", web::put().to(update_category))
                        .route("/categories/{id}", web::delete().to(no_content))
                        .route("/products", web::get().to(list_products))
                        .route("/products", web::post().to(record))
                        .route("/products/search", web::get().to(search_products))
                        .route("/products/price-range", web::get().to(price_range))
                        .route("/products/category/{id}", web::get().to(products_by_category))
                        .route("/products/{id}", web::get().to(get_product))
                        .route("/products/{id}", web::put().to(record))
                        .route("/products/{id}", web::delete().to(no_content))
                        .route("/products/{id}/stock", web::patch().to(record))
                        .route("/audit/products", web::get().to(latest_audit))
                        .route("/audit/products/{id}", web::get().to(product_audit))
                        .route("/audit/actions/{action}", web::get().to(audit_by_action)),
                )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();

        let port = server.addrs()[0].port();
        actix_web::rt::spawn(server.run());

        Self {
            base_url: format!("http://127.0.0.1:{port}/api"),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

pub fn product_json(id: &str, title: &str, price: f64, stock: u32, category: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "Fixture product description",
        "price": price,
        "stock": stock,
        "categoryId": category,
        "categoryName": "Hogar"
    })
}

fn catalog() -> Vec<Value> {
    vec![
        product_json("p1", "Desk lamp", 25.0, 4, "c1"),
        product_json("p2", "Office chair", 120.0, 15, "c2"),
        product_json("p3", "Lamp shade", 8.5, 0, "c1"),
    ]
}

fn page(content: Vec<Value>, query: &HashMap<String, String>) -> HttpResponse {
    let number = query
        .get("page")
        .and_then(|p| p.parse::<usize>().ok())
        .unwrap_or(0);
    let size = query
        .get("size")
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(20)
        .max(1);
    let total = content.len();
    let items = content
        .into_iter()
        .skip(number * size)
        .take(size)
        .collect::<Vec<_>>();

    HttpResponse::Ok().json(json!({
        "content": items,
        "totalElements": total,
        "totalPages": total.div_ceil(size),
        "size": size,
        "number": number
    }))
}

fn audit_entry(id: &str, product_id: &str, action: &str, details: Value) -> Value {
    json!({
        "id": id,
        "productId": product_id,
        "action": action,
        "timestamp": "2024-03-01T12:30:00Z",
        "details": details
    })
}

fn log_request(log: &RequestLog, req: &actix_web::HttpRequest, body: &str) {
    let query = req.query_string();
    let line = if query.is_empty() {
        format!("{} {} {body}", req.method(), req.path())
    } else {
        format!("{} {}?{query} {body}", req.method(), req.path())
    };
    log.lock().unwrap().push(line.trim_end().to_string());
}

async fn record(req: actix_web::HttpRequest, body: String, log: web::Data<RequestLog>) -> HttpResponse {
    log_request(&log, &req, &body);
    HttpResponse::Ok().json(json!({"id": "new"}))
}

async fn no_content(req: actix_web::HttpRequest, log: web::Data<RequestLog>) -> HttpResponse {
    if req.match_info().get("id") == Some("locked") {
        return HttpResponse::Conflict().json(json!({"error": "Category has products"}));
    }
    log_request(&log, &req, "");
    HttpResponse::NoContent().finish()
}

async fn list_categories() -> HttpResponse {
    HttpResponse::Ok().json(json!([
        {"id": "c1", "name": "Hogar"},
        {"id": "c2", "name": "Oficina"}
    ]))
}

async fn get_category(path: web::Path<String>) -> HttpResponse {
    match path.as_str() {
        "c1" => HttpResponse::Ok().json(json!({"id": "c1", "name": "Hogar"})),
        _ => HttpResponse::NotFound().json(json!({"message": "Category not found"})),
    }
}

async fn update_category(
    req: actix_web::HttpRequest,
    body: String,
    log: web::Data<RequestLog>,
) -> HttpResponse {
    if body.contains("Duplicada") {
        return HttpResponse::Conflict().json(json!({"message": "Category already exists"}));
    }
    log_request(&log, &req, &body);
    HttpResponse::Ok().json(json!({}))
}

async fn list_products(
    req: actix_web::HttpRequest,
    query: web::Query<HashMap<String, String>>,
    log: web::Data<RequestLog>,
) -> HttpResponse {
    log_request(&log, &req, "");
    page(catalog(), &query)
}

async fn search_products(
    req: actix_web::HttpRequest,
    query: web::Query<HashMap<String, String>>,
    log: web::Data<RequestLog>,
) -> HttpResponse {
    log_request(&log, &req, "");
    let term = query.get("q").cloned().unwrap_or_default().to_lowercase();
    let content = catalog()
        .into_iter()
        .filter(|p| {
            p["title"]
                .as_str()
                .is_some_and(|title| title.to_lowercase().contains(&term))
        })
        .collect();
    page(content, &query)
}

async fn price_range(
    req: actix_web::HttpRequest,
    query: web::Query<HashMap<String, String>>,
    log: web::Data<RequestLog>,
) -> HttpResponse {
    log_request(&log, &req, "");
    let bound = |key: &str| query.get(key).and_then(|v| v.parse::<f64>().ok());
    let (Some(min), Some(max)) = (bound("min"), bound("max")) else {
        return HttpResponse::BadRequest().body("min and max are required");
    };
    let content = catalog()
        .into_iter()
        .filter(|p| p["price"].as_f64().is_some_and(|price| price >= min && price <= max))
        .collect();
    page(content, &query)
}

async fn products_by_category(
    req: actix_web::HttpRequest,
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
    log: web::Data<RequestLog>,
) -> HttpResponse {
    log_request(&log, &req, "");
    let content = catalog()
        .into_iter()
        .filter(|p| p["categoryId"] == path.as_str())
        .collect();
    page(content, &query)
}

async fn get_product(path: web::Path<String>) -> HttpResponse {
    match path.as_str() {
        "explode" => HttpResponse::InternalServerError()
            .content_type("text/html")
            .body(format!("<html>{}</html>", "stack trace ".repeat(40))),
        "archived" => {
            let mut product = product_json("archived", "Old radio", 10.0, 0, "c1");
            product["deleted"] = json!(true);
            HttpResponse::Ok().json(product)
        }
        id => match catalog().into_iter().find(|p| p["id"] == id) {
            Some(product) => HttpResponse::Ok().json(product),
            None => HttpResponse::NotFound().json(json!({"message": "Product not found"})),
        },
    }
}

async fn latest_audit() -> HttpResponse {
    HttpResponse::Ok().json(json!([
        audit_entry("a1", "p1", "CREATE", json!({"title": "Desk lamp"})),
        audit_entry("a2", "gone-product-1234", "DELETE", json!({"name": "Widget"})),
        audit_entry("a3", "abcdef1234567890", "UPDATE", json!({}))
    ]))
}

async fn product_audit(path: web::Path<String>) -> HttpResponse {
    match path.as_str() {
        "p1" => HttpResponse::Ok().json(json!([
            audit_entry("a1", "p1", "CREATE", json!({"title": "Desk lamp"})),
            audit_entry("a4", "p1", "STOCK_UPDATE", json!({"title": "Desk lamp", "stock": 4}))
        ])),
        _ => HttpResponse::Ok().json(json!([])),
    }
}

async fn audit_by_action(path: web::Path<String>) -> HttpResponse {
    match path.as_str() {
        "DELETE" => HttpResponse::Ok().content_type("text/plain").body("OK"),
        "UPDATE" => HttpResponse::NoContent().finish(),
        _ => HttpResponse::Ok().json(json!([
            audit_entry("a1", "p1", "CREATE", json!({"title": "Desk lamp"}))
        ])),
    }
}
