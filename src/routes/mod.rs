use actix_web::{HttpResponse, Responder, get, web};

pub mod leave_balance;

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().body("HRM API v1.0")
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(hello)
        .service(health)
        .configure(leave_balance::configure);
}
