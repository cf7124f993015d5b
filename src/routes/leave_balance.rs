use actix_web::web;

use crate::handlers::leave_balance;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/api/leave-balance",
        web::get().to(leave_balance::get_leave_balance),
    )
    .service(
        web::scope("/api/v1/leave-balance").route(
            "/{employee_id}",
            web::get().to(leave_balance::get_leave_balance_by_path),
        ),
    );
}
