use actix_web::web;

use crate::middleware::auth::AuthMiddleware;
use crate::middleware::role_auth::RequireRole;
use crate::models::user::UserRole;
use crate::routes::{audit_logs, users};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(RequireRole::new(UserRole::Admin))
            .wrap(AuthMiddleware)
            .route("/users", web::get().to(users::get_users))
            .route("/users", web::post().to(users::create_user))
            .route("/users/{id}", web::put().to(users::update_user))
            .route("/audit-logs", web::get().to(audit_logs::get_audit_logs)),
    );
}
