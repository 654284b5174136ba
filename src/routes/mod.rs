pub mod activities;

pub mod auth;

pub mod files;

pub mod materials;

pub mod submissions;

pub mod users;

pub use activities::configure_activity_routes;
pub use auth::configure_auth_routes;
pub use files::configure_file_routes;
pub use materials::configure_material_routes;
pub use submissions::configure_submission_routes;
pub use users::configure_user_routes;

use actix_web::web;

/// 注册全部 API 路由
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_user_routes)
        .configure(configure_material_routes)
        .configure(configure_submission_routes)
        .configure(configure_activity_routes)
        .configure(configure_file_routes);
}
