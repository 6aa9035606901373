pub mod admin;
pub mod auth;
pub mod comments;
pub mod employee;
pub mod health;

use actix_web::web;

/// Wires every handler under the `/api` scope.
///
/// Scope prefixes line up with the admission table in `auth::policy`; the
/// search route is registered ahead of `/tasks/{id}` so "search" is never
/// taken for a task id.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::login)
            .service(auth::signup),
    )
    .service(
        web::scope("/admin")
            .service(admin::list_employees)
            .service(admin::create_task)
            .service(admin::list_tasks)
            .service(admin::search_tasks)
            .service(admin::get_task)
            .service(admin::update_task)
            .service(admin::delete_task)
            .service(comments::create_comment)
            .service(comments::list_comments),
    )
    .service(
        web::scope("/employee")
            .service(employee::list_my_tasks)
            .service(employee::get_task)
            .service(employee::update_task_status)
            .service(comments::create_comment)
            .service(comments::list_comments),
    );
}
