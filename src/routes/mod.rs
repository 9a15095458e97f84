pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(users::login)
            .service(users::register)
            .service(users::list_users),
    )
    .service(
        web::scope("/tasks")
            .service(tasks::create_task)
            .service(tasks::created_by)
            .service(tasks::assigned_to)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    );
}
