use crate::attorney::model::Attorney;
use crate::AppState;
use actix_web::{web, HttpResponse, Responder};

#[utoipa::path(
    get,
    path = "/api/advogados",
    tag = "Advogados",
    responses(
        (status = 200, description = "List all attorney records", body = Vec<Attorney>)
    )
)]
pub async fn get_all_attorneys(state: web::Data<AppState>) -> impl Responder {
    log::debug!("Listing {} attorney records", state.attorneys.len());
    HttpResponse::Ok().json(state.attorneys.all())
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/advogados").route(web::get().to(get_all_attorneys)));
}
