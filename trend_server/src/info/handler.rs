use axum::Json;

use super::dto::Info;

#[utoipa::path(
    get,
    path = "/",
    description = "Liveness message",
    responses(
        (status = 200, description = "Server is running", body = Info),
    )
)]
pub async fn info() -> Json<Info> {
    Json(Info {
        message: "Hello! The app is running.".to_string(),
    })
}
