use axum::extract::FromRequest;
use serde_json::{json, Value};

use crate::error::AppError;

pub mod bookings;
pub mod guests;
pub mod rooms;
pub mod staff;

/// `Json` extractor whose rejections are reported as 400 `AppError`s.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Reply for successful deletes
pub(crate) fn deleted(what: &str) -> Value {
    json!({ "message": format!("{} deleted successfully", what) })
}

pub async fn welcome() -> axum::Json<Value> {
    axum::Json(json!({ "message": "Welcome to Hotel Management System API" }))
}
