use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::Deserialize;
use validator::Validate;

use crate::entities::staff;
use crate::error::{AppError, AppResult};
use crate::handlers::{deleted, AppJson};
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStaffRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 50))]
    pub phone: String,
    #[validate(length(min = 1, max = 100))]
    pub position: String,
    #[validate(length(min = 1, max = 100))]
    pub department: String,
    pub hire_date: Option<NaiveDate>,
    pub salary: Option<Decimal>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStaffRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub position: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub department: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub salary: Option<Decimal>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub is_active: Option<bool>,
}

fn ensure_salary(salary: Option<Decimal>) -> AppResult<()> {
    if salary.is_some_and(|s| s.is_sign_negative()) {
        return Err(AppError::BadRequest("Salary cannot be negative".to_string()));
    }
    Ok(())
}

pub async fn list_staff(State(state): State<AppState>) -> AppResult<Json<Vec<staff::Model>>> {
    let members = staff::Entity::find()
        .order_by_asc(staff::Column::LastName)
        .order_by_asc(staff::Column::FirstName)
        .all(&state.db)
        .await?;
    Ok(Json(members))
}

pub async fn get_staff(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<staff::Model>> {
    let member = staff::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Staff member not found".to_string()))?;
    Ok(Json(member))
}

pub async fn create_staff(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateStaffRequest>,
) -> AppResult<(StatusCode, Json<staff::Model>)> {
    payload.validate()?;
    ensure_salary(payload.salary)?;

    let member = staff::ActiveModel {
        first_name: Set(payload.first_name),
        last_name: Set(payload.last_name),
        email: Set(payload.email),
        phone: Set(payload.phone),
        position: Set(payload.position),
        department: Set(payload.department),
        hire_date: Set(payload.hire_date.unwrap_or_else(|| Utc::now().date_naive())),
        salary: Set(payload.salary),
        address: Set(payload.address),
        emergency_contact: Set(payload.emergency_contact),
        emergency_phone: Set(payload.emergency_phone),
        is_active: Set(payload.is_active.unwrap_or(true)),
        ..Default::default()
    };

    let result = member.insert(&state.db).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

pub async fn update_staff(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateStaffRequest>,
) -> AppResult<Json<staff::Model>> {
    payload.validate()?;
    ensure_salary(payload.salary)?;

    let member = staff::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Staff member not found".to_string()))?;

    let mut active: staff::ActiveModel = member.into();

    if let Some(first_name) = payload.first_name {
        active.first_name = Set(first_name);
    }
    if let Some(last_name) = payload.last_name {
        active.last_name = Set(last_name);
    }
    if let Some(email) = payload.email {
        active.email = Set(email);
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(phone);
    }
    if let Some(position) = payload.position {
        active.position = Set(position);
    }
    if let Some(department) = payload.department {
        active.department = Set(department);
    }
    if let Some(hire_date) = payload.hire_date {
        active.hire_date = Set(hire_date);
    }
    if payload.salary.is_some() {
        active.salary = Set(payload.salary);
    }
    if let Some(address) = payload.address {
        active.address = Set(Some(address));
    }
    if let Some(contact) = payload.emergency_contact {
        active.emergency_contact = Set(Some(contact));
    }
    if let Some(phone) = payload.emergency_phone {
        active.emergency_phone = Set(Some(phone));
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }

    let result = active.update(&state.db).await?;
    Ok(Json(result))
}

pub async fn delete_staff(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    let result = staff::Entity::delete_by_id(id).exec(&state.db).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Staff member not found".to_string()));
    }

    Ok(Json(deleted("Staff member")))
}
