use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    forms::{CategoryForm, SignupForm},
    search::filter_by_name,
    types::{CategoryId, CategoryPatch, StoreError},
};

use super::{
    models::{
        item_count_text, CategoriesResponse, CategoryFormRequest, CategoryPatchRequest,
        ErrorResponse, HealthResponse, LoginRequest, SearchParams, SessionResponse,
        SignupRequest, ValidationErrorResponse,
    },
    AppState,
};

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let uptime_secs = state.started_at.elapsed().map(|d| d.as_secs()).unwrap_or(0);
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            uptime_secs,
        }),
    )
}

pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let all = state.categories.list();
    let categories = filter_by_name(&all, params.search.as_deref().unwrap_or(""));
    Json(CategoriesResponse {
        loading: state.categories.is_loading(),
        categories,
    })
}

pub async fn get_category(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.categories.get(&CategoryId::new(id)) {
        Some(category) => Json(category).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "category not found"),
    }
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(req): Json<CategoryFormRequest>,
) -> Response {
    let new = match CategoryForm::from(req).validate() {
        Ok(new) => new,
        Err(errors) => return validation_response(errors),
    };

    match state.categories.create(new).await {
        Ok(category) => (StatusCode::CREATED, Json(category)).into_response(),
        Err(err) => store_error_response(err),
    }
}

/// Validates the edited form as a whole but only writes the fields present
/// in the request.
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<CategoryPatchRequest>,
) -> Response {
    let id = CategoryId::new(id);
    let Some(existing) = state.categories.get(&id) else {
        return error_response(StatusCode::NOT_FOUND, "category not found");
    };

    let mut form = CategoryForm::from_category(&existing);
    if let Some(name) = &req.name {
        form.name = name.clone();
    }
    if let Some(item_count) = &req.item_count {
        form.item_count = item_count_text(item_count);
    }
    let image_changed = req.image_url.is_some() || req.image_preview.is_some();
    if image_changed {
        form.image_url = req.image_url.clone().unwrap_or_default();
        form.image_preview = req.image_preview.clone();
    }

    let validated = match form.validate() {
        Ok(validated) => validated,
        Err(errors) => return validation_response(errors),
    };
    let patch = CategoryPatch {
        name: req.name.as_ref().map(|_| validated.name.clone()),
        item_count: req.item_count.as_ref().map(|_| validated.item_count),
        image_url: image_changed.then(|| validated.image_url.clone()),
    };

    match state.categories.update(&id, patch).await {
        Ok(category) => Json(category).into_response(),
        Err(err) => store_error_response(err),
    }
}

pub async fn delete_category(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.categories.delete(&CategoryId::new(id)).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => store_error_response(err),
    }
}

pub async fn session_state(State(state): State<AppState>) -> impl IntoResponse {
    let user = state.session.current();
    Json(SessionResponse {
        authenticated: user.is_some(),
        user,
    })
}

pub async fn login(State(state): State<AppState>, Json(req): Json<LoginRequest>) -> Response {
    match state.session.login(&req.email, &req.password).await {
        Ok(identity) => Json(identity).into_response(),
        Err(err) => store_error_response(err),
    }
}

pub async fn signup(State(state): State<AppState>, Json(req): Json<SignupRequest>) -> Response {
    let form = SignupForm {
        name: req.name,
        email: req.email,
        password: req.password,
        confirm_password: req.confirm_password,
    };
    if let Err(err) = form.validate() {
        return error_response(StatusCode::UNPROCESSABLE_ENTITY, &err.to_string());
    }

    match state
        .session
        .signup(&form.name, &form.email, &form.password)
        .await
    {
        Ok(identity) => (StatusCode::CREATED, Json(identity)).into_response(),
        Err(err) => store_error_response(err),
    }
}

pub async fn logout(State(state): State<AppState>) -> StatusCode {
    state.session.logout().await;
    StatusCode::NO_CONTENT
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            message: "not found".to_string(),
        }),
    )
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            message: message.to_string(),
        }),
    )
        .into_response()
}

fn validation_response(errors: crate::forms::FormErrors) -> Response {
    log::warn!("Rejected category form: {}", errors);
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ValidationErrorResponse { errors }),
    )
        .into_response()
}

fn store_error_response(err: StoreError) -> Response {
    let status = match &err {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Rejected(_) => StatusCode::UNAUTHORIZED,
        StoreError::Storage(_) | StoreError::Serialization(_) | StoreError::Aborted(_) => {
            log::error!("Store operation failed: {:?}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    error_response(status, &err.to_string())
}
