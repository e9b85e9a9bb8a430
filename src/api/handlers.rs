//! HTTP request handlers for the disposable income API.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::Household;

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse, CalculationResponse, TaxYearsResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/tax-years", get(tax_years_handler))
        .with_state(state)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

fn rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            ApiError::validation_error(body_text)
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Handler for `POST /calculate`.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_error(rejection, correlation_id);
            return error_response(ApiErrorResponse::bad_request(error));
        }
    };

    let tax_year = request.tax_year;
    let household = match Household::try_from(request.household) {
        Ok(household) => household,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid household");
            return error_response(err.into());
        }
    };
    let calculator = match state.calculator(tax_year) {
        Ok(calculator) => calculator,
        Err(err) => {
            warn!(correlation_id = %correlation_id, tax_year, "Unsupported tax year");
            return error_response(err.into());
        }
    };

    let start_time = Instant::now();
    match calculator.calculate(&household) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                tax_year,
                household_type = ?household.household_type(),
                disposable_income = %result.disposable_income,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            json_response(
                StatusCode::OK,
                CalculationResponse::new(correlation_id, result),
            )
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for `GET /tax-years`.
async fn tax_years_handler(State(state): State<AppState>) -> Response {
    json_response(
        StatusCode::OK,
        TaxYearsResponse {
            tax_years: state.config().supported_years(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use axum::body::Body;
    use axum::http::Request;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_state() -> AppState {
        AppState::new(ConfigLoader::embedded().expect("Failed to load config"))
            .expect("Failed to build calculators")
    }

    async fn post_calculate(body: impl Into<Body>) -> Response {
        create_router(create_test_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/calculate")
                    .header("Content-Type", "application/json")
                    .body(body.into())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    const SINGLE_50K: &str = r#"{
        "tax_year": 2024,
        "household": {
            "household_type": "single",
            "primary_person": { "age": 35, "gross_work_income": "50000" }
        }
    }"#;

    #[tokio::test]
    async fn test_valid_request_returns_200() {
        let response = post_calculate(SINGLE_50K).await;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let envelope: CalculationResponse = body_json(response).await;
        assert_eq!(envelope.engine_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(envelope.result.tax_year, 2024);
        assert_eq!(envelope.result.disposable_income, dec("39175.84"));
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let response = post_calculate("{invalid json").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_household_returns_validation_error() {
        let response = post_calculate(r#"{ "tax_year": 2024 }"#).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("household"));
    }

    #[tokio::test]
    async fn test_negative_income_returns_invalid_household() {
        let body = r#"{
            "tax_year": 2024,
            "household": {
                "household_type": "single",
                "primary_person": { "age": 35, "gross_work_income": "-1" }
            }
        }"#;
        let response = post_calculate(body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "INVALID_HOUSEHOLD");
        assert!(error.message.contains("primary_person.gross_work_income"));
    }

    #[tokio::test]
    async fn test_unsupported_year_returns_400() {
        let body = SINGLE_50K.replace("2024", "2019");
        let response = post_calculate(body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "UNSUPPORTED_TAX_YEAR");
    }

    #[tokio::test]
    async fn test_tax_years_lists_configured_years() {
        let response = create_router(create_test_state())
            .oneshot(
                Request::builder()
                    .uri("/tax-years")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let years: TaxYearsResponse = body_json(response).await;
        assert_eq!(years.tax_years, vec![2023, 2024, 2025]);
    }
}
