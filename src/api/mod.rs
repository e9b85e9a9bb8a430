//! HTTP API for the disposable income engine.
//!
//! `POST /calculate` assesses one household for one tax year and
//! `GET /tax-years` lists the years the engine is configured for.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, ChildRequest, HouseholdRequest, PersonRequest};
pub use response::{
    ApiError, ApiErrorResponse, CalculationResponse, ENGINE_VERSION, TaxYearsResponse,
};
pub use state::AppState;
