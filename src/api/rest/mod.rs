//! # REST API
//!
//! JSON endpoints using axum.
//!
//! # Endpoints
//!
//! ## OSAGO
//! - `GET /api/v1/osago/providers` - Providers in configured order with state
//! - `POST /api/v1/osago/calculate` - Quote from every provider, always 200
//! - `POST /api/v1/osago/{provider}/calculate` - One provider, status mirrored
//!
//! ## Normalization
//! - `POST /api/v1/translate` - Four-locale rendering of a text
//! - `POST /api/v1/banks/normalize` - Canonical bank name
//! - `POST /api/v1/offerings/normalize` - Raw to canonical offerings
//!
//! ## Offerings
//! - `GET /api/v1/offerings/{category}` - Serving data
//! - `POST /api/v1/offerings/{category}/refresh` - Run the refresh job now
//!
//! ## Health
//! - `GET /api/v1/health` - Health check endpoint
//!
//! # Usage
//!
//! ```ignore
//! use partner_hub::api::rest::{create_router, AppState};
//!
//! let router = create_router(state);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{AppState, BankNameResponse, ErrorResponse, HealthResponse, RefreshResponse};
pub use routes::create_router;
