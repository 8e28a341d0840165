//! Error types shared by the service and API layers

mod app_error;

pub use app_error::{domain_status, AppError, GENERIC_SERVER_ERROR};
