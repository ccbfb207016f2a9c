pub mod api;
mod entry;
pub mod middleware;
pub mod response;
pub mod views;

pub use entry::{API_PREFIX, router};
pub use middleware::catch_panic_layer;
pub use response::{ApiError, ApiResult, JsonApiResponse};
