pub mod http_detector;
pub mod jpeg;
pub mod traits;
