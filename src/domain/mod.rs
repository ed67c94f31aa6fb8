pub mod detection;
pub mod history;
