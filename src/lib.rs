pub mod api;
pub mod dashboard;
pub mod models;
pub mod normalize;
