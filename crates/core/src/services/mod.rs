pub mod assessment_service;
pub mod comparison_service;
pub mod summary_service;
