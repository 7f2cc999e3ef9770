pub mod category;
pub mod comparison;
pub mod holding;
pub mod policy;
pub mod portfolio;
pub mod snapshot;
pub mod summary;
