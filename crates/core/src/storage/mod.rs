pub mod brokerage_csv;
pub mod format;
pub mod manager;
