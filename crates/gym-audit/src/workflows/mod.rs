pub mod audit;
pub mod import;
