pub mod catalog;
pub mod prediction;
pub mod standings;
