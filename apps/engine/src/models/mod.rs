pub mod filters;
pub mod inference;
pub mod listing;
