pub mod pagination;
pub mod promotion;
pub mod query;
