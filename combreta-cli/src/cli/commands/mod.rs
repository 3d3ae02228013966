pub mod beast;
pub mod consolidate;
pub mod convert;
pub mod curate;
pub mod fetch;
