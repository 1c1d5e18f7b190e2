pub mod bench;
pub mod build_queries;
