pub mod check_item;
pub mod env_table;
pub mod run_summary;
