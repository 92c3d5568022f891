//! Property tests for Shipit.
//!
//! Properties use randomized input generation to explore edge cases and
//! protect invariants like "never escapes the root" and "idempotent".
//!
//! Run with: `cargo test --test properties`

#[path = "properties/safe_path.rs"]
mod safe_path;

#[path = "properties/package_name.rs"]
mod package_name;

#[path = "properties/env_file.rs"]
mod env_file;
