//! Kernel utilities shared by Luthier binaries.
//! Keep this crate lightweight: settings loading and the admission-control token contract.
//!
//! ## Settings loading
//! ```rust,no_run
//! use luthier_kernel::config::load_settings;
//!
//! let settings = load_settings(Some("luthier.toml")).unwrap();
//! println!("documents live in {}", settings.config_dir.display());
//! ```
pub mod config;
pub mod security;

pub use luthier_domain as domain;
