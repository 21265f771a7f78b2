//! # Domain Models
//!
//! Plain data shared across the workspace, with `serde` and `bitflags` as the only dependencies.
//! No I/O and no registry logic lives here.

pub mod namespace;
pub mod settings;
pub mod time;

pub use namespace::{Namespace, NamespaceSet, ParseNamespaceError};
pub use settings::{ParkSettings, SourceFiles};
pub use time::{DefaultTimeGrain, Granularity};
