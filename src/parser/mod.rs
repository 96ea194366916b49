pub mod version;

pub use version::{VersionResolver, VersionRule};
