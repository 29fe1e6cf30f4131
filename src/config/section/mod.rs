//! Configuration section definitions.

mod deploy;
mod manifest;
mod paths;
mod serve;

pub use deploy::DeploySection;
pub use manifest::ManifestSection;
pub use paths::PathsSection;
pub use serve::ServeSection;
