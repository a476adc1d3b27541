use serde::{Deserialize, Serialize};

/// Hard link to a real file, created only when `links_allowed` is set
///
/// ```yaml
/// - !link
///     name: cargo_link
///     target: Cargo.toml
/// ```
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone)]
pub struct LinkConf {
    pub name: String,
    pub target: String,
}
