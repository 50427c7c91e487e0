//! maud views
//!
//! Pages are rendered whole on first load; everything after that is an
//! htmx fragment or an out-of-band swap targeting the ids defined here.

pub mod landing;
pub mod layout;
pub mod profiles;
pub mod signup;

use crate::config::Config;
use crate::navigation::join_path;

/// Values every page needs to build links and chrome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    pub app_name: String,
    pub version: String,
    /// Normalized base path, `""` or `/app`
    pub base_path: String,
}

impl PageContext {
    pub fn from_config(config: &Config) -> Self {
        Self {
            app_name: config.project.name.clone(),
            version: config.project.version.clone(),
            base_path: config.routing.normalized_base_path(),
        }
    }

    /// Absolute href for an application path
    pub fn href(&self, path: &str) -> String {
        join_path(&self.base_path, path)
    }
}

impl Default for PageContext {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
