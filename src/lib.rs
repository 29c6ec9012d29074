pub mod api;
pub mod bundle;
pub mod config;
pub mod error;
pub mod render;
pub mod site;

pub use config::SiteConfig;
pub use error::SiteError;
pub use site::Site;
