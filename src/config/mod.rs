//! Configuration module

mod site;

pub use site::CategoryConfig;
pub use site::HighlightConfig;
pub use site::SiteConfig;
