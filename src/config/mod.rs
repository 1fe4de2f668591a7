//! Configuration module

mod metadata;
mod site;

pub use metadata::SiteMetadata;
pub use site::AuthorConfig;
pub use site::LocaleRedirectConfig;
pub use site::MenuItem;
pub use site::SiteConfig;
