pub mod config;
pub mod logging;

pub mod analyzer;
pub mod fetch_page;
pub mod seo;
pub mod store;
pub mod url_model;
