#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod bundle;
pub mod config;
pub mod minify;
pub mod models;
pub mod request;
pub mod response;
pub mod template;
pub mod view;

pub use config::{ConfigError, ViewConfig};
pub use models::{AssetKind, BundleReport};
pub use request::RequestContext;
pub use response::ViewResponse;
pub use view::View;
