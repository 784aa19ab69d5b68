//! Global JavaScript and stylesheet bundles served from `public/`.

mod generation;
mod naming;

pub use generation::{BundleGenerator, generate_bundles};
pub use naming::bundle_file_name;
