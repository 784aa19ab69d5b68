use crate::models::AssetKind;

/// File name of the global bundle for `kind`, e.g. `all-v2.18.js`.
///
/// Depends on nothing but the version, so a new release never reuses a stale bundle.
pub fn bundle_file_name(kind: AssetKind, version: &str) -> String {
  format!("all-v{version}.{}", kind.extension())
}
