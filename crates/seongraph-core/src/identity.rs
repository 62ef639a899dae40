//! Deterministic node identity and name cleaning

use num_bigint::BigUint;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Deterministic node id for a declaration at `line`/`column` of `file`.
///
/// The file path is URL-encoded, hashed with SHA-256, and the digest is read
/// as one 256-bit integer rendered in decimal. Line is 1-based, column
/// 0-based; both walker phases and LSP-returned definition positions feed the
/// same formula, which is what makes cross-phase addressing line up.
pub fn node_id(file: &str, line: u32, column: u32) -> String {
    let encoded = urlencoding::encode(file);
    let digest = Sha256::digest(encoded.as_bytes());
    let number = BigUint::from_bytes_be(&digest);
    format!("{line}_{column}_{number}")
}

/// Fallback id for nodes with no source position (primitive types, access
/// modifiers): a fresh UUID, underscored and uppercased so it fits the same
/// URI fragment shape.
pub fn random_node_id() -> String {
    Uuid::new_v4()
        .to_string()
        .replace('-', "_")
        .to_uppercase()
}

/// Cleans a source-level identifier so it can form a URI fragment.
///
/// Array brackets and everything after them are dropped (`Foo[]` → `Foo`);
/// generic and union markers are percent-encoded (`List<String>` →
/// `List%3CString%3E`) so the type argument survives in the URI.
pub fn clean_name(name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    let name = match name.find('[') {
        Some(index) => &name[..index],
        None => name,
    };
    if name.contains('<') || name.contains('>') || name.contains('|') {
        Some(urlencoding::encode(name).into_owned())
    } else {
        Some(name.to_string())
    }
}
