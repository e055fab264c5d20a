use sha2::{Digest, Sha256};
use std::io;
use std::path::{Path, PathBuf};

use routesheet_core::RegistrationRecord;

/// Compute SHA-256 of an in-memory byte slice.
pub fn sha256_bytes(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Encode a raw 32-byte hash as a lowercase hex string (64 chars).
pub fn to_hex(hash: &[u8; 32]) -> String {
    hash.iter().map(|b| format!("{b:02x}")).collect()
}

/// Where the diagnostics pair for one document lands.
/// Layout: `<data_dir>/snapshots/<hash>.txt` (raw OCR text) and
/// `<data_dir>/snapshots/<hash>.json` (assembled record).
pub fn snapshot_paths(data_dir: &Path, hash_hex: &str) -> (PathBuf, PathBuf) {
    let dir = data_dir.join("snapshots");
    (
        dir.join(format!("{hash_hex}.txt")),
        dir.join(format!("{hash_hex}.json")),
    )
}

/// Persist the raw OCR text and the assembled record for later inspection.
/// Snapshots are addressed by the source document's content hash, so batch
/// runs do not clobber one another and reprocessing a document lands on the
/// same pair.
pub fn write_snapshots(
    data_dir: &Path,
    source_bytes: &[u8],
    ocr_text: &str,
    record: &RegistrationRecord,
) -> io::Result<(PathBuf, PathBuf)> {
    let hash_hex = to_hex(&sha256_bytes(source_bytes));
    let (text_path, json_path) = snapshot_paths(data_dir, &hash_hex);
    if let Some(parent) = text_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&text_path, ocr_text)?;
    let json = serde_json::to_string_pretty(record).map_err(io::Error::other)?;
    std::fs::write(&json_path, json)?;
    Ok((text_path, json_path))
}
