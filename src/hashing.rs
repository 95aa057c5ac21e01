/// Hex content hash backing the content-identity check on resolved
/// predecessors: a candidate whose content equals the new upload is a pure
/// metadata edit, never an update.
pub fn content_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}
