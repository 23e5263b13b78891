//! Filename deduplication and sanitisation.
//!
//! Uploaded files keep their original stem and extension but get a
//! shortened random suffix inserted before the extension so that repeated
//! uploads of the same file never collide in the temp directory or in
//! storage. The suffix keeps the first 4 characters of each of the 5
//! hyphen-separated groups of a fresh v4 UUID (roughly 80 bits), which is
//! enough for collision avoidance but is not a security token.

use uuid::Uuid;

/// Split a filename into `(stem, extension)` where the extension includes
/// its leading dot. A dot at position 0 (e.g. `.env`) is part of the stem.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], &name[idx..]),
        _ => (name, ""),
    }
}

/// Produce `{stem}-{g1}-{g2}-{g3}-{g4}-{g5}{ext}` with `gN` the first 4
/// characters of the Nth group of a freshly generated v4 UUID.
pub fn deduplicate_filename(original: &str) -> String {
    let (stem, ext) = split_extension(original);
    let uid = Uuid::new_v4().to_string();
    let short_parts: Vec<&str> = uid.split('-').map(|part| &part[..4]).collect();
    format!("{}-{}{}", stem, short_parts.join("-"), ext)
}

/// Conservative allow-list filter for filesystem/storage object names.
/// Keeps `[A-Za-z0-9._-]`, which drops path separators and control
/// characters, then strips leading dots.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    cleaned.trim_start_matches('.').to_string()
}
