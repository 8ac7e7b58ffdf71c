//! Filename sanitization utilities

/// Characters replaced with `-` in path segments
const UNSAFE_CHARS: [char; 3] = [';', '/', '\\'];

/// Make a playlist or folder name usable as a single path segment
///
/// Only `;`, `/` and `\` are replaced. Length, reserved device names and
/// trailing dots or spaces are left as they are.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if UNSAFE_CHARS.contains(&c) { '-' } else { c })
        .collect()
}
