//! Filename generation from media titles.

/// Characters that may not appear in file names on common filesystems.
const ILLEGAL_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Replace every character not permitted in file names with a space.
///
/// Each offending character becomes exactly one space, so applying this
/// twice yields the same string.
pub fn convert_title(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if ILLEGAL_CHARS.contains(&c) || c.is_control() {
                ' '
            } else {
                c
            }
        })
        .collect()
}

/// Build a safe `<title>.<ext>` file name.
pub fn output_file_name(title: &str, extension: &str) -> String {
    format!("{}.{}", safe_stem(title), extension)
}

/// Converted title usable as a file stem or folder name.
///
/// Leading/trailing whitespace and trailing dots are stripped; titles that
/// end up empty or consist only of dots become `untitled`.
pub fn safe_stem(title: &str) -> String {
    let converted = convert_title(title);
    let trimmed = converted.trim().trim_end_matches('.').trim_end();

    if trimmed.is_empty() || trimmed.chars().all(|c| c == '.') {
        "untitled".to_string()
    } else {
        trimmed.to_string()
    }
}
