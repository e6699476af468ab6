//! Path helpers for values handed to external tools.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Replace every platform separator with `/`.
///
/// The font tools accept forward slashes on every host.
pub fn to_portable_path(path: &Path) -> String {
    replace_separator(&path.to_string_lossy(), MAIN_SEPARATOR)
}

fn replace_separator(path: &str, separator: char) -> String {
    if separator == '/' {
        return path.to_string();
    }
    path.replace(separator, "/")
}

/// Rewrite `/x/rest` to `X:/rest` when `windows` is set.
///
/// Shells such as MSYS hand drive paths over in that form. Anything else is
/// returned untouched.
pub fn normalize_drive_path(file: &str, windows: bool) -> String {
    if !windows {
        return file.to_string();
    }

    let bytes = file.as_bytes();
    let is_drive = bytes.len() >= 3
        && bytes[0] == b'/'
        && bytes[1].is_ascii_lowercase()
        && bytes[2] == b'/';
    if !is_drive {
        return file.to_string();
    }

    let drive = char::from(bytes[1]).to_ascii_uppercase();
    format!("{drive}:/{}", &file[3..])
}

/// [`normalize_drive_path`] for the host platform.
pub fn normalize_input_path(file: &Path) -> PathBuf {
    PathBuf::from(normalize_drive_path(
        &file.to_string_lossy(),
        cfg!(windows),
    ))
}

/// File name without its extension, used to derive output names.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "font".to_string())
}

/// `1.2 KB` style size for listings.
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.1} {}", UNITS[unit])
}
