//! Remote path normalization and local filename derivation.
//!
//! The service addresses files by absolute slash-separated paths, with the
//! empty string for the root and `rev:<rev>` for a specific revision.

mod sanitize;

pub use sanitize::sanitize_filename_for_linux;

/// Default local filename when the remote path yields nothing usable.
const DEFAULT_FILENAME: &str = "download.bin";

/// Normalizes `path` into the service's path form.
///
/// Backslashes become `/`, repeated slashes collapse, and the result is
/// `/`-prefixed without a trailing slash. The root maps to `""`.
///
/// # Examples
///
/// - `to_remote_path("docs//report.pdf/")` → `"/docs/report.pdf"`
/// - `to_remote_path("/")` → `""`
pub fn to_remote_path(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let segments: Vec<&str> = unified.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return String::new();
    }
    format!("/{}", segments.join("/"))
}

/// Path form addressing a specific revision of a file.
pub fn revision_path(rev: &str) -> String {
    format!("rev:{}", rev.trim())
}

/// Derives a safe local filename from the last segment of a remote path.
pub fn local_file_name(remote: &str) -> String {
    let normalized = to_remote_path(remote);
    let raw = normalized.rsplit('/').next().unwrap_or("");
    let sanitized = sanitize_filename_for_linux(raw);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_slashes() {
        assert_eq!(to_remote_path("docs//report.pdf/"), "/docs/report.pdf");
        assert_eq!(to_remote_path("\\Photos\\2024\\a.jpg"), "/Photos/2024/a.jpg");
        assert_eq!(to_remote_path("/already/clean"), "/already/clean");
    }

    #[test]
    fn root_is_empty() {
        assert_eq!(to_remote_path("/"), "");
        assert_eq!(to_remote_path(""), "");
        assert_eq!(to_remote_path("//"), "");
    }

    #[test]
    fn revision_form() {
        assert_eq!(revision_path("a1c10ce0dd78"), "rev:a1c10ce0dd78");
    }

    #[test]
    fn local_name_from_last_segment() {
        assert_eq!(local_file_name("/Homework/math/Prime Numbers.txt"), "Prime_Numbers.txt");
        assert_eq!(local_file_name("single.bin"), "single.bin");
    }

    #[test]
    fn local_name_fallback() {
        assert_eq!(local_file_name("/"), "download.bin");
        assert_eq!(local_file_name("/dir/.."), "download.bin");
    }
}
