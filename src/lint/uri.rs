//! Translation between document identifiers and native filesystem paths
//!
//! Identifiers arrive as `file:///abs/path` (local) or `file://host/path`.
//! Conversion never fails: anything that cannot be decoded is kept verbatim.

use std::path::{MAIN_SEPARATOR, PathBuf};

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

/// Characters escaped when a reported filename is appended to a URI path
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Converts a document identifier into a native filesystem path.
pub fn uri_to_path(uri: &str) -> PathBuf {
    PathBuf::from(to_native_separators(normalize_uri_path(uri)))
}

/// Joins a tool-reported filename (relative to the analysis working directory)
/// onto the workspace root identifier.
pub fn join_uri(root: &str, filename: &str) -> String {
    let filename = filename.replace('\\', "/");
    let encoded = utf8_percent_encode(filename.trim_start_matches('/'), PATH_SEGMENT);

    format!("{}/{}", root.trim_end_matches('/'), encoded)
}

/// Strips the scheme, percent-decodes and normalizes drive letters,
/// still using `/` as the separator.
fn normalize_uri_path(uri: &str) -> String {
    let rest = if uri.starts_with("file:///") {
        &uri["file://".len()..]
    } else if uri.starts_with("file://") {
        &uri["file:/".len()..]
    } else {
        uri
    };

    let decoded = percent_decode(rest).unwrap_or_else(|| rest.to_string());

    if is_windows_drive_path(&decoded) {
        let drive = decoded[1..2].to_ascii_uppercase();
        format!("{}{}", drive, &decoded[2..])
    } else {
        decoded
    }
}

/// Strict percent-decoding: `None` on a malformed escape or invalid UTF-8.
fn percent_decode(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let well_formed = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'%'
            || (bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit))
    });

    if !well_formed {
        return None;
    }

    percent_decode_str(input)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

/// `/c:/...` shape: leading slash, drive letter, colon
fn is_windows_drive_path(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 4 && bytes[0] == b'/' && bytes[1].is_ascii_alphabetic() && bytes[2] == b':'
}

fn to_native_separators(path: String) -> String {
    if MAIN_SEPARATOR == '/' {
        path
    } else {
        path.replace('/', std::path::MAIN_SEPARATOR_STR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("file:///home/user/project/main.go", "/home/user/project/main.go")]
    #[case("file:///home/user/my%20project/main.go", "/home/user/my project/main.go")]
    #[case("file://server/share/main.go", "/server/share/main.go")]
    #[case("file:///tmp/%E3%81%82.go", "/tmp/あ.go")]
    #[case("/already/a/path.go", "/already/a/path.go")]
    fn normalize_uri_path_strips_scheme_and_decodes(#[case] uri: &str, #[case] expected: &str) {
        assert_eq!(normalize_uri_path(uri), expected);
    }

    #[rstest]
    #[case("file:///tmp/100%zz/main.go", "/tmp/100%zz/main.go")]
    #[case("file:///tmp/a%20b%/main.go", "/tmp/a%20b%/main.go")]
    #[case("file:///tmp/trailing%2", "/tmp/trailing%2")]
    #[case("file:///tmp/%FF.go", "/tmp/%FF.go")]
    fn normalize_uri_path_keeps_undecoded_string_on_malformed_escape(
        #[case] uri: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(normalize_uri_path(uri), expected);
    }

    #[rstest]
    #[case("file:///c:/Users/x/file.go", "C:/Users/x/file.go")]
    #[case("file:///C:/Users/x/file.go", "C:/Users/x/file.go")]
    #[case("file:///d%3A/src/main.go", "D:/src/main.go")]
    #[case("/c:/Users/x/file.go", "C:/Users/x/file.go")]
    fn normalize_uri_path_upper_cases_windows_drive(#[case] uri: &str, #[case] expected: &str) {
        assert_eq!(normalize_uri_path(uri), expected);
    }

    #[rstest]
    #[case("/c:")]
    #[case("/1:/x")]
    #[case("c:/x")]
    fn is_windows_drive_path_rejects_other_shapes(#[case] path: &str) {
        assert!(!is_windows_drive_path(path));
    }

    #[cfg(unix)]
    #[test]
    fn uri_to_path_returns_native_path() {
        assert_eq!(
            uri_to_path("file:///home/user/project/pkg/a.go"),
            PathBuf::from("/home/user/project/pkg/a.go")
        );
    }

    #[cfg(windows)]
    #[test]
    fn uri_to_path_returns_native_path() {
        assert_eq!(
            uri_to_path("file:///c:/Users/x/file.go"),
            PathBuf::from(r"C:\Users\x\file.go")
        );
    }

    #[rstest]
    #[case("file:///home/user/project", "pkg/a.go", "file:///home/user/project/pkg/a.go")]
    #[case("file:///home/user/project/", "pkg/a.go", "file:///home/user/project/pkg/a.go")]
    #[case("file:///c:/work", r"pkg\a.go", "file:///c:/work/pkg/a.go")]
    #[case("file:///home/user/project", "my dir/a.go", "file:///home/user/project/my%20dir/a.go")]
    fn join_uri_appends_filename_to_root(
        #[case] root: &str,
        #[case] filename: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(join_uri(root, filename), expected);
    }
}
