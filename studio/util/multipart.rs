/// Minimal multipart/form-data reading: just enough to pull an uploaded JSON
/// file out of the import form.

/// Returns the index of the first occurrence of `needle` in `haystack`.
pub fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Extracts the boundary token from a Content-Type header value like
/// `multipart/form-data; boundary=----WebKitFormBoundaryXXX`.
pub fn extract_boundary(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .map(|s| s.trim())
        .find_map(|s| s.strip_prefix("boundary="))
        .map(|b| b.trim_matches('"').to_owned())
        .filter(|b| !b.is_empty())
}

/// One body part: its raw header block and its payload.
struct Part<'a> {
    headers: &'a [u8],
    body:    &'a [u8],
}

/// Splits a multipart body on `--boundary` and yields every part that has a
/// header block. The preamble and the closing `--` marker are skipped.
fn parts<'a>(body: &'a [u8], boundary: &str) -> Vec<Part<'a>> {
    let delimiter = format!("--{}", boundary);
    let delim = delimiter.as_bytes();
    let sep = b"\r\n\r\n";

    let mut out = Vec::new();
    let mut rest = body;
    while let Some(pos) = find_subsequence(rest, delim) {
        let chunk = &rest[..pos];
        rest = &rest[pos + delim.len()..];
        if let Some(sep_pos) = find_subsequence(chunk, sep) {
            let payload = &chunk[sep_pos + sep.len()..];
            out.push(Part {
                headers: &chunk[..sep_pos],
                body:    payload.strip_suffix(b"\r\n").unwrap_or(payload),
            });
        }
    }
    out
}

/// Returns the bytes of the file part whose form field is `field_name`.
pub fn file_field(body: &[u8], boundary: &str, field_name: &str) -> Option<Vec<u8>> {
    let wanted = format!("name=\"{}\"", field_name);
    parts(body, boundary)
        .into_iter()
        .find(|p| {
            let headers = String::from_utf8_lossy(p.headers);
            headers.contains(&wanted) && headers.contains("filename=")
        })
        .map(|p| p.body.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &[u8] = b"--XYZ\r\n\
Content-Disposition: form-data; name=\"note\"\r\n\r\n\
hello\r\n\
--XYZ\r\n\
Content-Disposition: form-data; name=\"file\"; filename=\"net.json\"\r\n\
Content-Type: application/json\r\n\r\n\
{\"layers\":[]}\r\n\
--XYZ--\r\n";

    #[test]
    fn reads_boundary_from_content_type() {
        assert_eq!(
            extract_boundary("multipart/form-data; boundary=\"XYZ\"").as_deref(),
            Some("XYZ")
        );
        assert_eq!(extract_boundary("application/x-www-form-urlencoded"), None);
    }

    #[test]
    fn extracts_named_file_part() {
        let bytes = file_field(BODY, "XYZ", "file").unwrap();
        assert_eq!(bytes, b"{\"layers\":[]}");
    }

    #[test]
    fn text_fields_are_not_files() {
        assert!(file_field(BODY, "XYZ", "note").is_none());
        assert!(file_field(BODY, "XYZ", "missing").is_none());
    }
}
