//! Parse raw response header lines collected by curl.

/// One raw header line as handed over by curl. Non-UTF-8 bytes are replaced,
/// not dropped, so the line still counts toward its block.
pub(crate) fn header_line(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).trim_end().to_string()
}

/// Parse header lines into `(name, value)` pairs.
///
/// Curl reports the headers of every response in a redirect chain; only the
/// block following the last status line is kept.
pub(crate) fn parse_header_lines(lines: &[String]) -> Vec<(String, String)> {
    let mut headers = Vec::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            headers.clear();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }
    headers
}
