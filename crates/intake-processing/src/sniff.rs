//! Content-type sniffing from a part's leading bytes.

/// Number of leading bytes inspected when sniffing.
pub const SNIFF_WINDOW: usize = 512;

pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Best-effort MIME type of a stream from its first [`SNIFF_WINDOW`] bytes.
///
/// Magic numbers win. Data with no known signature is reported as
/// [`TEXT_PLAIN`] when it contains no binary control bytes (empty input
/// included) and as [`OCTET_STREAM`] otherwise. The declared type of a part
/// never feeds into this.
pub fn sniff_content_type(prefix: &[u8]) -> String {
    let window = &prefix[..prefix.len().min(SNIFF_WINDOW)];

    if let Some(kind) = infer::get(window) {
        return kind.mime_type().to_string();
    }

    if window.iter().any(|&b| is_binary_control_byte(b)) {
        OCTET_STREAM.to_string()
    } else {
        TEXT_PLAIN.to_string()
    }
}

fn is_binary_control_byte(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F)
}
