use url::Url;

/// Question media must be an absolute http(s) URL; relative paths and other
/// schemes are rejected.
pub fn is_valid_media_url(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Converts a Rust field identifier to the platform's camelCase wire name,
/// so error paths match the JSON the caller submitted.
pub fn to_wire_field(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}
