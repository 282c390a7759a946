//! Result encoding: vector markup into a base64 data URL.
//!
//! Pure and deterministic; base64 encoding of a UTF-8 string cannot
//! fail, so there is no error path.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Prefix of an SVG data URL.
pub const SVG_DATA_URL_PREFIX: &str = "data:image/svg+xml;base64,";

/// Encode vector markup as a `data:image/svg+xml;base64,...` URL.
#[must_use]
pub fn to_data_url(markup: &str) -> String {
    format!("{SVG_DATA_URL_PREFIX}{}", STANDARD.encode(markup.as_bytes()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn data_url_has_svg_prefix() {
        let url = to_data_url("<svg/>");
        assert!(url.starts_with(SVG_DATA_URL_PREFIX));
    }

    #[test]
    fn payload_decodes_back_to_markup() {
        let markup = r#"<svg xmlns="http://www.w3.org/2000/svg"></svg>"#;
        let url = to_data_url(markup);
        let payload = url.strip_prefix(SVG_DATA_URL_PREFIX).unwrap();
        let decoded = STANDARD.decode(payload).unwrap();
        assert_eq!(decoded, markup.as_bytes());
    }

    #[test]
    fn encoding_is_deterministic() {
        assert_eq!(to_data_url("<svg/>"), to_data_url("<svg/>"));
    }

    #[test]
    fn empty_markup_encodes_to_bare_prefix() {
        assert_eq!(to_data_url(""), SVG_DATA_URL_PREFIX);
    }
}
