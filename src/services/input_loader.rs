// Input Loading
// Resolves CLI input specifications into raw image bytes or text

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to read input file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid base64 input: {0}")]
    Base64(#[from] base64::DecodeError),
}

// Web frontends hand the capture over as a data URL; the payload starts
// after the comma.
fn data_url_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^data:[A-Za-z0-9.+/-]+;base64,").unwrap())
}

/// Load image bytes from a file path, or decode a base64 payload
/// (optionally wrapped in a `data:` URL).
pub fn load_image_input(input: &str, is_base64: bool) -> Result<Vec<u8>, InputError> {
    if is_base64 {
        let trimmed = input.trim();
        let payload = data_url_prefix().replace(trimmed, "");
        Ok(BASE64.decode(payload.as_bytes())?)
    } else {
        Ok(std::fs::read(input)?)
    }
}

/// Resolve text input: the literal argument, or the contents of a UTF-8
/// file when `from_file` is set.
pub fn load_text_input(input: &str, from_file: bool) -> Result<String, InputError> {
    if from_file {
        Ok(std::fs::read_to_string(input)?)
    } else {
        Ok(input.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_decodes() {
        let bytes = load_image_input("aGVsbG8=", true).unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn test_data_url_prefix_is_stripped() {
        let bytes = load_image_input("data:image/png;base64,aGVsbG8=", true).unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn test_invalid_base64_is_rejected() {
        assert!(matches!(
            load_image_input("not!!base64", true),
            Err(InputError::Base64(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_image_input("/nonexistent/clipsight-input.png", false);
        assert!(matches!(result, Err(InputError::Io(_))));
    }

    #[test]
    fn test_literal_text_passes_through() {
        let text = load_text_input("  some text  ", false).unwrap();
        assert_eq!(text, "  some text  ");
    }
}
