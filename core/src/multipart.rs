//! `multipart/form-data` body encoding.
//!
//! Layout per part: `--<boundary>\r\n`, the part headers, a blank line, the
//! content, `\r\n`. Text fields come first in the order given, then the
//! single file part, then `--<boundary>--\r\n`. The payload is copied as
//! raw bytes.

use uuid::Uuid;

const CRLF: &str = "\r\n";

/// The binary part of a multipart body.
#[derive(Debug, Clone, Copy)]
pub struct FilePart<'a> {
    pub field_name: &'a str,
    pub file_name: &'a str,
    pub mime_type: &'a str,
    pub data: &'a [u8],
}

/// Generate a fresh boundary token. Random per call so it cannot collide
/// with payload content by construction.
pub fn new_boundary() -> String {
    Uuid::new_v4().hyphenated().to_string().to_uppercase()
}

/// `Content-Type` header value for a body encoded with `boundary`.
pub fn content_type(boundary: &str) -> String {
    format!("multipart/form-data; boundary={boundary}")
}

pub fn encode(boundary: &str, fields: &[(String, String)], file: FilePart<'_>) -> Vec<u8> {
    let mut body = Vec::with_capacity(file.data.len() + 256 * (fields.len() + 1));

    for (name, value) in fields {
        push_str(&mut body, &format!("--{boundary}{CRLF}"));
        push_str(
            &mut body,
            &format!("Content-Disposition: form-data; name=\"{name}\"{CRLF}{CRLF}"),
        );
        push_str(&mut body, &format!("{value}{CRLF}"));
    }

    push_str(&mut body, &format!("--{boundary}{CRLF}"));
    push_str(
        &mut body,
        &format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"{CRLF}",
            file.field_name, file.file_name
        ),
    );
    push_str(&mut body, &format!("Content-Type: {}{CRLF}{CRLF}", file.mime_type));
    body.extend_from_slice(file.data);
    push_str(&mut body, CRLF);

    push_str(&mut body, &format!("--{boundary}--{CRLF}"));
    body
}

fn push_str(body: &mut Vec<u8>, s: &str) {
    body.extend_from_slice(s.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(data: &[u8]) -> FilePart<'_> {
        FilePart {
            field_name: "image",
            file_name: "x.jpg",
            mime_type: "image/jpeg",
            data,
        }
    }

    #[test]
    fn golden_body_with_one_field() {
        let payload = [0xFF, 0xD8, 0x00, 0x0D, 0x0A, 0xFF];
        let fields = vec![("name".to_string(), "a".to_string())];
        let body = encode("XYZ", &fields, image(&payload));

        let mut expected = Vec::new();
        expected.extend_from_slice(b"--XYZ\r\n");
        expected.extend_from_slice(b"Content-Disposition: form-data; name=\"name\"\r\n\r\n");
        expected.extend_from_slice(b"a\r\n");
        expected.extend_from_slice(b"--XYZ\r\n");
        expected.extend_from_slice(
            b"Content-Disposition: form-data; name=\"image\"; filename=\"x.jpg\"\r\n",
        );
        expected.extend_from_slice(b"Content-Type: image/jpeg\r\n\r\n");
        expected.extend_from_slice(&payload);
        expected.extend_from_slice(b"\r\n");
        expected.extend_from_slice(b"--XYZ--\r\n");
        assert_eq!(body, expected);
    }

    #[test]
    fn no_fields_emits_only_the_file_part() {
        let body = encode("B", &[], image(b"data"));
        let text = String::from_utf8(body).unwrap();
        assert!(text.starts_with("--B\r\nContent-Disposition: form-data; name=\"image\""));
        assert!(text.ends_with("data\r\n--B--\r\n"));
        assert_eq!(text.matches("--B\r\n").count(), 1);
    }

    #[test]
    fn fields_are_written_in_given_order() {
        let fields = vec![
            ("z".to_string(), "1".to_string()),
            ("a".to_string(), "2".to_string()),
        ];
        let text = String::from_utf8(encode("B", &fields, image(b""))).unwrap();
        let z = text.find("name=\"z\"").unwrap();
        let a = text.find("name=\"a\"").unwrap();
        assert!(z < a);
    }

    #[test]
    fn text_parts_are_utf8() {
        let fields = vec![("città".to_string(), "señor ✓".to_string())];
        let body = encode("B", &fields, image(b""));
        let text = String::from_utf8(body).unwrap();
        assert!(text.contains("name=\"città\"\r\n\r\nseñor ✓\r\n"));
    }

    #[test]
    fn boundaries_are_unique_per_call() {
        let a = new_boundary();
        let b = new_boundary();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
        assert_eq!(content_type(&a), format!("multipart/form-data; boundary={a}"));
    }
}
