//! Download file name and `Content-Disposition` value.

use crate::constants::{FILENAME_EXTENSION, FILENAME_PREFIX};

/// `certificado-<name>.png`, with every run of whitespace in `name` replaced by one `-`.
///
/// Control characters are dropped and `"`/`\` are backslash-escaped so the result can sit
/// inside a quoted header parameter.
pub fn attachment_filename(name: &str) -> String {
    let mut out = String::with_capacity(FILENAME_PREFIX.len() + name.len() + 4);
    out.push_str(FILENAME_PREFIX);

    let mut in_whitespace = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push('-');
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;
        match ch {
            '"' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            c if c.is_control() => {}
            c => out.push(c),
        }
    }

    out.push_str(FILENAME_EXTENSION);
    out
}

/// `attachment; filename="certificado-<name>.png"`.
pub fn content_disposition(name: &str) -> String {
    format!("attachment; filename=\"{}\"", attachment_filename(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(attachment_filename("João Silva"), "certificado-João-Silva.png");
        assert_eq!(
            attachment_filename("Ana \t Maria\n\nSouza"),
            "certificado-Ana-Maria-Souza.png"
        );
    }

    #[test]
    fn leading_and_trailing_whitespace_also_become_hyphens() {
        assert_eq!(attachment_filename(" Ana "), "certificado--Ana-.png");
    }

    #[test]
    fn header_value_is_quoted() {
        assert_eq!(
            content_disposition("João Silva"),
            "attachment; filename=\"certificado-João-Silva.png\""
        );
    }

    #[test]
    fn quotes_and_control_characters_cannot_break_the_header() {
        assert_eq!(attachment_filename("a\"b\\c"), "certificado-a\\\"b\\\\c.png");
        assert_eq!(attachment_filename("a\u{7}b"), "certificado-ab.png");
        assert!(!content_disposition("x\r\ny").contains(['\r', '\n']));
    }
}
