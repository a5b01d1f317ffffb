//! Adversarial payload texts.
//!
//! Used only as request input by the security scenarios; the suite never
//! executes or interprets any of them. Sourced from the classic injection
//! families: SQL, markup, shell metacharacters, path traversal, null bytes,
//! CRLF header splitting, and multibyte text.

pub const SQL_DROP_TABLE: &str = "'; DROP TABLE Books; --";
pub const SQL_UPDATE_SIDE_EFFECT: &str =
    "Test Description'; UPDATE Books SET title='HACKED' WHERE id=1; --";
pub const SQL_TAUTOLOGY: &str = "' OR '1'='1";

pub const SCRIPT_TAG: &str = "<script>alert('XSS Attack')</script>";
pub const IMG_ONERROR: &str = "Description with <img src=x onerror=alert('XSS')> payload";

pub const SHELL_READ_PASSWD: &str = "John; cat /etc/passwd;";
pub const SHELL_CHAINED_DELETE: &str = "Doe && rm -rf /";

pub const PATH_TRAVERSAL_UNIX: &str = "../../../etc/passwd";
pub const PATH_TRAVERSAL_WINDOWS: &str = "..\\..\\windows\\system32\\config\\sam";

pub const NULL_BYTE_FILENAME: &str = "Test\u{0}.txt";
pub const NULL_BYTE_TEXT: &str = "Description with null\u{0}byte";

pub const CRLF_SET_COOKIE: &str = "Test\r\nSet-Cookie: evil=true";
pub const LF_LOCATION: &str = "Description\nLocation: http://evil.com";

pub const SPECIAL_CHAR_TITLE: &str = "Test & Book <script>alert('test')</script>";
pub const SPECIAL_CHAR_DESCRIPTION: &str =
    "Description with 'quotes' & \"double quotes\" and symbols: @#$%^&*()";

pub const MULTIBYTE_TITLE: &str = "测试书籍 📚 Тестовая книга";
pub const MULTIBYTE_DESCRIPTION: &str = "Description with émojis 🎉 and åccénts";
pub const MULTIBYTE_FIRST_NAME: &str = "José María";
pub const MULTIBYTE_LAST_NAME: &str = "Müller-Σωκράτης";

/// Single-character flood for large-payload probes.
pub fn oversized_text(len: usize) -> String {
    "A".repeat(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payloads_keep_their_teeth() {
        assert!(SQL_DROP_TABLE.contains("DROP TABLE"));
        assert!(SCRIPT_TAG.contains("<script>"));
        assert!(NULL_BYTE_FILENAME.contains('\u{0}'));
        assert!(CRLF_SET_COOKIE.contains("\r\n"));
        assert!(PATH_TRAVERSAL_UNIX.contains("../"));
    }

    #[test]
    fn oversized_text_has_the_requested_length() {
        assert_eq!(oversized_text(100_000).len(), 100_000);
    }
}
