//! PII-safe log field wrappers.

use std::fmt;

/// Display wrapper that masks the value when logged.
///
/// Email-shaped values keep the first character of the local part and the
/// full domain ("a***@example.com"); anything else is truncated to a short
/// prefix. Wrap any user-supplied string before putting it in a log field.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if let Some(at_pos) = value.find('@') {
            let (local, domain) = value.split_at(at_pos);
            match local.chars().next() {
                Some(first) if !local.is_empty() => write!(f, "{first}***{domain}"),
                _ => write!(f, "***{domain}"),
            }
        } else if value.len() <= 4 {
            write!(f, "{}", "*".repeat(value.len()))
        } else {
            // chars().take keeps this safe on multi-byte input
            let prefix: String = value.chars().take(4).collect();
            write!(f, "{prefix}***")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Redacted;

    #[test]
    fn test_email_keeps_first_char_and_domain() {
        assert_eq!(
            Redacted("alice@example.com").to_string(),
            "a***@example.com"
        );
    }

    #[test]
    fn test_non_email_is_truncated() {
        assert_eq!(Redacted("super-secret-value").to_string(), "supe***");
        assert_eq!(Redacted("abc").to_string(), "***");
    }
}
