use std::sync::OnceLock;

use regex::Regex;

/// Autolink syntax knowledge: `<scheme:...>` and `<user@host>`.
pub(crate) struct Autolink;

impl Autolink {
    /// Matches an autolink at the start of `rest`.
    ///
    /// Returns `(url, label, consumed)`: the destination (with `mailto:`
    /// prepended for email autolinks), the visible label, and the matched
    /// byte length including the angle brackets.
    pub fn scan(rest: &str) -> Option<(String, String, usize)> {
        static URI: OnceLock<Regex> = OnceLock::new();
        static EMAIL: OnceLock<Regex> = OnceLock::new();
        let uri = URI.get_or_init(|| {
            Regex::new(r"^<([A-Za-z][A-Za-z0-9+.-]{1,31}:[^<>\x00-\x20]*)>")
                .expect("invalid autolink regex")
        });
        let email = EMAIL.get_or_init(|| {
            Regex::new(
                r"(?x)^<(
                    [A-Za-z0-9.!\#$%&'*+/=?^_`{|}~-]+
                    @[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?
                    (?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*
                )>",
            )
            .expect("invalid email autolink regex")
        });

        if let Some(c) = uri.captures(rest) {
            let label = c[1].to_string();
            return Some((label.clone(), label, c[0].len()));
        }
        if let Some(c) = email.captures(rest) {
            let label = c[1].to_string();
            return Some((format!("mailto:{label}"), label, c[0].len()));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri_autolink() {
        let (url, label, len) = Autolink::scan("<https://example.com> rest").unwrap();
        assert_eq!(url, "https://example.com");
        assert_eq!(label, "https://example.com");
        assert_eq!(len, 21);
    }

    #[test]
    fn email_autolink_gets_mailto() {
        let (url, label, _) = Autolink::scan("<user@example.com>").unwrap();
        assert_eq!(url, "mailto:user@example.com");
        assert_eq!(label, "user@example.com");
    }

    #[test]
    fn spaces_disallowed() {
        assert!(Autolink::scan("<not a link>").is_none());
    }

    #[test]
    fn plain_angle_text() {
        assert!(Autolink::scan("<p>").is_none());
    }
}
