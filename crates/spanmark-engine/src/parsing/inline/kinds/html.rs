use std::sync::OnceLock;

use regex::Regex;

/// Raw inline HTML syntax knowledge.
pub(crate) struct HtmlTag;

impl HtmlTag {
    /// Matches a raw HTML construct at the start of `rest`: an open or close
    /// tag, comment, processing instruction, declaration, or CDATA section.
    ///
    /// Returns the matched byte length. Constructs spanning a line ending
    /// are not recognized and fall back to literal text.
    pub fn scan(rest: &str) -> Option<usize> {
        static TAG: OnceLock<Regex> = OnceLock::new();
        let re = TAG.get_or_init(|| {
            Regex::new(
                r#"(?x)^(?:
                    </?[A-Za-z][A-Za-z0-9-]*
                        (?:\x20+[A-Za-z_:][A-Za-z0-9_.:-]*
                            (?:\x20*=\x20*(?:"[^"]*"|'[^']*'|[^\x20"'=<>`]+))?
                        )*
                        \x20*/?>
                  | <!---?>                  # empty comments
                  | <!--(?:[^-]|-[^-])*-->   # comment
                  | <\?[^?]*(?:\?[^>][^?]*)*\?>
                  | <![A-Za-z][^>]*>
                  | <!\[CDATA\[.*?\]\]>
                )"#,
            )
            .expect("invalid inline HTML regex")
        });
        re.find(rest).map(|m| m.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("<code>", 6)]
    #[case("</code>.", 7)]
    #[case("<br/>", 5)]
    #[case("<a href=\"x\">", 12)]
    #[case("<!-- note -->", 13)]
    #[case("<?pi?>", 6)]
    #[case("<!DOCTYPE html>", 15)]
    fn tags(#[case] rest: &str, #[case] len: usize) {
        assert_eq!(HtmlTag::scan(rest), Some(len));
    }

    #[rstest]
    #[case("<1>")]
    #[case("< code>")]
    #[case("<code")]
    #[case("plain")]
    fn non_tags(#[case] rest: &str) {
        assert_eq!(HtmlTag::scan(rest), None);
    }
}
