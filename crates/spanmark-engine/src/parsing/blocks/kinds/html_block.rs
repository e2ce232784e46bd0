use std::sync::OnceLock;

use regex::Regex;

/// Raw HTML block syntax knowledge.
pub(crate) struct HtmlBlock;

impl HtmlBlock {
    /// Detects an HTML block opener: up to three leading spaces, then a tag
    /// open (`<div`, `</div>`), comment, processing instruction, declaration,
    /// or CDATA start. The block runs to the next blank line.
    pub fn opens(s: &str) -> bool {
        static OPEN: OnceLock<Regex> = OnceLock::new();
        let re = OPEN.get_or_init(|| {
            Regex::new(
                r"(?x)^\x20{0,3}<(?:
                    [A-Za-z][A-Za-z0-9-]*(?:[\x20\t/>]|$)   # open tag
                  | /[A-Za-z][A-Za-z0-9-]*(?:[\x20\t>]|$)   # close tag
                  | !--                                     # comment
                  | \?                                      # processing instruction
                  | ![A-Za-z]                               # declaration
                  | !\[CDATA\[                              # cdata
                )",
            )
            .expect("invalid HTML block regex")
        });
        re.is_match(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("<p>Hello world!</p>")]
    #[case("<div")]
    #[case("</table>")]
    #[case("<!-- comment -->")]
    #[case("<?php echo 1; ?>")]
    #[case("<!DOCTYPE html>")]
    #[case("<![CDATA[raw]]>")]
    fn openers(#[case] line: &str) {
        assert!(HtmlBlock::opens(line));
    }

    #[rstest]
    #[case("plain text")]
    #[case("a < b")]
    #[case("<1invalid>")]
    #[case("    <p>indented four</p>")]
    fn non_openers(#[case] line: &str) {
        assert!(!HtmlBlock::opens(line));
    }
}
