mod autolink;
mod code_span;
mod html;
mod link;

pub(crate) use autolink::Autolink;
pub(crate) use code_span::CodeSpan;
pub(crate) use html::HtmlTag;
pub(crate) use link::LinkSuffix;
