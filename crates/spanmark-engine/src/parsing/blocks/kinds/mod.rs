mod block_quote;
mod code_fence;
mod heading;
mod html_block;
mod list;
mod thematic_break;

pub(crate) use block_quote::BlockQuote;
pub(crate) use code_fence::{CodeFence, FenceSig};
pub(crate) use heading::AtxHeading;
pub(crate) use html_block::HtmlBlock;
pub(crate) use list::ListMarker;
pub(crate) use thematic_break::ThematicBreak;
