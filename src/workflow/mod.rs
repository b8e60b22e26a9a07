pub mod document_ctx;
pub mod parse_flow;

pub use document_ctx::DocumentCtx;
pub use parse_flow::{
    parse, parse_with_chapters, parse_with_chapters_and_options, parse_with_options, ParseFlow,
    ParseOutcome,
};
