pub mod chapter;
pub mod document;
pub mod loaders;
pub mod pointer;
pub mod question;

pub use chapter::ChapterMetadata;
pub use document::{ParsedDocument, ParsedRecord, SourceDocument};
pub use loaders::{load_all_text_files, load_parsed_record, load_text_document, save_parsed_record};
pub use pointer::{ConsumerKind, PointerKey, QuestionPointer};
pub use question::ParsedQuestion;
