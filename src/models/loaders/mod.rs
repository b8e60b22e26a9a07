pub mod document_loader;

pub use document_loader::{load_all_text_files, load_parsed_record, load_text_document, save_parsed_record};
