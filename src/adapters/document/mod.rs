//! Document reading adapters.

mod pdf_reader;

pub use pdf_reader::PdfTextReader;
