mod extractor;

pub use extractor::LopdfExtractor;
