// Profile image processing: the background chroma key and the document-level
// transparency toggle built on it.

pub mod handlers;
pub mod transparency;
