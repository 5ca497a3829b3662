//! rtf-dom - A Rust library for reading Rich Text Format documents
//!
//! This library parses RTF into a semantic document tree: paragraphs and
//! formatted runs, reconstructed tables with column spans and vertical merges,
//! fields and hyperlinks, pictures, embedded objects, shapes, bookmarks,
//! headers and footers.
//!
//! # Features
//!
//! - **Lenient parsing**: malformed input is recovered, never rejected
//! - **Encoding aware**: per-font charsets and codepages, `\u` escapes with
//!   fallback skipping, double-byte escapes split across tokens
//! - **Table reconstruction**: rows grouped into tables, columns derived from
//!   cell edges, merged cells resolved
//! - **HTML extraction**: the HTML carried by `\fromhtml` documents (Outlook
//!   message bodies)
//! - **Compressed RTF**: LZFu/MELA containers unwrapped (feature
//!   `compressed`, on by default)
//!
//! # Example - Extracting text
//!
//! ```rust
//! use rtf_dom::RtfDocument;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let doc = RtfDocument::parse(r"{\rtf1\ansi {\b Hello}, world\par}")?;
//! assert_eq!(doc.text(), "Hello, world");
//!
//! for run in doc.runs() {
//!     println!("{:?} bold={}", run.text(), run.bold());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Walking tables
//!
//! ```rust
//! use rtf_dom::rtf::{NodeKind, RtfDocument};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let rtf = r"{\rtf1\trowd\cellx2000\cellx4000\intbl A\cell B\cell\row}";
//! let doc = RtfDocument::parse(rtf)?;
//! for table in doc.tables() {
//!     if let NodeKind::Table(info) = table.kind() {
//!         println!("{} x {}", info.rows, info.columns);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

/// Shared encoding helpers
pub mod common;

/// RTF reader
///
/// Tokenizer, group-scoped reader, text decoding, tree builder and table
/// reconstruction for Rich Text Format.
pub mod rtf;

pub use rtf::{ParserOptions, RtfDocument, RtfError, RtfResult};
