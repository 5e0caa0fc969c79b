//! Mutable HTML document model for jtabs.
//!
//! Provides an arena-backed [`Document`] that is parsed with the HTML5
//! algorithm (html5ever through `scraper`), queried with simple `tag.class`
//! selectors, mutated (insert, move, detach) and serialized back to HTML.
//!
//! # Example
//!
//! ```
//! use jtabs_dom::{Document, Selector};
//!
//! let mut doc = Document::parse(r#"<p class="note">Hello</p><p>World</p>"#);
//! let notes = doc.select(&Selector::parse("p.note"));
//! assert_eq!(notes.len(), 1);
//!
//! doc.detach(notes[0]);
//! assert_eq!(doc.to_html(), "<p>World</p>");
//! ```

mod error;
mod parser;
mod selector;
mod serializer;
mod tree;

pub use error::DomError;
pub use parser::HtmlParser;
pub use selector::Selector;
pub use serializer::HtmlSerializer;
pub use tree::{Descendants, Document, Element, NodeId, NodeKind};
