//! Tabbed widgets for static-site markup.
//!
//! Turns marker paragraphs and divs into tab groups:
//!
//! ```html
//! <p class="tab-title tabgroup-lang">Python</p>
//! <p class="tab-title tabgroup-lang">JS</p>
//! <div class="tab-content tabgroup-lang">...</div>
//! <div class="tab-content tabgroup-lang">...</div>
//! ```
//!
//! becomes a `div#tab-block-lang` holding a `ul.tab` of header links and a
//! `ul.tab-content` of panels, with exactly one active header and the panel
//! at the same position active.
//!
//! # Architecture
//!
//! Setup happens once in [`TabPage::load`]:
//!
//! 1. **Discovery**: collect group names from title markers in first-seen
//!    order, with their title and content markers in document order.
//! 2. **Construction**: build each group's widget before its first marker,
//!    then remove every marker.
//! 3. **Binding**: register a click binding for every header link of every
//!    widget in the document, addressed by [`HeaderRef`].
//! 4. **Augmentation** (optional): append a copy button to every `<pre>`
//!    inside a panel.
//!
//! After setup the page only reacts to clicks ([`TabPage::click`],
//! [`TabPage::dispatch_click`], [`TabPage::copy_code`]).
//!
//! # Example
//!
//! ```
//! use jtabs_core::{HeaderRef, TabPage, TabsOptions};
//!
//! let html = r#"
//! <p class="tab-title tabgroup-lang">Python</p>
//! <p class="tab-title tabgroup-lang">JS</p>
//! <div class="tab-content tabgroup-lang"><p>pip install</p></div>
//! <div class="tab-content tabgroup-lang"><p>npm install</p></div>
//! "#;
//!
//! let mut page = TabPage::load(html, TabsOptions::default()).unwrap();
//! assert_eq!(page.groups()[0].active(), 0);
//!
//! page.click(HeaderRef::new(0, 1)).unwrap();
//! assert_eq!(page.groups()[0].active(), 1);
//! assert!(page.to_html().contains(r#"<ul class="tab" data-tab="tab-content-lang">"#));
//! ```

mod builder;
mod clipboard;
mod error;
mod group;
mod markers;
mod options;
mod page;

pub use clipboard::{
    Clipboard, ClipboardError, ClipboardHost, CopyButton, CopyOutcome, copy_to_clipboard,
};
pub use error::TabsError;
pub use group::{HeaderRef, TabGroup, TabHeader, TabPanel};
pub use jtabs_dom::{Document, NodeId};
pub use markers::{GroupMarkers, discover_groups, group_name};
pub use options::{DEFAULT_COPY_BUTTON_HTML, TabsOptions};
pub use page::{ClickBinding, ClickOutcome, TabPage};
