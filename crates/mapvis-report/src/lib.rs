//! Renderers for [`mapvis_model::TableModel`].

#![deny(unsafe_code)]

pub mod html;
pub mod json;
pub mod terminal;

pub use html::{HtmlOptions, HtmlReport, render_html, render_html_document};
pub use json::render_json;
pub use terminal::{TerminalOptions, render_terminal};
