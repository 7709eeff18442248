// HTML output: markdown conversion for model replies and the page layout.

pub mod markdown;
pub mod page;

pub use markdown::markdown_to_html;
pub use page::{render_error_page, render_page};
