mod from_html;
pub use from_html::FromHTML;

mod renderer;
pub use renderer::PageRenderer;
