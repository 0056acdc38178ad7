pub mod pipeline;
pub mod text;

pub use pipeline::{AiScriptGenerator, BlogSource, ContentPipeline, ScriptGenerator};
pub use text::{extract_block_text, extract_post_links, title_from_slug, truncate_chars};
