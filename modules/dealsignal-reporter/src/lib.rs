pub mod drafter;
pub mod report;

pub use drafter::{AiCommentDrafter, CommentDrafter, DEFAULT_COMMENT};
pub use report::{render_text_report, Reporter, REPORT_JSON, REPORT_TXT};
