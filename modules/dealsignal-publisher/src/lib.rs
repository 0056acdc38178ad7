pub mod publish;
pub mod seo;

pub use publish::{
    video_prompt, PublishStats, Publisher, RunwayGenerator, VideoGenerator, VideoUploader,
    YouTubeUploader,
};
pub use seo::{
    default_metadata, metadata_or_default, AiMetadataGenerator, MetadataGenerator, SeoMetadata,
    DEFAULT_TAGS,
};
