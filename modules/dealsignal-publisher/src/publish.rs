use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

use dealsignal_common::types::VideoScript;
use runway_client::{RunwayClient, TextToVideoInput};
use youtube_client::{VideoMetadata, YouTubeClient};

use crate::seo::{metadata_or_default, MetadataGenerator};

/// Clip length requested from the generation vendor, in seconds.
const VIDEO_DURATION_SECS: u32 = 120;
const VIDEO_RATIO: &str = "1280:720";

#[derive(Debug, Default)]
pub struct PublishStats {
    pub scripts: u32,
    pub videos_generated: u32,
    pub generation_failures: u32,
    pub uploads_completed: u32,
    pub upload_failures: u32,
}

impl std::fmt::Display for PublishStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== Publish Run Complete ===")?;
        writeln!(f, "Scripts processed:   {}", self.scripts)?;
        writeln!(f, "Videos generated:    {}", self.videos_generated)?;
        writeln!(f, "Generation failures: {}", self.generation_failures)?;
        writeln!(f, "Uploads completed:   {}", self.uploads_completed)?;
        writeln!(f, "Upload failures:     {}", self.upload_failures)?;
        Ok(())
    }
}

#[async_trait]
pub trait VideoGenerator: Send + Sync {
    async fn generate(&self, script: &VideoScript, out_dir: &Path) -> Result<PathBuf>;
}

#[async_trait]
pub trait VideoUploader: Send + Sync {
    async fn upload(&self, file: &Path, metadata: &VideoMetadata) -> Result<String>;
}

/// Builds the generation prompt and drives the vendor's submit/poll/download
/// lifecycle.
pub struct RunwayGenerator {
    client: RunwayClient,
}

impl RunwayGenerator {
    pub fn new(client: RunwayClient) -> Self {
        Self { client }
    }
}

/// Combine title and script into one generation prompt. The framing asks
/// for pure visuals; burned-in captions have to be avoided because the
/// script is delivered by the narration track.
pub fn video_prompt(script: &VideoScript) -> String {
    format!(
        "Create a 2-minute corporate-style video about '{title}'. The video should be \
         informative and visually engaging for a financial professional audience. Use stock \
         footage, motion graphics, and smooth transitions. IMPORTANT: Do NOT include any text \
         overlays, captions, or on-screen text. The overall tone should be professional and \
         polished. The script to follow is: {script}",
        title = script.title,
        script = script.script_text,
    )
}

#[async_trait]
impl VideoGenerator for RunwayGenerator {
    async fn generate(&self, script: &VideoScript, out_dir: &Path) -> Result<PathBuf> {
        let input = TextToVideoInput {
            prompt_text: video_prompt(script),
            duration: VIDEO_DURATION_SECS,
            ratio: VIDEO_RATIO.to_string(),
        };
        let path = self
            .client
            .generate_to_file(&input, &script.title, out_dir)
            .await?;
        Ok(path)
    }
}

pub struct YouTubeUploader {
    client: YouTubeClient,
}

impl YouTubeUploader {
    pub fn new(client: YouTubeClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VideoUploader for YouTubeUploader {
    async fn upload(&self, file: &Path, metadata: &VideoMetadata) -> Result<String> {
        Ok(self.client.upload(file, metadata).await?)
    }
}

/// Chains generation → metadata → upload per script. A stage failure skips
/// the script; nothing is retried or rolled back.
pub struct Publisher {
    generator: Box<dyn VideoGenerator>,
    uploader: Box<dyn VideoUploader>,
    metadata: Box<dyn MetadataGenerator>,
    output_dir: PathBuf,
}

impl Publisher {
    pub fn new(
        generator: Box<dyn VideoGenerator>,
        uploader: Box<dyn VideoUploader>,
        metadata: Box<dyn MetadataGenerator>,
        output_dir: &Path,
    ) -> Self {
        Self {
            generator,
            uploader,
            metadata,
            output_dir: output_dir.to_path_buf(),
        }
    }

    pub async fn publish_all(&self, scripts: &[VideoScript]) -> PublishStats {
        let mut stats = PublishStats::default();

        for script in scripts {
            stats.scripts += 1;
            info!(title = %script.title, "Processing script");

            let video_path = match self.generator.generate(script, &self.output_dir).await {
                Ok(path) => {
                    stats.videos_generated += 1;
                    path
                }
                Err(e) => {
                    warn!(title = %script.title, error = %e, "Video generation failed, skipping upload");
                    stats.generation_failures += 1;
                    continue;
                }
            };

            let meta = metadata_or_default(self.metadata.as_ref(), script).await;
            let upload_meta = VideoMetadata::new(meta.title, meta.description, meta.tags);

            match self.uploader.upload(&video_path, &upload_meta).await {
                Ok(video_id) => {
                    info!(title = %script.title, video_id = %video_id, "Published");
                    stats.uploads_completed += 1;
                }
                Err(e) => {
                    warn!(title = %script.title, error = %e, "Upload failed, skipping");
                    stats.upload_failures += 1;
                }
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::seo::{default_metadata, SeoMetadata};

    struct FailingGenerator;

    #[async_trait]
    impl VideoGenerator for FailingGenerator {
        async fn generate(&self, _script: &VideoScript, _out_dir: &Path) -> Result<PathBuf> {
            anyhow::bail!("Task failed with status: FAILED")
        }
    }

    struct FakeGenerator;

    #[async_trait]
    impl VideoGenerator for FakeGenerator {
        async fn generate(&self, script: &VideoScript, out_dir: &Path) -> Result<PathBuf> {
            let path = out_dir.join(format!("{}.mp4", script.title.len()));
            std::fs::write(&path, b"video")?;
            Ok(path)
        }
    }

    #[derive(Default)]
    struct RecordingUploader {
        calls: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl VideoUploader for RecordingUploader {
        async fn upload(&self, _file: &Path, metadata: &VideoMetadata) -> Result<String> {
            self.calls.lock().unwrap().push(metadata.title.clone());
            Ok("vid-123".to_string())
        }
    }

    struct DefaultMetadata;

    #[async_trait]
    impl MetadataGenerator for DefaultMetadata {
        async fn generate(&self, script: &VideoScript) -> Result<SeoMetadata> {
            Ok(default_metadata(script))
        }
    }

    fn scripts() -> Vec<VideoScript> {
        vec![
            VideoScript {
                title: "One".to_string(),
                script_text: "s1".to_string(),
                source_url: "https://blog.test/1".to_string(),
            },
            VideoScript {
                title: "Two longer".to_string(),
                script_text: "s2".to_string(),
                source_url: "https://blog.test/2".to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn test_terminal_generation_failure_never_uploads() {
        let dir = tempfile::tempdir().unwrap();
        let uploader = RecordingUploader::default();
        let calls = Arc::clone(&uploader.calls);
        let publisher = Publisher::new(
            Box::new(FailingGenerator),
            Box::new(uploader),
            Box::new(DefaultMetadata),
            dir.path(),
        );

        let stats = publisher.publish_all(&scripts()).await;

        assert_eq!(stats.generation_failures, 2);
        assert_eq!(stats.uploads_completed, 0);
        // The uploader was never reached.
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_happy_path_uploads_every_script() {
        let dir = tempfile::tempdir().unwrap();
        let publisher = Publisher::new(
            Box::new(FakeGenerator),
            Box::new(RecordingUploader::default()),
            Box::new(DefaultMetadata),
            dir.path(),
        );

        let stats = publisher.publish_all(&scripts()).await;
        assert_eq!(stats.videos_generated, 2);
        assert_eq!(stats.uploads_completed, 2);
        assert_eq!(stats.upload_failures, 0);
    }

    #[test]
    fn test_video_prompt_embeds_title_and_script() {
        let script = &scripts()[0];
        let prompt = video_prompt(script);
        assert!(prompt.contains("'One'"));
        assert!(prompt.contains("The script to follow is: s1"));
    }
}
