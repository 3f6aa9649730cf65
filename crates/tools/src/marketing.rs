//! Marketing tools — find existing tracks, cut samples, post.
//!
//! The Marketing Manager only promotes music that already exists; its
//! tools operate on the music directory the Music Producer writes into.
//! Social posting is simulated: the post confirmation is real, the
//! network call is not.

use async_trait::async_trait;
use chrono::Local;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::info;
use troupe_core::error::ToolError;
use troupe_core::tool::Tool;

/// Finds the most recently generated track.
pub struct LatestMusicTool {
    music_dir: PathBuf,
}

impl LatestMusicTool {
    pub fn new(music_dir: impl Into<PathBuf>) -> Self {
        Self {
            music_dir: music_dir.into(),
        }
    }
}

#[async_trait]
impl Tool for LatestMusicTool {
    fn name(&self) -> &str {
        "get_latest_music"
    }

    fn description(&self) -> &str {
        "Gets the latest generated music file path. Input: {}. Returns the path to the most recent music file."
    }

    async fn invoke(&self, _input: Map<String, Value>) -> Result<String, ToolError> {
        let entries = match std::fs::read_dir(&self.music_dir) {
            Ok(entries) => entries,
            Err(_) => return Ok("No music directory found. Generate music first.".into()),
        };

        // Generated filenames carry a sortable timestamp, so the
        // lexicographically greatest name is the newest track. Samples
        // are excluded — they are derived files, not originals.
        let mut files: Vec<String> = entries
            .filter_map(|e| e.ok())
            .filter_map(|e| e.file_name().into_string().ok())
            .filter(|name| name.ends_with(".mp3") && !name.contains("_sample_"))
            .collect();

        if files.is_empty() {
            return Ok("No music files found. Generate music first.".into());
        }

        files.sort();
        let latest = self.music_dir.join(files.last().unwrap());
        Ok(format!("Latest music file: {}", latest.display()))
    }
}

/// Cuts a preview sample from a track. The cut itself is simulated by a
/// file copy; only the naming convention matters to the rest of the flow.
pub struct CreateSampleTool;

#[async_trait]
impl Tool for CreateSampleTool {
    fn name(&self) -> &str {
        "create_music_sample"
    }

    fn description(&self) -> &str {
        "Creates a preview sample from a music file. Input: {\"music_file\": \"path\", \"duration\": seconds (optional, default 30)}. Returns the path to the sample file."
    }

    async fn invoke(&self, input: Map<String, Value>) -> Result<String, ToolError> {
        let music_file = input
            .get("music_file")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'music_file' argument".into()))?;
        let duration = input
            .get("duration")
            .and_then(|v| v.as_u64())
            .unwrap_or(30);

        if !Path::new(music_file).exists() {
            return Ok(format!("Music file not found: {music_file}"));
        }

        let sample_path = music_file.replace(".mp3", &format!("_sample_{duration}s.mp3"));
        std::fs::copy(music_file, &sample_path).map_err(|e| ToolError::ExecutionFailed {
            tool_name: self.name().into(),
            reason: format!("Failed to create sample: {e}"),
        })?;

        Ok(format!("Sample created: {sample_path} ({duration} seconds)"))
    }
}

/// Posts a track to social media. Simulated: returns a confirmation with
/// a generated post id.
pub struct PostSocialTool;

#[async_trait]
impl Tool for PostSocialTool {
    fn name(&self) -> &str {
        "post_to_social_media"
    }

    fn description(&self) -> &str {
        "Posts music to social media platforms. Input: {\"music_file\": \"path\", \"caption\": \"engaging caption\", \"platform\": \"Twitter|Instagram|Facebook|all\" (optional, default \"all\")}. Returns confirmation of the post with details."
    }

    async fn invoke(&self, input: Map<String, Value>) -> Result<String, ToolError> {
        let music_file = input
            .get("music_file")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'music_file' argument".into()))?;
        let caption = input
            .get("caption")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'caption' argument".into()))?;
        let platform = input
            .get("platform")
            .and_then(|v| v.as_str())
            .unwrap_or("all");

        if !Path::new(music_file).exists() {
            return Ok(format!("Music file not found: {music_file}"));
        }

        let platforms = if platform == "all" {
            vec!["Twitter", "Instagram", "Facebook"]
        } else {
            vec![platform]
        };

        let now = Local::now();
        let post_id = format!("POST_{}", now.format("%Y%m%d%H%M%S"));
        info!(%post_id, platforms = ?platforms, "Posting to social media");

        Ok(format!(
            "Posted to {}!\n- File: {music_file}\n- Caption: {caption}\n- Post ID: {post_id}\n- Time: {}",
            platforms.join(", "),
            now.format("%Y-%m-%d %H:%M:%S")
        ))
    }
}
