//! Music tools — generation via the synthesis service, and mood presets.

use crate::synth::{SynthClient, SynthError};
use async_trait::async_trait;
use chrono::Local;
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use troupe_core::error::ToolError;
use troupe_core::tool::Tool;

/// Generates a track through the remote synthesis service and saves it
/// under the music directory.
pub struct GenerateMusicTool {
    synth: Arc<dyn SynthClient>,
    music_dir: PathBuf,
}

impl GenerateMusicTool {
    pub fn new(synth: Arc<dyn SynthClient>, music_dir: impl Into<PathBuf>) -> Self {
        Self {
            synth,
            music_dir: music_dir.into(),
        }
    }
}

#[async_trait]
impl Tool for GenerateMusicTool {
    fn name(&self) -> &str {
        "generate_music"
    }

    fn description(&self) -> &str {
        "Generates AI music with custom parameters. Input: {\"tags\": \"style descriptors\", \"lyrics\": \"[verse]\\n...\", \"duration\": seconds (optional, default 15)}. Returns the path to the generated music file."
    }

    async fn invoke(&self, input: Map<String, Value>) -> Result<String, ToolError> {
        let tags = input
            .get("tags")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'tags' argument".into()))?;
        let lyrics = input
            .get("lyrics")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'lyrics' argument".into()))?;
        let duration = input
            .get("duration")
            .and_then(|v| v.as_u64())
            .unwrap_or(15) as u32;

        info!(duration, "Music generation started");

        // Service failures become recovery hints for the model, never
        // hard errors: the loop feeds them back as observations.
        let audio = match self.synth.synthesize(tags, lyrics, duration).await {
            Ok(bytes) => bytes,
            Err(SynthError::Quota) => {
                warn!("Synthesis quota exceeded");
                return Ok("GPU quota exceeded. The free synthesis service is currently at capacity. Please try again in 5-10 minutes or use a shorter duration (5-10 seconds).".into());
            }
            Err(SynthError::Timeout) => {
                return Ok(
                    "Request timeout. The service is busy. Please wait a few minutes and try again."
                        .into(),
                );
            }
            Err(SynthError::Network(_)) => {
                return Ok(
                    "Network error. Please check your internet connection and try again.".into(),
                );
            }
            Err(SynthError::Failed(msg)) => {
                let truncated: String = msg.chars().take(200).collect();
                return Ok(format!("Error generating music: {truncated}"));
            }
        };

        std::fs::create_dir_all(&self.music_dir).map_err(|e| ToolError::ExecutionFailed {
            tool_name: self.name().into(),
            reason: format!("Failed to create music directory: {e}"),
        })?;

        let filename = format!("music_{}.mp3", Local::now().format("%Y%m%d_%H%M%S"));
        let output_path = self.music_dir.join(filename);
        std::fs::write(&output_path, audio).map_err(|e| ToolError::ExecutionFailed {
            tool_name: self.name().into(),
            reason: format!("Failed to save music file: {e}"),
        })?;

        info!(path = %output_path.display(), "Music saved");
        Ok(format!(
            "Music generated successfully: {}",
            output_path.display()
        ))
    }
}

/// Returns preset tags and lyrics for a named mood, as a JSON string.
pub struct MoodPresetTool;

const MOODS: &[(&str, &str, &str)] = &[
    (
        "happy",
        "upbeat, cheerful, bright, major key, 120 BPM",
        "[verse]\nFeeling good today\n[chorus]\nHappiness all the way",
    ),
    (
        "sad",
        "melancholic, emotional, slow, minor key, 70 BPM",
        "[verse]\nQuiet moments here\n[chorus]\nFeeling all the tears",
    ),
    (
        "energetic",
        "fast, powerful, intense, driving, 140 BPM",
        "[verse]\nFull of energy\n[chorus]\nUnstoppable velocity",
    ),
    (
        "calm",
        "peaceful, ambient, relaxing, meditation, 80 BPM",
        "[verse]\nCalm and serene\n[chorus]\nPeaceful scene",
    ),
    (
        "epic",
        "cinematic, orchestral, dramatic, powerful, 110 BPM",
        "[verse]\nRising to the heights\n[chorus]\nEpic in our sights",
    ),
    (
        "chill",
        "lo-fi, relaxed, smooth, laid-back, 90 BPM",
        "[verse]\nTaking it easy\n[chorus]\nFeeling breezy",
    ),
];

#[async_trait]
impl Tool for MoodPresetTool {
    fn name(&self) -> &str {
        "get_music_mood_preset"
    }

    fn description(&self) -> &str {
        "Get preset tags and lyrics for a specific mood. Input: {\"mood\": \"happy|sad|energetic|calm|epic|chill\"}. Returns a JSON string with 'tags' and 'lyrics' for the mood."
    }

    async fn invoke(&self, input: Map<String, Value>) -> Result<String, ToolError> {
        let mood = input
            .get("mood")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'mood' argument".into()))?
            .to_lowercase();

        match MOODS.iter().find(|(name, _, _)| *name == mood) {
            Some((_, tags, lyrics)) => {
                Ok(serde_json::json!({"tags": tags, "lyrics": lyrics}).to_string())
            }
            None => {
                let available: Vec<&str> = MOODS.iter().map(|(name, _, _)| *name).collect();
                Ok(serde_json::json!({
                    "error": format!("Unknown mood: {mood}. Available: {}", available.join(", "))
                })
                .to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::{FailingSynth, FakeSynth};

    fn args(json: Value) -> Map<String, Value> {
        json.as_object().unwrap().clone()
    }

    #[tokio::test]
    async fn generate_saves_file_and_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let tool = GenerateMusicTool::new(Arc::new(FakeSynth::default()), dir.path());

        let out = tool
            .invoke(args(serde_json::json!({
                "tags": "upbeat, cheerful",
                "lyrics": "[verse]\nFeeling good today",
                "duration": 5
            })))
            .await
            .unwrap();

        assert!(out.starts_with("Music generated successfully: "));
        let path = out.trim_start_matches("Music generated successfully: ");
        assert!(std::path::Path::new(path).exists());
        assert!(path.ends_with(".mp3"));
    }

    #[tokio::test]
    async fn generate_missing_tags_is_invalid_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let tool = GenerateMusicTool::new(Arc::new(FakeSynth::default()), dir.path());
        let result = tool.invoke(args(serde_json::json!({"lyrics": "x"}))).await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }

    #[tokio::test]
    async fn quota_error_becomes_friendly_message() {
        let dir = tempfile::tempdir().unwrap();
        let tool = GenerateMusicTool::new(Arc::new(FailingSynth::new(SynthError::Quota)), dir.path());

        let out = tool
            .invoke(args(serde_json::json!({"tags": "t", "lyrics": "l"})))
            .await
            .unwrap();
        assert!(out.contains("GPU quota exceeded"));
    }

    #[tokio::test]
    async fn timeout_error_becomes_friendly_message() {
        let dir = tempfile::tempdir().unwrap();
        let tool =
            GenerateMusicTool::new(Arc::new(FailingSynth::new(SynthError::Timeout)), dir.path());

        let out = tool
            .invoke(args(serde_json::json!({"tags": "t", "lyrics": "l"})))
            .await
            .unwrap();
        assert!(out.contains("Request timeout"));
    }

    #[tokio::test]
    async fn generic_failure_is_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let long = "x".repeat(500);
        let tool = GenerateMusicTool::new(
            Arc::new(FailingSynth::new(SynthError::Failed(long))),
            dir.path(),
        );

        let out = tool
            .invoke(args(serde_json::json!({"tags": "t", "lyrics": "l"})))
            .await
            .unwrap();
        assert!(out.starts_with("Error generating music: "));
        assert!(out.len() < 250);
    }

    #[tokio::test]
    async fn preset_returns_json_for_known_mood() {
        let out = MoodPresetTool
            .invoke(args(serde_json::json!({"mood": "happy"})))
            .await
            .unwrap();

        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert!(parsed["tags"].as_str().unwrap().contains("upbeat"));
        assert!(parsed["lyrics"].as_str().unwrap().contains("[verse]"));
    }

    #[tokio::test]
    async fn preset_is_case_insensitive() {
        let out = MoodPresetTool
            .invoke(args(serde_json::json!({"mood": "EPIC"})))
            .await
            .unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert!(parsed["tags"].as_str().unwrap().contains("cinematic"));
    }

    #[tokio::test]
    async fn preset_unknown_mood_lists_available() {
        let out = MoodPresetTool
            .invoke(args(serde_json::json!({"mood": "grumpy"})))
            .await
            .unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        let error = parsed["error"].as_str().unwrap();
        assert!(error.contains("Unknown mood: grumpy"));
        assert!(error.contains("chill"));
    }
}
