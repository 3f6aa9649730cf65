//! Built-in persona tools for Troupe.
//!
//! Three tool families, one per persona:
//! - music: generate a track via the remote synthesis service, look up
//!   mood presets
//! - billing: process payments and inspect the customer ledger
//! - marketing: find existing tracks, cut samples, post to social media
//!
//! Every tool speaks the string-in/string-out contract the ReAct loop
//! expects; "business" failures (wrong amount, missing file) come back
//! as explanatory strings, not errors, so the model can react to them.

pub mod billing;
pub mod marketing;
pub mod music;
pub mod synth;

use std::path::PathBuf;
use std::sync::Arc;
use synth::SynthClient;
use troupe_core::record::RecordStore;
use troupe_core::tool::ToolSet;

/// The Music Producer's tool set.
pub fn music_tools(synth: Arc<dyn SynthClient>, music_dir: impl Into<PathBuf>) -> ToolSet {
    let music_dir = music_dir.into();
    let mut set = ToolSet::new();
    set.register(Box::new(music::GenerateMusicTool::new(synth, music_dir)));
    set.register(Box::new(music::MoodPresetTool));
    set
}

/// The Finance Manager's tool set.
pub fn billing_tools(store: Arc<dyn RecordStore>) -> ToolSet {
    let mut set = ToolSet::new();
    set.register(Box::new(billing::ProcessPaymentTool::new(store.clone())));
    set.register(Box::new(billing::CheckSubscriptionTool::new(store.clone())));
    set.register(Box::new(billing::ListCustomersTool::new(store)));
    set
}

/// The Marketing Manager's tool set.
pub fn marketing_tools(music_dir: impl Into<PathBuf>) -> ToolSet {
    let music_dir = music_dir.into();
    let mut set = ToolSet::new();
    set.register(Box::new(marketing::LatestMusicTool::new(music_dir)));
    set.register(Box::new(marketing::CreateSampleTool));
    set.register(Box::new(marketing::PostSocialTool));
    set
}
