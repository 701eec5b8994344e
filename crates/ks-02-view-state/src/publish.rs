//! # Publish Flow
//!
//! Linear steps from picking a video to an on-chain channel:
//!
//! ```text
//! Initial -> Uploading -> Processing -> Metadata -> Preview -> Publishing -> Complete
//!                                                     ^            |
//!                                                     +-- failure -+
//! ```
//!
//! Progress values are fed in by the caller; reaching 100 moves to the next
//! step. Publishing creates a channel with [`DEFAULT_INITIAL_SHARES`] and the
//! video preview as its image.

use crate::errors::FormError;
use ks_01_chain_gateway::{
    ChainGatewayApi, CreatedChannel, NewChannel, ObjectId, DEFAULT_INITIAL_SHARES,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Shown once the reel is on-chain.
pub const PUBLISH_SUCCESS_MESSAGE: &str = "Your reel has been published to the SUI blockchain!";

/// Upload categories offered by the metadata form.
pub const CATEGORIES: [(&str, &str); 6] = [
    ("physics", "Physics"),
    ("history", "History"),
    ("psychology", "Psychology"),
    ("technology", "Technology"),
    ("math", "Mathematics"),
    ("biology", "Biology"),
];

/// Step of the publish flow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishStep {
    /// Nothing selected.
    #[default]
    Initial,
    /// Video transferring.
    Uploading,
    /// Video transcoding.
    Processing,
    /// Editing title, category, tags.
    Metadata,
    /// Reviewing before publish.
    Preview,
    /// Create-channel write in flight.
    Publishing,
    /// Channel created.
    Complete,
}

impl PublishStep {
    /// Lowercase step name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishStep::Initial => "initial",
            PublishStep::Uploading => "uploading",
            PublishStep::Processing => "processing",
            PublishStep::Metadata => "metadata",
            PublishStep::Preview => "preview",
            PublishStep::Publishing => "publishing",
            PublishStep::Complete => "complete",
        }
    }
}

/// Selected video.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoFile {
    /// File name.
    pub name: String,
    /// MIME type reported by the picker.
    pub mime_type: String,
    /// Local preview URL.
    pub preview_url: String,
}

impl VideoFile {
    /// Whether the MIME type is a video type.
    pub fn is_video(&self) -> bool {
        self.mime_type.contains("video/")
    }
}

/// Series membership.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesInfo {
    /// Series title.
    pub title: String,
    /// Episode number as typed.
    pub episode: String,
}

/// Content metadata edited in the Metadata step.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentMetadata {
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Category display name.
    pub category: String,
    /// Unique, trimmed tags in insertion order.
    pub tags: Vec<String>,
    /// Series membership, if part of one.
    pub series: Option<SeriesInfo>,
    /// Version this reel derives from, for alternate takes.
    pub original_version_id: Option<String>,
}

impl ContentMetadata {
    /// Add a tag; blank and duplicate tags are ignored.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Remove `tag` if present.
    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }
}

/// State of one publish session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PublishFlow {
    step: PublishStep,
    upload_progress: f64,
    processing_progress: f64,
    video: Option<VideoFile>,
    /// Editable metadata.
    pub metadata: ContentMetadata,
    channel_id: Option<ObjectId>,
    notice: Option<String>,
}

impl PublishFlow {
    /// New flow at [`PublishStep::Initial`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step.
    pub fn step(&self) -> PublishStep {
        self.step
    }

    /// Upload progress, percent.
    pub fn upload_progress(&self) -> f64 {
        self.upload_progress
    }

    /// Processing progress, percent.
    pub fn processing_progress(&self) -> f64 {
        self.processing_progress
    }

    /// Selected video.
    pub fn video(&self) -> Option<&VideoFile> {
        self.video.as_ref()
    }

    /// Channel created by a completed publish.
    pub fn channel_id(&self) -> Option<&ObjectId> {
        self.channel_id.as_ref()
    }

    /// Message for the user after a successful publish.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    fn expect_step(&self, expected: PublishStep, action: &'static str) -> Result<(), FormError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(FormError::WrongStep {
                action,
                step: self.step.as_str(),
            })
        }
    }

    /// Pick a video and start uploading.
    pub fn select_file(&mut self, wallet_connected: bool, file: VideoFile) -> Result<(), FormError> {
        if !wallet_connected {
            return Err(FormError::WalletNotConnected);
        }
        self.expect_step(PublishStep::Initial, "select a file")?;
        if !file.is_video() {
            return Err(FormError::NotAVideo);
        }
        self.video = Some(file);
        self.upload_progress = 0.0;
        self.step = PublishStep::Uploading;
        Ok(())
    }

    /// Add `delta` percent of upload progress; 100 moves to Processing.
    pub fn advance_upload(&mut self, delta: f64) -> Result<PublishStep, FormError> {
        self.expect_step(PublishStep::Uploading, "advance upload")?;
        self.upload_progress = (self.upload_progress + delta.max(0.0)).min(100.0);
        if self.upload_progress >= 100.0 {
            self.processing_progress = 0.0;
            self.step = PublishStep::Processing;
        }
        Ok(self.step)
    }

    /// Add `delta` percent of processing progress; 100 moves to Metadata.
    pub fn advance_processing(&mut self, delta: f64) -> Result<PublishStep, FormError> {
        self.expect_step(PublishStep::Processing, "advance processing")?;
        self.processing_progress = (self.processing_progress + delta.max(0.0)).min(100.0);
        if self.processing_progress >= 100.0 {
            self.step = PublishStep::Metadata;
        }
        Ok(self.step)
    }

    /// Finish metadata entry and move to Preview.
    pub fn submit_metadata(&mut self) -> Result<(), FormError> {
        self.expect_step(PublishStep::Metadata, "submit metadata")?;
        if self.metadata.title.trim().is_empty() || self.metadata.category.trim().is_empty() {
            return Err(FormError::MissingFields);
        }
        self.step = PublishStep::Preview;
        Ok(())
    }

    /// Go back from Preview to edit metadata.
    pub fn edit_metadata(&mut self) -> Result<(), FormError> {
        self.expect_step(PublishStep::Preview, "edit metadata")?;
        self.step = PublishStep::Metadata;
        Ok(())
    }

    /// Create the channel through `gateway`.
    ///
    /// On failure the flow returns to Preview so the user can retry.
    pub async fn publish<G: ChainGatewayApi + ?Sized>(
        &mut self,
        gateway: &G,
    ) -> Result<CreatedChannel, FormError> {
        if !gateway.is_connected() {
            return Err(FormError::WalletNotConnected);
        }
        self.expect_step(PublishStep::Preview, "publish")?;
        self.step = PublishStep::Publishing;
        self.notice = None;

        let channel = NewChannel {
            name: self.metadata.title.clone(),
            description: self.metadata.description.clone(),
            category: self.metadata.category.clone(),
            initial_shares: DEFAULT_INITIAL_SHARES,
            image_url: self.video.as_ref().map(|v| v.preview_url.clone()),
        };

        match gateway.create_channel(channel).await {
            Ok(created) => {
                info!("[ks-02] Published \"{}\": {}", self.metadata.title, PUBLISH_SUCCESS_MESSAGE);
                self.channel_id = created.channel_id.clone();
                self.notice = Some(PUBLISH_SUCCESS_MESSAGE.to_string());
                self.step = PublishStep::Complete;
                Ok(created)
            }
            Err(e) => {
                error!("[ks-02] Publish failed: {}", e);
                self.step = PublishStep::Preview;
                Err(FormError::PublishFailed)
            }
        }
    }

    /// Clear everything and return to Initial.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
