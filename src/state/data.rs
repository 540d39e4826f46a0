/// Shared data structures for the application state
///
/// These types represent the data model that flows between
/// the controller, the generation client and the UI layer.

use chrono::{DateTime, Local};
use std::fmt;
use std::path::PathBuf;

/// Stage of the single user journey. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplicationState {
    #[default]
    Idle,
    /// A valid image was accepted and is being read/encoded
    Uploading,
    Configuring,
    /// Config frozen, generation call in flight
    Generating,
    Success,
    /// Intake failed or a precondition was violated; only upload/reset remain
    Error,
}

/// Kind of event the venue should be decorated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EventType {
    #[default]
    WeddingReception,
    CorporateConference,
    GalaDinner,
    BirthdayParty,
    ExhibitionBooth,
    ConcertStage,
    ProductLaunch,
}

impl EventType {
    /// All event types in display order
    pub const ALL: [EventType; 7] = [
        EventType::WeddingReception,
        EventType::CorporateConference,
        EventType::GalaDinner,
        EventType::BirthdayParty,
        EventType::ExhibitionBooth,
        EventType::ConcertStage,
        EventType::ProductLaunch,
    ];

    /// Human-readable label, also used verbatim in prompts
    pub fn label(self) -> &'static str {
        match self {
            EventType::WeddingReception => "Wedding Reception",
            EventType::CorporateConference => "Corporate Conference",
            EventType::GalaDinner => "Gala Dinner",
            EventType::BirthdayParty => "Birthday Party",
            EventType::ExhibitionBooth => "Exhibition Booth",
            EventType::ConcertStage => "Concert Stage",
            EventType::ProductLaunch => "Product Launch",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Handle to a user-selected image file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Full path on disk
    pub path: PathBuf,
    /// Filename only (e.g., "venue.jpg")
    pub file_name: String,
    /// MIME type declared by the file extension (e.g., "image/jpeg")
    pub mime_type: String,
}

/// User-entered generation parameters
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationConfig {
    /// Selected venue photo, None until an image is accepted
    pub image: Option<ImageFile>,
    pub event_type: EventType,
    pub theme: String,
    pub color_palette: String,
    pub additional_notes: String,
}

/// Single-field edit of a `GenerationConfig`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigUpdate {
    EventType(EventType),
    Theme(String),
    ColorPalette(String),
    AdditionalNotes(String),
}

impl GenerationConfig {
    /// Replace exactly one field, leaving the others untouched
    pub fn apply(&mut self, update: ConfigUpdate) {
        match update {
            ConfigUpdate::EventType(event_type) => self.event_type = event_type,
            ConfigUpdate::Theme(theme) => self.theme = theme,
            ConfigUpdate::ColorPalette(palette) => self.color_palette = palette,
            ConfigUpdate::AdditionalNotes(notes) => self.additional_notes = notes,
        }
    }

    /// Short description of the run, e.g. "Gala Dinner - Art Deco - Black & Gold"
    pub fn prompt_summary(&self) -> String {
        format!("{} - {} - {}", self.event_type, self.theme, self.color_palette)
    }
}

/// An image read from disk and base64-encoded for preview and upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime_type: String,
    pub base64: String,
}

impl EncodedImage {
    pub fn data_uri(&self) -> String {
        crate::intake::data_uri(&self.mime_type, &self.base64)
    }
}

/// Frozen snapshot of everything one generation call needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub image: EncodedImage,
    pub event_type: EventType,
    pub theme: String,
    pub color_palette: String,
    pub additional_notes: String,
}

/// Image returned by the generation service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub base64: String,
}

impl GeneratedImage {
    pub fn data_uri(&self) -> String {
        crate::intake::data_uri(&self.mime_type, &self.base64)
    }
}

/// Result of one generation call. The reason is for logs, not for users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Success(GeneratedImage),
    Failure(String),
}

/// Original/generated pair shown by the result view
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedResult {
    /// Data URI of the uploaded photo (same string as the preview)
    pub original_image: String,
    /// Data URI of the decorated rendering
    pub generated_image: String,
    pub prompt_used: String,
    pub generated_at: DateTime<Local>,
}
