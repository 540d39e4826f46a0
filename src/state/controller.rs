use chrono::Local;
use tracing::{debug, info, warn};

use super::data::{
    ApplicationState, ConfigUpdate, EncodedImage, GeneratedResult, GenerationConfig,
    GenerationOutcome, GenerationRequest, ImageFile,
};
use crate::intake::{self, IntakeError};
use std::path::Path;

/// Shown when reading or encoding the selected photo fails
pub const INTAKE_FAILED_MESSAGE: &str = "Failed to process image";

/// Shown for every kind of generation failure
pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate visualization. Please try again. Ensure your image is clear.";

/// Shown if a submission somehow reaches the service without an encoded photo
const MISSING_IMAGE_MESSAGE: &str = "No venue photo is loaded. Please upload one again.";

/// The Controller owns the whole session state machine.
///
/// Views only get `&Controller`; every mutation goes through one of the
/// transition methods below, called from the application's `update`.
/// Transition methods that react to async work return `false` when the
/// outcome arrived in a state that did not ask for it and was dropped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Controller {
    stage: ApplicationState,
    config: GenerationConfig,
    /// Encoded photo, present from Configuring onwards
    source: Option<EncodedImage>,
    /// Data URI of `source`, captured once at intake
    preview: Option<String>,
    result: Option<GeneratedResult>,
    error: Option<String>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> ApplicationState {
        self.stage
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn result(&self) -> Option<&GeneratedResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a newly picked or dropped file would be taken
    pub fn accepts_upload(&self) -> bool {
        matches!(self.stage, ApplicationState::Idle | ApplicationState::Error)
    }

    /// Store an already validated image and start encoding (Idle/Error -> Uploading)
    pub fn begin_upload(&mut self, file: ImageFile) -> bool {
        if !self.accepts_upload() {
            debug!("Ignoring upload of {} while {:?}", file.file_name, self.stage);
            return false;
        }

        info!("📷 Accepted {} ({})", file.file_name, file.mime_type);
        self.config.image = Some(file);
        self.source = None;
        self.preview = None;
        self.error = None;
        self.stage = ApplicationState::Uploading;
        true
    }

    /// Validate a picked or dropped path and start the upload when it is an image.
    ///
    /// `Ok(None)` means intake is closed and the path was ignored. A rejected
    /// file leaves the session exactly as it was.
    pub fn offer(&mut self, path: &Path) -> Result<Option<ImageFile>, IntakeError> {
        if !self.accepts_upload() {
            debug!("Ignoring {} while {:?}", path.display(), self.stage);
            return Ok(None);
        }

        let file = intake::inspect(path)?;
        self.begin_upload(file.clone());
        Ok(Some(file))
    }

    /// Apply the outcome of the encode step (Uploading -> Configuring | Error)
    pub fn finish_upload(&mut self, outcome: Result<EncodedImage, IntakeError>) -> bool {
        if self.stage != ApplicationState::Uploading {
            debug!("Dropping stale encode result while {:?}", self.stage);
            return false;
        }

        match outcome {
            Ok(encoded) => {
                self.preview = Some(encoded.data_uri());
                self.source = Some(encoded);
                self.stage = ApplicationState::Configuring;
            }
            Err(e) => {
                warn!("⚠️  Image intake failed: {}", e);
                self.error = Some(INTAKE_FAILED_MESSAGE.to_string());
                self.stage = ApplicationState::Error;
            }
        }
        true
    }

    /// Edit one configuration field. Refused while a generation is in flight.
    pub fn update_config(&mut self, update: ConfigUpdate) -> bool {
        if self.stage == ApplicationState::Generating {
            debug!("Config is frozen while generating, ignoring {:?}", update);
            return false;
        }
        self.config.apply(update);
        true
    }

    /// Freeze the config and hand back the request to send (Configuring -> Generating).
    ///
    /// Returns None outside Configuring, so a second submit while generating
    /// never turns into a second outbound call.
    pub fn submit(&mut self) -> Option<GenerationRequest> {
        if self.stage != ApplicationState::Configuring {
            debug!("Ignoring submit while {:?}", self.stage);
            return None;
        }

        let Some(image) = self.source.clone() else {
            warn!("⚠️  Submit without an encoded image");
            self.error = Some(MISSING_IMAGE_MESSAGE.to_string());
            self.stage = ApplicationState::Error;
            return None;
        };

        self.error = None;
        self.stage = ApplicationState::Generating;
        info!("🎨 Submitting: {}", self.config.prompt_summary());

        Some(GenerationRequest {
            image,
            event_type: self.config.event_type,
            theme: self.config.theme.clone(),
            color_palette: self.config.color_palette.clone(),
            additional_notes: self.config.additional_notes.clone(),
        })
    }

    /// Apply the generation outcome (Generating -> Success | Configuring)
    pub fn finish_generation(&mut self, outcome: GenerationOutcome) -> bool {
        if self.stage != ApplicationState::Generating {
            debug!("Dropping stale generation outcome while {:?}", self.stage);
            return false;
        }

        match outcome {
            GenerationOutcome::Success(image) => {
                self.result = Some(GeneratedResult {
                    original_image: self.preview.clone().unwrap_or_default(),
                    generated_image: image.data_uri(),
                    prompt_used: self.config.prompt_summary(),
                    generated_at: Local::now(),
                });
                self.stage = ApplicationState::Success;
                info!("✅ Visualization ready");
            }
            GenerationOutcome::Failure(reason) => {
                warn!("❌ Generation failed: {}", reason);
                self.result = None;
                self.error = Some(GENERATION_FAILED_MESSAGE.to_string());
                self.stage = ApplicationState::Configuring;
            }
        }
        true
    }

    /// Back to Idle from anywhere. Theme, palette, notes and event type are kept.
    pub fn reset(&mut self) {
        debug!("Reset from {:?}", self.stage);
        self.stage = ApplicationState::Idle;
        self.config.image = None;
        self.source = None;
        self.preview = None;
        self.result = None;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::{EventType, GeneratedImage};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn venue_file() -> ImageFile {
        ImageFile {
            path: PathBuf::from("/photos/venue.jpg"),
            file_name: "venue.jpg".into(),
            mime_type: "image/jpeg".into(),
        }
    }

    fn venue_encoded() -> EncodedImage {
        EncodedImage {
            mime_type: "image/jpeg".into(),
            base64: "/9j/".into(),
        }
    }

    fn generated() -> GeneratedImage {
        GeneratedImage {
            mime_type: "image/png".into(),
            base64: "iVBORw0KGgo=".into(),
        }
    }

    fn configuring() -> Controller {
        let mut controller = Controller::new();
        assert!(controller.begin_upload(venue_file()));
        assert!(controller.finish_upload(Ok(venue_encoded())));
        controller
    }

    fn assert_result_iff_success(controller: &Controller) {
        assert_eq!(
            controller.result().is_some(),
            controller.stage() == ApplicationState::Success
        );
    }

    fn assert_image_unless_idle(controller: &Controller) {
        if controller.stage() != ApplicationState::Idle {
            assert!(controller.config().image.is_some());
        }
    }

    #[test]
    fn test_starts_idle() {
        let controller = Controller::new();
        assert_eq!(controller.stage(), ApplicationState::Idle);
        assert!(controller.accepts_upload());
        assert!(controller.result().is_none());
        assert!(controller.error().is_none());
    }

    #[test]
    fn test_upload_moves_to_configuring_with_preview() {
        let mut controller = Controller::new();
        assert!(controller.begin_upload(venue_file()));
        assert_eq!(controller.stage(), ApplicationState::Uploading);
        assert_image_unless_idle(&controller);

        assert!(controller.finish_upload(Ok(venue_encoded())));
        assert_eq!(controller.stage(), ApplicationState::Configuring);
        assert_eq!(controller.preview(), Some("data:image/jpeg;base64,/9j/"));

        // A duplicate completion is not applied twice
        assert!(!controller.finish_upload(Ok(venue_encoded())));
        assert_eq!(controller.stage(), ApplicationState::Configuring);
    }

    #[test]
    fn test_upload_refused_outside_idle() {
        let mut controller = configuring();
        let mut other = venue_file();
        other.file_name = "other.png".into();

        assert!(!controller.begin_upload(other));
        assert_eq!(controller.config().image, Some(venue_file()));
        assert_eq!(controller.stage(), ApplicationState::Configuring);
    }

    #[test]
    fn test_encode_failure_enters_error() {
        let mut controller = Controller::new();
        controller.begin_upload(venue_file());
        controller.finish_upload(Err(IntakeError::Read {
            path: PathBuf::from("/photos/venue.jpg"),
            reason: "permission denied".into(),
        }));

        assert_eq!(controller.stage(), ApplicationState::Error);
        assert_eq!(controller.error(), Some(INTAKE_FAILED_MESSAGE));
        assert!(controller.preview().is_none());
        assert_image_unless_idle(&controller);

        // Intake is open again from Error
        assert!(controller.accepts_upload());
        assert!(controller.begin_upload(venue_file()));
        assert!(controller.error().is_none());
        assert!(controller.finish_upload(Ok(venue_encoded())));
        assert_eq!(controller.stage(), ApplicationState::Configuring);
    }

    #[test]
    fn test_submit_freezes_config() {
        let mut controller = configuring();
        controller.update_config(ConfigUpdate::EventType(EventType::GalaDinner));
        controller.update_config(ConfigUpdate::Theme("Art Deco".into()));

        let request = controller.submit().unwrap();
        assert_eq!(controller.stage(), ApplicationState::Generating);
        assert_eq!(request.event_type, EventType::GalaDinner);
        assert_eq!(request.theme, "Art Deco");
        assert_eq!(request.image, venue_encoded());

        assert!(!controller.update_config(ConfigUpdate::Theme("Cyberpunk".into())));
        assert_eq!(controller.config().theme, "Art Deco");
    }

    #[test]
    fn test_second_submit_while_generating_is_dropped() {
        let mut controller = configuring();
        assert!(controller.submit().is_some());
        assert!(controller.submit().is_none());
        assert_eq!(controller.stage(), ApplicationState::Generating);
    }

    #[test]
    fn test_submit_refused_outside_configuring() {
        let mut controller = Controller::new();
        assert!(controller.submit().is_none());
        assert_eq!(controller.stage(), ApplicationState::Idle);

        controller.begin_upload(venue_file());
        assert!(controller.submit().is_none());
        assert_eq!(controller.stage(), ApplicationState::Uploading);
    }

    #[test]
    fn test_success_builds_result() {
        let mut controller = configuring();
        controller.update_config(ConfigUpdate::EventType(EventType::GalaDinner));
        controller.update_config(ConfigUpdate::Theme("Art Deco".into()));
        controller.update_config(ConfigUpdate::ColorPalette("Black & Gold".into()));
        controller.submit().unwrap();

        assert!(controller.finish_generation(GenerationOutcome::Success(generated())));
        assert_eq!(controller.stage(), ApplicationState::Success);
        assert_result_iff_success(&controller);

        let result = controller.result().unwrap();
        assert_eq!(Some(result.original_image.as_str()), controller.preview());
        assert_eq!(result.generated_image, "data:image/png;base64,iVBORw0KGgo=");
        assert_eq!(result.prompt_used, "Gala Dinner - Art Deco - Black & Gold");
    }

    #[test]
    fn test_failure_returns_to_configuring_with_fields_kept() {
        let mut controller = configuring();
        controller.update_config(ConfigUpdate::EventType(EventType::BirthdayParty));
        controller.update_config(ConfigUpdate::Theme("Minimalist Luxury".into()));
        controller.update_config(ConfigUpdate::ColorPalette("Pastel Pink & White".into()));
        controller.update_config(ConfigUpdate::AdditionalNotes("round tables".into()));
        let before = controller.config().clone();
        controller.submit().unwrap();

        assert!(controller.finish_generation(GenerationOutcome::Failure("HTTP 429".into())));
        assert_eq!(controller.stage(), ApplicationState::Configuring);
        assert_eq!(controller.error(), Some(GENERATION_FAILED_MESSAGE));
        assert_eq!(controller.config(), &before);
        assert!(controller.preview().is_some());
        assert_result_iff_success(&controller);

        // Retry without re-uploading clears the error
        assert!(controller.submit().is_some());
        assert!(controller.error().is_none());
    }

    #[test]
    fn test_stale_generation_outcome_is_ignored() {
        let mut controller = configuring();
        assert!(!controller.finish_generation(GenerationOutcome::Success(generated())));
        assert_eq!(controller.stage(), ApplicationState::Configuring);
        assert!(controller.result().is_none());
    }

    #[test]
    fn test_rerun_replaces_result() {
        let mut controller = configuring();
        controller.submit().unwrap();
        controller.finish_generation(GenerationOutcome::Success(generated()));
        let first = controller.result().unwrap().generated_image.clone();

        controller.reset();
        controller.begin_upload(venue_file());
        controller.finish_upload(Ok(venue_encoded()));
        controller.submit().unwrap();
        controller.finish_generation(GenerationOutcome::Success(GeneratedImage {
            mime_type: "image/jpeg".into(),
            base64: "/9j/AAAA".into(),
        }));

        let second = &controller.result().unwrap().generated_image;
        assert_ne!(&first, second);
        assert_eq!(second, "data:image/jpeg;base64,/9j/AAAA");
    }

    #[test]
    fn test_reset_from_every_state() {
        let mut in_uploading = Controller::new();
        in_uploading.begin_upload(venue_file());

        let mut in_error = Controller::new();
        in_error.begin_upload(venue_file());
        in_error.finish_upload(Err(IntakeError::Read {
            path: PathBuf::from("/photos/venue.jpg"),
            reason: "gone".into(),
        }));

        let mut in_generating = configuring();
        in_generating.submit().unwrap();

        let mut in_success = configuring();
        in_success.submit().unwrap();
        in_success.finish_generation(GenerationOutcome::Success(generated()));

        let states = vec![
            Controller::new(),
            in_uploading,
            configuring(),
            in_generating,
            in_success,
            in_error,
        ];

        for mut controller in states {
            controller.reset();
            assert_eq!(controller.stage(), ApplicationState::Idle);
            assert!(controller.config().image.is_none());
            assert!(controller.preview().is_none());
            assert!(controller.result().is_none());
            assert!(controller.error().is_none());
        }
    }

    #[test]
    fn test_reset_keeps_style_fields() {
        let mut controller = configuring();
        controller.update_config(ConfigUpdate::Theme("Art Deco".into()));
        controller.reset();
        assert_eq!(controller.config().theme, "Art Deco");
    }

    #[test]
    fn test_encode_result_after_reset_is_dropped() {
        let mut controller = Controller::new();
        controller.begin_upload(venue_file());
        controller.reset();

        assert!(!controller.finish_upload(Ok(venue_encoded())));
        assert_eq!(controller.stage(), ApplicationState::Idle);
        assert!(controller.preview().is_none());
    }

    #[test]
    fn test_offer_rejects_pdf_in_idle() {
        let mut controller = Controller::new();
        let before = controller.clone();

        let rejected = controller.offer(Path::new("brochure.pdf"));

        assert!(matches!(rejected, Err(IntakeError::NotAnImage { .. })));
        assert_eq!(controller, before);
        assert_eq!(controller.stage(), ApplicationState::Idle);
        assert!(controller.config().image.is_none());
        assert!(controller.error().is_none());
    }

    #[test]
    fn test_offer_rejects_pdf_in_error() {
        let mut controller = Controller::new();
        controller.begin_upload(venue_file());
        controller.finish_upload(Err(IntakeError::Read {
            path: PathBuf::from("/photos/venue.jpg"),
            reason: "permission denied".into(),
        }));
        let before = controller.clone();

        let rejected = controller.offer(Path::new("brochure.pdf"));

        assert!(matches!(rejected, Err(IntakeError::NotAnImage { .. })));
        assert_eq!(controller, before);
        assert_eq!(controller.stage(), ApplicationState::Error);
        assert_eq!(controller.error(), Some(INTAKE_FAILED_MESSAGE));
        assert_eq!(controller.config().image, Some(venue_file()));
    }

    #[test]
    fn test_offer_starts_upload_for_images() {
        let mut controller = Controller::new();

        let file = controller.offer(Path::new("/photos/ballroom.heic")).unwrap().unwrap();

        assert_eq!(file.mime_type, "image/heic");
        assert_eq!(controller.stage(), ApplicationState::Uploading);
        assert_eq!(controller.config().image, Some(file));
    }

    #[test]
    fn test_offer_ignored_outside_intake() {
        let mut controller = Controller::new();
        controller.begin_upload(venue_file());

        assert!(controller.offer(Path::new("hall.png")).unwrap().is_none());
        assert!(controller.offer(Path::new("brochure.pdf")).unwrap().is_none());
        assert_eq!(controller.config().image, Some(venue_file()));
    }

    #[tokio::test]
    async fn test_gala_dinner_journey() {
        let dir = std::env::temp_dir().join(format!("festoscape-journey-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("venue.jpg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xD9]).unwrap();

        let mut controller = Controller::new();
        let file = controller.offer(&path).unwrap().unwrap();
        assert_eq!(controller.stage(), ApplicationState::Uploading);
        controller.finish_upload(crate::intake::encode(file).await);
        assert_eq!(controller.stage(), ApplicationState::Configuring);
        assert_eq!(controller.preview(), Some("data:image/jpeg;base64,/9j/2Q=="));

        controller.update_config(ConfigUpdate::EventType(EventType::GalaDinner));
        controller.update_config(ConfigUpdate::Theme("Art Deco".into()));
        controller.update_config(ConfigUpdate::ColorPalette("Black & Gold".into()));
        let request = controller.submit().unwrap();
        assert_eq!(request.image.mime_type, "image/jpeg");

        controller.finish_generation(GenerationOutcome::Success(generated()));
        let result = controller.result().unwrap();
        assert_eq!(result.original_image, "data:image/jpeg;base64,/9j/2Q==");
        assert_eq!(result.prompt_used, "Gala Dinner - Art Deco - Black & Gold");

        std::fs::remove_dir_all(&dir).ok();
    }
}
