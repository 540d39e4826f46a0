use iced::widget::{column, container, scrollable};
use iced::{event, window, Element, Event, Length, Subscription, Task, Theme};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

mod config;
mod download;
mod gemini;
mod intake;
mod state;
mod ui;

use config::Settings;
use download::DownloadError;
use gemini::GeminiClient;
use intake::IntakeError;
use state::controller::Controller;
use state::data::{ApplicationState, ConfigUpdate, EncodedImage, GenerationOutcome};
use ui::{Gallery, ResultView};

/// Main application state
struct Festoscape {
    /// The session state machine; the only owner of journey state
    controller: Controller,
    gemini: Arc<GeminiClient>,
    settings: Settings,
    /// Render handles for the current images
    gallery: Gallery,
    /// Compare/full toggle on the result screen
    result_view: ResultView,
    /// A file is being dragged over the window
    is_dragging: bool,
    /// Outcome of the last download, shown under the result
    notice: Option<String>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked the drop zone
    BrowseForImage,
    FileHovered,
    FileHoverLeft,
    FileDropped(PathBuf),
    /// Background read/encode finished
    ImageEncoded(Result<EncodedImage, IntakeError>),
    ConfigChanged(ConfigUpdate),
    Submit,
    GenerationFinished(GenerationOutcome),
    SelectResultView(ResultView),
    Download,
    DownloadFinished(Result<PathBuf, DownloadError>),
    Reset,
}

impl Festoscape {
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::from_env();
        match &settings.api_key {
            Some(key) => info!(
                "Using API key: {}...",
                key.chars().take(6).collect::<String>()
            ),
            None => warn!("⚠️  GEMINI_API_KEY is not set; generation requests will fail"),
        }
        info!("🎨 FestoScape ready (model {})", settings.image_model);

        (
            Festoscape {
                controller: Controller::new(),
                gemini: Arc::new(GeminiClient::new(&settings)),
                settings,
                gallery: Gallery::default(),
                result_view: ResultView::default(),
                is_dragging: false,
                notice: None,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::BrowseForImage => {
                if !self.controller.accepts_upload() {
                    return Task::none();
                }
                let picked = FileDialog::new()
                    .set_title("Select Venue Photo")
                    .add_filter("Images", intake::PICKER_EXTENSIONS)
                    .pick_file();

                match picked {
                    Some(path) => self.select_file(path),
                    None => Task::none(),
                }
            }
            Message::FileHovered => {
                self.is_dragging = true;
                Task::none()
            }
            Message::FileHoverLeft => {
                self.is_dragging = false;
                Task::none()
            }
            Message::FileDropped(path) => {
                self.is_dragging = false;
                self.select_file(path)
            }
            Message::ImageEncoded(outcome) => {
                if self.controller.finish_upload(outcome) {
                    self.gallery.load_original(self.controller.preview());
                }
                Task::none()
            }
            Message::ConfigChanged(update) => {
                self.controller.update_config(update);
                Task::none()
            }
            Message::Submit => match self.controller.submit() {
                Some(request) => {
                    let gemini = Arc::clone(&self.gemini);
                    Task::perform(
                        async move { gemini.invoke(request).await },
                        Message::GenerationFinished,
                    )
                }
                None => Task::none(),
            },
            Message::GenerationFinished(outcome) => {
                if self.controller.finish_generation(outcome) {
                    self.gallery.load_result(self.controller.result());
                    self.result_view = ResultView::Compare;
                    self.notice = None;
                }
                Task::none()
            }
            Message::SelectResultView(view) => {
                self.result_view = view;
                Task::none()
            }
            Message::Download => match self.controller.result() {
                Some(result) => Task::perform(
                    download::save_png(result.generated_image.clone(), self.settings.download_path()),
                    Message::DownloadFinished,
                ),
                None => Task::none(),
            },
            Message::DownloadFinished(Ok(path)) => {
                self.notice = Some(format!("Saved to {}", path.display()));
                Task::none()
            }
            Message::DownloadFinished(Err(e)) => {
                error!("❌ Download failed: {}", e);
                self.notice = Some(format!("Download failed: {}", e));
                Task::none()
            }
            Message::Reset => {
                self.controller.reset();
                self.gallery = Gallery::default();
                self.result_view = ResultView::default();
                self.notice = None;
                Task::none()
            }
        }
    }

    /// Shared validation path for picked and dropped files
    fn select_file(&mut self, path: PathBuf) -> Task<Message> {
        match self.controller.offer(&path) {
            Ok(Some(file)) => Task::perform(intake::encode(file), Message::ImageEncoded),
            Ok(None) => Task::none(),
            Err(e) => {
                warn!("⚠️  Rejected {}: {}", path.display(), e);
                MessageDialog::new()
                    .set_level(MessageLevel::Warning)
                    .set_title("Unsupported file")
                    .set_description("Please upload an image file")
                    .set_buttons(MessageButtons::Ok)
                    .show();
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let body: Element<Message> = match self.controller.stage() {
            ApplicationState::Idle | ApplicationState::Error => {
                ui::upload::view(self.is_dragging, self.controller.error())
            }
            ApplicationState::Uploading => ui::progress(
                "Preparing Your Photo...",
                "Reading the venue photo and building a preview.",
            ),
            ApplicationState::Configuring => {
                ui::config_form::view(&self.controller, self.gallery.original.as_ref())
            }
            ApplicationState::Generating => ui::progress(
                "Designing Your Event...",
                "Analyzing venue architecture, placing furniture, arranging florals, and setting the lighting.",
            ),
            ApplicationState::Success => match self.controller.result() {
                Some(result) => ui::result::view(
                    result,
                    &self.gallery,
                    self.result_view,
                    self.notice.as_deref(),
                ),
                None => ui::upload::view(self.is_dragging, None),
            },
        };

        column![
            ui::header(),
            scrollable(container(body).padding(40).width(Length::Fill)).height(Length::Fill),
        ]
        .into()
    }

    /// Window drag-and-drop events
    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
            Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FileHoverLeft),
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        ui::theme::festoscape()
    }
}

fn main() -> iced::Result {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    iced::application("FestoScape", Festoscape::update, Festoscape::view)
        .subscription(Festoscape::subscription)
        .theme(Festoscape::theme)
        .centered()
        .run_with(Festoscape::new)
}
