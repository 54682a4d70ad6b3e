use iced::keyboard::{self, key::Named, Key};
use iced::widget::{column, stack};
use iced::{event, window, Element, Event, Size, Subscription, Task, Theme};
use std::sync::Arc;
use std::time::{Duration, Instant};

mod config;
mod error;
mod media;
mod state;
mod ui;

use config::GalleryConfig;
use state::data::LayoutMode;
use state::gallery::{DecodeRequest, DecodeResult, Gallery};
use state::preview::PreviewState;
use state::scheduler::SystemClock;
use state::viewport::Viewport;

const WINDOW_WIDTH: f32 = 1280.0;
const WINDOW_HEIGHT: f32 = 860.0;

/// How often the scheduler is drained while it has pending jobs
const SCHEDULER_TICK: Duration = Duration::from_millis(50);
/// Redraw rate while tiles are fading in
const FADE_TICK: Duration = Duration::from_millis(16);

/// Main application state
struct ImageGallery {
    /// Catalog, tiles and loading state
    gallery: Gallery,
    /// Full-screen preview overlay
    preview: PreviewState,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked the "Shuffle" button
    Shuffle,
    LayoutSelected(LayoutMode),
    /// A background decode finished, successfully or not
    TileLoaded {
        epoch: u64,
        id: usize,
        result: DecodeResult,
    },
    Scrolled { offset: f32, height: f32 },
    WindowResized(Size),
    OpenPreview(usize),
    ClosePreview,
    EscapePressed,
    /// Drain due scheduler jobs
    Tick,
    /// Redraw for fade-in animation
    FadeTick,
}

impl ImageGallery {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = GalleryConfig::load();
        let viewport = Viewport::new(WINDOW_WIDTH, WINDOW_HEIGHT - ui::toolbar::TOOLBAR_HEIGHT);

        let mut gallery = Gallery::new(config, SystemClock::new(), viewport);
        let requests = gallery.load_next_batch().requests();
        let task = decode_tasks(requests, gallery.config().thumbnail_size);

        (
            ImageGallery {
                gallery,
                preview: PreviewState::default(),
            },
            task,
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Shuffle => {
                self.preview.close();
                self.gallery.shuffle();
                Task::none()
            }
            Message::LayoutSelected(mode) => {
                self.gallery.change_layout(mode);
                Task::none()
            }
            Message::TileLoaded { epoch, id, result } => {
                self.gallery.complete_tile(epoch, id, result, Instant::now());
                Task::none()
            }
            Message::Scrolled { offset, height } => {
                if !self.preview.scroll_locked() {
                    self.gallery.scrolled(offset, height);
                }
                Task::none()
            }
            Message::WindowResized(size) => {
                self.gallery
                    .resized(size.width, size.height - ui::toolbar::TOOLBAR_HEIGHT);
                Task::none()
            }
            Message::OpenPreview(id) => {
                if let Some(tile) = self
                    .gallery
                    .state()
                    .tiles
                    .iter()
                    .find(|tile| tile.descriptor.id == id)
                {
                    self.preview.open(tile);
                }
                Task::none()
            }
            Message::ClosePreview | Message::EscapePressed => {
                self.preview.close();
                Task::none()
            }
            Message::Tick => {
                let requests = self.gallery.tick(&mut rand::rng());
                decode_tasks(requests, self.gallery.config().thumbnail_size)
            }
            Message::FadeTick => Task::none(),
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let base: Element<'_, Message> = column![
            ui::toolbar::view(&self.gallery),
            ui::grid::view(&self.gallery, Instant::now()),
        ]
        .into();

        match self.preview.content() {
            Some(content) => stack![base, ui::preview::view(content)].into(),
            None => base,
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let keys = keyboard::on_key_press(|key, _modifiers| match key {
            Key::Named(Named::Escape) => Some(Message::EscapePressed),
            _ => None,
        });

        let resizes = event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(size)),
            _ => None,
        });

        let mut subscriptions = vec![keys, resizes];

        if self.gallery.has_pending_jobs() {
            subscriptions.push(iced::time::every(SCHEDULER_TICK).map(|_| Message::Tick));
        }

        let now = Instant::now();
        if self.gallery.state().tiles.iter().any(|tile| tile.is_fading(now)) {
            subscriptions.push(iced::time::every(FADE_TICK).map(|_| Message::FadeTick));
        }

        Subscription::batch(subscriptions)
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// One background decode per freshly attached tile
fn decode_tasks(requests: Vec<DecodeRequest>, thumbnail_size: u32) -> Task<Message> {
    Task::batch(requests.into_iter().map(|request| {
        let DecodeRequest { epoch, id, path } = request;
        Task::perform(media::load_thumbnail(path, thumbnail_size), move |result| {
            Message::TileLoaded {
                epoch,
                id,
                result: result.map_err(Arc::new),
            }
        })
    }))
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    iced::application("Image Gallery", ImageGallery::update, ImageGallery::view)
        .subscription(ImageGallery::subscription)
        .theme(ImageGallery::theme)
        .window_size(Size::new(WINDOW_WIDTH, WINDOW_HEIGHT))
        .centered()
        .run_with(ImageGallery::new)
}
