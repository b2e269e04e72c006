use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use eframe::egui::{self, Context};
use log::info;
use postfeed_core::comments::CommentsState;
use postfeed_core::{
    CollectionController, CommentsController, DataSource, DetailController, PostfeedConfig,
    ScrollTrigger, Translator,
};

mod messages;
mod spawners;
mod state;
mod tasks;
mod ui;

use messages::AppMessage;
use state::{FeedSentinel, ViewState};

// Repaint cadence while a worker thread may still report back.
const IN_FLIGHT_REPAINT: Duration = Duration::from_millis(100);

pub struct PostfeedApp {
    source: Arc<dyn DataSource>,
    translator: Arc<dyn Translator>,
    tx: Sender<AppMessage>,
    rx: Receiver<AppMessage>,
    feed: CollectionController,
    trigger: ScrollTrigger<FeedSentinel>,
    search_input: String,
    view: ViewState,
    detail: DetailController,
    comments: CommentsController,
}

impl PostfeedApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Result<Self> {
        let config = PostfeedConfig::from_env();
        let api = config.api_client()?;
        let translator = config.translator()?;
        info!("using API at {}", api.base_url());
        Ok(Self::with_source(&config, Arc::new(api), Arc::new(translator)))
    }

    /// Builds the app over any data source and starts the initial fetch.
    pub fn with_source(
        config: &PostfeedConfig,
        source: Arc<dyn DataSource>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut app = Self {
            source,
            translator,
            tx,
            rx,
            feed: CollectionController::new(config.page_size),
            trigger: ScrollTrigger::new(FeedSentinel::default(), config.scroll_debounce),
            search_input: String::new(),
            view: ViewState::Feed,
            detail: DetailController::new(),
            comments: CommentsController::new(),
        };
        app.spawn_load_posts();
        app
    }

    fn process_messages(&mut self) {
        messages::process_messages(self);
    }

    fn in_flight(&self) -> bool {
        self.feed.is_loading()
            || self.detail.is_loading()
            || matches!(self.comments.state(), Some(CommentsState::Loading))
    }
}

impl eframe::App for PostfeedApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.process_messages();

        egui::CentralPanel::default().show(ctx, |ui| match self.view {
            ViewState::Feed => self.render_feed(ui),
            ViewState::Post(_) => self.render_post(ui),
        });
        self.render_comments_window(ctx);

        let now = Instant::now();
        if self.trigger.poll(now, &mut self.feed) {
            ctx.request_repaint();
        }
        if let Some(wait) = self.trigger.time_until_due(now) {
            ctx.request_repaint_after(wait);
        }
        if self.in_flight() {
            ctx.request_repaint_after(IN_FLIGHT_REPAINT);
        }
    }
}
