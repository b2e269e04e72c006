pub mod api;
pub mod collection;
pub mod comments;
pub mod config;
pub mod detail;
pub mod error;
pub mod memory;
pub mod models;
pub mod telemetry;
pub mod translation;
pub mod trigger;

pub use api::{ApiClient, DataSource};
pub use collection::CollectionController;
pub use comments::CommentsController;
pub use config::PostfeedConfig;
pub use detail::{DetailController, DetailView};
pub use error::FetchError;
pub use models::{Comment, Post};
pub use translation::{PhraseTable, Translator};
pub use trigger::{ScrollTrigger, Sentinel, VisibilityObserver};
