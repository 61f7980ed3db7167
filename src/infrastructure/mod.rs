//! External integrations: the SEObserver HTTP client and the ephemeral
//! screenshot store.

pub mod screenshots;
pub mod seobserver;

pub use screenshots::ScreenshotStore;
pub use seobserver::SeoObserverClient;
