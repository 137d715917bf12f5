pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod services;
pub mod utils;

pub use crate::config::{Config, PreferenceStore, Preferences, PreferencesProvider};
pub use error::SearchError;
pub use models::{Link, SearchQuery, Tag, YesNo, MAX_LIMIT};
pub use notify::{ErrorHandler, LogErrorHandler, LogNotifier, Notifier, Toast, ToastStyle};
pub use services::{SearchClient, SearchOutcome, DEFAULT_BASE_URL};
