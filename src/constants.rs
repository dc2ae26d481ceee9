//! Shared constants/defaults for things
//!

/// Cards requested when the caller doesn't ask for a specific count.
pub const DEFAULT_SCENE_COUNT: u8 = 5;

/// Smallest scene count we will ask the model for.
pub const MIN_SCENE_COUNT: u8 = 1;

/// Largest scene count we will ask the model for.
pub const MAX_SCENE_COUNT: u8 = 20;

/// Gemini model used when none is configured.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Gemini REST endpoint root.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Placeholder substituted with the encoded keyword in image URL templates.
pub const KEYWORD_PLACEHOLDER: &str = "{keyword}";

/// Keyword lookup used to turn a model-provided keyword into a displayable image.
pub const DEFAULT_IMAGE_URL_TEMPLATE: &str = "https://source.unsplash.com/400x300/?{keyword}";

/// Session key holding the studio state.
pub const STUDIO_SESSION_KEY: &str = "studio";

/// Minutes of inactivity before a session (and its cards) is dropped.
pub const SESSION_INACTIVITY_MINUTES: i64 = 60;

/// Seconds between sweeps that drop expired sessions from memory.
pub const SESSION_SWEEP_INTERVAL_SECS: u64 = 60;

/// Length of CSRF session tokens
pub const CSRF_TOKEN_LENGTH: usize = 32;

/// Filename prefix for downloaded card sets.
pub const DOWNLOAD_FILENAME_PREFIX: &str = "cardnews";
