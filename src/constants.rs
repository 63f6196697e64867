//! Application constants and configuration

pub const APP_NAME: &str = "TV Carousel";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const RUNWARE_API_URL: &str = "https://api.runware.ai/v1";
pub const RUNWARE_SIGNUP_URL: &str = "https://runware.ai/";
pub const RUNWARE_MODEL: &str = "runware:100@1";
pub const QR_SERVICE_URL: &str = "https://api.qrserver.com/v1/create-qr-code/";
pub const QR_SIZE: &str = "150x150";

/// Generated slide art dimensions (full HD television)
pub const IMAGE_WIDTH: u32 = 1920;
pub const IMAGE_HEIGHT: u32 = 1080;
pub const IMAGES_PER_PROMPT: u32 = 1;

pub const AUTO_ADVANCE_MS: u64 = 5000;
pub const MIN_AUTO_ADVANCE_MS: u64 = 1000;

/// Concurrent remote image fetches for slide art and QR badges
pub const MAX_IMAGE_FETCHES: usize = 4;

pub const MOCK_GENERATION_ENV: &str = "MOCK_IMAGE_GENERATION";
