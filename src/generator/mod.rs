//! Image generation for the carousel art
//!
//! Holds the credential entered by the user and runs one generation request per fixed
//! prompt, strictly one at a time. Results are all-or-nothing: the carousel only ever
//! receives a complete set of four URLs.

pub mod runware;

pub use runware::RunwareClient;

use crate::constants::{IMAGES_PER_PROMPT, IMAGE_HEIGHT, IMAGE_WIDTH};
use crate::types::Notice;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{error, info, warn};

pub const IMAGE_PROMPTS: [&str; 4] = [
    "Professional modern illustration of a person ordering food at a restaurant using AI voice assistant, sleek interface, holographic menu display, futuristic dining experience, clean vector art style, blue and purple color scheme",
    "Professional illustration of smart home control interface, person using voice commands to control lights and devices, modern home automation, clean minimalist design, technology integration, blue and green color palette",
    "Professional illustration of AI function calling system, abstract representation of intelligent automation, data flow visualization, modern tech interface, geometric shapes, purple and blue gradient background",
    "Professional illustration of voice-powered navigation interface, person speaking to control entertainment system, modern UI elements, sound waves visualization, sleek design, blue and teal color scheme",
];

pub const MISSING_CREDENTIAL_MESSAGE: &str = "Please enter your Runware API key";
pub const SUCCESS_MESSAGE: &str = "All images generated successfully!";
pub const FAILURE_MESSAGE: &str = "Failed to generate images. Please check your API key and try again.";

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("no API key entered")]
    MissingCredential,
    #[error("a generation run is already in progress")]
    AlreadyRunning,
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("service error: {0}")]
    Api(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub positive_prompt: String,
    pub width: u32,
    pub height: u32,
    pub number_results: u32,
}

impl GenerationRequest {
    pub fn for_prompt(prompt: impl Into<String>) -> Self {
        Self {
            positive_prompt: prompt.into(),
            width: IMAGE_WIDTH,
            height: IMAGE_HEIGHT,
            number_results: IMAGES_PER_PROMPT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub image_url: String,
}

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedImage, GenerationError>;
}

/// Offline generator enabled through `MOCK_IMAGE_GENERATION`
#[derive(Debug, Default)]
pub struct MockImageGenerator;

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate_image(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedImage, GenerationError> {
        tokio::time::sleep(std::time::Duration::from_millis(400)).await;
        let seed: u32 = request.positive_prompt.bytes().map(u32::from).sum();
        Ok(GeneratedImage {
            image_url: format!(
                "https://picsum.photos/seed/{}/{}/{}",
                seed, request.width, request.height
            ),
        })
    }
}

/// State shared between the panel and a running job
#[derive(Debug, Default)]
pub struct GenerationState {
    pub busy: bool,
    pub notices: VecDeque<Notice>,
    pub completed: Option<Vec<String>>,
}

fn lock(state: &Mutex<GenerationState>) -> MutexGuard<'_, GenerationState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Clears the busy flag when dropped, whichever way the job ends
struct BusyGuard {
    state: Arc<Mutex<GenerationState>>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        lock(&self.state).busy = false;
    }
}

#[derive(Debug, Default)]
pub struct ImagePanel {
    credential: String,
    state: Arc<Mutex<GenerationState>>,
}

impl ImagePanel {
    pub fn set_credential(&mut self, credential: impl Into<String>) {
        self.credential = credential.into();
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    pub fn has_credential(&self) -> bool {
        !self.credential.trim().is_empty()
    }

    pub fn is_busy(&self) -> bool {
        lock(&self.state).busy
    }

    pub fn take_notices(&self) -> Vec<Notice> {
        lock(&self.state).notices.drain(..).collect()
    }

    pub fn take_completed(&self) -> Option<Vec<String>> {
        lock(&self.state).completed.take()
    }

    /// Validate the credential and enter the busy state. A missing credential also
    /// queues a notice; nothing touches the network until the returned job runs.
    pub fn start_generation(&mut self) -> Result<GenerationJob, GenerationError> {
        let credential = self.credential.trim().to_string();
        let mut state = lock(&self.state);
        if credential.is_empty() {
            warn!("Image generation requested without an API key");
            state.notices.push_back(Notice::error(MISSING_CREDENTIAL_MESSAGE));
            return Err(GenerationError::MissingCredential);
        }
        if state.busy {
            return Err(GenerationError::AlreadyRunning);
        }
        state.busy = true;
        drop(state);

        Ok(GenerationJob {
            credential,
            prompts: IMAGE_PROMPTS.iter().map(|p| p.to_string()).collect(),
            guard: BusyGuard { state: self.state.clone() },
        })
    }
}

pub struct GenerationJob {
    credential: String,
    prompts: Vec<String>,
    guard: BusyGuard,
}

impl GenerationJob {
    pub fn credential(&self) -> &str {
        &self.credential
    }

    /// Run every prompt in order, one request at a time. The first failure aborts the
    /// remaining prompts and nothing is published.
    pub async fn run(self, generator: &dyn ImageGenerator) -> Result<Vec<String>, GenerationError> {
        let state = self.guard.state.clone();
        let total = self.prompts.len();

        let result = async {
            let mut urls = Vec::with_capacity(total);
            for (i, prompt) in self.prompts.iter().enumerate() {
                lock(&state)
                    .notices
                    .push_back(Notice::info(format!("Generating image {} of {}...", i + 1, total)));
                info!(index = i + 1, total, "Generating image");
                let image = generator.generate_image(&GenerationRequest::for_prompt(prompt)).await?;
                urls.push(image.image_url);
            }
            Ok::<_, GenerationError>(urls)
        }
        .await;

        {
            let mut s = lock(&state);
            match &result {
                Ok(urls) => {
                    info!(count = urls.len(), "All images generated");
                    s.completed = Some(urls.clone());
                    s.notices.push_back(Notice::success(SUCCESS_MESSAGE));
                }
                Err(e) => {
                    error!(error = %e, "Error generating images");
                    s.notices.push_back(Notice::error(FAILURE_MESSAGE));
                }
            }
        }

        drop(self.guard);
        result
    }
}
