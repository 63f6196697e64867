//! Runware image inference over HTTP

use super::{GeneratedImage, GenerationError, GenerationRequest, ImageGenerator};
use crate::constants::RUNWARE_MODEL;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Serialize)]
#[serde(tag = "taskType")]
enum Task<'a> {
    #[serde(rename = "authentication", rename_all = "camelCase")]
    Authentication { api_key: &'a str },
    #[serde(rename = "imageInference", rename_all = "camelCase")]
    ImageInference {
        #[serde(rename = "taskUUID")]
        task_uuid: String,
        positive_prompt: &'a str,
        width: u32,
        height: u32,
        number_results: u32,
        model: &'a str,
        output_type: &'a str,
        output_format: &'a str,
    },
}

#[derive(Deserialize)]
struct TaskResponse {
    #[serde(default)]
    data: Vec<TaskResult>,
    #[serde(default)]
    errors: Vec<TaskError>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskResult {
    task_type: String,
    #[serde(rename = "taskUUID", default)]
    task_uuid: Option<String>,
    #[serde(rename = "imageURL", default)]
    image_url: Option<String>,
}

#[derive(Deserialize)]
struct TaskError {
    #[serde(default)]
    message: String,
}

pub struct RunwareClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl RunwareClient {
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client, api_key: api_key.into(), endpoint: endpoint.into() }
    }
}

#[async_trait]
impl ImageGenerator for RunwareClient {
    async fn generate_image(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedImage, GenerationError> {
        let task_uuid = uuid::Uuid::new_v4().to_string();
        let tasks = [
            Task::Authentication { api_key: &self.api_key },
            Task::ImageInference {
                task_uuid: task_uuid.clone(),
                positive_prompt: &request.positive_prompt,
                width: request.width,
                height: request.height,
                number_results: request.number_results,
                model: RUNWARE_MODEL,
                output_type: "URL",
                output_format: "PNG",
            },
        ];

        debug!(endpoint = %self.endpoint, task = %task_uuid, "Sending image inference task");
        let response = self.client.post(&self.endpoint).json(&tasks).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // Errors can arrive with any status, so try the error payload first
        if let Ok(parsed) = serde_json::from_str::<TaskResponse>(&body) {
            if let Some(err) = parsed.errors.first() {
                return Err(GenerationError::Api(err.message.clone()));
            }
            if !status.is_success() {
                return Err(GenerationError::Status { status: status.as_u16(), body });
            }
            return parsed
                .data
                .into_iter()
                .filter(|r| r.task_type == "imageInference")
                .find(|r| r.task_uuid.as_deref().map_or(true, |id| id == task_uuid))
                .and_then(|r| r.image_url)
                .map(|image_url| GeneratedImage { image_url })
                .ok_or_else(|| {
                    GenerationError::MalformedResponse("no imageURL in response".into())
                });
        }

        if !status.is_success() {
            return Err(GenerationError::Status { status: status.as_u16(), body });
        }
        Err(GenerationError::MalformedResponse(body.chars().take(200).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::sync::mpsc;

    /// Serve one request with the given status and body; hands back the request body.
    fn serve_once(status: u16, body: impl Fn(&str) -> String + Send + 'static) -> (String, mpsc::Receiver<String>) {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            if let Ok(mut req) = server.recv() {
                let mut received = String::new();
                req.as_reader().read_to_string(&mut received).unwrap();
                let reply = body(&received);
                tx.send(received).unwrap();
                let _ = req.respond(tiny_http::Response::from_string(reply).with_status_code(status));
            }
        });
        (format!("http://{addr}/v1"), rx)
    }

    fn task_uuid_of(request_body: &str) -> String {
        let tasks: serde_json::Value = serde_json::from_str(request_body).unwrap();
        tasks[1]["taskUUID"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn sends_auth_and_inference_tasks() {
        let (endpoint, rx) = serve_once(200, |req| {
            format!(
                r#"{{"data":[{{"taskType":"imageInference","taskUUID":"{}","imageUUID":"x","imageURL":"https://im.runware.ai/a.png"}}]}}"#,
                task_uuid_of(req)
            )
        });
        let client = RunwareClient::new("secret", endpoint);
        let image = client
            .generate_image(&GenerationRequest::for_prompt("a red fox"))
            .await
            .unwrap();
        assert_eq!(image.image_url, "https://im.runware.ai/a.png");

        let sent: serde_json::Value = serde_json::from_str(&rx.recv().unwrap()).unwrap();
        assert_eq!(sent[0]["taskType"], "authentication");
        assert_eq!(sent[0]["apiKey"], "secret");
        assert_eq!(sent[1]["taskType"], "imageInference");
        assert_eq!(sent[1]["positivePrompt"], "a red fox");
        assert_eq!(sent[1]["width"], 1920);
        assert_eq!(sent[1]["height"], 1080);
        assert_eq!(sent[1]["numberResults"], 1);
    }

    #[tokio::test]
    async fn error_payload_is_api_error() {
        let (endpoint, _rx) = serve_once(401, |_| {
            r#"{"errors":[{"code":"invalidApiKey","message":"Invalid API key"}]}"#.to_string()
        });
        let client = RunwareClient::new("wrong", endpoint);
        let err = client
            .generate_image(&GenerationRequest::for_prompt("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Api(ref m) if m == "Invalid API key"));
    }

    #[tokio::test]
    async fn missing_url_is_malformed() {
        let (endpoint, _rx) = serve_once(200, |_| r#"{"data":[]}"#.to_string());
        let client = RunwareClient::new("key", endpoint);
        let err = client
            .generate_image(&GenerationRequest::for_prompt("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn non_json_error_is_status() {
        let (endpoint, _rx) = serve_once(502, |_| "bad gateway".to_string());
        let client = RunwareClient::new("key", endpoint);
        let err = client
            .generate_image(&GenerationRequest::for_prompt("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Status { status: 502, .. }));
    }

    #[tokio::test]
    async fn unreachable_host_is_request_error() {
        // Bind then drop to get a port nothing listens on
        let port = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let client = RunwareClient::new("key", format!("http://127.0.0.1:{port}/v1"));
        let err = client
            .generate_image(&GenerationRequest::for_prompt("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Request(_)));
    }
}
