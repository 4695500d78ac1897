//! Multipart/form-data encoding for audio uploads.
//!
//! The body is assembled field by field into an in-memory buffer. Part order
//! is fixed: the `file` part always comes first (some multipart consumers
//! assume first-part-is-file), then `model`, then any optional fields.

use uuid::Uuid;

use super::types::TranscriptionRequest;

const FILE_PART_NAME: &str = "file";
// Fixed filename marker; the service keys off the payload bytes, not the
// extension.
const FILE_PART_FILENAME: &str = "file.mp3";

/// An in-progress multipart/form-data body.
pub(crate) struct AudioForm {
    boundary: String,
    body: Vec<u8>,
}

impl AudioForm {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            boundary: format!("hearsay-{}", Uuid::new_v4().simple()),
            body: Vec::with_capacity(capacity + 512),
        }
    }

    pub(crate) fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Append a file part containing `bytes` verbatim.
    pub(crate) fn file(&mut self, name: &str, filename: &str, bytes: &[u8]) {
        self.body
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n")
                .as_bytes(),
        );
        self.body
            .extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
    }

    /// Append a plain field part.
    pub(crate) fn field(&mut self, name: &str, value: &str) {
        self.body
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(b"\r\n");
    }

    /// Close the body with the terminating boundary marker.
    pub(crate) fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        self.body
    }
}

/// Encode a transcription request, returning the body and its boundary token.
///
/// Absent optional fields produce no part at all. Temperature is rendered
/// with `f64`'s `Display` (shortest round-trip decimal), so `0`, `0.2` and
/// `1` encode exactly as written.
pub(crate) fn encode(request: &TranscriptionRequest) -> (Vec<u8>, String) {
    let mut form = AudioForm::with_capacity(request.audio.len());

    form.file(FILE_PART_NAME, FILE_PART_FILENAME, &request.audio);
    form.field("model", &request.model);

    if let Some(ref prompt) = request.prompt {
        form.field("prompt", prompt);
    }
    if let Some(temperature) = request.temperature {
        form.field("temperature", &temperature.to_string());
    }
    if let Some(format) = request.response_format {
        form.field("response_format", format.as_str());
    }
    if let Some(ref language) = request.language {
        form.field("language", language);
    }

    let boundary = form.boundary().to_string();
    (form.finish(), boundary)
}
