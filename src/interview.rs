use crate::backend::{BackendKind, GenerationBackend};
use crate::error::InterviewError;
use crate::request::GenerationRequest;
use crate::transcript::Transcript;

/// A successful generation: the parsed transcript and the text it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interview {
    pub transcript: Transcript,
    pub raw: String,
}

impl Interview {
    pub fn from_raw(raw: String, request: GenerationRequest) -> Self {
        Self {
            transcript: Transcript::parse(&raw, request),
            raw,
        }
    }

    pub fn request(&self) -> &GenerationRequest {
        &self.transcript.request
    }
}

/// Fails with `MissingCredential` when `credential` is blank.
pub fn require_credential(kind: BackendKind, credential: &str) -> Result<(), InterviewError> {
    if credential.trim().is_empty() {
        return Err(InterviewError::MissingCredential {
            backend: kind.to_string(),
            env_var: kind.env_var(),
        });
    }
    Ok(())
}

/// Sends the request to `backend` and parses the reply.
///
/// An empty credential is rejected before the backend is touched.
pub async fn generate<B: GenerationBackend>(
    request: GenerationRequest,
    credential: &str,
    backend: &B,
) -> Result<Interview, InterviewError> {
    let kind = backend.kind();
    require_credential(kind, credential)?;

    let payload = request.payload();
    tracing::info!(
        backend = %kind,
        character_a = request.character_a(),
        character_b = request.character_b(),
        tone = %request.tone(),
        "Generating interview"
    );
    tracing::debug!(payload_len = payload.len(), "Built payload");

    let raw = backend.generate(&payload, credential).await?;
    let interview = Interview::from_raw(raw, request);
    tracing::info!(
        response_len = interview.raw.len(),
        lines = interview.transcript.lines().count(),
        "Generation finished"
    );

    Ok(interview)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Tone;
    use crate::transcript::{Attribution, Entry};
    use std::cell::{Cell, RefCell};

    struct FakeBackend {
        reply: Result<String, InterviewError>,
        calls: Cell<usize>,
        last_payload: RefCell<Option<String>>,
    }

    impl FakeBackend {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_owned()),
                calls: Cell::new(0),
                last_payload: RefCell::new(None),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(InterviewError::Generation(message.to_owned())),
                calls: Cell::new(0),
                last_payload: RefCell::new(None),
            }
        }
    }

    impl GenerationBackend for FakeBackend {
        fn kind(&self) -> BackendKind {
            BackendKind::Gemini
        }

        async fn generate(&self, payload: &str, _credential: &str) -> Result<String, InterviewError> {
            self.calls.set(self.calls.get() + 1);
            *self.last_payload.borrow_mut() = Some(payload.to_owned());
            self.reply.clone()
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest::new("Einstein", "Yoda", "", Tone::Funny).unwrap()
    }

    #[tokio::test]
    async fn empty_credential_never_reaches_backend() {
        let backend = FakeBackend::replying("Einstein: Hi.");

        for credential in ["", "   "] {
            let error = generate(request(), credential, &backend).await.unwrap_err();
            assert_eq!(
                error,
                InterviewError::MissingCredential {
                    backend: "gemini".to_owned(),
                    env_var: "GOOGLE_API_KEY",
                }
            );
        }

        assert_eq!(backend.calls.get(), 0);
    }

    #[test]
    fn credential_check_names_the_backend_variable() {
        assert_eq!(require_credential(BackendKind::Anthropic, "sk-123"), Ok(()));
        assert_eq!(
            require_credential(BackendKind::Anthropic, "\t"),
            Err(InterviewError::MissingCredential {
                backend: "anthropic".to_owned(),
                env_var: "ANTHROPIC_API_KEY",
            })
        );
    }

    #[tokio::test]
    async fn parses_backend_reply() {
        let raw = "Einstein: Time is relative.\nYoda: Strong with physics, you are.";
        let backend = FakeBackend::replying(raw);

        let interview = generate(request(), "secret", &backend).await.unwrap();

        assert_eq!(backend.calls.get(), 1);
        assert_eq!(
            backend.last_payload.borrow().as_deref(),
            Some(request().payload().as_str())
        );
        assert_eq!(interview.raw, raw);
        assert_eq!(interview.request(), &request());

        let attributions: Vec<_> = interview.transcript.lines().map(|line| line.attribution).collect();
        assert_eq!(attributions, vec![Attribution::CharacterA, Attribution::CharacterB]);
        assert!(!interview.transcript.entries.contains(&Entry::Separator));
    }

    #[tokio::test]
    async fn backend_failure_is_surfaced_verbatim() {
        let backend = FakeBackend::failing("quota exceeded");

        let error = generate(request(), "secret", &backend).await.unwrap_err();

        assert_eq!(error, InterviewError::Generation("quota exceeded".to_owned()));
        assert_eq!(error.to_string(), "Error generating interview: quota exceeded");
        assert_eq!(backend.calls.get(), 1);
    }
}
