use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InterviewError {
    #[error("Please provide both character names.")]
    MissingCharacter,

    #[error("Please provide an API key for the {backend} backend (--api-key or {env_var}).")]
    MissingCredential {
        backend: String,
        env_var: &'static str,
    },

    #[error("Error generating interview: {0}")]
    Generation(String),
}
