use crate::error::InterviewError;
use crate::interview::Interview;
use crate::request::{GenerationRequest, Tone};

/// Last-used form values. Unlike a `GenerationRequest` these may be blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    pub character_a: String,
    pub character_b: String,
    pub topic: String,
    pub tone: Tone,
}

impl Parameters {
    pub fn request(&self) -> Result<GenerationRequest, InterviewError> {
        GenerationRequest::new(&self.character_a, &self.character_b, &self.topic, self.tone)
    }
}

/// State carried between interactions. Every transition consumes the old
/// value and returns the new one; nothing is shared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub parameters: Parameters,
    pub current: Option<Interview>,
}

impl Session {
    pub fn new(parameters: Parameters) -> Self {
        Self {
            parameters,
            current: None,
        }
    }

    /// Replaces the current interview wholesale and remembers the parameters
    /// that produced it.
    pub fn with_interview(self, interview: Interview) -> Self {
        let request = interview.request();
        let parameters = Parameters {
            character_a: request.character_a().to_owned(),
            character_b: request.character_b().to_owned(),
            topic: request.topic().to_owned(),
            tone: request.tone(),
        };

        Self {
            parameters,
            current: Some(interview),
        }
    }

    pub fn with_parameters(self, parameters: Parameters) -> Self {
        Self { parameters, ..self }
    }

    /// Drops the current interview, keeping the parameters for the next attempt.
    pub fn cleared(self) -> Self {
        Self {
            current: None,
            ..self
        }
    }
}
