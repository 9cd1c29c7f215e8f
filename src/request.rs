use itertools::Itertools;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::InterviewError;

pub const TOPIC_FALLBACK: &str = "any relevant topic interesting to both characters";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, EnumIter, Display)]
#[strum(ascii_case_insensitive)]
pub enum Tone {
    #[default]
    Funny,
    Dramatic,
    Philosophical,
    Creative,
}

impl Tone {
    /// Comma-separated list of every tone, for prompts and help text.
    pub fn choices() -> String {
        Tone::iter().join(", ")
    }
}

/// Parameters of a single generation attempt. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    character_a: String,
    character_b: String,
    topic: String,
    tone: Tone,
}

impl GenerationRequest {
    pub fn new(
        character_a: &str,
        character_b: &str,
        topic: &str,
        tone: Tone,
    ) -> Result<Self, InterviewError> {
        let character_a = character_a.trim();
        let character_b = character_b.trim();

        if character_a.is_empty() || character_b.is_empty() {
            return Err(InterviewError::MissingCharacter);
        }

        Ok(Self {
            character_a: character_a.to_owned(),
            character_b: character_b.to_owned(),
            topic: topic.trim().to_owned(),
            tone,
        })
    }

    pub fn character_a(&self) -> &str {
        &self.character_a
    }

    pub fn character_b(&self) -> &str {
        &self.character_b
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    /// Renders the instruction sent to the generation backend.
    pub fn payload(&self) -> String {
        let a = &self.character_a;
        let b = &self.character_b;
        let tone = self.tone;
        let topic = if self.topic.is_empty() {
            TOPIC_FALLBACK
        } else {
            self.topic.as_str()
        };

        format!(
            r#"Generate a creative dialogue interview between {a} and {b}.

Guidelines:
- The interview should be about {topic}.
- The tone should be {tone}.
- Include 8-10 exchanges between the characters.
- Each character should have distinct personality traits and a speaking style that reflects who they are.
- Format the output as a dialogue script: every line starts with the speaker's name followed by a colon, and the two characters take alternating turns.
- Make it entertaining, insightful, and true to the known characteristics and knowledge of these figures.

Output format example:
{a}: [First line of dialogue]
{b}: [Response]
{a}: [Reply]
...and so on."#
        )
    }
}
