pub(crate) mod parse;

use crate::request::GenerationRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribution {
    CharacterA,
    CharacterB,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueLine {
    pub speaker: String,
    pub text: String,
    pub attribution: Attribution,
}

/// One parsed element per non-blank input line, or a separator for a blank one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Line(DialogueLine),
    Separator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub request: GenerationRequest,
    pub entries: Vec<Entry>,
}

impl Transcript {
    pub fn parse(raw: &str, request: GenerationRequest) -> Self {
        let entries = parse::parse(raw, request.character_a(), request.character_b());
        Self { request, entries }
    }

    pub fn lines(&self) -> impl Iterator<Item = &DialogueLine> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Line(line) => Some(line),
            Entry::Separator => None,
        })
    }
}
