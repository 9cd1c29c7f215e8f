use console::Style;
use std::fmt;

use crate::transcript::{Attribution, DialogueLine, Entry, Transcript};

pub struct Palette {
    header: Style,
    character_a: Style,
    character_b: Style,
    unknown_speaker: Style,
    narration: Style,
}

impl Palette {
    pub fn styled() -> Self {
        Self {
            header: Style::new().bold(),
            character_a: Style::new().blue().bold(),
            character_b: Style::new().magenta().bold(),
            unknown_speaker: Style::new().dim().bold(),
            narration: Style::new().dim().italic(),
        }
    }

    pub fn plain() -> Self {
        Self {
            header: Style::new(),
            character_a: Style::new(),
            character_b: Style::new(),
            unknown_speaker: Style::new(),
            narration: Style::new(),
        }
    }

    fn speaker(&self, attribution: Attribution) -> &Style {
        match attribution {
            Attribution::CharacterA => &self.character_a,
            Attribution::CharacterB => &self.character_b,
            Attribution::Unknown => &self.unknown_speaker,
        }
    }
}

const TOPIC_FALLBACK: &str = "General conversation";

/// Displays a transcript with its header, one output line per entry.
pub struct Rendered<'a> {
    transcript: &'a Transcript,
    palette: &'a Palette,
}

pub fn render<'a>(transcript: &'a Transcript, palette: &'a Palette) -> Rendered<'a> {
    Rendered {
        transcript,
        palette,
    }
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let request = &self.transcript.request;
        let palette = self.palette;

        let title = format!("{} & {}", request.character_a(), request.character_b());
        writeln!(f, "{}", palette.header.apply_to(title))?;
        let topic = match request.topic() {
            "" => TOPIC_FALLBACK,
            topic => topic,
        };
        writeln!(f, "Topic: {topic}")?;
        writeln!(f, "Tone: {}", request.tone())?;
        writeln!(f)?;

        for entry in &self.transcript.entries {
            match entry {
                Entry::Separator => writeln!(f)?,
                Entry::Line(line) => write_line(f, line, palette)?,
            }
        }

        Ok(())
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, line: &DialogueLine, palette: &Palette) -> fmt::Result {
    if line.speaker.is_empty() {
        return writeln!(f, "{}", palette.narration.apply_to(&line.text));
    }

    let label = format!("{}:", line.speaker);
    writeln!(
        f,
        "{} {}",
        palette.speaker(line.attribution).apply_to(label),
        line.text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{GenerationRequest, Tone};

    fn transcript(raw: &str, topic: &str) -> Transcript {
        Transcript::parse(
            raw,
            GenerationRequest::new("Einstein", "Yoda", topic, Tone::Philosophical).unwrap(),
        )
    }

    #[test]
    fn plain_rendering_keeps_order_and_spacing() {
        let rendered = render(
            &transcript(
                "The scene opens in a lab.\nEinstein: Time is relative.\n\nYoda: Strong with physics, you are.\nNarrator: fin",
                "Spacetime",
            ),
            &Palette::plain(),
        )
        .to_string();

        assert_eq!(
            rendered,
            "Einstein & Yoda\n\
             Topic: Spacetime\n\
             Tone: Philosophical\n\
             \n\
             The scene opens in a lab.\n\
             Einstein: Time is relative.\n\
             \n\
             Yoda: Strong with physics, you are.\n\
             Narrator: fin\n"
        );
    }

    #[test]
    fn empty_topic_shows_general_conversation() {
        let rendered = render(&transcript("", ""), &Palette::plain()).to_string();

        assert_eq!(
            rendered,
            "Einstein & Yoda\nTopic: General conversation\nTone: Philosophical\n\n"
        );
    }

    #[test]
    fn styled_rendering_differs_per_speaker() {
        console::set_colors_enabled(true);
        let palette = Palette::styled();
        let rendered = render(&transcript("Einstein: A\nYoda: B", ""), &palette).to_string();

        let a = palette.character_a.apply_to("Einstein:").force_styling(true).to_string();
        let b = palette.character_b.apply_to("Yoda:").force_styling(true).to_string();
        assert_ne!(a, b);
        assert!(rendered.contains(&format!("{a} A")));
        assert!(rendered.contains(&format!("{b} B")));
    }
}
