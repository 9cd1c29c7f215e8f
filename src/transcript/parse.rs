use super::{Attribution, DialogueLine, Entry};

/// Splits raw backend output into ordered entries.
///
/// Never fails: lines without a speaker label, or with a label that is not
/// exactly one of the two characters, come back as [`Attribution::Unknown`].
pub fn parse(raw: &str, character_a: &str, character_b: &str) -> Vec<Entry> {
    let entries: Vec<Entry> = raw
        .lines()
        .map(|line| parse_line(line, character_a, character_b))
        .collect();

    let unattributed = entries
        .iter()
        .filter(|entry| {
            matches!(
                entry,
                Entry::Line(DialogueLine {
                    attribution: Attribution::Unknown,
                    ..
                })
            )
        })
        .count();
    if unattributed > 0 {
        tracing::warn!(unattributed, "Transcript contains lines without a known speaker");
    }

    entries
}

fn parse_line(line: &str, character_a: &str, character_b: &str) -> Entry {
    let line = line.trim();
    if line.is_empty() {
        return Entry::Separator;
    }

    let Some((speaker, text)) = line.split_once(':') else {
        return Entry::Line(DialogueLine {
            speaker: String::new(),
            text: line.to_owned(),
            attribution: Attribution::Unknown,
        });
    };

    let speaker = speaker.trim();
    let attribution = if speaker == character_a {
        Attribution::CharacterA
    } else if speaker == character_b {
        Attribution::CharacterB
    } else {
        Attribution::Unknown
    };

    Entry::Line(DialogueLine {
        speaker: speaker.to_owned(),
        text: text.trim().to_owned(),
        attribution,
    })
}
