use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use std::path::{Path, PathBuf};

use crate::interview::Interview;

/// `interview_<A>_<B>_<YYYYMMDD_HHMMSS>.txt`
pub fn file_name<Tz: TimeZone>(character_a: &str, character_b: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "interview_{}_{}_{}.txt",
        sanitize(character_a),
        sanitize(character_b),
        at.format("%Y%m%d_%H%M%S")
    )
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Writes the unparsed backend text into `dir` and returns the file's path.
pub async fn save<Tz: TimeZone>(dir: &Path, interview: &Interview, at: &DateTime<Tz>) -> Result<PathBuf>
where
    Tz::Offset: std::fmt::Display,
{
    let request = interview.request();
    let path = dir.join(file_name(request.character_a(), request.character_b(), at));

    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    tokio::fs::write(&path, &interview.raw)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), bytes = interview.raw.len(), "Exported interview");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{GenerationRequest, Tone};
    use chrono::Utc;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap()
    }

    #[test]
    fn file_name_embeds_characters_and_timestamp() {
        assert_eq!(
            file_name("Socrates", "Steve Jobs", &at()),
            "interview_Socrates_Steve Jobs_20240307_090501.txt"
        );
    }

    #[test]
    fn file_name_cannot_escape_directory() {
        assert_eq!(
            file_name("../etc", "a\\b", &at()),
            "interview_.._etc_a_b_20240307_090501.txt"
        );
    }

    #[tokio::test]
    async fn saves_raw_text_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let raw = "Intro without a label\n\nShiva: Balance.\nParvati: Always.\n";
        let interview = Interview::from_raw(
            raw.to_owned(),
            GenerationRequest::new("Shiva", "Parvati", "", Tone::Creative).unwrap(),
        );

        let path = save(&dir.path().join("nested"), &interview, &at()).await.unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "interview_Shiva_Parvati_20240307_090501.txt"
        );
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), raw);
    }
}
