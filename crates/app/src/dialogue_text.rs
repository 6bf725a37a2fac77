//! Text layout for the dialogue box and the event log overlay.

use std::mem;

use overworld::{ContentBlock, Dialogue, LogEvent};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Heading,
    Body,
    Bullet,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextLine {
    pub style: LineStyle,
    pub text: String,
}

impl TextLine {
    fn new(style: LineStyle, text: impl Into<String>) -> Self {
        Self { style, text: text.into() }
    }
}

/// Lay out a dialogue as styled lines no wider than `max_chars` characters.
pub fn dialogue_lines(dialogue: &Dialogue, max_chars: usize) -> Vec<TextLine> {
    let mut lines = vec![TextLine::new(LineStyle::Title, dialogue.title.clone())];
    for block in &dialogue.content {
        match block {
            ContentBlock::Heading { text } => {
                let rows = wrap(text, max_chars).into_iter();
                lines.extend(rows.map(|row| TextLine::new(LineStyle::Heading, row)));
            }
            ContentBlock::Paragraph { text } => {
                let rows = wrap(text, max_chars).into_iter();
                lines.extend(rows.map(|row| TextLine::new(LineStyle::Body, row)));
            }
            ContentBlock::Bullets { items } => {
                for item in items {
                    let rows = wrap(item, max_chars.saturating_sub(2));
                    for (index, row) in rows.into_iter().enumerate() {
                        let prefix = if index == 0 { "- " } else { "  " };
                        lines.push(TextLine::new(LineStyle::Bullet, format!("{prefix}{row}")));
                    }
                }
            }
        }
    }
    lines
}

/// Greedy word wrap. Words longer than the width get a row of their own.
pub fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            rows.push(mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

/// Keep at most `max_lines`, replacing the overflow with a "... and N more" marker.
pub fn fit_lines(lines: &[TextLine], max_lines: usize) -> Vec<TextLine> {
    if lines.len() <= max_lines {
        return lines.to_vec();
    }
    if max_lines == 0 {
        return Vec::new();
    }
    let hidden = lines.len() - (max_lines - 1);
    let mut fitted = lines[..max_lines - 1].to_vec();
    fitted.push(TextLine::new(LineStyle::Body, format!("... and {hidden} more")));
    fitted
}

pub fn event_log_line(event: &LogEvent) -> String {
    match event {
        LogEvent::MapLoaded { map, from_cache: true } => format!("returned to {map}"),
        LogEvent::MapLoaded { map, from_cache: false } => format!("first visit to {map}"),
        LogEvent::DoorEntered { from, to } => format!("door {from} -> {to}"),
        LogEvent::Blocked { direction } => format!("blocked {direction:?}"),
        LogEvent::DialogueShown { title } => format!("prompt: {title}"),
        LogEvent::DialogueCleared => "prompt left".to_string(),
        LogEvent::DialogueToggled { visible: true } => "dialogue opened".to_string(),
        LogEvent::DialogueToggled { visible: false } => "dialogue closed".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overworld::{Direction, MapId};

    fn sign() -> Dialogue {
        Dialogue {
            title: "Signpost".to_string(),
            content: vec![
                ContentBlock::Heading { text: "Welcome".to_string() },
                ContentBlock::Paragraph { text: "The museum lies to the north".to_string() },
                ContentBlock::Bullets { items: vec!["WASD to walk".to_string()] },
            ],
        }
    }

    #[test]
    fn wrap_breaks_on_word_boundaries() {
        assert_eq!(wrap("The museum lies to the north", 12), vec![
            "The museum",
            "lies to the",
            "north"
        ]);
        assert_eq!(wrap("lighthouse", 4), vec!["lighthouse"]);
        assert!(wrap("   ", 10).is_empty());
    }

    #[test]
    fn dialogue_lines_are_styled_per_block() {
        let lines = dialogue_lines(&sign(), 40);
        let styles: Vec<LineStyle> = lines.iter().map(|line| line.style).collect();
        assert_eq!(styles, vec![
            LineStyle::Title,
            LineStyle::Heading,
            LineStyle::Body,
            LineStyle::Bullet
        ]);
        assert_eq!(lines[3].text, "- WASD to walk");
    }

    #[test]
    fn bullet_continuations_are_indented() {
        let dialogue = Dialogue {
            title: "List".to_string(),
            content: vec![ContentBlock::Bullets { items: vec!["one two three".to_string()] }],
        };
        let lines = dialogue_lines(&dialogue, 9);
        assert_eq!(lines[1].text, "- one two");
        assert_eq!(lines[2].text, "  three");
    }

    #[test]
    fn overflow_is_summarised() {
        let lines = dialogue_lines(&sign(), 10);
        let fitted = fit_lines(&lines, 3);
        assert_eq!(fitted.len(), 3);
        assert_eq!(fitted[2].text, format!("... and {} more", lines.len() - 2));
        assert!(fit_lines(&lines, 0).is_empty());
    }

    #[test]
    fn event_lines_describe_transitions() {
        let island = MapId::from("island");
        let museum = MapId::from("museum");
        assert_eq!(
            event_log_line(&LogEvent::DoorEntered { from: island.clone(), to: museum }),
            "door island -> museum"
        );
        assert_eq!(
            event_log_line(&LogEvent::MapLoaded { map: island, from_cache: true }),
            "returned to island"
        );
        assert_eq!(
            event_log_line(&LogEvent::Blocked { direction: Direction::North }),
            "blocked North"
        );
    }
}
