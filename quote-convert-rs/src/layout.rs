//! The text layout engine: greedy word wrap and justify spacing.
//!
//! Pure functions over a caller-supplied measure function, so layout
//! decisions always use the same widths the draw path produces (font,
//! letter spacing, and size are whatever the measure closure sees).

/// A wrapped line: the joined text plus its constituent words, which
/// justify spacing needs individually.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// The words joined with single spaces.
    pub text: String,
    /// The words on this line. Empty for a blank line.
    pub words: Vec<String>,
}

impl Line {
    fn empty() -> Self {
        Line {
            text: String::new(),
            words: Vec::new(),
        }
    }

    fn from_words(words: Vec<String>) -> Self {
        Line {
            text: words.join(" "),
            words,
        }
    }

    /// Whether this line holds no words (a preserved blank line).
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Greedy word wrap.
///
/// User-entered line breaks (`\n`) are hard breaks: the input is split at
/// them first and each segment wraps independently; empty segments are
/// preserved as empty lines so authors can force blank lines. Within a
/// segment, words are appended while the measured candidate stays below
/// `max_width`. A single word wider than `max_width` is never split; it
/// overflows. Empty input produces one empty line.
pub fn wrap_text<F>(text: &str, max_width: f32, mut measure: F) -> Vec<Line>
where
    F: FnMut(&str) -> f32,
{
    let mut lines = Vec::new();

    for segment in text.split('\n') {
        let words: Vec<&str> = segment.split_whitespace().collect();
        if words.is_empty() {
            lines.push(Line::empty());
            continue;
        }

        let mut current = words[0].to_string();
        let mut current_words = vec![words[0].to_string()];

        for word in &words[1..] {
            let candidate = format!("{} {}", current, word);
            if measure(&candidate) < max_width {
                current = candidate;
                current_words.push((*word).to_string());
            } else {
                lines.push(Line::from_words(std::mem::take(&mut current_words)));
                current = (*word).to_string();
                current_words.push((*word).to_string());
            }
        }
        lines.push(Line::from_words(current_words));
    }

    if lines.is_empty() {
        lines.push(Line::empty());
    }

    lines
}

/// Width of the inter-word gap for a justified line.
///
/// The leftover space is `max_width` minus the width of the line with all
/// spaces removed, split evenly across the `words - 1` gaps. Returns None
/// for lines that justify cannot stretch (fewer than two words).
pub fn justify_gap<F>(line: &Line, max_width: f32, mut measure: F) -> Option<f32>
where
    F: FnMut(&str) -> f32,
{
    if line.words.len() < 2 {
        return None;
    }
    let squeezed: String = line.text.split_whitespace().collect();
    let total_spacing = max_width - measure(&squeezed);
    Some(total_spacing / (line.words.len() - 1) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Monospace mock: every character is 10 units wide.
    fn char_measure(s: &str) -> f32 {
        s.chars().count() as f32 * 10.0
    }

    #[test]
    fn test_single_line_fits() {
        let lines = wrap_text("one two", 200.0, char_measure);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "one two");
        assert_eq!(lines[0].words, vec!["one", "two"]);
    }

    #[test]
    fn test_wraps_at_max_width() {
        // "one two" = 7 chars = 70; cap at 65 forces a break
        let lines = wrap_text("one two three", 65.0, char_measure);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].text, "one");
        assert_eq!(lines[1].text, "two");
        assert_eq!(lines[2].text, "three");
    }

    #[test]
    fn test_no_line_exceeds_max_width_unless_single_word() {
        let text = "the quick brown fox jumps over the lazy dog again and again";
        let max_width = 120.0;
        for line in wrap_text(text, max_width, char_measure) {
            if line.words.len() > 1 {
                assert!(
                    char_measure(&line.text) < max_width,
                    "line '{}' too wide",
                    line.text
                );
            }
        }
    }

    #[test]
    fn test_overwide_word_not_split() {
        let lines = wrap_text("hi extraordinarily no", 100.0, char_measure);
        // The long word lands on its own overflowing line
        assert!(lines.iter().any(|l| l.text == "extraordinarily"));
        for line in &lines {
            assert!(!line.text.contains('-'));
        }
    }

    #[test]
    fn test_hard_breaks_split_segments() {
        let lines = wrap_text("one\ntwo three", 1000.0, char_measure);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "one");
        assert_eq!(lines[1].text, "two three");
    }

    #[test]
    fn test_empty_segments_preserved_as_blank_lines() {
        let lines = wrap_text("one\n\ntwo", 1000.0, char_measure);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].is_empty());
        assert_eq!(lines[1].text, "");
    }

    #[test]
    fn test_empty_input_is_one_empty_line() {
        let lines = wrap_text("", 100.0, char_measure);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].is_empty());
    }

    #[test]
    fn test_whitespace_only_segment_is_blank() {
        let lines = wrap_text("   ", 100.0, char_measure);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].is_empty());
    }

    #[test]
    fn test_justify_gap_fills_leftover_space() {
        let line = Line {
            text: "aa bb cc".to_string(),
            words: vec!["aa".into(), "bb".into(), "cc".into()],
        };
        // Squeezed width = 6 chars * 10 = 60; leftover = 240 - 60 = 180; 2 gaps
        let gap = justify_gap(&line, 240.0, char_measure).unwrap();
        assert!((gap - 90.0).abs() < 1e-6);

        // Gap sum equals max_width - sum(word widths)
        let word_sum: f32 = line.words.iter().map(|w| char_measure(w)).sum();
        let gap_sum = gap * (line.words.len() - 1) as f32;
        assert!((gap_sum - (240.0 - word_sum)).abs() < 1e-4);
    }

    #[test]
    fn test_justify_gap_single_word_is_none() {
        let line = Line {
            text: "alone".to_string(),
            words: vec!["alone".into()],
        };
        assert!(justify_gap(&line, 240.0, char_measure).is_none());
    }
}
