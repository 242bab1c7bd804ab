use unicode_segmentation::UnicodeSegmentation;

/// One editing step reported by the surface.
///
/// Hosts whose input control owns its own buffer only ever send `Replace`;
/// hosts that forward raw keys use the rest. Counts are in graphemes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceEdit {
    Insert(String),
    Backspace,
    Delete,
    MoveCaret(isize),
    DeleteSurrounding { before: usize, after: usize },
    Replace(String),
}

/// Text shown on the surface and the caret inside it.
///
/// The caret is a byte offset that always sits on a grapheme boundary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SurfaceTextState {
    pub text: String,
    caret: usize,
}

impl SurfaceTextState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeded text with the caret after its last character.
    pub fn seeded(text: &str) -> Self {
        Self {
            text: text.to_string(),
            caret: text.len(),
        }
    }

    pub fn caret_index(&self) -> usize {
        self.caret
    }

    /// Applies `edit`; true when the text (not just the caret) changed.
    pub fn apply(&mut self, edit: SurfaceEdit) -> bool {
        match edit {
            SurfaceEdit::Insert(s) => {
                if s.is_empty() {
                    return false;
                }
                self.text.insert_str(self.caret, &s);
                self.caret += s.len();
                true
            }
            SurfaceEdit::Backspace => {
                let start = self.step(-1);
                self.remove(start, self.caret)
            }
            SurfaceEdit::Delete => {
                let end = self.step(1);
                self.remove(self.caret, end)
            }
            SurfaceEdit::MoveCaret(by) => {
                self.caret = self.step(by);
                false
            }
            SurfaceEdit::DeleteSurrounding { before, after } => {
                let stops = self.stops();
                let at = self.stop_index(&stops);
                let start = stops[at.saturating_sub(before)];
                let end = stops[at.saturating_add(after).min(stops.len() - 1)];
                self.remove(start, end)
            }
            SurfaceEdit::Replace(s) => {
                self.caret = s.len();
                if self.text == s {
                    return false;
                }
                self.text = s;
                true
            }
        }
    }

    fn remove(&mut self, start: usize, end: usize) -> bool {
        if start >= end {
            return false;
        }
        self.text.replace_range(start..end, "");
        self.caret = start;
        true
    }

    /// Byte offset `by` graphemes away from the caret, clamped to the text.
    fn step(&self, by: isize) -> usize {
        let stops = self.stops();
        let at = self.stop_index(&stops);
        let target = if by < 0 {
            at.saturating_sub(by.unsigned_abs())
        } else {
            at.saturating_add(by as usize).min(stops.len() - 1)
        };
        stops[target]
    }

    /// Every grapheme boundary, `0` and `text.len()` included.
    fn stops(&self) -> Vec<usize> {
        let mut stops: Vec<usize> = self.text.grapheme_indices(true).map(|(i, _)| i).collect();
        stops.push(self.text.len());
        stops
    }

    fn stop_index(&self, stops: &[usize]) -> usize {
        stops.binary_search(&self.caret).unwrap_or_else(|i| i.min(stops.len() - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_caret_at_end() {
        let st = SurfaceTextState::seeded("hello");
        assert_eq!(st.text, "hello");
        assert_eq!(st.caret_index(), 5);
        assert_eq!(SurfaceTextState::new().caret_index(), 0);
    }

    #[test]
    fn test_insert_at_caret() {
        let mut st = SurfaceTextState::seeded("ac");
        st.apply(SurfaceEdit::MoveCaret(-1));
        assert!(st.apply(SurfaceEdit::Insert("b".into())));
        assert_eq!(st.text, "abc");
        assert_eq!(st.caret_index(), 2);
        assert!(!st.apply(SurfaceEdit::Insert(String::new())));
    }

    #[test]
    fn test_backspace_and_delete_take_whole_graphemes() {
        // thumbs up + skin tone is one grapheme
        let mut st = SurfaceTextState::seeded("A👍🏽B");
        st.apply(SurfaceEdit::MoveCaret(-1));
        assert_eq!(st.caret_index(), "A👍🏽".len());
        assert!(st.apply(SurfaceEdit::Backspace));
        assert_eq!(st.text, "AB");
        assert_eq!(st.caret_index(), 1);
        assert!(st.apply(SurfaceEdit::Delete));
        assert_eq!(st.text, "A");
        assert!(!st.apply(SurfaceEdit::Delete));
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut st = SurfaceTextState::seeded("搜索");
        st.apply(SurfaceEdit::MoveCaret(-2));
        assert_eq!(st.caret_index(), 0);
        assert!(!st.apply(SurfaceEdit::Backspace));
        assert_eq!(st.text, "搜索");
    }

    #[test]
    fn test_caret_moves_clamp_to_text() {
        let mut st = SurfaceTextState::seeded("Hello");
        assert!(!st.apply(SurfaceEdit::MoveCaret(isize::MAX)));
        assert_eq!(st.caret_index(), 5);
        assert!(!st.apply(SurfaceEdit::MoveCaret(isize::MIN)));
        assert_eq!(st.caret_index(), 0);
        st.apply(SurfaceEdit::MoveCaret(2));
        assert_eq!(st.caret_index(), 2);
    }

    #[test]
    fn test_delete_surrounding() {
        let mut st = SurfaceTextState::seeded("Hello");
        st.apply(SurfaceEdit::MoveCaret(-1));
        assert!(st.apply(SurfaceEdit::DeleteSurrounding { before: 2, after: 1 }));
        assert_eq!(st.text, "He");
        assert_eq!(st.caret_index(), 2);
    }

    #[test]
    fn test_delete_surrounding_with_huge_counts() {
        let mut st = SurfaceTextState::seeded("Hello");
        assert!(!st.apply(SurfaceEdit::DeleteSurrounding { before: 0, after: usize::MAX }));
        assert_eq!(st.text, "Hello");

        assert!(st.apply(SurfaceEdit::DeleteSurrounding { before: usize::MAX, after: usize::MAX }));
        assert_eq!(st.text, "");
        assert_eq!(st.caret_index(), 0);
    }

    #[test]
    fn test_replace_reports_text_changes_only() {
        let mut st = SurfaceTextState::seeded("ab");
        st.apply(SurfaceEdit::MoveCaret(-1));
        assert!(!st.apply(SurfaceEdit::Replace("ab".into())));
        assert_eq!(st.caret_index(), 2);
        assert!(st.apply(SurfaceEdit::Replace("".into())));
        assert_eq!(st.caret_index(), 0);
    }
}
