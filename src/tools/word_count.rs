//! Word and character counts

/// Live counts for a block of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStats {
    pub words: usize,
    /// Unicode scalar values, whitespace included
    pub characters: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        Self {
            words: text.split_whitespace().count(),
            characters: text.chars().count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_blank_text_have_no_words() {
        assert_eq!(TextStats::of(""), TextStats::default());
        let blank = TextStats::of("  \n\t ");
        assert_eq!(blank.words, 0);
        assert_eq!(blank.characters, 5);
    }

    #[test]
    fn runs_of_whitespace_separate_single_words() {
        let stats = TextStats::of("  buy   NIFTY\n\ncall  ");
        assert_eq!(stats.words, 3);
        assert_eq!(stats.characters, 21);
    }

    #[test]
    fn characters_count_scalars_not_bytes() {
        let stats = TextStats::of("₹100 gain");
        assert_eq!(stats.words, 2);
        assert_eq!(stats.characters, 9);
    }
}
