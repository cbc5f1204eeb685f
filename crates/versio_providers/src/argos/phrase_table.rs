//! Greedy longest-match phrase translation.

use std::collections::HashMap;
use versio_engines::EngineError;
use versio_engines::translate::LocalTranslator;

/// A phrase table for one language pair.
///
/// Lookups are case-insensitive. Each position of the input takes the longest
/// phrase that matches there; words no phrase covers pass through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseTable {
    phrases: HashMap<String, String>,
    longest: usize,
}

impl PhraseTable {
    /// Parses tab-separated `source<TAB>target` lines.
    ///
    /// Blank lines, lines starting with `#` and lines without a tab are
    /// skipped.
    #[must_use]
    pub fn parse(tsv: &str) -> Self {
        let mut table = Self::default();
        for line in tsv.lines() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((source, target)) = line.split_once('\t') {
                table.insert(source, target.trim());
            }
        }
        table
    }

    /// Adds or replaces a phrase.
    pub fn insert(&mut self, source: &str, target: &str) {
        let key = normalize(source.split_whitespace());
        if key.is_empty() {
            return;
        }
        self.longest = self.longest.max(key.split(' ').count());
        self.phrases.insert(key, target.to_string());
    }

    /// Number of phrases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Checks whether the table has no phrases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Translates `text`.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        let words: Vec<&str> = text.split_whitespace().collect();
        let mut out: Vec<String> = Vec::with_capacity(words.len());
        let mut i = 0;

        while i < words.len() {
            match self.longest_match(&words[i..]) {
                Some((len, target)) => {
                    let (_, trailing) = split_trailing_punctuation(words[i + len - 1]);
                    let mut rendered = if starts_uppercase(words[i]) {
                        capitalize(target)
                    } else {
                        target.to_string()
                    };
                    rendered.push_str(trailing);
                    out.push(rendered);
                    i += len;
                }
                None => {
                    out.push(words[i].to_string());
                    i += 1;
                }
            }
        }

        out.join(" ")
    }

    fn longest_match(&self, words: &[&str]) -> Option<(usize, &str)> {
        let max = self.longest.min(words.len());
        (1..=max).rev().find_map(|len| {
            let span = &words[..len];
            let (last_core, _) = split_trailing_punctuation(span[len - 1]);
            if last_core.is_empty() {
                return None;
            }
            let key = normalize(
                span[..len - 1]
                    .iter()
                    .copied()
                    .chain(core::iter::once(last_core)),
            );
            self.phrases.get(&key).map(|target| (len, target.as_str()))
        })
    }
}

impl LocalTranslator for PhraseTable {
    fn translate(
        &self,
        text: &str,
        _source_lang: &str,
        _target_lang: &str,
    ) -> Result<String, EngineError> {
        Ok(self.apply(text))
    }
}

fn normalize<'a>(words: impl Iterator<Item = &'a str>) -> String {
    words
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn split_trailing_punctuation(word: &str) -> (&str, &str) {
    let core = word.trim_end_matches(|c: char| c.is_ascii_punctuation());
    word.split_at(core.len())
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PhraseTable {
        PhraseTable::parse(
            "# en-de\n\
             hello\thallo\n\
             world\tWelt\n\
             good morning\tguten Morgen\n\
             good\tgut\n\
             \n\
             no tab here\n",
        )
    }

    #[test]
    fn parse_skips_comments_and_malformed_lines() {
        assert_eq!(table().len(), 4);
        assert!(PhraseTable::parse("").is_empty());
    }

    #[test]
    fn longest_phrase_wins() {
        assert_eq!(table().apply("good morning world"), "guten Morgen Welt");
        assert_eq!(table().apply("good world"), "gut Welt");
    }

    #[test]
    fn unknown_words_pass_through() {
        assert_eq!(table().apply("hello Zebra"), "hallo Zebra");
    }

    #[test]
    fn capitalization_and_punctuation_are_kept() {
        assert_eq!(table().apply("Hello, world!"), "Hallo, Welt!");
        assert_eq!(table().apply("Good morning."), "Guten Morgen.");
    }

    #[test]
    fn punctuation_only_tokens_pass_through() {
        assert_eq!(table().apply("hello - world"), "hallo - Welt");
    }

    #[test]
    fn usable_as_local_translator() {
        let translator: &dyn LocalTranslator = &table();
        assert_eq!(translator.translate("hello", "en", "de").unwrap(), "hallo");
    }
}
