use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// File stem of each World English Bible export paired with the display name
/// used everywhere else in the API.
const BOOK_FILES: [(&str, &str); 66] = [
    ("genesis", "Genesis"),
    ("exodus", "Exodus"),
    ("leviticus", "Leviticus"),
    ("numbers", "Numbers"),
    ("deuteronomy", "Deuteronomy"),
    ("joshua", "Joshua"),
    ("judges", "Judges"),
    ("ruth", "Ruth"),
    ("1samuel", "1 Samuel"),
    ("2samuel", "2 Samuel"),
    ("1kings", "1 Kings"),
    ("2kings", "2 Kings"),
    ("1chronicles", "1 Chronicles"),
    ("2chronicles", "2 Chronicles"),
    ("ezra", "Ezra"),
    ("nehemiah", "Nehemiah"),
    ("esther", "Esther"),
    ("job", "Job"),
    ("psalms", "Psalms"),
    ("proverbs", "Proverbs"),
    ("ecclesiastes", "Ecclesiastes"),
    ("songofsolomon", "Song of Solomon"),
    ("isaiah", "Isaiah"),
    ("jeremiah", "Jeremiah"),
    ("lamentations", "Lamentations"),
    ("ezekiel", "Ezekiel"),
    ("daniel", "Daniel"),
    ("hosea", "Hosea"),
    ("joel", "Joel"),
    ("amos", "Amos"),
    ("obadiah", "Obadiah"),
    ("jonah", "Jonah"),
    ("micah", "Micah"),
    ("nahum", "Nahum"),
    ("habakkuk", "Habakkuk"),
    ("zephaniah", "Zephaniah"),
    ("haggai", "Haggai"),
    ("zechariah", "Zechariah"),
    ("malachi", "Malachi"),
    ("matthew", "Matthew"),
    ("mark", "Mark"),
    ("luke", "Luke"),
    ("john", "John"),
    ("acts", "Acts"),
    ("romans", "Romans"),
    ("1corinthians", "1 Corinthians"),
    ("2corinthians", "2 Corinthians"),
    ("galatians", "Galatians"),
    ("ephesians", "Ephesians"),
    ("philippians", "Philippians"),
    ("colossians", "Colossians"),
    ("1thessalonians", "1 Thessalonians"),
    ("2thessalonians", "2 Thessalonians"),
    ("1timothy", "1 Timothy"),
    ("2timothy", "2 Timothy"),
    ("titus", "Titus"),
    ("philemon", "Philemon"),
    ("hebrews", "Hebrews"),
    ("james", "James"),
    ("1peter", "1 Peter"),
    ("2peter", "2 Peter"),
    ("1john", "1 John"),
    ("2john", "2 John"),
    ("3john", "3 John"),
    ("jude", "Jude"),
    ("revelation", "Revelation"),
];

/// Entry of a WEB export file. Only `paragraph text` entries carry verse
/// content; headings and footnotes are other types and get skipped.
#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "chapterNumber")]
    chapter_number: Option<u32>,
    #[serde(rename = "verseNumber")]
    verse_number: Option<u32>,
    value: Option<String>,
}

type ChapterMap = BTreeMap<u32, BTreeMap<u32, String>>;

/// In-memory Bible text, built once at startup and read-only afterwards.
pub struct CorpusStore {
    books: HashMap<String, ChapterMap>,
}

/// Borrowed view of one chapter's verses. Verse numbers iterate ascending.
pub struct Chapter<'a> {
    pub book: &'a str,
    pub number: u32,
    verses: &'a BTreeMap<u32, String>,
}

impl<'a> Chapter<'a> {
    pub fn verse_count(&self) -> usize {
        self.verses.len()
    }

    pub fn has_verse(&self, verse_number: u32) -> bool {
        self.verses.contains_key(&verse_number)
    }

    pub fn verse(&self, verse_number: u32) -> Option<&'a str> {
        self.verses.get(&verse_number).map(String::as_str)
    }

    pub fn verse_numbers(&self) -> Vec<u32> {
        self.verses.keys().copied().collect()
    }
}

impl CorpusStore {
    /// Loads every known book file from `data_dir`. A missing or unparseable
    /// file is logged and skipped so one bad export cannot take the service
    /// down with it.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let mut books = HashMap::new();

        for (file_stem, book_name) in BOOK_FILES {
            let path = data_dir.join(format!("{}.json", file_stem));
            match load_book(&path) {
                Ok(chapters) if !chapters.is_empty() => {
                    tracing::debug!("loaded {} with {} chapters", book_name, chapters.len());
                    books.insert(book_name.to_string(), chapters);
                }
                Ok(_) => {
                    tracing::error!("no verses found in {}", path.display());
                }
                Err(err) => {
                    tracing::error!("failed to load {}: {:#}", path.display(), err);
                }
            }
        }

        Ok(Self { books })
    }

    pub fn from_books(books: HashMap<String, ChapterMap>) -> Self {
        Self { books }
    }

    pub fn has_book(&self, book: &str) -> bool {
        self.books.contains_key(book)
    }

    pub fn chapters_of(&self, book: &str) -> Vec<u32> {
        self.books
            .get(book)
            .map(|chapters| chapters.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn chapter(&self, book: &str, chapter_number: u32) -> Option<Chapter<'_>> {
        let (book_name, chapters) = self.books.get_key_value(book)?;
        let verses = chapters.get(&chapter_number)?;
        Some(Chapter {
            book: book_name,
            number: chapter_number,
            verses,
        })
    }

    pub fn verse(&self, book: &str, chapter_number: u32, verse_number: u32) -> Option<&str> {
        self.chapter(book, chapter_number)?.verse(verse_number)
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    pub fn total_verse_count(&self) -> usize {
        self.books
            .values()
            .flat_map(|chapters| chapters.values())
            .map(|verses| verses.len())
            .sum()
    }
}

fn load_book(path: &Path) -> Result<ChapterMap> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let entries: Vec<RawEntry> =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    Ok(chapters_from_entries(entries))
}

fn chapters_from_entries(entries: Vec<RawEntry>) -> ChapterMap {
    let mut chapters = ChapterMap::new();
    for entry in entries {
        if entry.kind != "paragraph text" {
            continue;
        }
        let (Some(chapter), Some(verse), Some(value)) =
            (entry.chapter_number, entry.verse_number, entry.value)
        else {
            continue;
        };
        chapters
            .entry(chapter)
            .or_default()
            .insert(verse, value.trim().to_string());
    }
    chapters
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn store_with(books: &[(&str, &[(u32, &[(u32, &str)])])]) -> CorpusStore {
        let mut map = HashMap::new();
        for (book, chapters) in books {
            let mut chapter_map = ChapterMap::new();
            for (chapter, verses) in chapters.iter() {
                let verse_map: BTreeMap<u32, String> = verses
                    .iter()
                    .map(|(number, text)| (*number, text.to_string()))
                    .collect();
                chapter_map.insert(*chapter, verse_map);
            }
            map.insert(book.to_string(), chapter_map);
        }
        CorpusStore::from_books(map)
    }

    #[test]
    fn lookup_roundtrip() {
        let store = store_with(&[(
            "John",
            &[(3, &[(16, "For God so loved the world"), (17, "For God didn't send")])],
        )]);

        assert!(store.has_book("John"));
        assert!(!store.has_book("Jhon"));
        assert_eq!(store.chapters_of("John"), vec![3]);
        assert_eq!(
            store.verse("John", 3, 16),
            Some("For God so loved the world")
        );
        assert_eq!(store.verse("John", 3, 18), None);
        assert!(store.chapter("John", 4).is_none());
    }

    #[test]
    fn chapter_view_exposes_sorted_verse_numbers() {
        let store = store_with(&[("Jude", &[(1, &[(3, "c"), (1, "a"), (2, "b")])])]);
        let chapter = store.chapter("Jude", 1).unwrap();
        assert_eq!(chapter.verse_count(), 3);
        assert_eq!(chapter.verse_numbers(), vec![1, 2, 3]);
        assert!(chapter.has_verse(2));
        assert!(!chapter.has_verse(4));
    }

    #[test]
    fn chapters_of_unknown_book_is_empty() {
        let store = store_with(&[]);
        assert!(store.chapters_of("Genesis").is_empty());
    }

    #[test]
    fn loader_keeps_only_paragraph_text_entries() {
        let entries: Vec<RawEntry> = serde_json::from_str(
            r#"[
                {"type": "paragraph text", "chapterNumber": 1, "verseNumber": 1, "value": " In the beginning "},
                {"type": "heading", "value": "The Creation"},
                {"type": "paragraph text", "chapterNumber": 1, "verseNumber": 2, "value": "The earth was formless"},
                {"type": "paragraph text", "value": "missing numbers"}
            ]"#,
        )
        .unwrap();

        let chapters = chapters_from_entries(entries);
        assert_eq!(chapters.len(), 1);
        let verses = chapters.get(&1).unwrap();
        assert_eq!(verses.len(), 2);
        assert_eq!(verses.get(&1).map(String::as_str), Some("In the beginning"));
    }

    #[test]
    fn book_file_table_covers_all_sixty_six_books() {
        assert_eq!(BOOK_FILES.len(), 66);
        let mut names: Vec<&str> = BOOK_FILES.iter().map(|(_, name)| *name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 66);
    }
}
