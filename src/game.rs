use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::corpus::{Chapter, CorpusStore};
use crate::models::Verse;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("no expansion possible: {0}")]
    NoExpansionPossible(String),
    #[error("data integrity: {0}")]
    DataIntegrity(String),
}

/// Picks a verse with the book -> chapter -> verse algorithm: one uniform
/// draw per stage, so a one-chapter book comes up as often as Psalms.
pub fn random_verse(
    store: &CorpusStore,
    selected_books: &HashSet<String>,
    rng: &mut impl Rng,
) -> Result<Verse, GameError> {
    if selected_books.is_empty() {
        return Err(GameError::InvalidInput("no books selected".to_string()));
    }

    // Sorted so a seeded rng draws the same book regardless of set order.
    let mut available: Vec<&str> = selected_books
        .iter()
        .map(String::as_str)
        .filter(|book| store.has_book(book))
        .collect();
    available.sort_unstable();

    let Some(book) = available.choose(rng).copied() else {
        return Err(GameError::NotFound(
            "none of the selected books are available".to_string(),
        ));
    };

    let chapters = store.chapters_of(book);
    let Some(chapter_number) = chapters.choose(rng).copied() else {
        return Err(GameError::DataIntegrity(format!(
            "no chapters found for book: {}",
            book
        )));
    };

    let chapter = store.chapter(book, chapter_number).ok_or_else(|| {
        GameError::DataIntegrity(format!("missing chapter {} {}", book, chapter_number))
    })?;

    let verse_numbers = chapter.verse_numbers();
    let Some(verse_number) = verse_numbers.choose(rng).copied() else {
        return Err(GameError::DataIntegrity(format!(
            "no verses found for {} {}",
            book, chapter_number
        )));
    };

    let text = chapter.verse(verse_number).ok_or_else(|| {
        GameError::DataIntegrity(format!(
            "missing verse {} {}:{}",
            book, chapter_number, verse_number
        ))
    })?;

    let mut verse = Verse::new(text, book, chapter_number, verse_number);
    verse.can_expand_more = chapter.verse_count() > 1;
    verse.total_verses_in_chapter = chapter.verse_count();

    tracing::debug!("generated random verse: {}", verse.reference);
    Ok(verse)
}

/// Grows the caller's contiguous range by one verse. Forward expansion is
/// always tried before backward; the caller keeps the range bounds between
/// calls, the server holds no session state.
pub fn expand_verse(
    store: &CorpusStore,
    book: &str,
    chapter_number: u32,
    from_verse: u32,
    to_verse: u32,
) -> Result<Verse, GameError> {
    let chapter = store.chapter(book, chapter_number).ok_or_else(|| {
        GameError::InvalidInput(format!("chapter not found: {} {}", book, chapter_number))
    })?;

    if let Some(next_verse) = to_verse.checked_add(1) {
        if chapter.has_verse(next_verse) {
            return Ok(expanded(&chapter, next_verse, from_verse, to_verse));
        }
    }

    if from_verse > 1 {
        let previous_verse = from_verse - 1;
        if chapter.has_verse(previous_verse) {
            return Ok(expanded(&chapter, previous_verse, from_verse, to_verse));
        }
    }

    Err(GameError::NoExpansionPossible(format!(
        "cannot expand verse range for {} {} (currently showing verses {}-{})",
        book, chapter_number, from_verse, to_verse
    )))
}

fn expanded(chapter: &Chapter<'_>, verse_number: u32, from_verse: u32, to_verse: u32) -> Verse {
    let text = chapter.verse(verse_number).unwrap_or_default();
    let mut verse = Verse::new(text, chapter.book, chapter.number, verse_number);

    let new_range_size = (to_verse - from_verse + 1) as usize + 1;
    verse.can_expand_more = new_range_size < chapter.verse_count();
    verse.total_verses_in_chapter = chapter.verse_count();

    tracing::debug!("expanded verse range to include: {}", verse.reference);
    verse
}
