use serde::Serialize;

/// A single verse plus the expansion metadata the verse game needs.
/// Field names stay camelCase on the wire for the existing frontend.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Verse {
    pub text: String,
    pub book: String,
    pub chapter: u32,
    pub verse_number: u32,
    pub reference: String,
    pub can_expand_more: bool,
    pub total_verses_in_chapter: usize,
}

impl Verse {
    pub fn new(
        text: impl Into<String>,
        book: impl Into<String>,
        chapter: u32,
        verse_number: u32,
    ) -> Self {
        let book = book.into();
        let reference = format_reference(&book, chapter, verse_number);
        Self {
            text: text.into(),
            book,
            chapter,
            verse_number,
            reference,
            can_expand_more: false,
            total_verses_in_chapter: 0,
        }
    }
}

pub fn format_reference(book: &str, chapter: u32, verse: u32) -> String {
    format!("{} {}:{}", book, chapter, verse)
}
