/// Catalog entry for one of the 66 canonical books. Word counts are the
/// fixed totals of the World English Bible text, not derived at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BibleBook {
    pub name: &'static str,
    pub is_old_testament: bool,
    pub word_count: u32,
}

const fn book(name: &'static str, is_old_testament: bool, word_count: u32) -> BibleBook {
    BibleBook {
        name,
        is_old_testament,
        word_count,
    }
}

pub const BIBLE_BOOKS: [BibleBook; 66] = [
    book("Genesis", true, 32046),
    book("Exodus", true, 25957),
    book("Leviticus", true, 18852),
    book("Numbers", true, 25048),
    book("Deuteronomy", true, 23008),
    book("Joshua", true, 15671),
    book("Judges", true, 15385),
    book("Ruth", true, 2039),
    book("1 Samuel", true, 20837),
    book("2 Samuel", true, 17170),
    book("1 Kings", true, 20361),
    book("2 Kings", true, 18784),
    book("1 Chronicles", true, 16664),
    book("2 Chronicles", true, 21349),
    book("Ezra", true, 5605),
    book("Nehemiah", true, 8507),
    book("Esther", true, 4932),
    book("Job", true, 12674),
    book("Psalms", true, 30147),
    book("Proverbs", true, 9921),
    book("Ecclesiastes", true, 4537),
    book("Song of Solomon", true, 2020),
    book("Isaiah", true, 25608),
    book("Jeremiah", true, 33002),
    book("Lamentations", true, 2324),
    book("Ezekiel", true, 29918),
    book("Daniel", true, 9001),
    book("Hosea", true, 3615),
    book("Joel", true, 1447),
    book("Amos", true, 3027),
    book("Obadiah", true, 440),
    book("Jonah", true, 1082),
    book("Micah", true, 2118),
    book("Nahum", true, 855),
    book("Habakkuk", true, 1011),
    book("Zephaniah", true, 1141),
    book("Haggai", true, 926),
    book("Zechariah", true, 4855),
    book("Malachi", true, 1320),
    book("Matthew", false, 18346),
    book("Mark", false, 11304),
    book("Luke", false, 19482),
    book("John", false, 15635),
    book("Acts", false, 18450),
    book("Romans", false, 7111),
    book("1 Corinthians", false, 6830),
    book("2 Corinthians", false, 4477),
    book("Galatians", false, 2230),
    book("Ephesians", false, 2422),
    book("Philippians", false, 1629),
    book("Colossians", false, 1582),
    book("1 Thessalonians", false, 1481),
    book("2 Thessalonians", false, 823),
    book("1 Timothy", false, 1591),
    book("2 Timothy", false, 1238),
    book("Titus", false, 659),
    book("Philemon", false, 335),
    book("Hebrews", false, 4971),
    book("James", false, 1742),
    book("1 Peter", false, 1684),
    book("2 Peter", false, 1099),
    book("1 John", false, 1950),
    book("2 John", false, 219),
    book("3 John", false, 185),
    book("Jude", false, 451),
    book("Revelation", false, 9851),
];

pub fn old_testament() -> impl Iterator<Item = &'static BibleBook> {
    BIBLE_BOOKS.iter().filter(|book| book.is_old_testament)
}

pub fn new_testament() -> impl Iterator<Item = &'static BibleBook> {
    BIBLE_BOOKS.iter().filter(|book| !book.is_old_testament)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_thirty_nine_ot_and_twenty_seven_nt_books() {
        assert_eq!(BIBLE_BOOKS.len(), 66);
        assert_eq!(old_testament().count(), 39);
        assert_eq!(new_testament().count(), 27);
    }

    #[test]
    fn names_are_unique_and_word_counts_positive() {
        let mut names: Vec<&str> = BIBLE_BOOKS.iter().map(|book| book.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 66);
        assert!(BIBLE_BOOKS.iter().all(|book| book.word_count > 0));
    }
}
