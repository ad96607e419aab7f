//! Canonical New Testament book ordering and number assignment.
//!
//! MyBible modules key every verse on a numeric `book_number`. The LXX base
//! module occupies the Old Testament range, so the merged module places the
//! 27 NT books in a reserved range starting at 470, stepping by 10 in
//! canonical order (Matthew = 470, Mark = 480, ... Revelation = 730).

/// The 27 canonical New Testament book names, in canonical order.
pub const NT_BOOKS: [&str; 27] = [
    "Matthew",
    "Mark",
    "Luke",
    "John",
    "Acts",
    "Romans",
    "1 Corinthians",
    "2 Corinthians",
    "Galatians",
    "Ephesians",
    "Philippians",
    "Colossians",
    "1 Thessalonians",
    "2 Thessalonians",
    "1 Timothy",
    "2 Timothy",
    "Titus",
    "Philemon",
    "Hebrews",
    "James",
    "1 Peter",
    "2 Peter",
    "1 John",
    "2 John",
    "3 John",
    "Jude",
    "Revelation",
];

/// Book number assigned to the first NT book (Matthew) in the merged module.
pub const NT_BASE_BOOK_NUMBER: i64 = 470;

/// Gap between consecutive NT book numbers.
pub const NT_BOOK_NUMBER_STEP: i64 = 10;

/// Returns the merged-module book number for a canonical index.
///
/// Index 0 is Matthew (470), index 26 is Revelation (730).
#[must_use]
pub fn book_number_for_index(index: usize) -> i64 {
    NT_BASE_BOOK_NUMBER + (index as i64) * NT_BOOK_NUMBER_STEP
}

/// Matches a source book against the canonical NT list.
///
/// Matching is case-insensitive containment in either direction:
/// - a canon name contained in the source long name (handles decorated
///   long names such as "The Gospel According to Matthew"), or
/// - the source short name contained in a canon name (handles abbreviated
///   modules that store "Matt" or "Rom").
///
/// When several canon names are contained in the long name (e.g. both
/// "John" and "1 John" match a long name of "1 John"), the longest canon
/// name wins so numbered books land on their own slot.
///
/// Returns the canonical index, or `None` when the book is not a canonical
/// NT book (e.g. an apocryphal extra in the source module).
#[must_use]
pub fn match_book(long_name: &str, short_name: Option<&str>) -> Option<usize> {
    let long_lower = long_name.to_lowercase();

    let longest_containment = NT_BOOKS
        .iter()
        .enumerate()
        .filter(|(_, canon)| long_lower.contains(&canon.to_lowercase()))
        .max_by_key(|(_, canon)| canon.len());

    if let Some((index, _)) = longest_containment {
        return Some(index);
    }

    // Fall back to the short name: abbreviations are prefixes of the canon
    // name often enough for containment to hold.
    let short_lower = short_name
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)?;

    NT_BOOKS
        .iter()
        .position(|canon| canon.to_lowercase().contains(&short_lower))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_numbers_are_unique_multiples_of_ten() {
        let numbers: Vec<i64> = (0..NT_BOOKS.len()).map(book_number_for_index).collect();

        for (i, number) in numbers.iter().enumerate() {
            assert_eq!(*number, 470 + (i as i64) * 10);
            assert_eq!(number % 10, 0);
        }

        let mut deduped = numbers.clone();
        deduped.dedup();
        assert_eq!(deduped.len(), numbers.len());
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(book_number_for_index(0), 470); // Matthew
        assert_eq!(book_number_for_index(26), 730); // Revelation
    }

    #[test]
    fn test_match_exact_long_name() {
        assert_eq!(match_book("Matthew", None), Some(0));
        assert_eq!(match_book("Revelation", None), Some(26));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert_eq!(match_book("MATTHEW", None), Some(0));
        assert_eq!(match_book("mark", None), Some(1));
    }

    #[test]
    fn test_match_decorated_long_name() {
        assert_eq!(match_book("The Gospel According to Luke", None), Some(2));
        assert_eq!(match_book("Revelation of John", None), Some(26));
    }

    #[test]
    fn test_numbered_books_prefer_their_own_slot() {
        // "1 John" contains both "John" and "1 John"; the longer match wins.
        assert_eq!(match_book("1 John", None), Some(22));
        assert_eq!(match_book("2 John", None), Some(23));
        assert_eq!(match_book("3 John", None), Some(24));
        assert_eq!(match_book("John", None), Some(3));
        assert_eq!(match_book("2 Corinthians", None), Some(7));
    }

    #[test]
    fn test_match_by_short_name() {
        assert_eq!(match_book("Mt", Some("Matt")), Some(0));
        assert_eq!(match_book("Rm", Some("Rom")), Some(5));
    }

    #[test]
    fn test_empty_short_name_is_ignored() {
        assert_eq!(match_book("Not A Book", Some("")), None);
        assert_eq!(match_book("Not A Book", Some("  ")), None);
    }

    #[test]
    fn test_unmatched_book() {
        assert_eq!(match_book("Psalms of Solomon", None), None);
        assert_eq!(match_book("Didache", Some("Did")), None);
    }
}
