//! Fixture factory for request payloads.
//!
//! Generators cover four categories: valid, invalid, boundary, and
//! adversarial (see [`payloads`]). Every generator is pure and deterministic
//! modulo the owned RNG — equal seeds produce byte-equal fixtures, which is
//! why publish dates derive from the RNG rather than the wall clock. The
//! factory only constructs payloads; it never sanitizes them.

pub mod payloads;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use time::format_description::well_known::Rfc3339;
use time::macros::datetime;
use time::Duration;
use verso_client::{Author, Book};

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Seeded payload generator. One instance per scenario; never shared.
pub struct Fixtures {
    rng: ChaCha8Rng,
}

impl Fixtures {
    /// Fully reproducible stream: equal seeds, equal fixtures.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// OS-entropy stream for ad hoc runs.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Random alphabetic string, mixed case.
    pub fn alphabetic(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| ALPHABET[self.rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }

    /// RFC 3339 timestamp derived from the RNG: a fixed epoch plus a random
    /// offset inside a ten-year window.
    pub fn publish_date(&mut self) -> String {
        let base = datetime!(2010-01-01 00:00:00 UTC);
        let offset = Duration::seconds(self.rng.gen_range(0..315_360_000));
        (base + offset)
            .format(&Rfc3339)
            .expect("well-formed timestamp")
    }

    /// Realistic book payload: unique title suffix, bounded page count.
    pub fn book(&mut self) -> Book {
        let suffix = self.alphabetic(5);
        let page_count = self.rng.gen_range(100..600);
        let publish_date = self.publish_date();
        Book::new(
            format!("Test Book Title {suffix}"),
            "Generated book description for API testing purposes",
            page_count,
            "Sample excerpt from the generated book",
            publish_date,
        )
    }

    /// Book with caller-chosen headline fields.
    pub fn book_with(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        page_count: i32,
    ) -> Book {
        let title = title.into();
        let excerpt = format!("Sample excerpt for {title}");
        let publish_date = self.publish_date();
        Book::new(title, description, page_count, excerpt, publish_date)
    }

    /// Smallest payload the scenarios consider complete.
    pub fn minimal_book(&mut self, title: impl Into<String>) -> Book {
        let publish_date = self.publish_date();
        Book::new(
            title,
            "Minimal description",
            100,
            "Minimal excerpt",
            publish_date,
        )
    }

    /// Invalid category: empty required strings, negative count, malformed
    /// date. Whether the service rejects it is the scenario's question.
    pub fn invalid_book() -> Book {
        Book::new("", "", -1, "", "invalid-date")
    }

    /// Boundary category: kilo-character fields and `i32::MAX` pages.
    pub fn oversized_book(&mut self) -> Book {
        let title = self.alphabetic(1000);
        let description = self.alphabetic(5000);
        let excerpt = self.alphabetic(2000);
        let publish_date = self.publish_date();
        Book::new(title, description, i32::MAX, excerpt, publish_date)
    }

    /// Distinct numbered payloads for bulk scenarios.
    pub fn books(&mut self, count: usize) -> Vec<Book> {
        (1..=count)
            .map(|i| {
                let page_count = self.rng.gen_range(100..400);
                let publish_date = self.publish_date();
                Book::new(
                    format!("Bulk Book {i}"),
                    format!("Description for bulk book {i}"),
                    page_count,
                    format!("Excerpt {i}"),
                    publish_date,
                )
            })
            .collect()
    }

    /// Realistic author payload referencing a plausible book id.
    pub fn author(&mut self) -> Author {
        let id_book = self.rng.gen_range(1..=100);
        let first = format!("John{}", self.alphabetic(3));
        let last = format!("Doe{}", self.alphabetic(3));
        Author::new(id_book, first, last)
    }

    /// Invalid category: empty names and a negative book reference.
    pub fn invalid_author() -> Author {
        Author::new(-1, "", "")
    }

    /// Boundary category: kilo-character names, `i32::MAX` book reference.
    pub fn oversized_author(&mut self) -> Author {
        let first = self.alphabetic(1000);
        let last = self.alphabetic(1000);
        Author::new(i32::MAX, first, last)
    }

    /// Distinct numbered payloads for bulk scenarios.
    pub fn authors(&mut self, count: usize) -> Vec<Author> {
        (1..=count)
            .map(|i| Author::new(i as i32, format!("Author{i}"), format!("Last{i}")))
            .collect()
    }

    /// An id inside the seeded data range.
    pub fn plausible_id(&mut self) -> i32 {
        self.rng.gen_range(1..=1000)
    }

    /// An id far outside the seeded data range.
    pub fn unlikely_id(&mut self) -> i32 {
        self.rng.gen_range(10_000..110_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    #[test]
    fn equal_seeds_produce_equal_fixtures() {
        let mut a = Fixtures::with_seed(42);
        let mut b = Fixtures::with_seed(42);
        assert_eq!(a.book(), b.book());
        assert_eq!(a.author(), b.author());
        assert_eq!(a.oversized_book(), b.oversized_book());
        assert_eq!(a.unlikely_id(), b.unlikely_id());
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = Fixtures::with_seed(1);
        let mut b = Fixtures::with_seed(2);
        assert_ne!(a.book().title, b.book().title);
    }

    #[test]
    fn valid_book_is_bounded_and_unique() {
        let mut fixtures = Fixtures::with_seed(7);
        let first = fixtures.book();
        let second = fixtures.book();
        assert!((100..600).contains(&first.page_count));
        assert!(first.title.starts_with("Test Book Title "));
        assert_ne!(first.title, second.title);
        assert_eq!(first.id, 0);
    }

    #[test]
    fn publish_dates_are_valid_rfc3339() {
        let mut fixtures = Fixtures::with_seed(3);
        let date = fixtures.publish_date();
        assert!(OffsetDateTime::parse(&date, &Rfc3339).is_ok());
    }

    #[test]
    fn invalid_fixtures_have_the_documented_shape() {
        let book = Fixtures::invalid_book();
        assert_eq!(book.title, "");
        assert_eq!(book.page_count, -1);
        assert_eq!(book.publish_date, "invalid-date");

        let author = Fixtures::invalid_author();
        assert_eq!(author.first_name, "");
        assert_eq!(author.id_book, -1);
    }

    #[test]
    fn oversized_fixtures_hit_the_boundaries() {
        let mut fixtures = Fixtures::with_seed(9);
        let book = fixtures.oversized_book();
        assert_eq!(book.title.chars().count(), 1000);
        assert_eq!(book.description.chars().count(), 5000);
        assert_eq!(book.excerpt.chars().count(), 2000);
        assert_eq!(book.page_count, i32::MAX);

        let author = fixtures.oversized_author();
        assert_eq!(author.first_name.chars().count(), 1000);
        assert_eq!(author.id_book, i32::MAX);
    }

    #[test]
    fn bulk_payloads_are_numbered_and_distinct() {
        let mut fixtures = Fixtures::with_seed(11);
        let books = fixtures.books(5);
        assert_eq!(books.len(), 5);
        assert_eq!(books[0].title, "Bulk Book 1");
        assert_eq!(books[4].title, "Bulk Book 5");

        let authors = fixtures.authors(3);
        assert_eq!(authors[2].id_book, 3);
    }

    #[test]
    fn id_helpers_stay_in_range() {
        let mut fixtures = Fixtures::with_seed(13);
        for _ in 0..100 {
            assert!((1..=1000).contains(&fixtures.plausible_id()));
            assert!((10_000..110_000).contains(&fixtures.unlikely_id()));
        }
    }
}
