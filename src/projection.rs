//! Read-side assembly of API views from stored rows.
//!
//! Pure functions: rows in, views out. Partitioning rules live here so
//! the services and handlers never duplicate them.

use crate::models::{
    book::{Book, BookView},
    contribution::Credit,
    person::{BookCredit, Person, PersonView, PersonWithRoles},
    role::Role,
};

/// Assemble a book view, partitioning credits into authors, editors and
/// everyone else. A credit whose role is neither AUTHOR nor EDITOR lands
/// in `others` no matter what the role is.
pub fn book_view(book: Book, credits: Vec<Credit>, collections: Vec<String>) -> BookView {
    let mut authors = Vec::new();
    let mut editors = Vec::new();
    let mut others = Vec::new();

    for credit in credits {
        match credit.role.parse::<Role>() {
            Ok(Role::Author) => authors.push(credit),
            Ok(Role::Editor) => editors.push(credit),
            _ => others.push(credit),
        }
    }

    BookView {
        id: book.id,
        title: book.title,
        language: book.language,
        format: book.format,
        location: book.location,
        in_stock: book.in_stock,
        original_language: book.original_language,
        publication_year: book.publication_year,
        historical_date: book.historical_date,
        publisher: book.publisher,
        authors,
        editors,
        others,
        collections,
    }
}

/// Assemble a person detail view from their stored row and credits
pub fn person_view(person: Person, books: Vec<BookCredit>) -> PersonView {
    PersonView {
        id: person.id,
        first_name: person.first_name,
        prefix: person.prefix,
        last_name: person.last_name,
        books,
    }
}

/// Assemble a person list entry from their stored row and distinct roles
pub fn person_with_roles(person: Person, roles: Vec<String>) -> PersonWithRoles {
    PersonWithRoles {
        id: person.id,
        first_name: person.first_name,
        prefix: person.prefix,
        last_name: person.last_name,
        roles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> Book {
        Book {
            id: 1,
            title: "The Odyssey".to_string(),
            language: "en".to_string(),
            format: "Paperback".to_string(),
            location: "Shelf A".to_string(),
            in_stock: true,
            original_language: Some("el".to_string()),
            publication_year: Some(1996),
            historical_date: Some(-800),
            publisher: Some("Penguin".to_string()),
        }
    }

    fn credit(person_id: i64, last_name: &str, role: &str) -> Credit {
        Credit {
            person_id,
            first_name: None,
            prefix: None,
            last_name: last_name.to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn test_book_view_partitions_by_role() {
        let credits = vec![
            credit(1, "Homer", "AUTHOR"),
            credit(2, "Fagles", "TRANSLATOR"),
            credit(3, "Knox", "EDITOR"),
            credit(4, "Baskin", "ILLUSTRATOR"),
        ];

        let view = book_view(book(), credits, vec!["Classics".to_string()]);

        assert_eq!(view.authors.len(), 1);
        assert_eq!(view.authors[0].last_name, "Homer");
        assert_eq!(view.editors.len(), 1);
        assert_eq!(view.editors[0].last_name, "Knox");
        assert_eq!(view.others.len(), 2);
        assert_eq!(view.collections, vec!["Classics".to_string()]);
    }

    #[test]
    fn test_book_view_unknown_role_goes_to_others() {
        let credits = vec![credit(1, "Anonymous", "SCRIBE")];

        let view = book_view(book(), credits, vec![]);

        assert!(view.authors.is_empty());
        assert!(view.editors.is_empty());
        assert_eq!(view.others.len(), 1);
    }

    #[test]
    fn test_person_view_keeps_all_credits() {
        let person = Person {
            id: 7,
            first_name: Some("Robert".to_string()),
            prefix: None,
            last_name: "Fagles".to_string(),
        };
        let books = vec![
            BookCredit {
                title: "The Iliad".to_string(),
                role: "TRANSLATOR".to_string(),
            },
            BookCredit {
                title: "The Odyssey".to_string(),
                role: "TRANSLATOR".to_string(),
            },
        ];

        let view = person_view(person, books);

        assert_eq!(view.books.len(), 2);
        assert_eq!(view.last_name, "Fagles");
    }
}
