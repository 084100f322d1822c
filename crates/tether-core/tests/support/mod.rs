#![allow(dead_code)]

use std::cell::Cell;
use tether_core::schema::{DatabaseMap, Name, Relation, RelationKind, TableMap};
use tether_core::stmt::Hydrated;

/// Schema:
///   book    { id, author_id, publisher_id }  book.author -> author
///   author  { id, country_id, name }         author.country -> country, author.books -> book
///   country { id, continent_id, code }       country.continent -> continent
///   continent { id, name }
///   comment { id, target_id, target_type }   book.comments -> comment (only `book` targets)
pub fn database() -> DatabaseMap {
    let mut db = DatabaseMap::new("bookstore");

    let mut book = TableMap::new("book").columns(["id", "author_id", "publisher_id"]);
    book.add_relation(book_author()).unwrap();
    book.add_relation(book_comments()).unwrap();
    db.add_table(book);

    let mut author = TableMap::new("author")
        .columns(["id", "country_id", "name"])
        .identifier_quoting(true);
    author.add_relation(author_country()).unwrap();
    author.add_relation(author_books()).unwrap();
    db.add_table(author);

    let mut country = TableMap::new("country").columns(["id", "continent_id", "code"]);
    country.add_relation(country_continent()).unwrap();
    db.add_table(country);

    db.add_table(TableMap::new("continent").columns(["id", "name"]));
    db.add_table(TableMap::new("comment").columns(["id", "target_id", "target_type"]));

    db
}

pub fn book_author() -> Relation {
    Relation::new("author", RelationKind::ManyToOne, "book", "author").column("author_id", "id")
}

pub fn author_books() -> Relation {
    Relation::new("books", RelationKind::OneToMany, "author", "book").column("id", "author_id")
}

pub fn author_country() -> Relation {
    Relation::new("country", RelationKind::ManyToOne, "author", "country")
        .column("country_id", "id")
}

pub fn country_continent() -> Relation {
    Relation::new("continent", RelationKind::ManyToOne, "country", "continent")
        .column("continent_id", "id")
}

pub fn book_comments() -> Relation {
    Relation::new("comments", RelationKind::OneToMany, "book", "comment")
        .column("id", "target_id")
        .fixed("id", "target_type", "book")
}

/// A hydrated row that counts how often its related objects are requested.
pub struct Entity<'c> {
    pub table: &'static str,
    pub related: Vec<(Name, Entity<'c>)>,
    pub calls: &'c Cell<usize>,
}

impl<'c> Entity<'c> {
    pub fn new(table: &'static str, calls: &'c Cell<usize>) -> Self {
        Self {
            table,
            related: vec![],
            calls,
        }
    }

    pub fn with(mut self, relation: &str, entity: Entity<'c>) -> Self {
        self.related.push((Name::new(relation), entity));
        self
    }

    pub fn get(&self, relation: &str) -> &Entity<'c> {
        let name = Name::new(relation);
        &self.related.iter().find(|(n, _)| *n == name).unwrap().1
    }
}

impl Hydrated for Entity<'_> {
    fn related(&self, relation: &Name) -> Option<&dyn Hydrated> {
        self.calls.set(self.calls.get() + 1);
        self.related
            .iter()
            .find(|(name, _)| name == relation)
            .map(|(_, entity)| entity as &dyn Hydrated)
    }
}

/// Returns `true` if `object` is `entity`.
pub fn is_entity(object: &dyn Hydrated, entity: &Entity<'_>) -> bool {
    std::ptr::addr_eq(object, entity)
}
