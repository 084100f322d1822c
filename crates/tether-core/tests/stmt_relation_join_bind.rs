mod support;

use pretty_assertions::assert_eq;
use std::sync::Arc;
use std_util::{assert_err_is, assert_ok};
use support::*;
use tether_core::schema::{ColumnRef, Relation, RelationKind, TableMap};
use tether_core::stmt::{BinaryOp, Join, JoinColumn, JoinCondition, JoinType, RelationJoin};

fn discriminated(kind: RelationKind) -> Relation {
    Relation::new("comments", kind, "book", "comment")
        .column("id", "target_id")
        .fixed("kind", "target_type", "book")
}

fn column(table: &str, column: &str, alias: Option<&str>) -> JoinColumn {
    JoinColumn::new(ColumnRef::new(table, column), alias)
}

// ---------------------------------------------------------------------------
// Condition building
// ---------------------------------------------------------------------------

#[test]
fn plain_slots_become_column_equalities() {
    let join = assert_ok!(RelationJoin::bound(
        book_author(),
        None,
        None,
        JoinType::Inner
    ));

    assert_eq!(
        join.join().conditions,
        vec![JoinCondition::columns(
            column("book", "author_id", None),
            BinaryOp::Eq,
            column("author", "id", None),
        )]
    );
    assert_eq!(join.join().left_table.as_deref(), Some("book"));
    assert_eq!(join.join().right_table.as_deref(), Some("author"));
}

#[test]
fn one_to_many_fixed_value_filters_right_column() {
    let join = assert_ok!(RelationJoin::bound(
        discriminated(RelationKind::OneToMany),
        Some("b"),
        Some("c"),
        JoinType::Left,
    ));

    assert_eq!(
        join.join().conditions,
        vec![
            JoinCondition::columns(
                column("book", "id", Some("b")),
                BinaryOp::Eq,
                column("comment", "target_id", Some("c")),
            ),
            JoinCondition::value(column("comment", "target_type", Some("c")), BinaryOp::Eq, "book"),
        ]
    );
}

#[test]
fn many_to_one_fixed_value_filters_left_column() {
    for kind in [
        RelationKind::ManyToOne,
        RelationKind::ManyToMany,
        RelationKind::OneToOne,
    ] {
        let join = assert_ok!(RelationJoin::bound(
            discriminated(kind),
            Some("b"),
            Some("c"),
            JoinType::Left,
        ));

        assert_eq!(
            join.join().conditions[1],
            JoinCondition::value(column("book", "kind", Some("b")), BinaryOp::Eq, "book"),
            "{kind:?}"
        );
    }
}

#[test]
fn conditions_follow_slot_order() {
    let relation = Relation::new("edition", RelationKind::ManyToOne, "book", "edition")
        .column("isbn", "isbn")
        .fixed("format", "format", 2)
        .column("lang", "lang");

    let join = assert_ok!(RelationJoin::bound(relation, None, None, JoinType::Inner));
    let rendered: Vec<_> = join
        .join()
        .conditions
        .iter()
        .map(|condition| condition.to_string())
        .collect();

    assert_eq!(
        rendered,
        vec![
            "book.isbn=edition.isbn",
            "book.format=2",
            "book.lang=edition.lang"
        ]
    );
}

#[test]
fn relation_without_slots_has_no_conditions() {
    let relation = Relation::new("anything", RelationKind::ManyToMany, "book", "tag");
    let join = assert_ok!(RelationJoin::bound(relation, None, None, JoinType::Inner));

    assert_eq!(join.join().count_conditions(), 0);
    assert_eq!(join.relation().unwrap().name.snake_case(), "anything");
}

// ---------------------------------------------------------------------------
// Binding errors
// ---------------------------------------------------------------------------

#[test]
fn mismatched_mapping_is_rejected() {
    let mut relation = book_author();
    relation
        .right_columns
        .push(ColumnRef::new("author", "region"));

    let err = assert_err_is!(
        RelationJoin::bound(relation, None, None, JoinType::Inner).map(|_| ()),
        is_invalid_mapping
    );
    assert!(err.to_string().contains("1 left columns to 2 right columns"));

    let mut relation = book_author();
    relation.fixed_left_values.clear();
    assert_err_is!(
        RelationJoin::bound(relation, None, None, JoinType::Inner).map(|_| ()),
        is_invalid_mapping
    );
}

#[test]
fn binding_twice_is_rejected() {
    let mut join = RelationJoin::new(JoinType::Inner);
    assert_ok!(join.bind(book_author(), None, None).map(|_| ()));

    assert_err_is!(
        join.bind(author_country(), None, None).map(|_| ()),
        is_invalid_mapping
    );
    assert_eq!(join.join().count_conditions(), 1);
    assert_eq!(join.relation().unwrap(), &book_author());
}

#[test]
fn unbound_join_has_no_relation() {
    let join = RelationJoin::new(JoinType::Inner);

    assert!(!join.is_bound());
    assert_err_is!(join.relation().map(|_| ()), is_unbound_relation);
    assert_err_is!(join.table_map(&database()).map(|_| ()), is_unbound_relation);
}

// ---------------------------------------------------------------------------
// Relation alias and table map
// ---------------------------------------------------------------------------

#[test]
fn relation_alias_defaults_to_right_table() {
    let mut join = assert_ok!(RelationJoin::bound(
        book_author(),
        None,
        None,
        JoinType::Inner
    ));
    assert!(!join.has_relation_alias());
    assert_eq!(join.relation_alias(), None);
    assert_eq!(join.effective_relation_alias(), Some("author"));

    join.set_relation_alias("writer");
    assert!(join.has_relation_alias());
    assert_eq!(join.effective_relation_alias(), Some("writer"));
}

#[test]
fn table_map_is_resolved_from_relation() {
    let db = database();
    let join = assert_ok!(RelationJoin::bound(
        book_author(),
        None,
        Some("a"),
        JoinType::Inner
    ));

    let table_map = assert_ok!(join.table_map(&db));
    assert_eq!(table_map.name, "author");
    assert!(Arc::ptr_eq(table_map, db.table("author").unwrap()));
    assert!(assert_ok!(join.is_identifier_quoting_enabled(&db)));

    // Resolved once, later lookups do not consult the registry.
    let empty = tether_core::schema::DatabaseMap::new("empty");
    assert_eq!(assert_ok!(join.table_map(&empty)).name, "author");
}

#[test]
fn table_map_can_be_set_explicitly() {
    let mut join = assert_ok!(RelationJoin::bound(
        book_author(),
        None,
        None,
        JoinType::Inner
    ));
    join.set_table_map(Arc::new(TableMap::new("author_archive")));

    let empty = tether_core::schema::DatabaseMap::new("empty");
    assert_eq!(assert_ok!(join.table_map(&empty)).name, "author_archive");
    assert!(!assert_ok!(join.is_identifier_quoting_enabled(&empty)));
}

#[test]
fn missing_right_table_is_reported() {
    let join = assert_ok!(RelationJoin::bound(
        Relation::new("ghost", RelationKind::ManyToOne, "book", "ghost").column("ghost_id", "id"),
        None,
        None,
        JoinType::Inner,
    ));

    assert_err_is!(join.table_map(&database()).map(|_| ()), is_invalid_schema);
}

// ---------------------------------------------------------------------------
// Conversion from a plain join
// ---------------------------------------------------------------------------

#[test]
fn from_join_keeps_conditions_and_resolves_table() {
    let db = database();
    let mut plain = Join::new(JoinType::Left);
    plain.add_explicit_condition(
        &ColumnRef::new("book", "author_id"),
        None,
        &ColumnRef::new("author", "id"),
        Some("a"),
        BinaryOp::Eq,
    );

    let join = assert_ok!(RelationJoin::from_join(plain.clone(), &db));

    assert_eq!(join.join(), &plain);
    assert_eq!(join.relation_alias(), Some("a"));
    assert_eq!(assert_ok!(join.table_map(&db)).name, "author");
    assert!(join.is_primary());
    assert_err_is!(join.relation().map(|_| ()), is_unbound_relation);
    assert_eq!(Join::from(join), plain);
}

#[test]
fn from_join_requires_a_known_right_table() {
    let db = database();
    assert_err_is!(
        RelationJoin::from_join(Join::new(JoinType::Inner), &db).map(|_| ()),
        is_invalid_schema
    );

    let mut plain = Join::new(JoinType::Inner);
    plain.add_foreign_value_condition(
        &ColumnRef::new("ghost", "kind"),
        None,
        "x",
        BinaryOp::Eq,
    );
    assert_err_is!(
        RelationJoin::from_join(plain, &db).map(|_| ()),
        is_invalid_schema
    );
}

#[test]
fn from_join_can_then_be_bound() {
    let db = database();
    let mut join = assert_ok!(RelationJoin::from_join(
        {
            let mut plain = Join::new(JoinType::Inner);
            plain.add_foreign_value_condition(
                &ColumnRef::new("author", "name"),
                None,
                "Ursula",
                BinaryOp::Eq,
            );
            plain
        },
        &db
    ));

    assert_ok!(join.bind(book_author(), None, None).map(|_| ()));
    assert_eq!(join.join().count_conditions(), 2);
    assert_eq!(
        join.to_string(),
        "INNER JOIN author ON (author.name='Ursula' AND book.author_id=author.id) \
         table map: author relation: Author previous join: null relation alias: null"
    );
}

#[test]
fn display_unbound_join() {
    let join = RelationJoin::new(JoinType::Right);
    assert_eq!(
        join.to_string(),
        "RIGHT JOIN ON () table map: null relation: null previous join: null relation alias: null"
    );
}

#[test]
fn accessor_name() {
    assert_eq!(book_author().accessor_name(), "getAuthor");
    assert_eq!(
        Relation::new("book_author", RelationKind::OneToOne, "a", "b").accessor_name(),
        "getBookAuthor"
    );
}
