use booklog_core::{
    Book, BookStore, BookValidationError, Catalog, CatalogError, CatalogErrorKind, Genre,
    JsonFileBookStore, MemoryBookStore, NewBook, SearchField, SearchQuery,
};
use std::fs;

fn dune() -> NewBook {
    NewBook::new("Dune", "Herbert", 1965, "Sci-Fi", true)
}

fn empty_catalog() -> Catalog<MemoryBookStore> {
    Catalog::open(MemoryBookStore::default()).expect("memory store should open")
}

fn seeded_catalog() -> Catalog<MemoryBookStore> {
    let mut catalog = empty_catalog();
    for request in [
        dune(),
        NewBook::new("Emma", "Jane Austen", 1815, "Fiction", false),
        NewBook::new("Dune", "Frank Herbert", 1984, "Sci-Fi", false),
        NewBook::new("Gone Girl", "Gillian Flynn", 2012, "Mystery", true),
    ] {
        catalog.add(request).expect("seed book should be added");
    }
    catalog
}

fn field_of(book: &Book, field: SearchField) -> &str {
    match field {
        SearchField::Title => &book.title,
        SearchField::Author => &book.author,
    }
}

#[test]
fn add_to_empty_catalog_then_list_and_stats() {
    let mut catalog = empty_catalog();
    catalog.add(dune()).expect("add should succeed");

    let books = catalog.list();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Dune");
    assert_eq!(books[0].author, "Herbert");
    assert_eq!(books[0].year, 1965);
    assert_eq!(books[0].genre.as_str(), "Sci-Fi");
    assert!(books[0].read);

    let stats = catalog.statistics();
    assert_eq!(stats.total, 1);
    assert_eq!(stats.read_count, 1);
    assert_eq!(stats.percent_read, Some(100.0));
    assert_eq!(stats.percent_read_label().as_deref(), Some("100.0%"));
}

#[test]
fn add_appends_last_and_flushes() {
    let mut catalog = seeded_catalog();
    let before = catalog.len();

    let added = catalog
        .add(NewBook::new("Neuromancer", "William Gibson", 1984, "Sci-Fi", false))
        .expect("add should succeed")
        .clone();

    assert_eq!(catalog.len(), before + 1);
    assert_eq!(catalog.list().last(), Some(&added));
    assert_eq!(catalog.store().snapshot(), catalog.list());
}

#[test]
fn add_with_invalid_field_leaves_catalog_unchanged() {
    let mut catalog = seeded_catalog();
    let before = catalog.list().to_vec();

    let err = catalog
        .add(NewBook::new("Dune", "Herbert", -1965, "Sci-Fi", true))
        .expect_err("negative year must be rejected");
    assert_eq!(err.kind(), CatalogErrorKind::InvalidField);
    assert!(matches!(
        err,
        CatalogError::InvalidField(BookValidationError::NegativeYear(-1965))
    ));

    let err = catalog
        .add(NewBook::new("Dune", "Herbert", 1965, "Horror", true))
        .expect_err("unknown genre must be rejected");
    assert_eq!(err.kind(), CatalogErrorKind::InvalidField);

    assert_eq!(catalog.list(), before.as_slice());
    assert_eq!(catalog.store().snapshot(), before);
}

#[test]
fn remove_drops_every_duplicate_title() {
    let mut catalog = seeded_catalog();

    let removed = catalog.remove("Dune").expect("remove should succeed");

    assert_eq!(removed, 2);
    assert_eq!(catalog.titles(), vec!["Emma", "Gone Girl"]);
    assert_eq!(catalog.store().snapshot(), catalog.list());
}

#[test]
fn remove_is_exact_and_case_sensitive() {
    let mut catalog = seeded_catalog();

    assert_eq!(catalog.remove("dune").expect("remove should succeed"), 0);
    assert_eq!(catalog.remove("Dun").expect("remove should succeed"), 0);
    assert_eq!(catalog.len(), 4);
}

#[test]
fn remove_is_idempotent() {
    let mut once = seeded_catalog();
    once.remove("Emma").expect("remove should succeed");

    let mut twice = seeded_catalog();
    twice.remove("Emma").expect("first remove should succeed");
    let removed_again = twice.remove("Emma").expect("second remove should succeed");

    assert_eq!(removed_again, 0);
    assert_eq!(once.list(), twice.list());
}

#[test]
fn search_by_title_is_case_insensitive_substring() {
    let catalog = seeded_catalog();

    let hits = catalog.search(&SearchQuery::title("dun"));
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|book| book.title == "Dune"));
    assert_eq!(hits[0].year, 1965);
    assert_eq!(hits[1].year, 1984);
}

#[test]
fn search_results_are_an_ordered_subsequence() {
    let catalog = seeded_catalog();

    for query in [
        SearchQuery::author("herbert"),
        SearchQuery::author("N"),
        SearchQuery::title("e"),
        SearchQuery::title(" "),
        SearchQuery::title("zzz"),
    ] {
        let hits = catalog.search(&query);
        let needle = query.text.to_lowercase();

        let mut cursor = catalog.list().iter();
        for hit in &hits {
            let field = field_of(hit, query.field).to_lowercase();
            assert!(field.contains(&needle), "{hit} does not match {query:?}");
            assert!(
                cursor.any(|book| std::ptr::eq(book, *hit)),
                "hits out of catalog order for {query:?}"
            );
        }
    }
}

#[test]
fn padded_query_only_matches_fields_containing_it_verbatim() {
    let mut catalog = seeded_catalog();
    catalog
        .add(NewBook::new("Dune Messiah", "Frank Herbert", 1969, "Sci-Fi", false))
        .expect("add should succeed");

    let hits = catalog.search(&SearchQuery::title("dune "));
    let titles: Vec<&str> = hits.iter().map(|book| book.title.as_str()).collect();
    assert_eq!(titles, vec!["Dune Messiah"]);

    let spaced = catalog.search(&SearchQuery::title(" "));
    let titles: Vec<&str> = spaced.iter().map(|book| book.title.as_str()).collect();
    assert_eq!(titles, vec!["Gone Girl", "Dune Messiah"]);
}

#[test]
fn empty_search_returns_nothing() {
    let catalog = seeded_catalog();
    assert!(catalog.search(&SearchQuery::title("")).is_empty());
    assert!(catalog.search(&SearchQuery::author("")).is_empty());
}

#[test]
fn statistics_on_empty_catalog_has_no_percentage() {
    let catalog = empty_catalog();

    let stats = catalog.statistics();
    assert_eq!(stats.total, 0);
    assert_eq!(stats.read_count, 0);
    assert_eq!(stats.percent_read, None);
    assert_eq!(stats.percent_read_label(), None);
}

#[test]
fn statistics_count_read_books() {
    let catalog = seeded_catalog();

    let stats = catalog.statistics();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.read_count, 2);
    assert_eq!(stats.percent_read, Some(50.0));
}

#[test]
fn open_loads_existing_snapshot() {
    let emma = Book::new("Emma", "Jane Austen", 1815, Genre::Fiction, true)
        .expect("Emma should be valid");
    let seeded = vec![emma];

    let catalog = Catalog::open(MemoryBookStore::with_books(seeded.clone()))
        .expect("seeded store should open");
    assert_eq!(catalog.list(), seeded.as_slice());
}

#[test]
fn file_backed_catalog_survives_reopen() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("library.txt");

    {
        let mut catalog = Catalog::open(JsonFileBookStore::new(&path))
            .expect("missing file should open");
        catalog.add(dune()).expect("first add should succeed");
        catalog
            .add(NewBook::new("Emma", "Jane Austen", 1815, "Fiction", false))
            .expect("second add should succeed");
        catalog.remove("Emma").expect("remove should succeed");
    }

    let reopened = Catalog::open(JsonFileBookStore::new(&path))
        .expect("saved file should open");
    assert_eq!(reopened.titles(), vec!["Dune"]);
}

#[test]
fn open_surfaces_corrupt_file_as_malformed_record() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("library.txt");
    fs::write(&path, "not json").expect("fixture should be written");

    let err = Catalog::open(JsonFileBookStore::new(&path))
        .err()
        .expect("corrupt file must not open");
    assert_eq!(err.kind(), CatalogErrorKind::MalformedRecord);
}

#[test]
fn open_surfaces_unreadable_file_as_storage_unavailable() {
    let dir = tempfile::tempdir().expect("temp dir should be created");

    let err = Catalog::open(JsonFileBookStore::new(dir.path()))
        .err()
        .expect("directory must not open");
    assert_eq!(err.kind(), CatalogErrorKind::StorageUnavailable);
}

#[test]
fn failed_flush_keeps_memory_and_disk_in_sync() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("library.txt");
    let mut catalog = Catalog::open(JsonFileBookStore::new(&path))
        .expect("missing file should open");
    catalog.add(dune()).expect("add should succeed");
    let before = catalog.list().to_vec();

    // Swap the library file for a directory so the rename step fails.
    fs::remove_file(&path).expect("library file should be removed");
    fs::create_dir(&path).expect("directory should be created");
    fs::write(path.join("occupied"), "x").expect("occupant should be written");

    let err = catalog
        .add(NewBook::new("Emma", "Jane Austen", 1815, "Fiction", false))
        .expect_err("add must fail when the flush fails");
    assert_eq!(err.kind(), CatalogErrorKind::StorageUnavailable);
    assert_eq!(catalog.list(), before.as_slice());

    let err = catalog
        .remove("Dune")
        .expect_err("remove must fail when the flush fails");
    assert_eq!(err.kind(), CatalogErrorKind::StorageUnavailable);
    assert_eq!(catalog.list(), before.as_slice());
}

#[test]
fn memory_store_tracks_every_flush() {
    let mut catalog = empty_catalog();
    catalog.add(dune()).expect("add should succeed");
    catalog.remove("Dune").expect("remove should succeed");

    let stored = catalog.store().load().expect("memory store should load");
    assert!(stored.is_empty());
}
