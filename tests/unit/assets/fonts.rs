use super::*;

fn system_db() -> usvg::fontdb::Database {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    db
}

#[test]
fn empty_database_has_no_fallback() {
    let db = usvg::fontdb::Database::new();
    assert!(installed_monospace_family(&db).is_none());
    assert!(fallback_face(&db, Weight::BOLD).is_none());
}

#[test]
fn pinned_book_ignores_descriptor() {
    let mut book = FontBook::pinned(vec![1, 2, 3]);
    let a = book.resolve(&FontDescriptor::default()).unwrap();
    let b = book.resolve(&FontDescriptor::new("Nowhere Sans", false, 12)).unwrap();
    assert_eq!(a.id, b.id);
    assert_eq!(a.bytes.as_slice(), &[1, 2, 3]);
}

#[test]
fn default_family_resolves_when_any_monospace_face_exists() {
    let db = system_db();
    if !db.faces().any(|f| f.monospaced) {
        return;
    }
    let mut book = FontBook::new();
    let font = book.resolve(&FontDescriptor::default()).unwrap();
    assert!(!font.bytes.is_empty());
    // Second lookup hits the cache.
    assert_eq!(book.resolve(&FontDescriptor::default()).unwrap().id, font.id);
}

#[test]
fn unknown_family_falls_back_to_an_installed_face() {
    let db = system_db();
    if db.is_empty() {
        return;
    }
    let mut book = FontBook::new();
    let font = FontDescriptor::new("No Such Family Anywhere", true, 20);
    assert!(book.resolve(&font).is_ok());
}
