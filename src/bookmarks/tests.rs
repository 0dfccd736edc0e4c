use super::*;
use crate::segmenter::compute_ranges;
use tempfile::TempDir;

fn pages(set: &CutSet) -> Vec<usize> {
    set.iter().collect()
}

#[test]
fn test_add_and_load() {
    let db = BookmarkDb::new_in_memory().unwrap();
    assert!(db.add("a.pdf", 7).unwrap());
    assert!(db.add("a.pdf", 3).unwrap());
    assert!(db.add("b.pdf", 1).unwrap());

    assert_eq!(pages(&db.load("a.pdf").unwrap()), vec![3, 7]);
    assert_eq!(pages(&db.load("b.pdf").unwrap()), vec![1]);
    assert!(db.load("c.pdf").unwrap().is_empty());
}

#[test]
fn test_add_is_idempotent() {
    let db = BookmarkDb::new_in_memory().unwrap();
    assert!(db.add("a.pdf", 2).unwrap());
    assert!(!db.add("a.pdf", 2).unwrap());
    assert_eq!(db.load("a.pdf").unwrap().len(), 1);
}

#[test]
fn test_remove() {
    let db = BookmarkDb::new_in_memory().unwrap();
    db.add("a.pdf", 2).unwrap();

    assert!(db.remove("a.pdf", 2).unwrap());
    assert!(!db.remove("a.pdf", 2).unwrap());
    assert!(db.load("a.pdf").unwrap().is_empty());
}

#[test]
fn test_clear_only_touches_one_document() {
    let db = BookmarkDb::new_in_memory().unwrap();
    db.add("a.pdf", 1).unwrap();
    db.add("a.pdf", 4).unwrap();
    db.add("b.pdf", 4).unwrap();

    assert_eq!(db.clear("a.pdf").unwrap(), 2);
    assert_eq!(db.documents().unwrap(), vec!["b.pdf".to_string()]);
}

#[test]
fn test_toggle() {
    let db = BookmarkDb::new_in_memory().unwrap();
    assert!(toggle(&db, "a.pdf", 5).unwrap());
    assert!(db.load("a.pdf").unwrap().contains(5));
    assert!(!toggle(&db, "a.pdf", 5).unwrap());
    assert!(!db.load("a.pdf").unwrap().contains(5));
}

#[test]
fn test_persists_across_connections() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bookmarks.db");

    {
        let db = BookmarkDb::open(&path).unwrap();
        db.add("a.pdf", 3).unwrap();
        db.add("a.pdf", 7).unwrap();
    }

    let db = BookmarkDb::open(&path).unwrap();
    let cuts = db.load("a.pdf").unwrap();
    let ranges = compute_ranges(10, &cuts).unwrap();
    assert_eq!(ranges.len(), 3);
}

#[test]
fn test_page_labels() {
    assert_eq!(page_label(0), "Page 1");
    assert_eq!(page_label(41), "Page 42");
    assert_eq!(parse_page_label("Page 42"), Some(41));
    assert_eq!(parse_page_label("  Page 1 "), Some(0));
    assert_eq!(parse_page_label("Page 0"), None);
    assert_eq!(parse_page_label("Chapter 3"), None);
}
