use super::*;
use proptest::prelude::*;

fn cuts(pages: &[usize]) -> CutSet {
    pages.iter().copied().collect()
}

fn pairs(ranges: &[PageRange]) -> Vec<(usize, usize)> {
    ranges.iter().map(|r| (r.start(), r.end())).collect()
}

// ========================================================================
// compute_ranges
// ========================================================================

#[test]
fn test_no_cuts_is_whole_document() {
    let ranges = compute_ranges(7, &CutSet::new()).unwrap();
    assert_eq!(pairs(&ranges), vec![(0, 6)]);
}

#[test]
fn test_single_page_document() {
    let ranges = compute_ranges(1, &CutSet::new()).unwrap();
    assert_eq!(pairs(&ranges), vec![(0, 0)]);

    let ranges = compute_ranges(1, &cuts(&[0])).unwrap();
    assert_eq!(pairs(&ranges), vec![(0, 0)]);
}

#[test]
fn test_leading_section_before_first_cut() {
    let ranges = compute_ranges(10, &cuts(&[3, 7])).unwrap();
    assert_eq!(pairs(&ranges), vec![(0, 2), (3, 6), (7, 9)]);
}

#[test]
fn test_cut_at_zero_has_no_empty_leading_section() {
    let ranges = compute_ranges(5, &cuts(&[0, 2])).unwrap();
    assert_eq!(pairs(&ranges), vec![(0, 1), (2, 4)]);
}

#[test]
fn test_cut_on_last_page() {
    let ranges = compute_ranges(4, &cuts(&[3])).unwrap();
    assert_eq!(pairs(&ranges), vec![(0, 2), (3, 3)]);
}

#[test]
fn test_every_page_is_a_cut() {
    let ranges = compute_ranges(4, &cuts(&[0, 1, 2, 3])).unwrap();
    assert_eq!(pairs(&ranges), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
}

#[test]
fn test_insertion_order_and_duplicates_ignored() {
    let a = compute_ranges(12, &cuts(&[9, 2, 5, 2, 9])).unwrap();
    let b = compute_ranges(12, &cuts(&[2, 5, 9])).unwrap();
    assert_eq!(a, b);
    assert_eq!(pairs(&a), vec![(0, 1), (2, 4), (5, 8), (9, 11)]);
}

#[test]
fn test_zero_pages_rejected() {
    let err = compute_ranges(0, &CutSet::new()).unwrap_err();
    assert!(matches!(err, SegmentError::InvalidInput(_)));
    assert!(err.to_string().contains("no pages"));
}

#[test]
fn test_cut_past_end_rejected() {
    let err = compute_ranges(5, &cuts(&[1, 5])).unwrap_err();
    assert!(matches!(err, SegmentError::InvalidInput(_)));
    assert!(err.to_string().contains("cut point 5"));
}

#[test]
fn test_repeated_calls_identical() {
    let set = cuts(&[4, 1, 8]);
    let first = compute_ranges(20, &set).unwrap();
    for _ in 0..5 {
        assert_eq!(compute_ranges(20, &set).unwrap(), first);
    }
}

// ========================================================================
// PageRange / CutSet
// ========================================================================

#[test]
fn test_page_range_display_is_one_based() {
    assert_eq!(PageRange::new(0, 2).unwrap().to_string(), "1-3");
    assert_eq!(PageRange::new(7, 7).unwrap().to_string(), "8-8");
}

#[test]
fn test_page_range_rejects_reversed_bounds() {
    let err = PageRange::new(5, 2).unwrap_err();
    assert!(matches!(err, SegmentError::InvalidInput(_)));
}

#[test]
fn test_page_range_deserialize_checks_bounds() {
    let range: PageRange = serde_json::from_str(r#"{"start": 2, "end": 4}"#).unwrap();
    assert_eq!(range.len(), 3);
    assert_eq!(serde_json::to_string(&range).unwrap(), r#"{"start":2,"end":4}"#);

    let reversed = serde_json::from_str::<PageRange>(r#"{"start": 4, "end": 2}"#);
    assert!(reversed.is_err());
}

#[test]
fn test_page_range_len_and_pages() {
    let range = PageRange::new(3, 6).unwrap();
    assert_eq!(range.len(), 4);
    assert_eq!(range.pages().collect::<Vec<_>>(), vec![3, 4, 5, 6]);
    assert!(range.contains(3));
    assert!(!range.contains(7));
}

#[test]
fn test_cut_set_toggle() {
    let mut set = CutSet::new();
    assert!(set.toggle(4));
    assert!(set.contains(4));
    assert!(!set.toggle(4));
    assert!(set.is_empty());
}

#[test]
fn test_cut_set_insert_remove() {
    let mut set = CutSet::new();
    assert!(set.insert(2));
    assert!(!set.insert(2));
    assert!(set.remove(2));
    assert!(!set.remove(2));
}

#[test]
fn test_join_pages() {
    let texts = vec!["a", "b", "c", "d"];
    assert_eq!(join_pages(&texts, PageRange::new(1, 2).unwrap()), "bc");
    assert_eq!(join_pages(&texts, PageRange::new(3, 9).unwrap()), "d");
}

// ========================================================================
// split_on_marker
// ========================================================================

#[test]
fn test_split_two_sections() {
    let pieces = split_on_marker("A<<<SECTION_BREAK>>>B", SECTION_BREAK);
    assert_eq!(pieces, vec!["A", "B"]);
}

#[test]
fn test_split_without_marker() {
    let pieces = split_on_marker("no markers here", SECTION_BREAK);
    assert_eq!(pieces, vec!["no markers here"]);
}

#[test]
fn test_split_empty_document() {
    assert_eq!(split_on_marker("", SECTION_BREAK), vec![""]);
}

#[test]
fn test_split_trims_pieces() {
    let text = "  intro \n<<<SECTION_BREAK>>>\n body\n\n<<<SECTION_BREAK>>>   end";
    assert_eq!(split_on_marker(text, SECTION_BREAK), vec!["intro", "body", "end"]);
}

#[test]
fn test_split_adjacent_markers_yield_empty_piece() {
    let text = "a<<<SECTION_BREAK>>><<<SECTION_BREAK>>>b";
    assert_eq!(split_on_marker(text, SECTION_BREAK), vec!["a", "", "b"]);
}

#[test]
fn test_split_idempotent_on_marker_free_pieces() {
    let once = split_on_marker("x<<<SECTION_BREAK>>>y", SECTION_BREAK);
    for piece in &once {
        assert_eq!(split_on_marker(piece, SECTION_BREAK), vec![piece.clone()]);
    }
}

#[test]
fn test_split_custom_marker() {
    assert_eq!(split_on_marker("1|2|3", "|"), vec!["1", "2", "3"]);
}

// ========================================================================
// Properties
// ========================================================================

fn document_and_cuts() -> impl Strategy<Value = (usize, Vec<usize>)> {
    (1usize..200).prop_flat_map(|n| (Just(n), prop::collection::vec(0..n, 0..20)))
}

proptest! {
    #[test]
    fn prop_ranges_partition_document((n, raw) in document_and_cuts()) {
        let set: CutSet = raw.iter().copied().collect();
        let ranges = compute_ranges(n, &set).unwrap();

        prop_assert_eq!(ranges.first().map(|r| r.start()), Some(0));
        prop_assert_eq!(ranges.last().map(|r| r.end()), Some(n - 1));
        for pair in ranges.windows(2) {
            prop_assert_eq!(pair[0].end() + 1, pair[1].start());
        }
        prop_assert_eq!(ranges.iter().map(PageRange::len).sum::<usize>(), n);
    }

    #[test]
    fn prop_every_cut_starts_a_range((n, raw) in document_and_cuts()) {
        let set: CutSet = raw.iter().copied().collect();
        let ranges = compute_ranges(n, &set).unwrap();
        let starts: Vec<usize> = ranges.iter().map(|r| r.start()).collect();

        for cut in set.iter() {
            prop_assert!(starts.contains(&cut));
        }
        let expected = if set.contains(0) { set.len() } else { set.len() + 1 };
        prop_assert_eq!(ranges.len(), expected);
    }

    #[test]
    fn prop_split_rejoins_to_marker_free_text(parts in prop::collection::vec("[a-z ]{0,8}", 1..6)) {
        let text = parts.join(SECTION_BREAK);
        let pieces = split_on_marker(&text, SECTION_BREAK);
        let trimmed: Vec<String> = parts.iter().map(|p| p.trim().to_string()).collect();
        prop_assert_eq!(pieces, trimmed);
    }
}
