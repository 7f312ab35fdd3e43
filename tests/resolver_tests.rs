//! Tests for last-id resolution and minting
//!
//! These tests verify:
//! - Empty and missing namespaces resolve to 0
//! - The hexadecimal reading of legacy decimal keys
//! - The corrected decimal reading and ordered schemes
//! - Fallback to 0 on unparseable keys
//! - In-memory id minting

use bookshelf::resolver::{resolve_last_id, resolve_last_id_or_zero, IdSequence};
use bookshelf::{key_for, BookshelfError, Config, IdRadix, KeyScheme, Store};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_store() -> (TempDir, Store) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .db_path(temp_dir.path().join("books.db"))
        .build();
    let store = Store::open(&config).unwrap();
    (temp_dir, store)
}

// =============================================================================
// Resolution Tests
// =============================================================================

#[test]
fn test_missing_namespace_resolves_to_zero() {
    let (_temp, store) = setup_temp_store();
    let ns = store.namespace("books");

    let last = resolve_last_id(&ns, KeyScheme::Decimal, IdRadix::Hexadecimal).unwrap();

    assert_eq!(last, 0);
}

#[test]
fn test_resolution_creates_namespace() {
    let (_temp, store) = setup_temp_store();
    let ns = store.namespace("books");

    resolve_last_id(&ns, KeyScheme::Decimal, IdRadix::Hexadecimal).unwrap();

    assert_eq!(store.list_namespaces().unwrap(), vec!["books".to_string()]);
}

#[test]
fn test_single_digit_key_resolves_to_itself() {
    let (_temp, store) = setup_temp_store();
    let ns = store.namespace("books");

    ns.put(&key_for(1), b"v").unwrap();
    ns.put(&key_for(2), b"v").unwrap();

    let last = resolve_last_id(&ns, KeyScheme::Decimal, IdRadix::Hexadecimal).unwrap();

    assert_eq!(last, 2);
}

#[test]
fn test_decimal_key_resolves_as_hex() {
    let (_temp, store) = setup_temp_store();
    let ns = store.namespace("books");

    ns.put(b"12", b"v").unwrap();

    let last = resolve_last_id(&ns, KeyScheme::Decimal, IdRadix::Hexadecimal).unwrap();

    assert_eq!(last, 0x12);
}

#[test]
fn test_decimal_radix_reads_key_as_written() {
    let (_temp, store) = setup_temp_store();
    let ns = store.namespace("books");

    ns.put(b"12", b"v").unwrap();

    let last = resolve_last_id(&ns, KeyScheme::Decimal, IdRadix::Decimal).unwrap();

    assert_eq!(last, 12);
}

#[test]
fn test_legacy_layout_resolves_lexicographic_maximum() {
    let (_temp, store) = setup_temp_store();
    let ns = store.namespace("books");

    for id in 1..=10u64 {
        ns.put(&key_for(id), b"v").unwrap();
    }

    // "9" > "10" in byte order
    let last = resolve_last_id(&ns, KeyScheme::Decimal, IdRadix::Decimal).unwrap();

    assert_eq!(last, 9);
}

#[test]
fn test_padded_layout_resolves_numeric_maximum() {
    let (_temp, store) = setup_temp_store();
    let ns = store.namespace("books");
    let scheme = KeyScheme::PaddedDecimal;

    for id in 1..=12u64 {
        ns.put(&scheme.encode(id), b"v").unwrap();
    }

    let last = resolve_last_id(&ns, scheme, IdRadix::Decimal).unwrap();

    assert_eq!(last, 12);
}

#[test]
fn test_big_endian_layout_resolves_numeric_maximum() {
    let (_temp, store) = setup_temp_store();
    let ns = store.namespace("books");
    let scheme = KeyScheme::BigEndian;

    for id in [3u64, 300, 30] {
        ns.put(&scheme.encode(id), b"v").unwrap();
    }

    let last = resolve_last_id(&ns, scheme, IdRadix::Hexadecimal).unwrap();

    assert_eq!(last, 300);
}

// =============================================================================
// Fallback Tests
// =============================================================================

#[test]
fn test_unparseable_key_is_id_parse_error() {
    let (_temp, store) = setup_temp_store();
    let ns = store.namespace("books");

    ns.put(b"not-a-number", b"v").unwrap();

    let result = resolve_last_id(&ns, KeyScheme::Decimal, IdRadix::Hexadecimal);

    assert!(matches!(result, Err(BookshelfError::IdParse { .. })));
    assert!(result.unwrap_err().is_recoverable());
}

#[test]
fn test_unparseable_key_falls_back_to_zero() {
    let (_temp, store) = setup_temp_store();
    let ns = store.namespace("books");

    ns.put(b"zzz", b"v").unwrap();

    let last = resolve_last_id_or_zero(&ns, KeyScheme::Decimal, IdRadix::Hexadecimal).unwrap();

    assert_eq!(last, 0);
}

// =============================================================================
// Minting Tests
// =============================================================================

#[test]
fn test_sequence_mints_successive_ids() {
    let mut ids = IdSequence::after(0);

    assert_eq!(ids.mint().unwrap(), 1);
    assert_eq!(ids.mint().unwrap(), 2);
    assert_eq!(ids.last(), 2);
}

#[test]
fn test_sequence_continues_after_resolved_id() {
    let mut ids = IdSequence::after(0x12);

    assert_eq!(ids.mint().unwrap(), 0x13);
    assert_eq!(ids.mint().unwrap(), 0x14);
}

#[test]
fn test_sequence_does_not_wrap() {
    let mut ids = IdSequence::after(u64::MAX - 1);

    assert_eq!(ids.mint().unwrap(), u64::MAX);
    assert!(matches!(
        ids.mint(),
        Err(BookshelfError::IdExhausted { last }) if last == u64::MAX
    ));
    assert_eq!(ids.last(), u64::MAX);
}
