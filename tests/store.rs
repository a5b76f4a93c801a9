//! Load/save behaviour of the pairs file on disk.

use std::fs;

use pairgrid::{
    AllowedSet, N_KINDS, PairsError, ParseMode, SaveMode, StoreOptions, TokenKind as K,
    TransitionPair,
    pairs::{
        initialize, load, load_json_bytes, load_with, save, save_json, save_json_with, save_with,
    },
};

fn pair(from: K, to: K) -> TransitionPair {
    TransitionPair::new(from, to)
}

#[test]
fn missing_file_loads_as_initialize() {
    let dir = tempfile::tempdir().unwrap();
    let set = load(dir.path().join("allowed_pairs.txt")).expect("missing file is not an error");
    assert_eq!(set, initialize());
    assert_eq!(set.len(), N_KINDS * N_KINDS);
    assert_eq!(set.count_allowed(), 0);
}

#[test]
fn save_writes_records_in_catalog_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("allowed_pairs.txt");

    // Inserted out of order on purpose.
    let set: AllowedSet = [pair(K::X, K::Assign), pair(K::Id, K::Plus)]
        .into_iter()
        .collect();
    save(&path, &set).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "{ Lexer::TokenType::ID, Lexer::TokenType::PLUS },\n\
         { Lexer::TokenType::X, Lexer::TokenType::ASSIGN },\n"
    );
}

#[test]
fn save_overwrites_previous_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("allowed_pairs.txt");
    let long: AllowedSet = catalog_pairs().collect();
    save(&path, &long).unwrap();

    let short: AllowedSet = [pair(K::Calc, K::LPar)].into_iter().collect();
    save(&path, &short).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "{ Lexer::TokenType::CALC, Lexer::TokenType::LPAR },\n"
    );
    assert_eq!(load(&path).unwrap(), short);
}

#[test]
fn saving_an_empty_set_leaves_a_single_newline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("allowed_pairs.txt");
    save(&path, &initialize()).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "\n");
    assert!(load(&path).unwrap().is_empty());
}

#[test]
fn malformed_line_does_not_abort_the_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("allowed_pairs.txt");
    fs::write(
        &path,
        "{ Lexer::TokenType::ID Lexer::TokenType::PLUS },\n\
         { Lexer::TokenType::X, Lexer::TokenType::ASSIGN },\n\
         { Lexer::TokenType::X, Lexer::TokenType::MODULO },\n\
         \n\
         garbage\n",
    )
    .unwrap();

    let set = load(&path).unwrap();
    assert_eq!(set.len(), 729);
    assert_eq!(set.allowed().collect::<Vec<_>>(), vec![pair(K::X, K::Assign)]);
    assert!(!set.get(K::Id, K::Plus));
}

#[test]
fn hand_edited_records_are_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("allowed_pairs.txt");
    fs::write(
        &path,
        "   {Lexer::TokenType::LPAR,Lexer::TokenType::RPAR}   \r\n\
         \t{ INT, PLUS },\n\
         MINUS, INT\n",
    )
    .unwrap();

    let set = load(&path).unwrap();
    assert!(set.get(K::LPar, K::RPar));
    assert!(set.get(K::Int, K::Plus));
    assert!(set.get(K::Minus, K::Int));
    assert_eq!(set.count_allowed(), 3);
}

#[test]
fn strict_load_fails_with_the_line_number() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("allowed_pairs.txt");
    fs::write(&path, "{ X, Y },\n{ X, NOPE },\n").unwrap();

    let opts = StoreOptions::default()
        .with_path(&path)
        .with_parse_mode(ParseMode::Strict);
    match load_with(&path, &opts) {
        Err(PairsError::Line { line: 2, source }) => {
            assert!(matches!(*source, PairsError::UnknownToken { ref name } if name == "NOPE"));
        }
        other => panic!("expected a line-2 error, got {other:?}"),
    }
}

#[test]
fn atomic_save_matches_truncating_save() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    let set: AllowedSet = [pair(K::DerX, K::LPar), pair(K::EndOfFile, K::EndOfFile)]
        .into_iter()
        .collect();

    save(&a, &set).unwrap();
    save_with(
        &b,
        &set,
        &StoreOptions::default().with_save_mode(SaveMode::Atomic),
    )
    .unwrap();
    assert_eq!(fs::read(&a).unwrap(), fs::read(&b).unwrap());
}

#[test]
fn write_failure_is_a_persistence_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("allowed_pairs.txt");
    let err = save(&path, &initialize()).unwrap_err();
    assert!(matches!(err, PairsError::Persistence { .. }), "{err:?}");
}

#[test]
fn unreadable_path_is_a_read_error() {
    // A directory exists at the path but cannot be read as text.
    let dir = tempfile::tempdir().unwrap();
    let err = load(dir.path()).unwrap_err();
    assert!(matches!(err, PairsError::Read { .. }), "{err:?}");
}

#[test]
fn json_export_round_trips_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pairs.json");
    let set: AllowedSet = [
        pair(K::None, K::EndOfFile),
        pair(K::Calc, K::LPar),
        pair(K::IntW, K::IntW),
    ]
    .into_iter()
    .collect();

    save_json(&path, &set).unwrap();
    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes.last(), Some(&b'\n'));
    assert_eq!(load_json_bytes(&bytes).unwrap(), set);

    // Atomic mode replaces an existing export with identical bytes.
    save_json_with(
        &path,
        &set,
        &StoreOptions::default().with_save_mode(SaveMode::Atomic),
    )
    .unwrap();
    assert_eq!(fs::read(&path).unwrap(), bytes);
}

#[test]
fn json_export_into_a_missing_directory_is_a_persistence_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("pairs.json");
    for mode in [SaveMode::Truncate, SaveMode::Atomic] {
        let opts = StoreOptions::default().with_save_mode(mode);
        let err = save_json_with(&path, &initialize(), &opts).unwrap_err();
        assert!(
            matches!(err, PairsError::Persistence { path: ref p, .. } if *p == path),
            "{mode:?}: {err:?}"
        );
    }
}

fn catalog_pairs() -> impl Iterator<Item = TransitionPair> {
    pairgrid::catalog()
        .iter()
        .flat_map(|&f| pairgrid::catalog().iter().map(move |&t| pair(f, t)))
}
