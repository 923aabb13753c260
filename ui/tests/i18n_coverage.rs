//! Locale bundles must define every message the fallback defines, and the
//! fallback must define every key referenced through `t!` in `src/`.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

const FTL_FILENAME: &str = "sportsx-ui.ftl";

fn crate_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Message ids are lines of the form `id = ...` at column zero.
fn message_ids(src: &str) -> Vec<String> {
    src.lines()
        .filter(|line| !line.starts_with(char::is_whitespace))
        .filter(|line| !line.starts_with('#') && !line.starts_with('-'))
        .filter_map(|line| line.split_once('='))
        .map(|(id, _)| id.trim())
        .filter(|id| !id.is_empty() && id.chars().all(valid_key_char))
        .map(str::to_string)
        .collect()
}

fn valid_key_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '-')
}

fn read_locale(locale: &str) -> String {
    let path = crate_root().join("i18n").join(locale).join(FTL_FILENAME);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("reading {path:?}: {err}"))
}

fn locales() -> Vec<String> {
    let mut dirs: Vec<String> = fs::read_dir(crate_root().join("i18n"))
        .expect("i18n directory")
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .collect();
    dirs.sort();
    dirs
}

fn referenced_keys(dir: &Path, found: &mut BTreeSet<String>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            referenced_keys(&path, found);
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
            continue;
        }
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        found.extend(keys_in_source(&content));
    }
}

/// Literal keys passed to `t!`; comment lines (docs, examples) are skipped.
fn keys_in_source(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| !line.trim_start().starts_with("//"))
        .flat_map(|line| line.split("t!(\"").skip(1))
        .filter_map(|chunk| chunk.split_once('"').map(|(key, _)| key))
        .filter(|key| !key.is_empty() && key.chars().all(valid_key_char))
        .map(str::to_string)
        .collect()
}

#[test]
fn comment_examples_are_not_references() {
    let source = "/// `t!(\"key\")` in docs\n//! ui::t!(\"nav-history\");\nlet a = t!(\"nav-logout\");\n    rsx! { {t!(\"wizard-back\")} }";
    assert_eq!(keys_in_source(source), vec!["nav-logout", "wizard-back"]);
}

#[test]
fn fallback_has_no_duplicate_ids() {
    let ids = message_ids(&read_locale("en-US"));
    let unique: BTreeSet<&String> = ids.iter().collect();
    assert!(!ids.is_empty(), "fallback bundle defines no messages");
    assert_eq!(ids.len(), unique.len(), "duplicate ids in en-US bundle");
}

#[test]
fn every_locale_covers_the_fallback() {
    let fallback: BTreeSet<String> = message_ids(&read_locale("en-US")).into_iter().collect();
    let mut failures = Vec::new();

    for locale in locales() {
        let keys: BTreeSet<String> = message_ids(&read_locale(&locale)).into_iter().collect();
        let missing: Vec<&String> = fallback.difference(&keys).collect();
        if !missing.is_empty() {
            failures.push(format!("{locale} is missing {missing:?}"));
        }
    }

    assert!(failures.is_empty(), "incomplete locales:\n{}", failures.join("\n"));
}

#[test]
fn referenced_keys_exist_in_fallback() {
    let fallback: BTreeSet<String> = message_ids(&read_locale("en-US")).into_iter().collect();
    let mut used = BTreeSet::new();
    referenced_keys(&crate_root().join("src"), &mut used);

    assert!(used.contains("nav-dashboard"));
    let missing: Vec<&String> = used.difference(&fallback).collect();
    assert!(missing.is_empty(), "keys used in src but absent from en-US: {missing:?}");
}
