//! Compiles `config/lexicons.toml` into static word tables.

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const LEXICON_PATH: &str = "config/lexicons.toml";

fn string_list(value: &toml::Value, what: &str) -> Vec<String> {
    value
        .as_array()
        .unwrap_or_else(|| panic!("{what} must be an array of strings"))
        .iter()
        .map(|v| {
            v.as_str()
                .unwrap_or_else(|| panic!("{what} entries must be strings"))
                .to_lowercase()
        })
        .collect()
}

fn main() {
    println!("cargo:rerun-if-changed={LEXICON_PATH}");

    let raw = fs::read_to_string(LEXICON_PATH).expect("read lexicon file");
    let table: toml::Table = raw.parse().expect("lexicon file is valid TOML");

    let mut out = String::new();

    out.push_str("pub static EMOTION_LEXICONS: &[KeywordSet] = &[\n");
    let emotions = table
        .get("emotion")
        .and_then(|v| v.as_array())
        .expect("[[emotion]] tables present");
    for entry in emotions {
        let label = entry
            .get("label")
            .and_then(|v| v.as_str())
            .expect("emotion label");
        let words = string_list(entry.get("words").expect("emotion words"), "emotion.words");
        writeln!(out, "    KeywordSet {{\n        label: {label:?},\n        keywords: &{words:?},\n    }},")
            .expect("write to string");
    }
    out.push_str("];\n\n");

    let stop_words = string_list(
        table
            .get("stop_words")
            .and_then(|v| v.get("words"))
            .expect("[stop_words] words present"),
        "stop_words.words",
    );
    writeln!(out, "pub static STOP_WORDS: &[&str] = &{stop_words:?};").expect("write to string");

    let dest = Path::new(&env::var("OUT_DIR").expect("OUT_DIR set by cargo")).join("lexicons.rs");
    fs::write(dest, out).expect("write generated lexicons");
}
