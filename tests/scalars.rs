use yamlet::{Node, Parser};

#[track_caller]
fn parse(input: &str) -> Node {
    Parser::new(input.as_bytes())
        .next_document()
        .unwrap_or_else(|e| panic!("parse error: {e}"))
        .expect("no document")
}

#[track_caller]
fn expect_scalar(input: &str, expected: &str) {
    let doc = parse(input);
    assert_eq!(doc.as_scalar().unwrap(), expected);
}

#[test]
fn simple_scalar() {
    expect_scalar("Hello, World!", "Hello, World!");
}

#[test]
fn multi_line_scalar() {
    expect_scalar(
        "normal scalar, but\nover several lines",
        "normal scalar, but over several lines",
    );
}

#[test]
fn literal_scalar() {
    expect_scalar(
        "|\n literal scalar - so we can draw ASCII:\n \n          -   -\n         |  -  |\n          -----\n",
        "literal scalar - so we can draw ASCII:\n\n         -   -\n        |  -  |\n         -----\n",
    );
}

#[test]
fn literal_scalar_with_trailing_picture() {
    expect_scalar(
        "|\n literal scalar:\n \n          -   -\n         |  -  |\n          -----\n",
        "literal scalar:\n\n         -   -\n        |  -  |\n         -----\n",
    );
}

#[test]
fn folded_scalar() {
    expect_scalar(
        ">\n and a folded scalar... so we\n can just keep writing various\n things. And if we want to keep indentation:\n \n    we just indent a little\n    see, this stays indented",
        "and a folded scalar... so we can just keep writing various things. And if we want to keep indentation:\n\n   we just indent a little\n   see, this stays indented",
    );
}

#[test]
fn chomped_folded_scalar() {
    expect_scalar(
        ">-\n  Here's a folded scalar\n  that gets chomped.",
        "Here's a folded scalar that gets chomped.",
    );
}

#[test]
fn chomped_literal_scalar() {
    expect_scalar(
        "|-\n  Here's a literal scalar\n  that gets chomped.",
        "Here's a literal scalar\nthat gets chomped.",
    );
}

#[test]
fn folded_scalar_with_indent() {
    expect_scalar(
        ">2\n       Here's a folded scalar\n  that starts with some indentation.",
        "     Here's a folded scalar\nthat starts with some indentation.",
    );
}

#[test]
fn kept_literal_scalar() {
    expect_scalar("|+\n  kept\n\n\n", "kept\n\n\n");
}

#[test]
fn stripped_literal_scalar() {
    expect_scalar("|-\n  stripped\n\n\n", "stripped");
}

#[test]
fn clipped_literal_scalar() {
    expect_scalar("|\n  clipped\n\n\n", "clipped\n");
}

#[test]
fn colon_scalar() {
    expect_scalar("::vector", "::vector");
}

#[test]
fn quoted_scalar() {
    expect_scalar("\": - ()\"", ": - ()");
}

#[test]
fn comma_scalar() {
    expect_scalar("Up, up, and away!", "Up, up, and away!");
}

#[test]
fn dash_scalar() {
    expect_scalar("-123", "-123");
}

#[test]
fn url_scalar() {
    expect_scalar("http://example.com/foo#bar", "http://example.com/foo#bar");
}

#[test]
fn quoted_line_folding() {
    expect_scalar("\"folds\nonto one line\"", "folds onto one line");
    expect_scalar("\"keeps\n\nan empty line\"", "keeps\nan empty line");
}

#[test]
fn single_quoted_escapes() {
    expect_scalar("'it''s'", "it's");
}

#[test]
fn double_quoted_escapes() {
    expect_scalar(
        "\"a\\tb\\nc \\\\ \\\" \\x41 \\u00e9 \\U0001F600\"",
        "a\tb\nc \\ \" A \u{e9} \u{1F600}",
    );
    expect_scalar("\"null \\0 bell \\a esc \\e\"", "null \0 bell \x07 esc \x1b");
    expect_scalar("\"nel \\N nbsp \\_ ls \\L ps \\P\"", "nel \u{85} nbsp \u{a0} ls \u{2028} ps \u{2029}");
}

#[test]
fn plain_scalar_folding_preserves_extra_breaks() {
    expect_scalar("plain\n\nscalar", "plain\nscalar");
}

#[test]
fn block_scalar_as_mapping_value() {
    let doc = parse("text: |\n  line one\n  line two\n");
    assert_eq!(
        doc.at("text").unwrap().as_scalar().unwrap(),
        "line one\nline two\n"
    );
}

#[test]
fn folded_scalar_in_sequence() {
    let doc = parse("- >\n  folded\n  here\n- next");
    assert_eq!(doc.at(0).unwrap().as_scalar().unwrap(), "folded here\n");
    assert_eq!(doc.at(1).unwrap().as_scalar().unwrap(), "next");
}
