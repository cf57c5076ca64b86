use autopost::generator::title::{extract_title, slugify, MAX_SLUG_CHARS, UNTITLED};

#[test]
fn markdown_heading_wins_over_html() {
    let text = "<h1>From HTML</h1>\n\nIntro\n\n# From Markdown\n";

    assert_eq!(extract_title(text), "From Markdown");
}

#[test]
fn lower_level_headings_are_ignored() {
    let text = "## Section\n### Sub\n#hashtag\n# Real Title  \n";

    assert_eq!(extract_title(text), "Real Title");
}

#[test]
fn falls_back_to_html_title_or_h1() {
    assert_eq!(
        extract_title("<html><head><TITLE> Page </TITLE></head></html>"),
        "Page"
    );
    assert_eq!(
        extract_title("<h1 class=\"big\">Multi\nLine</h1><title>Later</title>"),
        "Multi\nLine"
    );
}

#[test]
fn html_heading_drops_inline_markup() {
    assert_eq!(extract_title("<h1><strong>Bold</strong> Move</h1>"), "Bold Move");
    assert_eq!(
        extract_title("<h1><a href=\"/x\"><em>Linked</em></a></h1>"),
        "Linked"
    );
    assert_eq!(extract_title("<h1><img src=\"a.png\"></h1>"), UNTITLED);
}

#[test]
fn falls_back_to_untitled() {
    assert_eq!(extract_title("no headings here\n## only h2"), UNTITLED);
    assert_eq!(extract_title(""), "Untitled");
}

#[test]
fn slugify_replaces_whitespace_and_strips_symbols() {
    assert_eq!(slugify("  Hello,   World! (2024)  "), "Hello-World-2024");
    assert_eq!(slugify("GitHub Actions入門 ガイド"), "GitHub-Actions入門-ガイド");
    assert_eq!(slugify("snake_case and-dash"), "snake_case-and-dash");
}

#[test]
fn slugify_is_idempotent_on_safe_strings() {
    for safe in ["already-safe", "with_underscore-42", "日本語-slug"] {
        assert_eq!(slugify(safe), safe);
        assert_eq!(slugify(&slugify(safe)), slugify(safe));
    }
}

#[test]
fn slugify_truncates_to_fifty_characters() {
    let long = "word ".repeat(40);
    let slug = slugify(&long);

    assert_eq!(slug.chars().count(), MAX_SLUG_CHARS);
    assert!(slug
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-'));

    let wide = "あ".repeat(80);
    assert_eq!(slugify(&wide).chars().count(), 50);
}
