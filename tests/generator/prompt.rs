use autopost::generator::prompt::{build_prompt, PROMPT, SYSTEM_ROLE};

#[test]
fn build_prompt_starts_with_template_and_ends_with_keyword() {
    let output = build_prompt("kubernetes");

    assert!(output.starts_with(PROMPT));
    assert!(output.ends_with("# Keyword\nkubernetes\n"));
}

#[test]
fn build_prompt_trims_keyword() {
    let output = build_prompt("  terraform, aws cdk  ");

    assert!(output.contains("\nterraform, aws cdk\n"));
    assert!(!output.contains("  terraform"));
}

#[test]
fn build_prompt_is_deterministic() {
    assert_eq!(build_prompt("ansible"), build_prompt("ansible"));
}

#[test]
fn template_carries_structural_requirements() {
    for required in [
        "level-one Markdown heading",
        "Introduction",
        "`##` section headings and `###` sub-headings",
        "Point, Reason, Example, Point",
        "Markdown table",
        "at least one image reference",
        "numbered steps",
        "AWS CDK",
        "roughly 3000 characters",
    ] {
        assert!(PROMPT.contains(required), "missing requirement: {required}");
    }
}

#[test]
fn system_role_is_fixed() {
    assert_eq!(SYSTEM_ROLE, "You are a helpful technical writer.");
}
