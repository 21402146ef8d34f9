use forum_markup_engine::{outline, parse_markup};
use insta::assert_snapshot;

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.txt",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

#[test]
fn mixed_post_outline() {
    let nodes = parse_markup(
        "Hello [b]world[/b]!\n[quote name=\"Alice\" post=42][i]hi[/i][/quote][list=1][*]one[*][img=https://x.org/a.png width=10 height=20][/list][code=rust]fn main() {}[/code]",
    );
    assert_snapshot!(outline(&nodes), @r#"
text "Hello "
text "world" bold
text "!\n"
quote name="Alice" post=42
  text "hi" italic
list numeric
  item
    text "one"
  item
    image https://x.org/a.png 10x20
code label="rust"
  text "fn main() {}"
"#);
}

#[test]
fn nested_quotes_outline() {
    let nodes = parse_markup(&fixture("nested_quotes"));
    assert_snapshot!(outline(&nodes), @r#"
quote title="From the old topic"
  quote name="Alice" post=1
    text "First "
    text "reply" italic
  text "\nSecond reply with "
  text "red" color=#ff0000
  text " and "
  text "struck" strike
  text " text."
text "\n"
text "" anchor=bottom
text "off topic & more" offtop
text "\n"
alignment right
  text "1" sup
  text "/"
  text "2" sub
text "\n"
"#);
}

#[test]
fn staff_blocks_outline() {
    let nodes = parse_markup("[mod]Closed.[/mod][hide=5][smile=sad][/hide][list=spec][*]OS: Android 14[/list]");
    assert_snapshot!(outline(&nodes), @r#"
notice moderator
  text "Closed."
hide threshold=5
  text "🙁"
bullet
  row "OS" "Android 14"
"#);
}
