use pretty_assertions::assert_eq;

use super::*;

fn problems(source: &str) -> Vec<(u32, String)> {
    find_problems(source, Scanner::default())
        .into_iter()
        .map(|p| (p.offset, p.message))
        .collect()
}

#[test]
fn clean_source() {
    assert_eq!(problems("def f := (⟨1, 2⟩ : Nat × Nat)"), vec![]);
}

#[test]
fn unmatched_close() {
    assert_eq!(problems("x )"), vec![(2, "unmatched `)`".to_owned())]);
}

#[test]
fn unclosed_open() {
    assert_eq!(problems("f (a [b]"), vec![(2, "unclosed `(`".to_owned())]);
}

#[test]
fn crossing_kinds() {
    assert_eq!(
        problems("( ]"),
        vec![
            (0, "unclosed `(`".to_owned()),
            (2, "unmatched `]`".to_owned()),
        ]
    );
}

#[test]
fn unterminated_raw_string() {
    assert_eq!(
        problems("s := r#\"abc\"## x"),
        vec![(5, "unterminated raw string literal".to_owned())]
    );
}

#[test]
fn unterminated_comment() {
    assert_eq!(
        problems("/- outer /- inner -/"),
        vec![(0, "unterminated block comment".to_owned())]
    );
}

#[test]
fn brackets_inside_literals_are_ignored() {
    assert_eq!(problems("r\"(\" /- ] -/ -- )"), vec![]);
}
