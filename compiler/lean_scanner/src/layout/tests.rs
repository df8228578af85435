use super::*;
use crate::{SourceBuffer, Span};

fn stack(columns: &[u32]) -> ColumnStack {
    ColumnStack::from_columns(columns).unwrap()
}

// === ColumnStack ===

#[test]
fn starts_empty() {
    let s = ColumnStack::new();
    assert!(s.is_empty());
    assert_eq!(s.top(), None);
}

#[test]
fn push_pop_round_trip() {
    let mut s = ColumnStack::new();
    assert_eq!(s.push_column(2), 2);
    assert_eq!(s.push_column(4), 4);
    assert_eq!(s.len(), 2);
    assert_eq!(s.pop_column(), Some(4));
    assert_eq!(s.pop_column(), Some(2));
    assert_eq!(s.pop_column(), None);
}

#[test]
fn push_left_of_parent_is_clamped() {
    let mut s = stack(&[4]);
    assert_eq!(s.push_column(2), 4);
    assert_eq!(s.as_slice(), &[4, 4]);
}

#[test]
fn dedent_if_below_pops_only_when_left() {
    let mut s = stack(&[0, 4]);
    assert!(!s.dedent_if_below(4));
    assert!(!s.dedent_if_below(6));
    assert!(s.dedent_if_below(2));
    assert_eq!(s.as_slice(), &[0]);
    assert!(!s.dedent_if_below(0));
}

#[test]
fn comparisons_against_top() {
    let s = stack(&[2]);
    assert!(s.matches_top(2));
    assert!(!s.matches_top(3));
    assert!(s.greater_than_top(3));
    assert!(!s.greater_than_top(2));
    assert!(s.is_below_top(1));
}

#[test]
fn empty_stack_comparisons() {
    let s = ColumnStack::new();
    assert!(!s.matches_top(0));
    assert!(s.greater_than_top(0));
    assert!(!s.is_below_top(0));
}

#[test]
fn from_columns_rejects_decreasing() {
    assert!(ColumnStack::from_columns(&[4, 2]).is_none());
    assert!(ColumnStack::from_columns(&[2, 2, 5]).is_some());
    assert!(ColumnStack::from_columns(&[]).is_some());
}

// === Candidates ===

/// Run a candidate at byte `offset` of `source`, returning effect and span.
fn run(
    source: &str,
    offset: u32,
    scan: impl FnOnce(&mut ScanCursor<'_>) -> Option<Effect>,
) -> Option<(Effect, Span)> {
    let buf = SourceBuffer::new(source);
    let mut cur = ScanCursor::new(buf.cursor_at(offset).unwrap());
    scan(&mut cur).map(|effect| (effect, cur.token_span()))
}

#[test]
fn dedent_on_line_left_of_threshold() {
    let s = stack(&[2]);
    let found = run("  a\nb", 3, |c| scan_dedent(c, &s, true));
    assert_eq!(found, Some((Effect::Dedent(0), Span::empty_at(4))));
}

#[test]
fn no_dedent_mid_line() {
    let s = stack(&[4]);
    assert_eq!(run("x y", 1, |c| scan_dedent(c, &s, true)), None);
}

#[test]
fn no_dedent_at_threshold() {
    let s = stack(&[2]);
    assert_eq!(run("  a\n  b", 3, |c| scan_dedent(c, &s, true)), None);
}

#[test]
fn dedent_at_eof_closes_blocks() {
    let s = stack(&[0, 2]);
    assert_eq!(
        run("  a\n", 3, |c| scan_dedent(c, &s, true)),
        Some((Effect::PopColumn, Span::empty_at(4)))
    );
    assert_eq!(run("  a\n", 3, |c| scan_dedent(c, &s, false)), None);
}

#[test]
fn no_dedent_on_empty_stack() {
    let s = ColumnStack::new();
    assert_eq!(run("a\nb", 1, |c| scan_dedent(c, &s, true)), None);
    assert_eq!(run("", 0, |c| scan_dedent(c, &s, true)), None);
}

#[test]
fn equal_column_on_sibling_line() {
    let s = stack(&[2]);
    let found = run("  a\n  b", 3, |c| scan_equal_column(c, &s));
    assert_eq!(found, Some((Effect::None, Span::empty_at(6))));
}

#[test]
fn equal_column_requires_line_head() {
    // `b` is at column 2 but not first on its line.
    let s = stack(&[2]);
    assert_eq!(run("a b", 1, |c| scan_equal_column(c, &s)), None);
}

#[test]
fn equal_column_never_on_empty_stack_or_eof() {
    assert_eq!(run("a\nb", 1, |c| scan_equal_column(c, &ColumnStack::new())), None);
    let s = stack(&[0]);
    assert_eq!(run("a\n", 1, |c| scan_equal_column(c, &s)), None);
}

#[test]
fn tab_indented_sibling_counts_one_column_per_tab() {
    let s = stack(&[1]);
    assert!(run("\ta\n\tb", 2, |c| scan_equal_column(c, &s)).is_some());
    let s = stack(&[4]);
    assert!(run("\ta\n\tb", 2, |c| scan_equal_column(c, &s)).is_none());
}

#[test]
fn bar_right_of_threshold_consumes_bar() {
    let s = stack(&[2]);
    let found = run("  let x := e\n    | none", 12, |c| scan_greater_bar(c, &s));
    assert_eq!(found, Some((Effect::None, Span::new(17, 18))));
}

#[test]
fn bar_at_threshold_is_not_claimed() {
    let s = stack(&[2]);
    assert_eq!(run("  a\n  | b", 3, |c| scan_greater_bar(c, &s)), None);
}

#[test]
fn bar_operators_are_not_claimed() {
    let s = ColumnStack::new();
    for source in [" || x", " |> f", " |>. f", " ||| t"] {
        assert_eq!(run(source, 0, |c| scan_greater_bar(c, &s)), None, "{source:?}");
    }
    assert!(run(" | x", 0, |c| scan_greater_bar(c, &s)).is_some());
}

#[test]
fn else_right_of_threshold() {
    let s = stack(&[2]);
    let found = run("  if c then\n    a\n   else b", 17, |c| scan_greater_else(c, &s));
    assert_eq!(found, Some((Effect::None, Span::new(21, 25))));
}

#[test]
fn else_at_threshold_is_not_claimed() {
    let s = stack(&[2]);
    assert_eq!(run("  a\n  else b", 3, |c| scan_greater_else(c, &s)), None);
}

#[test]
fn else_must_be_whole_word() {
    let s = ColumnStack::new();
    assert_eq!(run(" elsewhere", 0, |c| scan_greater_else(c, &s)), None);
    assert_eq!(run(" else'", 0, |c| scan_greater_else(c, &s)), None);
    assert!(run(" else(", 0, |c| scan_greater_else(c, &s)).is_some());
    assert!(run(" else", 0, |c| scan_greater_else(c, &s)).is_some());
}

#[test]
fn push_records_next_token_column() {
    let found = run("by\n    simp", 2, scan_push);
    assert_eq!(found, Some((Effect::PushColumn(4), Span::empty_at(7))));
}

#[test]
fn pop_requires_open_block() {
    assert_eq!(run("x", 0, |c| scan_pop(c, &ColumnStack::new())), None);
    let s = stack(&[0]);
    assert_eq!(run("x", 0, |c| scan_pop(c, &s)), Some((Effect::PopColumn, Span::empty_at(0))));
}

#[test]
fn ident_continue_bytes() {
    assert!(is_ident_continue(b'a'));
    assert!(is_ident_continue(b'_'));
    assert!(is_ident_continue(b'?'));
    assert!(is_ident_continue(0xCE));
    assert!(!is_ident_continue(b' '));
    assert!(!is_ident_continue(b'('));
    assert!(!is_ident_continue(0));
}
