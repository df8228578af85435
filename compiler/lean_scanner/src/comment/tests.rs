use super::*;
use crate::{SourceBuffer, Span};

fn comment(source: &str) -> Option<Span> {
    let buf = SourceBuffer::new(source);
    let mut cur = ScanCursor::new(buf.cursor());
    scan_comment(&mut cur).map(|_| cur.token_span())
}

fn resume(source: &str, depth: u32) -> Option<(Effect, Span)> {
    let buf = SourceBuffer::new(source);
    let mut cur = ScanCursor::new(buf.cursor());
    resume_comment(&mut cur, depth).map(|effect| (effect, cur.token_span()))
}

#[test]
fn nested_comment_is_one_token() {
    assert_eq!(comment("/- a /- b -/ c -/"), Some(Span::new(0, 17)));
}

#[test]
fn comment_stops_at_outer_close() {
    assert_eq!(comment("/- a -/ def x := 1 -/"), Some(Span::new(0, 7)));
}

#[test]
fn leading_trivia_is_skipped() {
    assert_eq!(comment("\n  /- x -/"), Some(Span::new(3, 10)));
}

#[test]
fn dashes_before_close() {
    assert_eq!(comment("/- a --/"), Some(Span::new(0, 8)));
    assert_eq!(comment("/--/"), Some(Span::new(0, 4)));
}

#[test]
fn slash_without_dash_is_body() {
    assert_eq!(comment("/- a / b - c -/"), Some(Span::new(0, 15)));
}

#[test]
fn multiline_comment() {
    assert_eq!(comment("/-\n  line\n-/"), Some(Span::new(0, 12)));
}

#[test]
fn unterminated_comment_is_not_claimed() {
    assert_eq!(comment("/- a /- b -/"), None);
    assert_eq!(comment("/-"), None);
}

#[test]
fn line_comment_and_division_are_not_claimed() {
    assert_eq!(comment("-- note"), None);
    assert_eq!(comment("a / b"), None);
    assert_eq!(comment(""), None);
}

#[test]
fn resume_mid_comment() {
    assert_eq!(resume(" b -/ c", 1), Some((Effect::ExitComment, Span::new(0, 5))));
    assert_eq!(resume(" b -/ c -/", 2), Some((Effect::ExitComment, Span::new(0, 10))));
    assert_eq!(resume(" b -/ c", 2), None);
}

#[test]
fn resume_counts_new_openers() {
    assert_eq!(resume("/- x -/ -/", 1), Some((Effect::ExitComment, Span::new(0, 10))));
}

// === Flavor ===

#[test]
fn flavors() {
    assert_eq!(flavor("/- x -/"), CommentFlavor::Block);
    assert_eq!(flavor("/-- x -/"), CommentFlavor::Doc);
    assert_eq!(flavor("/-! x -/"), CommentFlavor::ModuleDoc);
    assert_eq!(flavor("/--/"), CommentFlavor::Block);
    assert_eq!(flavor("/-"), CommentFlavor::Block);
}
