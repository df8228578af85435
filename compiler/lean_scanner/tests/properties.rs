//! Property tests for block balance, bracket counters, raw-string
//! delimiters, and comment nesting.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]
#![allow(
    clippy::disallowed_types,
    clippy::uninlined_format_args,
    reason = "Proptest macros generate code with these patterns"
)]

use lean_scanner::{
    BracketKind, ExternalKind, LegalKinds, LexSession, Scanner, Snapshot, SourceBuffer,
};
use proptest::prelude::*;

// -- Layout --

#[derive(Clone, Debug)]
enum Item {
    Leaf,
    Nested(Vec<Item>),
}

fn block_strategy() -> impl Strategy<Value = Vec<Item>> {
    let item = Just(Item::Leaf).prop_recursive(4, 32, 3, |inner| {
        prop::collection::vec(inner, 1..4).prop_map(Item::Nested)
    });
    prop::collection::vec(item, 1..4)
}

/// Leaves are `x`; a nested item is `x by` followed by its children two
/// columns further right.
fn render(block: &[Item], indent: usize, out: &mut String) {
    for item in block {
        out.push_str(&" ".repeat(indent));
        match item {
            Item::Leaf => out.push_str("x\n"),
            Item::Nested(children) => {
                out.push_str("x by\n");
                render(children, indent + 2, out);
            }
        }
    }
}

struct LayoutRun {
    pushes: usize,
    dedents: usize,
    /// Stack depth when the ordinary token `end` was reached.
    depth_at_end: Option<usize>,
    last: Snapshot,
}

fn run_layout(source: &str) -> LayoutRun {
    let buf = SourceBuffer::new(source);
    let mut session = LexSession::new(&buf, Scanner::default());
    let mut run = LayoutRun {
        pushes: 0,
        dedents: 0,
        depth_at_end: None,
        last: Snapshot::new(),
    };
    let mut want_push = false;
    let mut checked_at = None;
    loop {
        let mut legal = LegalKinds::LEXICAL | LegalKinds::DEDENT;
        if want_push {
            legal |= LegalKinds::PUSH_COLUMN;
        } else if checked_at != Some(session.pos()) {
            legal |= LegalKinds::EQUAL_COLUMN_START;
        }
        if let Some(token) = session.next_external(legal) {
            match token.kind {
                ExternalKind::PushColumn => {
                    run.pushes += 1;
                    want_push = false;
                    checked_at = Some(session.pos());
                }
                ExternalKind::EqualColumnStart => checked_at = Some(session.pos()),
                ExternalKind::Dedent => run.dedents += 1,
                ExternalKind::Eof => break,
                _ => {}
            }
            continue;
        }
        let Some(span) = session.advance_ordinary() else {
            break;
        };
        let text = session.text(span);
        if text == "end" {
            run.depth_at_end = Some(session.snapshot().columns().len());
        }
        want_push = text == "by";
    }
    run.last = session.snapshot().clone();
    run
}

// -- Brackets --

fn bracket_ops() -> impl Strategy<Value = Vec<(usize, bool)>> {
    prop::collection::vec((0usize..4, any::<bool>()), 0..40)
}

// -- Comments --

fn filler() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z ]{0,6}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    })]

    /// Every block opened inside a fully closed region is closed by the
    /// time the next outer line starts.
    #[test]
    fn prop_layout_balance(block in block_strategy()) {
        let mut source = String::from("x by\n");
        render(&block, 2, &mut source);
        source.push_str("end\n");

        let run = run_layout(&source);
        prop_assert_eq!(run.depth_at_end, Some(0));
        prop_assert_eq!(run.pushes, run.dedents);
        prop_assert!(run.last.columns().is_empty());
    }

    /// A close of kind K only ever touches K's counter.
    #[test]
    fn prop_bracket_non_crossing(ops in bracket_ops()) {
        let source: String = ops
            .iter()
            .map(|&(kind, open)| {
                let kind = BracketKind::ALL[kind];
                if open { kind.open_char() } else { kind.close_char() }
            })
            .flat_map(|c| [c, ' '])
            .collect();

        let buf = SourceBuffer::new(&source);
        let mut session = LexSession::new(&buf, Scanner::default());
        let mut model = [0u32; 4];
        for &(index, open) in &ops {
            let kind = BracketKind::ALL[index];
            let token = session.next_external(LegalKinds::BRACKETS);
            if open {
                prop_assert_eq!(token.map(|t| t.kind), Some(kind.open_kind()));
                model[index] += 1;
            } else if model[index] > 0 {
                prop_assert_eq!(token.map(|t| t.kind), Some(kind.close_kind()));
                model[index] -= 1;
            } else {
                prop_assert_eq!(token, None);
                prop_assert!(session.advance_ordinary().is_some());
            }
            for (i, other) in BracketKind::ALL.into_iter().enumerate() {
                prop_assert_eq!(session.snapshot().brackets().depth(other), model[i]);
            }
        }
    }

    /// A literal opened with N markers ends at a close run of exactly N.
    #[test]
    fn prop_raw_string_exactness(n in 0usize..5, m in 0usize..5) {
        let open = "#".repeat(n);
        let inner = "#".repeat(m);
        let source = format!("r{open}\"a\"{inner}b\"{open}");

        let buf = SourceBuffer::new(&source);
        let mut session = LexSession::new(&buf, Scanner::default());
        let start = session.next_external(LegalKinds::RAW_STRING).unwrap();
        prop_assert_eq!(start.kind, ExternalKind::RawStringStart);
        let content = session.next_external(LegalKinds::RAW_STRING).unwrap();
        let text = session.text(content.span);
        if m == n {
            prop_assert_eq!(text, "a");
        } else {
            prop_assert_eq!(text, format!("a\"{inner}b"));
        }
        let end = session.next_external(LegalKinds::RAW_STRING).unwrap();
        prop_assert_eq!(end.kind, ExternalKind::RawStringEnd);
    }

    /// With P openers before any close, the comment ends at the P-th close.
    #[test]
    fn prop_comment_nesting(
        opens in prop::collection::vec(filler(), 1..6),
        gaps in prop::collection::vec(filler(), 6),
        tail in filler(),
    ) {
        let mut source = String::new();
        for text in &opens {
            source.push_str("/-");
            source.push_str(text);
        }
        for gap in gaps.iter().take(opens.len()) {
            source.push_str("-/");
            source.push_str(gap);
        }
        let expected_end = source.len() - gaps[opens.len() - 1].len();
        source.push_str(" -/");
        source.push_str(&tail);

        let buf = SourceBuffer::new(&source);
        let mut session = LexSession::new(&buf, Scanner::default());
        let token = session.next_external(LegalKinds::COMMENT_BODY).unwrap();
        prop_assert_eq!(token.span.start, 0);
        prop_assert_eq!(token.span.end as usize, expected_end);
    }
}
