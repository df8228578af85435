//! `lex`: dump the external and ordinary token stream.

use lean_scanner::{Scanner, SourceBuffer};

use super::host::{self, LexemeKind, Unterminated};
use super::read_file;

/// Lex a file and display one token per line.
pub fn lex_file(path: &str, scanner: Scanner) {
    let source = read_file(path);
    let buf = SourceBuffer::new(&source);
    let run = host::run(&buf, scanner);

    println!("Tokens for '{}' ({} tokens):", path, run.lexemes.len());
    for lexeme in &run.lexemes {
        let (line, col) = host::line_col(&source, lexeme.span.start);
        let name = match lexeme.kind {
            LexemeKind::External(kind) => kind.name(),
            LexemeKind::Ordinary => "ordinary",
        };
        let text = source
            .get(lexeme.span.start as usize..lexeme.span.end as usize)
            .unwrap_or_default();
        println!("  {name:<16} {line}:{col} @ {} {text:?}", lexeme.span);
    }

    if let Some(Unterminated::RawString { start } | Unterminated::Comment { start }) =
        run.unterminated
    {
        let (line, col) = host::line_col(&source, start);
        println!("  (stopped: unterminated literal or comment at {line}:{col})");
    }
}
