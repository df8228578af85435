//! `check`: report what the scanner turns into syntax errors.

use lean_scanner::{classify, BracketKind, LegalKinds, Scanner, Side, SourceBuffer};

use super::host::{self, LexemeKind, Unterminated};
use super::read_file;

/// A scanner-level error at a byte offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Problem {
    pub offset: u32,
    pub message: String,
}

/// Check a file and print one line per problem. Exits 1 if any were found.
pub fn check_file(path: &str, scanner: Scanner) {
    let source = read_file(path);
    let problems = find_problems(&source, scanner);
    if problems.is_empty() {
        println!("{path}: ok");
        return;
    }
    for problem in &problems {
        let (line, col) = host::line_col(&source, problem.offset);
        eprintln!("{path}:{line}:{col}: error: {}", problem.message);
    }
    eprintln!("{} problem(s) in '{path}'", problems.len());
    std::process::exit(1);
}

pub fn find_problems(source: &str, scanner: Scanner) -> Vec<Problem> {
    let buf = SourceBuffer::new(source);
    let run = host::run(&buf, scanner);
    let mut problems = Vec::new();
    let mut open: Vec<(BracketKind, u32)> = Vec::new();

    for lexeme in &run.lexemes {
        if let LexemeKind::External(kind) = lexeme.kind {
            if !LegalKinds::BRACKETS.admits(kind) {
                continue;
            }
        }
        let glyph = source
            .get(lexeme.span.start as usize..)
            .and_then(|rest| rest.chars().next())
            .filter(|_| !lexeme.span.is_empty())
            .and_then(classify);
        let Some((kind, side)) = glyph else {
            continue;
        };
        match (lexeme.kind, side) {
            (LexemeKind::External(_), Side::Open) => open.push((kind, lexeme.span.start)),
            (LexemeKind::External(_), Side::Close) => {
                if let Some(index) = open.iter().rposition(|&(k, _)| k == kind) {
                    open.remove(index);
                }
            }
            (LexemeKind::Ordinary, Side::Close) => problems.push(Problem {
                offset: lexeme.span.start,
                message: format!("unmatched `{}`", kind.close_char()),
            }),
            (LexemeKind::Ordinary, Side::Open) => {}
        }
    }

    match run.unterminated {
        Some(Unterminated::RawString { start }) => problems.push(Problem {
            offset: start,
            message: "unterminated raw string literal".to_owned(),
        }),
        Some(Unterminated::Comment { start }) => problems.push(Problem {
            offset: start,
            message: "unterminated block comment".to_owned(),
        }),
        None => {}
    }

    if !run.snapshot.brackets().is_balanced() {
        problems.extend(open.into_iter().map(|(kind, offset)| Problem {
            offset,
            message: format!("unclosed `{}`", kind.open_char()),
        }));
    }

    problems.sort_by_key(|problem| problem.offset);
    problems
}

#[cfg(test)]
mod tests;
