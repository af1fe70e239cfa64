use crate::common::PRODUCT_NAME;
use std::io;
use std::io::{BufRead, Write};

/// Asks the user to confirm, only an answer of `y` or `Y` counts as yes
pub fn confirm<R: BufRead>(mut input: R) -> io::Result<bool> {
    print!(
        "⚠️  This will permanently delete all {} data. Continue? (y/N): ",
        PRODUCT_NAME
    );
    io::stdout().flush()?;
    // Raw bytes, an answer that is not valid UTF-8 declines instead of failing the run
    let mut line = Vec::new();
    if input.read_until(b'\n', &mut line)? == 0 {
        println!();
        return Ok(false);
    }
    Ok(is_affirmative(&String::from_utf8_lossy(&line)))
}

fn is_affirmative(line: &str) -> bool {
    line.trim_end_matches(|c| c == '\r' || c == '\n')
        .eq_ignore_ascii_case("y")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn accepts_only_y() {
        assert!(confirm(Cursor::new("y\n")).unwrap());
        assert!(confirm(Cursor::new("Y\r\n")).unwrap());
        assert!(confirm(Cursor::new("y")).unwrap());
        for answer in ["n\n", "\n", "yes\n", " y\n", "N\n", "q\n"] {
            assert!(!confirm(Cursor::new(answer)).unwrap(), "{:?}", answer);
        }
    }

    #[test]
    fn end_of_input_declines() {
        assert!(!confirm(Cursor::new("")).unwrap());
    }

    #[test]
    fn non_utf8_answer_declines() {
        assert!(!confirm(Cursor::new(&b"\xff\n"[..])).unwrap());
        assert!(!confirm(Cursor::new(&b"y\xff\n"[..])).unwrap());
    }
}
