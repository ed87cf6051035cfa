/// Split one pre-split line of delimited text into field strings.
///
/// Single left-to-right scan with an in-quotes flag. A quote toggles the
/// flag, except that a doubled quote inside a quoted field emits one literal
/// quote. The delimiter only separates fields outside quotes. A stray raw
/// newline outside quotes is dropped; the caller owns record boundaries.
///
/// An empty line yields one empty field. Unbalanced quotes do not error:
/// the scan terminates at end of input and flushes the accumulator, leaving
/// field-count validation to catch the malformed record downstream.
pub fn split_line(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '"' {
            if in_quotes && chars.peek() == Some(&'"') {
                current.push('"');
                chars.next();
                continue;
            }
            in_quotes = !in_quotes;
            continue;
        }
        if ch == delimiter && !in_quotes {
            fields.push(std::mem::take(&mut current));
            continue;
        }
        if ch == '\n' && !in_quotes {
            continue;
        }
        current.push(ch);
    }

    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_plain_fields() {
        assert_eq!(split_line("a,b,c", ','), vec!["a", "b", "c"]);
    }

    #[test]
    fn quoted_fields_keep_delimiters_and_empty_fields_survive() {
        assert_eq!(split_line(r#"a,"b,c","""#, ','), vec!["a", "b,c", ""]);
    }

    #[test]
    fn doubled_quote_emits_literal_quote() {
        assert_eq!(
            split_line(r#""he said ""hi""""#, ','),
            vec![r#"he said "hi""#]
        );
    }

    #[test]
    fn empty_line_yields_one_empty_field() {
        assert_eq!(split_line("", ','), vec![""]);
    }

    #[test]
    fn unbalanced_quote_flushes_without_error() {
        assert_eq!(split_line(r#"a,"unterminated"#, ','), vec!["a", "unterminated"]);
    }

    #[test]
    fn stray_newline_outside_quotes_is_dropped() {
        assert_eq!(split_line("a,b\n", ','), vec!["a", "b"]);
        assert_eq!(split_line("\"a\nb\",c", ','), vec!["a\nb", "c"]);
    }

    #[test]
    fn respects_alternate_delimiters() {
        assert_eq!(split_line("a;b;\"c;d\"", ';'), vec!["a", "b", "c;d"]);
        assert_eq!(split_line("a\tb", '\t'), vec!["a", "b"]);
    }
}
