//! Property tests for the module script symbol mapper

use proptest::prelude::*;
use spicetify_apply::services::SymbolMapper;

fn plain_line() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .();=]{0,30}"
}

proptest! {
    #[test]
    fn content_without_directives_is_untouched(lines in prop::collection::vec(plain_line(), 0..20)) {
        let content = lines.join("\n");
        prop_assert_eq!(SymbolMapper::new().apply(content.as_bytes()), content.as_bytes());
    }

    #[test]
    fn directive_rewrites_only_next_line(
        before in prop::collection::vec(plain_line(), 0..5),
        search in "[a-z]{1,8}",
        replace in "[A-Z]{1,8}",
        target in plain_line(),
        after in prop::collection::vec(plain_line(), 0..5),
    ) {
        let directive = format!("// spicetify_map{{{}}}{{{}}}", search, replace);
        let mut lines = before.clone();
        lines.push(directive.clone());
        lines.push(target.clone());
        lines.extend(after.iter().cloned());
        let content = lines.join("\n");

        let output = String::from_utf8(SymbolMapper::new().apply(content.as_bytes())).unwrap();
        let out_lines: Vec<&str> = output.split('\n').collect();

        prop_assert_eq!(out_lines.len(), lines.len());
        let directive_index = before.len();
        for (index, line) in out_lines.iter().enumerate() {
            if index == directive_index + 1 {
                prop_assert_eq!(line.to_string(), target.replacen(&search, &replace, 1));
            } else {
                prop_assert_eq!(*line, lines[index].as_str());
            }
        }
    }

    #[test]
    fn trailing_directive_is_noop(
        lines in prop::collection::vec(plain_line(), 0..10),
        search in "[a-z]{1,8}",
    ) {
        let mut lines = lines;
        lines.push(format!("//spicetify_map{{{}}}{{X}}", search));
        let content = lines.join("\n");
        prop_assert_eq!(SymbolMapper::new().apply(content.as_bytes()), content.as_bytes());
    }

    #[test]
    fn bytes_outside_target_line_survive(
        prefix in prop::collection::vec(any::<u8>().prop_filter("no newline", |b| *b != b'\n'), 0..40),
        search in "[a-z]{1,8}",
    ) {
        let mut content = prefix.clone();
        content.extend_from_slice(format!("\n//spicetify_map{{{}}}{{X}}\n{}()", search, search).as_bytes());

        let output = SymbolMapper::new().apply(&content);
        prop_assert!(output.starts_with(&prefix));
        prop_assert!(output.ends_with(b"\nX()"));
    }
}
