//! Lint: key hints (`[C]`, `[1]`, `[a]`) must be tappable.
//!
//! Every hint drawn in the kitchen renderer has to go through
//! `push_clickable()` or a `ButtonRow`, otherwise the label shows a key but
//! a tap on it does nothing. On touch screens that is the only way to act.
//!
//! This test scans `render.rs` files under `src/kitchen/` and flags
//! `.push(` calls whose text contains a bracket-key hint.

use std::fs;
use std::path::Path;

/// Check if a line contains a bracket-key hint like `[C]`, `[a]`, `[1]`.
fn contains_bracket_key(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() < 3 {
        return false;
    }
    for i in 0..bytes.len() - 2 {
        if bytes[i] == b'[' && bytes[i + 2] == b']' {
            let ch = bytes[i + 1];
            if ch.is_ascii_alphanumeric() || b"-=!~|".contains(&ch) {
                return true;
            }
        }
    }
    false
}

/// Lines with a plain `.push(` call that shows a bracket-key hint.
fn find_bracket_key_in_push(source: &str) -> Vec<(usize, String)> {
    let mut violations = Vec::new();

    for (idx, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with("//") {
            continue;
        }
        if !contains_bracket_key(line) {
            continue;
        }

        let has_push = line.contains(".push(");
        let has_clickable = line.contains("push_clickable(") || line.contains(".button(");

        if has_push && !has_clickable {
            violations.push((idx + 1, trimmed.to_string()));
        }
    }

    violations
}

#[test]
fn no_bracket_keys_in_non_clickable_push() {
    let kitchen_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/kitchen");
    let mut all_violations = Vec::new();
    let mut scanned = 0;

    visit_render_files(&kitchen_dir, &mut all_violations, &mut scanned);
    assert!(scanned > 0, "no render.rs found under {}", kitchen_dir.display());

    if !all_violations.is_empty() {
        let mut msg = String::from(
            "Found key hints [X] in non-clickable cl.push() calls.\n\
             Use push_clickable() or a ButtonRow instead.\n\n",
        );
        for (file, line_num, line) in &all_violations {
            msg.push_str(&format!("  {}:{}: {}\n", file, line_num, line));
        }
        panic!("{}", msg);
    }
}

fn visit_render_files(
    dir: &Path,
    violations: &mut Vec<(String, usize, String)>,
    scanned: &mut usize,
) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            visit_render_files(&path, violations, scanned);
        } else if path.file_name().map(|n| n == "render.rs").unwrap_or(false) {
            let Ok(source) = fs::read_to_string(&path) else {
                continue;
            };
            *scanned += 1;
            let display_path = path.display().to_string();
            for (line_num, line) in find_bracket_key_in_push(&source) {
                violations.push((display_path.clone(), line_num, line));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_bracket_key_in_push() {
        let source = r#"cl.push(Line::from(" [C] Cook  [X] Reset"));"#;
        assert_eq!(find_bracket_key_in_push(source).len(), 1);
    }

    #[test]
    fn allows_push_clickable() {
        let source = r#"cl.push_clickable(Line::from(" [L] Back"), TOGGLE_LEADERBOARD);"#;
        assert!(find_bracket_key_in_push(source).is_empty());
    }

    #[test]
    fn allows_button_rows() {
        let source = r#".button("[C] Cook", key_style, START_COOKING)"#;
        assert!(find_bracket_key_in_push(source).is_empty());
    }

    #[test]
    fn ignores_comments() {
        let source = r#"// cl.push(Line::from(" [P] Shop"));"#;
        assert!(find_bracket_key_in_push(source).is_empty());
    }

    #[test]
    fn format_placeholders_are_not_hints() {
        let source = r#"cl.push(Line::from(format!("[{}] {}", i, name)));"#;
        assert!(find_bracket_key_in_push(source).is_empty());
    }

    #[test]
    fn bracket_key_detection() {
        assert!(contains_bracket_key("[C]"));
        assert!(contains_bracket_key("[a]"));
        assert!(contains_bracket_key("[1]"));
        assert!(!contains_bracket_key("[]"));
        assert!(!contains_bracket_key("[ab]"));
        assert!(!contains_bracket_key("plain"));
    }
}
