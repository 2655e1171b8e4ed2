use regex::{Captures, Regex};

/// Strip a symbol from every import list and bracketed declaration list in
/// a registry buffer.
///
/// The transformation is textual and idempotent: applying it a second time
/// to its own output changes nothing. All symbol matches are word-boundary
/// anchored, so a symbol that is a substring of another identifier is left
/// alone.
pub fn remove_symbol(text: &str, symbol: &str) -> String {
    if symbol.is_empty() {
        return text.to_string();
    }

    let escaped = regex::escape(symbol);

    // Import statements first, while they are still intact: drop the symbol
    // from the name list, drop the whole statement if the list empties.
    let import_re = compile(r#"import\s*\{([^}]*)\}\s*from\s*(['"][^'"]+['"])\s*;"#);
    let mut updated = import_re
        .replace_all(text, |caps: &Captures| {
            let names: Vec<&str> = caps[1]
                .split(',')
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .collect();

            if !names.contains(&symbol) {
                return caps[0].to_string();
            }

            let kept: Vec<&str> = names.into_iter().filter(|n| *n != symbol).collect();
            if kept.is_empty() {
                String::new()
            } else {
                format!("import {{ {} }} from {};", kept.join(", "), &caps[2])
            }
        })
        .into_owned();

    // Then the symbol as a standalone list element: trailing comma before,
    // trailing comma after, bare whole-word occurrence as the fallback.
    let comma_before = compile(&format!(r",\s*{escaped}\b"));
    updated = comma_before.replace_all(&updated, "").into_owned();

    let comma_after = compile(&format!(r"\b{escaped}\s*,"));
    updated = comma_after.replace_all(&updated, "").into_owned();

    let bare = compile(&format!(r"\b{escaped}\b"));
    updated = bare.replace_all(&updated, "").into_owned();

    // Element removal can leave a stray comma against either bracket
    let leading_comma = compile(r"\[\s*,");
    updated = leading_comma.replace_all(&updated, "[").into_owned();

    let trailing_comma = compile(r",\s*\]");
    updated = trailing_comma.replace_all(&updated, "]").into_owned();

    updated
}

fn compile(pattern: &str) -> Regex {
    // Patterns are built from regex::escape output and fixed templates
    Regex::new(pattern).expect("rewriter pattern is valid")
}
