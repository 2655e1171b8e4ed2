//! Lexical scanning of component classes and their member methods.
//!
//! No TypeScript parser is involved. Classes are located by decorator and
//! declaration patterns, method bodies by brace matching. Constructs this
//! scanner cannot see (arrow-function properties, same-line decorators)
//! are simply never removal candidates.

use regex::Regex;

/// Statement keywords that look like method heads to the line pattern
const KEYWORDS: [&str; 9] = [
    "if", "for", "while", "switch", "catch", "do", "else", "return", "function",
];

/// A located `@Component` class: name and byte span of its body
#[derive(Debug, Clone)]
pub struct ComponentClass {
    pub name: String,
    /// First byte after the opening brace
    pub body_start: usize,
    /// Byte index of the closing brace
    pub body_end: usize,
}

/// One member method: name and the byte span to excise on removal.
/// The span covers contiguous decorator lines above the head through the
/// end of the line holding the closing brace.
#[derive(Debug, Clone)]
pub struct MethodSpan {
    pub name: String,
    pub start: usize,
    pub end: usize,
}

/// Locate the `@Component`-decorated exported class, if any
pub fn find_component_class(text: &str) -> Option<ComponentClass> {
    let decorator_re = Regex::new(r"@Component\s*\(").expect("decorator pattern is valid");
    let decorator = decorator_re.find(text)?;

    let class_re =
        Regex::new(r"export\s+class\s+([A-Za-z_$][\w$]*)").expect("class pattern is valid");
    let caps = class_re.captures(&text[decorator.end()..])?;
    let whole = caps.get(0)?;
    let name = caps[1].to_string();

    let head_end = decorator.end() + whole.end();
    let body_open = text[head_end..].find('{')? + head_end;
    let body_end = matching_delimiter(text, body_open, b'{', b'}')?;

    Some(ComponentClass {
        name,
        body_start: body_open + 1,
        body_end,
    })
}

/// Enumerate member methods in declaration order.
///
/// Scans line by line at class-body depth; each detected method body is
/// skipped whole, so braces inside it never skew the depth counter.
pub fn enumerate_methods(text: &str, class: &ComponentClass) -> Vec<MethodSpan> {
    let head_re = Regex::new(
        r"^\s*(?:(?:public|private|protected|readonly|static|async|abstract|override)\s+)*(?:get\s+|set\s+)?([A-Za-z_$][\w$]*)\s*\(",
    )
    .expect("method head pattern is valid");

    let mut methods = Vec::new();
    let mut depth: i32 = 0;
    let mut i = next_line_start(text, class.body_start);

    while i < class.body_end {
        let line_end = match text[i..class.body_end].find('\n') {
            Some(n) => i + n + 1,
            None => class.body_end,
        };
        let line = &text[i..line_end];

        if depth == 0 {
            if let Some(name) = method_head(&head_re, line) {
                if let Some(span) = method_span(text, i, name) {
                    i = span.end.max(line_end);
                    methods.push(span);
                    continue;
                }
            }
        }

        depth += brace_delta(line);
        i = line_end;
    }

    methods
}

/// Match a method head at the start of a line, returning the method name
fn method_head(head_re: &Regex, line: &str) -> Option<String> {
    let caps = head_re.captures(line)?;
    let name = caps[1].to_string();

    if KEYWORDS.contains(&name.as_str()) {
        return None;
    }

    Some(name)
}

/// Resolve the full span of a method whose head starts at `line_start`
fn method_span(text: &str, line_start: usize, name: String) -> Option<MethodSpan> {
    let open_paren = text[line_start..].find('(')? + line_start;
    let close_paren = matching_delimiter(text, open_paren, b'(', b')')?;

    // Between the parameter list and the body: optionally a return type.
    // A semicolon or assignment first means this is not a method body.
    let mut body_open = None;
    for (offset, ch) in text[close_paren + 1..].char_indices() {
        match ch {
            '{' => {
                body_open = Some(close_paren + 1 + offset);
                break;
            }
            ';' | '=' => break,
            _ => {}
        }
    }
    let body_open = body_open?;

    let body_close = matching_delimiter(text, body_open, b'{', b'}')?;

    let end = match text[body_close..].find('\n') {
        Some(n) => body_close + n + 1,
        None => text.len(),
    };

    Some(MethodSpan {
        name,
        start: span_start_with_decorators(text, line_start),
        end,
    })
}

/// Extend the span upward over contiguous decorator lines (`@HostListener`
/// and friends belong to the method they precede)
fn span_start_with_decorators(text: &str, line_start: usize) -> usize {
    let mut start = line_start;
    loop {
        let prev_start = match text[..start.saturating_sub(1)].rfind('\n') {
            Some(n) => n + 1,
            None => 0,
        };
        if prev_start >= start {
            break;
        }
        let prev_line = text[prev_start..start].trim();
        // A line like `@Input() title: string;` is a decorated property,
        // not a decorator belonging to the method below it
        if prev_line.starts_with('@') && !prev_line.ends_with(';') {
            start = prev_start;
        } else {
            break;
        }
    }
    start
}

/// Byte index of the delimiter matching the one at `open`, by depth count
fn matching_delimiter(text: &str, open: usize, open_ch: u8, close_ch: u8) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;

    for (i, &b) in bytes.iter().enumerate().skip(open) {
        if b == open_ch {
            depth += 1;
        } else if b == close_ch {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

fn next_line_start(text: &str, pos: usize) -> usize {
    match text[pos..].find('\n') {
        Some(n) => pos + n + 1,
        None => text.len(),
    }
}

fn brace_delta(line: &str) -> i32 {
    let mut delta = 0;
    for b in line.bytes() {
        match b {
            b'{' => delta += 1,
            b'}' => delta -= 1,
            _ => {}
        }
    }
    delta
}
