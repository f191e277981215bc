//! Visible-text extraction from raw HTML.
//!
//! A small tag scanner instead of a DOM: it tracks the open-element stack well enough
//! to find headings, paragraphs and list items, and whether they sit inside a
//! `main`/`article`/`section` container.

const CONTAINER_TAGS: [&str; 3] = ["main", "article", "section"];
const HEADING_TAGS: [&str; 3] = ["h1", "h2", "h3"];
const TEXT_TAGS: [&str; 5] = ["h1", "h2", "h3", "p", "li"];
const RAW_TEXT_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];
const VOID_TAGS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];
/// Opening any of these implicitly closes an open `<p>`.
const P_CLOSERS: [&str; 17] = [
    "p", "div", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "section", "article", "main",
    "table", "header", "footer", "blockquote",
];

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Open(String),
    Close(String),
    Text(String),
}

/// A finished text-bearing element.
#[derive(Debug, Clone)]
struct TextElement {
    tag: String,
    order: usize,
    in_container: bool,
    text: String,
}

/// An element whose text is still being collected.
struct Capture {
    tag: String,
    order: usize,
    depth: usize,
    in_container: bool,
    pieces: Vec<String>,
}

/// Extracts the readable text of a page, one element per line.
///
/// Elements inside `main`/`article`/`section` win. When those yield nothing, falls
/// back to every heading, then every paragraph, then every list item on the page.
pub fn extract_visible_text(html: &str) -> String {
    let elements = collect_text_elements(html);

    let primary: Vec<&str> = elements
        .iter()
        .filter(|e| e.in_container && !e.text.is_empty())
        .map(|e| e.text.as_str())
        .collect();
    if !primary.is_empty() {
        return primary.join("\n");
    }

    let mut lines: Vec<&str> = texts_of(&elements, &HEADING_TAGS).collect();
    lines.extend(texts_of(&elements, &["p"]));
    lines.extend(texts_of(&elements, &["li"]));
    lines.join("\n")
}

fn texts_of<'a>(
    elements: &'a [TextElement],
    tags: &'a [&'a str],
) -> impl Iterator<Item = &'a str> {
    elements
        .iter()
        .filter(move |e| tags.contains(&e.tag.as_str()) && !e.text.is_empty())
        .map(|e| e.text.as_str())
}

fn collect_text_elements(html: &str) -> Vec<TextElement> {
    let mut stack: Vec<String> = Vec::new();
    let mut container_depth = 0usize;
    let mut open: Vec<Capture> = Vec::new();
    let mut done: Vec<TextElement> = Vec::new();
    let mut order = 0usize;

    for token in tokenize(html) {
        match token {
            Token::Open(name) => {
                if let Some(top) = stack.last() {
                    let implicit_close = (top == "p" && P_CLOSERS.contains(&name.as_str()))
                        || (top == "li" && name == "li");
                    if implicit_close {
                        let len = stack.len() - 1;
                        pop_to(len, &mut stack, &mut container_depth, &mut open, &mut done);
                    }
                }
                if CONTAINER_TAGS.contains(&name.as_str()) {
                    container_depth += 1;
                }
                stack.push(name.clone());
                if TEXT_TAGS.contains(&name.as_str()) {
                    open.push(Capture {
                        tag: name,
                        order,
                        depth: stack.len(),
                        in_container: container_depth > 0,
                        pieces: Vec::new(),
                    });
                    order += 1;
                }
            }
            Token::Close(name) => {
                // Stray closing tags are ignored.
                if let Some(pos) = stack.iter().rposition(|t| *t == name) {
                    pop_to(pos, &mut stack, &mut container_depth, &mut open, &mut done);
                }
            }
            Token::Text(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    for capture in open.iter_mut() {
                        capture.pieces.push(text.to_string());
                    }
                }
            }
        }
    }
    pop_to(0, &mut stack, &mut container_depth, &mut open, &mut done);

    done.sort_by_key(|e| e.order);
    done
}

/// Closes open elements until the stack is `len` deep, finishing their captures.
fn pop_to(
    len: usize,
    stack: &mut Vec<String>,
    container_depth: &mut usize,
    open: &mut Vec<Capture>,
    done: &mut Vec<TextElement>,
) {
    while stack.len() > len {
        if let Some(name) = stack.pop() {
            if CONTAINER_TAGS.contains(&name.as_str()) {
                *container_depth = container_depth.saturating_sub(1);
            }
        }
        while open.last().is_some_and(|c| c.depth > stack.len()) {
            if let Some(capture) = open.pop() {
                done.push(TextElement {
                    tag: capture.tag,
                    order: capture.order,
                    in_container: capture.in_container,
                    text: normalize_ws(&capture.pieces.join(" ")),
                });
            }
        }
    }
}

fn tokenize(html: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = html;

    while !rest.is_empty() {
        let Some(lt) = rest.find('<') else {
            push_text(&mut tokens, rest);
            break;
        };
        push_text(&mut tokens, &rest[..lt]);
        let tail = &rest[lt..];

        if let Some(comment) = tail.strip_prefix("<!--") {
            rest = comment.find("-->").map_or("", |end| &comment[end + 3..]);
            continue;
        }

        let body = &tail[1..];
        let is_markup = body
            .starts_with(|c: char| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'));
        if !is_markup {
            // A bare '<' in text, e.g. "a < b".
            push_text(&mut tokens, "<");
            rest = body;
            continue;
        }

        let Some(gt) = tag_end(tail) else {
            push_text(&mut tokens, tail);
            break;
        };
        let inner = &tail[1..gt];
        rest = &tail[gt + 1..];

        // <!DOCTYPE ...>, <?xml ...?>
        if inner.starts_with('!') || inner.starts_with('?') {
            continue;
        }

        if let Some(closing) = inner.strip_prefix('/') {
            let name = tag_name(closing);
            if !name.is_empty() {
                tokens.push(Token::Close(name));
            }
            continue;
        }

        let name = tag_name(inner);

        if RAW_TEXT_TAGS.contains(&name.as_str()) {
            rest = skip_raw_text(rest, &name);
            continue;
        }
        if VOID_TAGS.contains(&name.as_str()) {
            continue;
        }

        let self_closing = inner.trim_end().ends_with('/');
        tokens.push(Token::Open(name.clone()));
        if self_closing {
            tokens.push(Token::Close(name));
        }
    }

    tokens
}

/// Byte offset of the `>` that ends the tag starting at `tail[0]`.
///
/// A `>` inside a quoted attribute value does not end the tag. An unbalanced quote
/// falls back to the first `>`.
fn tag_end(tail: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (idx, c) in tail.char_indices().skip(1) {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), _) if c == q => quote = None,
            (None, '>') => return Some(idx),
            _ => {}
        }
    }
    tail.find('>')
}

/// Skips past the closing tag of a raw-text element such as `<script>`.
fn skip_raw_text<'a>(rest: &'a str, name: &str) -> &'a str {
    let close = format!("</{name}");
    // ASCII lowercasing keeps byte offsets intact.
    let Some(start) = rest.to_ascii_lowercase().find(&close) else {
        return "";
    };
    let after = &rest[start..];
    after.find('>').map_or("", |gt| &after[gt + 1..])
}

fn tag_name(inner: &str) -> String {
    inner
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

fn push_text(tokens: &mut Vec<Token>, raw: &str) {
    if raw.trim().is_empty() {
        return;
    }
    tokens.push(Token::Text(decode_entities(raw)));
}

pub fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&tail[1..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    if let Some(num) = entity.strip_prefix('#') {
        let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    let c = match entity {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "hellip" => '\u{2026}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201C}',
        "rdquo" => '\u{201D}',
        "copy" => '\u{00A9}',
        "reg" => '\u{00AE}',
        "trade" => '\u{2122}',
        _ => return None,
    };
    Some(c)
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_content_takes_priority() {
        let html = r#"
            <html><body>
              <nav><ul><li>Home</li><li>Pricing</li></ul></nav>
              <main>
                <h1>Ship faster</h1>
                <p>Acme automates <b>invoice</b> matching.</p>
                <ul><li>SOC 2</li><li>SSO</li></ul>
              </main>
              <footer><p>(c) Acme</p></footer>
            </body></html>
        "#;
        assert_eq!(
            extract_visible_text(html),
            "Ship faster\nAcme automates invoice matching.\nSOC 2\nSSO"
        );
    }

    #[test]
    fn test_fallback_groups_headings_then_paragraphs_then_items() {
        let html = "<div><p>Intro</p><h2>Features</h2><li>Fast</li><h1>Acme</h1><p>More</p></div>";
        assert_eq!(
            extract_visible_text(html),
            "Features\nAcme\nIntro\nMore\nFast"
        );
    }

    #[test]
    fn test_empty_containers_fall_back_to_whole_page() {
        let html = "<section><div>no text tags here</div></section><h1>Title</h1>";
        assert_eq!(extract_visible_text(html), "Title");
    }

    #[test]
    fn test_nested_containers_do_not_duplicate() {
        let html = "<main><article><section><p>Once</p></section></article></main>";
        assert_eq!(extract_visible_text(html), "Once");
    }

    #[test]
    fn test_scripts_styles_and_comments_are_skipped() {
        let html = r#"<main>
            <script>var p = "<p>not text</p>";</script>
            <STYLE>p { color: red }</STYLE>
            <!-- <p>hidden</p> -->
            <p>Visible</p>
        </main>"#;
        assert_eq!(extract_visible_text(html), "Visible");
    }

    #[test]
    fn test_entities_are_decoded() {
        let html = "<p>R&amp;D &lt;3 &#8212; caf&#xE9;&nbsp;bar &unknown; AT&T</p>";
        assert_eq!(extract_visible_text(html), "R&D <3 \u{2014} caf\u{e9} bar &unknown; AT&T");
    }

    #[test]
    fn test_unclosed_paragraphs_and_items_close_implicitly() {
        let html = "<article><p>One<p>Two<ul><li>A<li>B</ul></article>";
        assert_eq!(extract_visible_text(html), "One\nTwo\nA\nB");
    }

    #[test]
    fn test_nested_list_item_yields_outer_and_inner() {
        let html = "<main><ul><li>Plans<ul><li>Pro</li></ul></li></ul></main>";
        assert_eq!(extract_visible_text(html), "Plans Pro\nPro");
    }

    #[test]
    fn test_uppercase_tags_and_attributes() {
        let html = r#"<MAIN class="x"><H2 id="t">Hello</H2><P>World<BR/>again</P></MAIN>"#;
        assert_eq!(extract_visible_text(html), "Hello\nWorld again");
    }

    #[test]
    fn test_angle_bracket_inside_quoted_attribute() {
        let html = r#"<main><p data-rule="a>b">Hello</p><h2 title='x > y'>Pricing</h2></main>"#;
        assert_eq!(extract_visible_text(html), "Hello\nPricing");
    }

    #[test]
    fn test_unbalanced_attribute_quote_ends_at_first_angle_bracket() {
        assert_eq!(tag_end(r#"<p class="x>Hi</p>"#), Some(11));
        assert_eq!(tag_end(r#"<a href="/q?a>b" id='c'>"#), Some(23));
    }

    #[test]
    fn test_stray_close_and_bare_angle_bracket() {
        let html = "<main></div><p>a < b</p></main>";
        assert_eq!(extract_visible_text(html), "a < b");
    }

    #[test]
    fn test_empty_and_plain_text_input() {
        assert_eq!(extract_visible_text(""), "");
        assert_eq!(extract_visible_text("just text, no tags"), "");
    }

    #[test]
    fn test_normalize_ws() {
        assert_eq!(normalize_ws("  a \n\t b  "), "a b");
    }
}
