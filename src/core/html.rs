//! Minimal HTML scanning for the exchange's server-rendered ASP.NET pages.
//!
//! Only what the scrapers need: locate elements by tag and id, read attributes,
//! and flatten fragments to text. Tag matching is ASCII case-insensitive and
//! nesting-aware for the tag being searched.

/// A located element: its opening tag and the markup between open and close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Element<'a> {
    pub(crate) open_tag: &'a str,
    pub(crate) inner: &'a str,
}

impl<'a> Element<'a> {
    pub(crate) fn attr(&self, name: &str) -> Option<String> {
        attr(self.open_tag, name)
    }

    pub(crate) fn text(&self) -> String {
        text(self.inner)
    }

    /// Top-level `tag` children of this element.
    pub(crate) fn children(&self, tag: &str) -> Vec<Element<'a>> {
        elements(self.inner, tag)
    }
}

fn boundary(b: Option<u8>) -> bool {
    matches!(b, None | Some(b'>' | b'/' | b' ' | b'\t' | b'\r' | b'\n'))
}

fn find_open(lower: &str, tag: &str, from: usize) -> Option<usize> {
    let needle = format!("<{tag}");
    let mut pos = from;
    while let Some(i) = lower.get(pos..)?.find(&needle) {
        let at = pos + i;
        if boundary(lower.as_bytes().get(at + needle.len()).copied()) {
            return Some(at);
        }
        pos = at + 1;
    }
    None
}

fn find_close(lower: &str, tag: &str, from: usize) -> Option<usize> {
    let needle = format!("</{tag}");
    let mut pos = from;
    while let Some(i) = lower.get(pos..)?.find(&needle) {
        let at = pos + i;
        if boundary(lower.as_bytes().get(at + needle.len()).copied()) {
            return Some(at);
        }
        pos = at + 1;
    }
    None
}

/// Index of the `>` ending the tag that starts at `start`, skipping quoted values.
fn tag_end(html: &str, start: usize) -> Option<usize> {
    let bytes = html.as_bytes();
    let mut quote: Option<u8> = None;
    let mut j = start;
    while j < bytes.len() {
        let c = bytes[j];
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == b'"' || c == b'\'' => quote = Some(c),
            None if c == b'>' => return Some(j),
            None => {}
        }
        j += 1;
    }
    None
}

/// Returns `(close_start, close_end)` for the close tag balancing an open at depth 1.
fn find_matching_close(lower: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let mut depth = 1usize;
    let mut pos = from;
    loop {
        let close = find_close(lower, tag, pos)?;
        match find_open(lower, tag, pos) {
            Some(open) if open < close => {
                depth += 1;
                pos = open + 1;
            }
            _ => {
                depth -= 1;
                let close_end = tag_end(lower, close)?;
                if depth == 0 {
                    return Some((close, close_end));
                }
                pos = close_end + 1;
            }
        }
    }
}

fn element_at<'a>(html: &'a str, lower: &str, tag: &str, start: usize) -> Option<(Element<'a>, usize)> {
    let open_end = tag_end(html, start)?;
    let open_tag = &html[start..=open_end];
    if open_tag.ends_with("/>") {
        return Some((Element { open_tag, inner: "" }, open_end + 1));
    }
    let (inner_end, next) = match find_matching_close(lower, tag, open_end + 1) {
        Some((close_start, close_end)) => (close_start, close_end + 1),
        None => (html.len(), html.len()),
    };
    Some((
        Element {
            open_tag,
            inner: &html[open_end + 1..inner_end],
        },
        next,
    ))
}

/// All top-level `tag` elements in `html`, in document order.
pub(crate) fn elements<'a>(html: &'a str, tag: &str) -> Vec<Element<'a>> {
    let lower = html.to_ascii_lowercase();
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some(start) = find_open(&lower, tag, pos) {
        let Some((el, next)) = element_at(html, &lower, tag, start) else {
            break;
        };
        out.push(el);
        pos = next;
    }
    out
}

/// Opening tags of a void element (e.g. `input`), at any depth.
pub(crate) fn open_tags<'a>(html: &'a str, tag: &str) -> Vec<&'a str> {
    let lower = html.to_ascii_lowercase();
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some(start) = find_open(&lower, tag, pos) {
        let Some(end) = tag_end(html, start) else {
            break;
        };
        out.push(&html[start..=end]);
        pos = end + 1;
    }
    out
}

/// First `tag` element, at any depth, whose opening tag satisfies `pred`.
pub(crate) fn find_where<'a>(
    html: &'a str,
    tag: &str,
    pred: impl Fn(&str) -> bool,
) -> Option<Element<'a>> {
    let lower = html.to_ascii_lowercase();
    let mut pos = 0usize;
    while let Some(start) = find_open(&lower, tag, pos) {
        let end = tag_end(html, start)?;
        if pred(&html[start..=end]) {
            return element_at(html, &lower, tag, start).map(|(el, _)| el);
        }
        pos = end + 1;
    }
    None
}

/// First `tag` element, at any depth, whose `id` attribute equals `id`.
pub(crate) fn find_by_id<'a>(html: &'a str, tag: &str, id: &str) -> Option<Element<'a>> {
    find_where(html, tag, |open| attr(open, "id").as_deref() == Some(id))
}

/// Everything after the first `tag` element whose text equals `heading`
/// (case-insensitive).
pub(crate) fn after_heading<'a>(html: &'a str, tag: &str, heading: &str) -> Option<&'a str> {
    let lower = html.to_ascii_lowercase();
    let mut pos = 0usize;
    while let Some(start) = find_open(&lower, tag, pos) {
        let (el, next) = element_at(html, &lower, tag, start)?;
        if el.text().eq_ignore_ascii_case(heading) {
            return html.get(next..);
        }
        pos = next;
    }
    None
}

/// Reads attribute `name` from an opening tag; values are entity-decoded.
pub(crate) fn attr(open_tag: &str, name: &str) -> Option<String> {
    let bytes = open_tag.as_bytes();
    let mut i = 1usize;
    // skip the tag name
    while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' && bytes[i] != b'/' {
        i += 1;
    }
    loop {
        while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] == b'>' {
            return None;
        }
        let name_start = i;
        while i < bytes.len()
            && !bytes[i].is_ascii_whitespace()
            && !matches!(bytes[i], b'=' | b'>' | b'/')
        {
            i += 1;
        }
        let attr_name = &open_tag[name_start..i];
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let mut value = String::new();
        if i < bytes.len() && bytes[i] == b'=' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i < bytes.len() && (bytes[i] == b'"' || bytes[i] == b'\'') {
                let q = bytes[i];
                let v_start = i + 1;
                i = v_start;
                while i < bytes.len() && bytes[i] != q {
                    i += 1;
                }
                value = open_tag[v_start..i.min(open_tag.len())].to_string();
                i += 1;
            } else {
                let v_start = i;
                while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                    i += 1;
                }
                value = open_tag[v_start..i].to_string();
            }
        }
        if attr_name.eq_ignore_ascii_case(name) {
            return Some(decode_entities(&value));
        }
    }
}

const BLOCK_TAGS: &[&str] = &["br", "p", "div", "tr", "td", "th", "li", "table", "h1", "h2", "h3"];

/// Flattens a fragment to text: tags removed (block tags become spaces),
/// entities decoded, whitespace collapsed and trimmed.
pub(crate) fn text(fragment: &str) -> String {
    let mut raw = String::with_capacity(fragment.len());
    let mut rest = fragment;
    while let Some(lt) = rest.find('<') {
        raw.push_str(&rest[..lt]);
        let after = &rest[lt..];
        let Some(gt) = after.find('>') else {
            rest = "";
            break;
        };
        let name: String = after[1..gt]
            .trim_start_matches('/')
            .chars()
            .take_while(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_ascii_lowercase();
        if BLOCK_TAGS.contains(&name.as_str()) {
            raw.push(' ');
        }
        rest = &after[gt + 1..];
    }
    raw.push_str(rest);

    decode_entities(&raw)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn named_entity(name: &str) -> Option<char> {
    Some(match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "acirc" => 'â',
        "Acirc" => 'Â',
        "icirc" => 'î',
        "Icirc" => 'Î',
        "abreve" => 'ă',
        "Abreve" => 'Ă',
        "scedil" => 'ş',
        "Scedil" => 'Ş',
        "tcedil" => 'ţ',
        "Tcedil" => 'Ţ',
        _ => return None,
    })
}

/// Decodes the named entities above plus decimal/hex numeric references.
/// Unknown entities are left untouched.
pub(crate) fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp..];
        let decoded = after.find(';').filter(|&semi| semi <= 10).and_then(|semi| {
            let body = &after[1..semi];
            let ch = if let Some(num) = body.strip_prefix('#') {
                let code = match num.strip_prefix(['x', 'X']) {
                    Some(hex) => u32::from_str_radix(hex, 16).ok(),
                    None => num.parse::<u32>().ok(),
                };
                code.and_then(char::from_u32)
            } else {
                named_entity(body)
            };
            ch.map(|c| (c, semi))
        });
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &after[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
