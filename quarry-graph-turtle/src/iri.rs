//! RFC 3986 IRI reference resolution.
//!
//! Every IRI reference in a Turtle document is resolved against the current
//! base before it reaches the sink (RFC 3986 §5.3). Only the subset of the
//! RFC needed for reference resolution lives here; IRI validation beyond the
//! lexer's character rules is out of scope.

/// Check whether a reference starts with a scheme (`ALPHA (ALPHA / DIGIT /
/// "+" / "-" / ".")* ":"`), i.e. is already absolute.
pub(crate) fn is_absolute(reference: &str) -> bool {
    let Some(colon) = reference.find(':') else {
        return false;
    };
    let scheme = &reference[..colon];
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
        }
        _ => false,
    }
}

/// Resolve `reference` against `base` (RFC 3986 §5.3).
///
/// Returns `None` when the reference is relative and no base is available.
/// The base is assumed absolute: the parser only ever stores resolved bases.
pub(crate) fn resolve(base: Option<&str>, reference: &str) -> Option<String> {
    if reference.is_empty() {
        // target is the base itself, minus any fragment
        let base = base?;
        let end = base.find('#').unwrap_or(base.len());
        return Some(base[..end].to_string());
    }
    if is_absolute(reference) {
        return Some(reference.to_string());
    }

    let base_parts = split(base?);

    let (ref_main, fragment) = match reference.find('#') {
        Some(i) => (&reference[..i], Some(&reference[i + 1..])),
        None => (reference, None),
    };
    let (ref_path, ref_query) = match ref_main.find('?') {
        Some(i) => (&ref_main[..i], Some(&ref_main[i + 1..])),
        None => (ref_main, None),
    };

    let (authority, path, query) = if let Some(rest) = ref_path.strip_prefix("//") {
        let auth_end = rest.find('/').unwrap_or(rest.len());
        (
            Some(rest[..auth_end].to_string()),
            remove_dot_segments(&rest[auth_end..]),
            ref_query,
        )
    } else if ref_path.starts_with('/') {
        (
            base_parts.authority.map(str::to_string),
            remove_dot_segments(ref_path),
            ref_query,
        )
    } else if ref_path.is_empty() {
        (
            base_parts.authority.map(str::to_string),
            base_parts.path.to_string(),
            ref_query.or(base_parts.query),
        )
    } else {
        let merged = merge_paths(&base_parts, ref_path);
        (
            base_parts.authority.map(str::to_string),
            remove_dot_segments(&merged),
            ref_query,
        )
    };

    let mut out = String::with_capacity(base_parts.scheme.len() + reference.len() + path.len() + 2);
    out.push_str(base_parts.scheme);
    out.push(':');
    if let Some(authority) = authority {
        out.push_str("//");
        out.push_str(&authority);
    }
    out.push_str(&path);
    if let Some(query) = query {
        out.push('?');
        out.push_str(query);
    }
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    Some(out)
}

struct Parts<'a> {
    scheme: &'a str,
    authority: Option<&'a str>,
    path: &'a str,
    query: Option<&'a str>,
}

fn split(iri: &str) -> Parts<'_> {
    let (scheme, rest) = match iri.find(':') {
        Some(i) => (&iri[..i], &iri[i + 1..]),
        None => ("", iri),
    };

    // a base fragment never participates in resolution
    let rest = match rest.find('#') {
        Some(i) => &rest[..i],
        None => rest,
    };
    let (rest, query) = match rest.find('?') {
        Some(i) => (&rest[..i], Some(&rest[i + 1..])),
        None => (rest, None),
    };

    let (authority, path) = if let Some(after) = rest.strip_prefix("//") {
        let end = after.find('/').unwrap_or(after.len());
        (Some(&after[..end]), &after[end..])
    } else {
        (None, rest)
    };

    Parts {
        scheme,
        authority,
        path,
        query,
    }
}

/// RFC 3986 §5.3.3 path merge.
fn merge_paths(base: &Parts<'_>, reference: &str) -> String {
    if base.authority.is_some() && base.path.is_empty() {
        return format!("/{reference}");
    }
    match base.path.rfind('/') {
        Some(i) => format!("{}{}", &base.path[..=i], reference),
        None => reference.to_string(),
    }
}

/// RFC 3986 §5.2.4 remove_dot_segments.
fn remove_dot_segments(path: &str) -> String {
    let mut input = path.to_string();
    let mut output = String::new();

    while !input.is_empty() {
        if let Some(rest) = input.strip_prefix("../") {
            input = rest.to_string();
        } else if let Some(rest) = input.strip_prefix("./") {
            input = rest.to_string();
        } else if input.starts_with("/./") {
            input.replace_range(..3, "/");
        } else if input == "/." {
            input = "/".to_string();
        } else if input.starts_with("/../") {
            input.replace_range(..4, "/");
            truncate_last_segment(&mut output);
        } else if input == "/.." {
            input = "/".to_string();
            truncate_last_segment(&mut output);
        } else if input == "." || input == ".." {
            input.clear();
        } else {
            let start = usize::from(input.starts_with('/'));
            let end = input[start..]
                .find('/')
                .map(|i| i + start)
                .unwrap_or(input.len());
            output.push_str(&input[..end]);
            input.replace_range(..end, "");
        }
    }

    output
}

fn truncate_last_segment(output: &mut String) {
    match output.rfind('/') {
        Some(i) => output.truncate(i),
        None => output.clear(),
    }
}
