//! Indentation stripping for template literals.

/// Remove the common indentation of a template and trim it.
///
/// The common indentation is the smallest run of leading spaces and tabs
/// over the lines that have any other content. Lines that are shorter
/// (blank lines, usually) are left alone before the final trim.
pub fn strip_indent(text: &str) -> String {
    let indent = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(indent_width)
        .min()
        .unwrap_or(0);

    if indent == 0 {
        return text.trim().to_owned();
    }

    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        if indent_width(line) >= indent {
            out.push_str(&line[indent..]);
        } else {
            out.push_str(line);
        }
    }
    out.trim().to_owned()
}

fn indent_width(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b' ' || b == b'\t').count()
}
