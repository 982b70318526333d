/// Split a selection across all newline conventions (`\n`, `\r`, `\r\n`),
/// dropping blank lines. Blank lines inside a selection would make an
/// interactive interpreter treat the current block as finished.
pub fn split_nonblank_lines(source: &str) -> Vec<&str> {
    source
        .split(['\n', '\r'])
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Remove the longest common leading-whitespace prefix shared by every line.
/// Tabs and spaces are compared literally, not expanded.
pub fn dedent(lines: &[&str]) -> Vec<String> {
    let mut margin: Option<&str> = None;
    for line in lines {
        let indent_len = line.len() - line.trim_start().len();
        let prefix = &line[..indent_len];
        margin = Some(match margin {
            None => prefix,
            Some(current) => common_prefix(current, prefix),
        });
    }

    let cut = margin.map_or(0, str::len);
    lines.iter().map(|line| line[cut..].to_string()).collect()
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let mut len = 0;
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca != cb {
            break;
        }
        len += ca.len_utf8();
    }
    &a[..len]
}
