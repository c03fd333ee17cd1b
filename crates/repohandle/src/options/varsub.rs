//! `$variable` substitution in URLs.
//!
//! `$name` and `${name}` are replaced by the value of the first `varsub`
//! pair whose key is `name`. A name is the longest run of ASCII
//! alphanumerics and underscores after `$`. Unknown variables, a lone `$`
//! and an unterminated `${` are kept verbatim.

pub fn substitute(url: &str, vars: &[(String, String)]) -> String {
    if vars.is_empty() || !url.contains('$') {
        return url.to_string();
    }

    let lookup = |name: &str| {
        vars.iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    };

    let mut out = String::with_capacity(url.len());
    let mut rest = url;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], end + 2),
                None => ("", 0),
            }
        } else {
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (&after[..end], end)
        };

        match lookup(name).filter(|_| !name.is_empty()) {
            Some(value) => out.push_str(value),
            None => {
                out.push('$');
                out.push_str(&after[..consumed]);
            }
        }
        rest = &after[consumed..];
    }

    out.push_str(rest);
    out
}
