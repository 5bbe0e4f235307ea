use chumsky::prelude::*;

/// A `#` comment running to the end of the line.
pub fn comment() -> impl Parser<char, (), Error = Simple<char>> + Clone {
    just('#')
        .then(filter(|c: &char| *c != '\n').repeated())
        .ignored()
}

/// Whitespace interleaved with comments.
pub fn blank() -> impl Parser<char, (), Error = Simple<char>> + Clone {
    text::whitespace()
        .then(comment().then(text::whitespace()).repeated())
        .ignored()
}

/// Letters, digits, `_` and `'`, starting with a letter or `_`.
fn ident_chars() -> impl Parser<char, String, Error = Simple<char>> + Clone {
    filter(|c: &char| c.is_alphabetic() || *c == '_')
        .chain::<char, _, _>(
            filter(|c: &char| c.is_alphanumeric() || *c == '_' || *c == '\'').repeated(),
        )
        .collect::<String>()
}

pub fn ident(
    keywords: impl IntoIterator<Item = impl Into<String>>,
) -> impl Parser<char, String, Error = Simple<char>> + Clone {
    let keywords = keywords.into_iter().map(Into::into).collect::<Vec<_>>();
    ident_chars().try_map(move |s: String, span| {
        if keywords.contains(&s) {
            Err(Simple::custom(span, format!("unexpected keyword: {s}")))
        } else {
            Ok(s)
        }
    })
}

pub fn int() -> impl Parser<char, usize, Error = Simple<char>> + Clone {
    text::int(10).try_map(|s: String, span| {
        s.parse::<usize>()
            .map_err(|e| Simple::custom(span, e.to_string()))
    })
}
