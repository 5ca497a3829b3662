//! Character references for HTML recovered from `\fromhtml` documents.

/// Entity written for a character produced by an RTF control word.
pub(super) fn entity(ch: char) -> Option<&'static str> {
    Some(match ch {
        '\u{00A0}' => "&nbsp;",
        '\u{2002}' => "&ensp;",
        '\u{2003}' => "&emsp;",
        '\u{2013}' => "&ndash;",
        '\u{2014}' => "&mdash;",
        '\u{2018}' => "&lsquo;",
        '\u{2019}' => "&rsquo;",
        '\u{201C}' => "&ldquo;",
        '\u{201D}' => "&rdquo;",
        '\u{2022}' => "&bull;",
        _ => return None,
    })
}
