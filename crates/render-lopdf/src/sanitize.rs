/// Reduces `text` to printable ASCII for the built-in Helvetica.
///
/// Harakat, tatweel and bidi controls are dropped. Arabic-Indic digits and
/// Arabic punctuation fold to their ASCII counterparts, as do typographic
/// quotes, dashes and guillemets. Anything else outside ASCII becomes a
/// space; runs of spaces collapse and the result is trimmed. The output
/// never contains a replacement character.
pub fn sanitize_latin(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for ch in text.chars() {
        if is_dropped(ch) {
            continue;
        }
        match fold(ch) {
            Some(ascii) => folded.push_str(ascii),
            None if ch.is_ascii_graphic() || ch == ' ' => folded.push(ch),
            None => folded.push(' '),
        }
    }
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The ASCII that survives sanitizing, or `None` if nothing does.
pub fn ascii_extract(text: &str) -> Option<String> {
    let extract = sanitize_latin(text);
    let meaningful = extract.chars().any(|c| c.is_ascii_alphanumeric());
    meaningful.then_some(extract)
}

fn is_dropped(ch: char) -> bool {
    matches!(ch,
        '\u{064B}'..='\u{065F}' | '\u{0670}' | '\u{06D6}'..='\u{06ED}' // harakat, Quranic marks
        | '\u{0640}'                                                    // tatweel
        | '\u{200B}'..='\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}'
        | '\u{FEFF}' | '\u{FFFD}')
}

fn fold(ch: char) -> Option<&'static str> {
    const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
    let folded = match ch {
        '\u{0660}'..='\u{0669}' => DIGITS[(ch as u32 - 0x0660) as usize],
        '\u{06F0}'..='\u{06F9}' => DIGITS[(ch as u32 - 0x06F0) as usize],
        '\u{060C}' | '\u{066C}' => ",",
        '\u{061B}' => ";",
        '\u{061F}' => "?",
        '\u{066A}' => "%",
        '\u{066B}' => ".",
        '\u{06D4}' => ".",
        '\u{00A0}' | '\t' | '\n' | '\r' => " ",
        '\u{2010}'..='\u{2015}' => "-",
        '\u{2018}' | '\u{2019}' => "'",
        '\u{201C}' | '\u{201D}' => "\"",
        '\u{2026}' => "...",
        '\u{00AB}' => "<<",
        '\u{00BB}' => ">>",
        '\u{00D7}' => "x",
        _ => return None,
    };
    Some(folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_passes_through() {
        assert_eq!(sanitize_latin("Net Salary: 6300 SAR"), "Net Salary: 6300 SAR");
    }

    #[test]
    fn arabic_becomes_collapsed_space() {
        assert_eq!(sanitize_latin("Plate: ABC 1234 سيارة"), "Plate: ABC 1234");
        assert_eq!(sanitize_latin("ورشة النور"), "");
    }

    #[test]
    fn harakat_and_bidi_controls_are_dropped() {
        assert_eq!(sanitize_latin("A\u{064E}B\u{200F}C\u{202B}D"), "ABCD");
    }

    #[test]
    fn arabic_digits_and_punctuation_fold() {
        assert_eq!(sanitize_latin("٥٠٠٠٫٥٠"), "5000.50");
        assert_eq!(sanitize_latin("Open form »"), "Open form >>");
        assert_eq!(sanitize_latin("a، b؟"), "a, b?");
    }

    #[test]
    fn never_emits_replacement_characters() {
        let out = sanitize_latin("\u{FFFD}x\u{1F600}y");
        assert_eq!(out, "x y");
        assert!(!out.contains('\u{FFFD}'));
    }

    #[test]
    fn ascii_extract_requires_alphanumerics() {
        assert_eq!(ascii_extract("ورشة Al-Noor"), Some("Al-Noor".to_string()));
        assert_eq!(ascii_extract("ورشة النور"), None);
        assert_eq!(ascii_extract(" - "), None);
    }
}
