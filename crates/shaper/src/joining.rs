//! Contextual form selection for Arabic letters.
//!
//! Works on logical order. Each letter is replaced by its isolated, initial,
//! medial or final presentation form depending on whether its neighbours join
//! to it. Harakat are transparent: they never break a join and stay attached
//! to the letter they follow.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Joining {
    /// Joins on both sides.
    Dual,
    /// Joins only to the preceding letter.
    Right,
    /// Tatweel: forces joins on both sides.
    Causing,
    /// Combining marks.
    Transparent,
    NonJoining,
}

impl Joining {
    fn joins_forward(self) -> bool {
        matches!(self, Joining::Dual | Joining::Causing)
    }

    fn joins_backward(self) -> bool {
        matches!(self, Joining::Dual | Joining::Right | Joining::Causing)
    }
}

/// (letter, isolated, final, initial, medial). Right-joining letters repeat
/// their final form in the initial/medial slots; those slots are never used.
const FORMS: &[(char, char, char, char, char)] = &[
    ('\u{0621}', '\u{FE80}', '\u{FE80}', '\u{FE80}', '\u{FE80}'),
    ('\u{0622}', '\u{FE81}', '\u{FE82}', '\u{FE82}', '\u{FE82}'),
    ('\u{0623}', '\u{FE83}', '\u{FE84}', '\u{FE84}', '\u{FE84}'),
    ('\u{0624}', '\u{FE85}', '\u{FE86}', '\u{FE86}', '\u{FE86}'),
    ('\u{0625}', '\u{FE87}', '\u{FE88}', '\u{FE88}', '\u{FE88}'),
    ('\u{0626}', '\u{FE89}', '\u{FE8A}', '\u{FE8B}', '\u{FE8C}'),
    ('\u{0627}', '\u{FE8D}', '\u{FE8E}', '\u{FE8E}', '\u{FE8E}'),
    ('\u{0628}', '\u{FE8F}', '\u{FE90}', '\u{FE91}', '\u{FE92}'),
    ('\u{0629}', '\u{FE93}', '\u{FE94}', '\u{FE94}', '\u{FE94}'),
    ('\u{062A}', '\u{FE95}', '\u{FE96}', '\u{FE97}', '\u{FE98}'),
    ('\u{062B}', '\u{FE99}', '\u{FE9A}', '\u{FE9B}', '\u{FE9C}'),
    ('\u{062C}', '\u{FE9D}', '\u{FE9E}', '\u{FE9F}', '\u{FEA0}'),
    ('\u{062D}', '\u{FEA1}', '\u{FEA2}', '\u{FEA3}', '\u{FEA4}'),
    ('\u{062E}', '\u{FEA5}', '\u{FEA6}', '\u{FEA7}', '\u{FEA8}'),
    ('\u{062F}', '\u{FEA9}', '\u{FEAA}', '\u{FEAA}', '\u{FEAA}'),
    ('\u{0630}', '\u{FEAB}', '\u{FEAC}', '\u{FEAC}', '\u{FEAC}'),
    ('\u{0631}', '\u{FEAD}', '\u{FEAE}', '\u{FEAE}', '\u{FEAE}'),
    ('\u{0632}', '\u{FEAF}', '\u{FEB0}', '\u{FEB0}', '\u{FEB0}'),
    ('\u{0633}', '\u{FEB1}', '\u{FEB2}', '\u{FEB3}', '\u{FEB4}'),
    ('\u{0634}', '\u{FEB5}', '\u{FEB6}', '\u{FEB7}', '\u{FEB8}'),
    ('\u{0635}', '\u{FEB9}', '\u{FEBA}', '\u{FEBB}', '\u{FEBC}'),
    ('\u{0636}', '\u{FEBD}', '\u{FEBE}', '\u{FEBF}', '\u{FEC0}'),
    ('\u{0637}', '\u{FEC1}', '\u{FEC2}', '\u{FEC3}', '\u{FEC4}'),
    ('\u{0638}', '\u{FEC5}', '\u{FEC6}', '\u{FEC7}', '\u{FEC8}'),
    ('\u{0639}', '\u{FEC9}', '\u{FECA}', '\u{FECB}', '\u{FECC}'),
    ('\u{063A}', '\u{FECD}', '\u{FECE}', '\u{FECF}', '\u{FED0}'),
    ('\u{0641}', '\u{FED1}', '\u{FED2}', '\u{FED3}', '\u{FED4}'),
    ('\u{0642}', '\u{FED5}', '\u{FED6}', '\u{FED7}', '\u{FED8}'),
    ('\u{0643}', '\u{FED9}', '\u{FEDA}', '\u{FEDB}', '\u{FEDC}'),
    ('\u{0644}', '\u{FEDD}', '\u{FEDE}', '\u{FEDF}', '\u{FEE0}'),
    ('\u{0645}', '\u{FEE1}', '\u{FEE2}', '\u{FEE3}', '\u{FEE4}'),
    ('\u{0646}', '\u{FEE5}', '\u{FEE6}', '\u{FEE7}', '\u{FEE8}'),
    ('\u{0647}', '\u{FEE9}', '\u{FEEA}', '\u{FEEB}', '\u{FEEC}'),
    ('\u{0648}', '\u{FEED}', '\u{FEEE}', '\u{FEEE}', '\u{FEEE}'),
    ('\u{0649}', '\u{FEEF}', '\u{FEF0}', '\u{FEF0}', '\u{FEF0}'),
    ('\u{064A}', '\u{FEF1}', '\u{FEF2}', '\u{FEF3}', '\u{FEF4}'),
    ('\u{0671}', '\u{FB50}', '\u{FB51}', '\u{FB51}', '\u{FB51}'),
    ('\u{067E}', '\u{FB56}', '\u{FB57}', '\u{FB58}', '\u{FB59}'),
    ('\u{0686}', '\u{FB7A}', '\u{FB7B}', '\u{FB7C}', '\u{FB7D}'),
    ('\u{0698}', '\u{FB8A}', '\u{FB8B}', '\u{FB8B}', '\u{FB8B}'),
    ('\u{06A9}', '\u{FB8E}', '\u{FB8F}', '\u{FB90}', '\u{FB91}'),
    ('\u{06AF}', '\u{FB92}', '\u{FB93}', '\u{FB94}', '\u{FB95}'),
    ('\u{06CC}', '\u{FBFC}', '\u{FBFD}', '\u{FBFE}', '\u{FBFF}'),
];

const LAM: char = '\u{0644}';

/// (alef variant, isolated ligature, final ligature)
const LAM_ALEF: &[(char, char, char)] = &[
    ('\u{0622}', '\u{FEF5}', '\u{FEF6}'),
    ('\u{0623}', '\u{FEF7}', '\u{FEF8}'),
    ('\u{0625}', '\u{FEF9}', '\u{FEFA}'),
    ('\u{0627}', '\u{FEFB}', '\u{FEFC}'),
];

pub(crate) fn is_transparent(ch: char) -> bool {
    matches!(ch, '\u{0610}'..='\u{061A}' | '\u{064B}'..='\u{065F}' | '\u{0670}' | '\u{06D6}'..='\u{06DC}' | '\u{06DF}'..='\u{06E4}' | '\u{06E7}' | '\u{06E8}' | '\u{06EA}'..='\u{06ED}')
}

fn forms_of(ch: char) -> Option<&'static (char, char, char, char, char)> {
    FORMS.iter().find(|entry| entry.0 == ch)
}

pub(crate) fn joining_of(ch: char) -> Joining {
    if ch == '\u{0640}' {
        return Joining::Causing;
    }
    if is_transparent(ch) {
        return Joining::Transparent;
    }
    match forms_of(ch) {
        // hamza never joins
        Some(entry) if entry.0 == '\u{0621}' => Joining::NonJoining,
        Some(entry) if entry.3 == entry.2 => Joining::Right,
        Some(_) => Joining::Dual,
        None => Joining::NonJoining,
    }
}

fn lam_alef_ligature(alef: char, joined_to_previous: bool) -> Option<char> {
    LAM_ALEF
        .iter()
        .find(|(a, _, _)| *a == alef)
        .map(|(_, isolated, final_form)| if joined_to_previous { *final_form } else { *isolated })
}

/// Index of the nearest non-transparent char before `i`.
fn previous_base(chars: &[char], i: usize) -> Option<usize> {
    (0..i).rev().find(|&j| !is_transparent(chars[j]))
}

/// Index of the nearest non-transparent char after `i`.
fn next_base(chars: &[char], i: usize) -> Option<usize> {
    (i + 1..chars.len()).find(|&j| !is_transparent(chars[j]))
}

/// Replaces letters with their contextual presentation forms. Logical order is kept.
pub(crate) fn apply_contextual_forms(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() * 3);
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        let joining = joining_of(ch);
        if matches!(joining, Joining::Transparent | Joining::NonJoining | Joining::Causing) {
            out.push(ch);
            i += 1;
            continue;
        }

        let prev = previous_base(&chars, i).map(|j| joining_of(chars[j]));
        let next_index = next_base(&chars, i);
        let next = next_index.map(|j| joining_of(chars[j]));

        let joined_to_previous = joining.joins_backward() && prev.is_some_and(Joining::joins_forward);

        if ch == LAM
            && let Some(j) = next_index
            && let Some(ligature) = lam_alef_ligature(chars[j], joined_to_previous)
        {
            out.push(ligature);
            // marks between lam and alef stay with the ligature
            out.extend(chars[i + 1..j].iter());
            i = j + 1;
            continue;
        }

        let joined_to_next = joining.joins_forward() && next.is_some_and(Joining::joins_backward);

        if let Some(&(_, isolated, final_form, initial, medial)) = forms_of(ch) {
            out.push(match (joined_to_previous, joined_to_next) {
                (true, true) => medial,
                (true, false) => final_form,
                (false, true) => initial,
                (false, false) => isolated,
            });
        } else {
            out.push(ch);
        }
        i += 1;
    }

    out
}
