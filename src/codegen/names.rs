//! Name Derivation
//!
//! Turns human-readable program titles into TypeScript identifiers:
//! - `function_name`: camelCase of the title
//! - `input_type_name` / `output_type_name`: PascalCase of the function name
//!   plus an `Input` / `Output` suffix
//! - `safe_type_name`: identifier for a hoisted schema title
//!
//! Word splitting follows the conventional JavaScript rules: accents are
//! stripped, apostrophes are dropped, any non-alphanumeric character
//! separates words, and a new word starts at a lower -> upper transition, at
//! the last capital of an acronym run that is followed by a lowercase letter,
//! and between letters and digits. Ordinals (`1st`, `22nd`) stay one word.

// =============================================================================
// Public API
// =============================================================================

/// Function identifier for a program title
pub fn function_name(title: &str) -> String {
    camel_case(title)
}

/// Type name for a program's input
pub fn input_type_name(function_name: &str) -> String {
    pascal_case(&format!("{}Input", function_name))
}

/// Type name for a program's output
pub fn output_type_name(function_name: &str) -> String {
    pascal_case(&format!("{}Output", function_name))
}

/// All derived identifiers for one program title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedNames {
    pub function: String,
    pub input_type: String,
    pub output_type: String,
}

impl DerivedNames {
    pub fn from_title(title: &str) -> Self {
        let function = function_name(title);
        Self {
            input_type: input_type_name(&function),
            output_type: output_type_name(&function),
            function,
        }
    }
}

// =============================================================================
// Casing
// =============================================================================

/// Split a string into words
pub fn words(input: &str) -> Vec<String> {
    let chars: Vec<char> = deburr(input)
        .chars()
        .filter(|c| *c != '\'' && *c != '\u{2019}')
        .collect();

    let mut words = Vec::new();
    let mut current = String::new();
    // Index just past an ordinal suffix (`1st`, `2ND`) still being read
    let mut ordinal_end: Option<usize> = None;

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            ordinal_end = None;
            continue;
        }

        if let Some(prev) = current.chars().last() {
            let next = chars.get(i + 1).copied();
            let pending = ordinal_end;
            let boundary = match pending {
                Some(end) if i < end => false,
                Some(_) => true,
                None if prev.is_numeric() && !c.is_numeric() => {
                    ordinal_end = ordinal_suffix(prev, &chars[i..]).map(|len| i + len);
                    ordinal_end.is_none()
                }
                None => {
                    prev.is_numeric() != c.is_numeric()
                        || (prev.is_lowercase() && c.is_uppercase())
                        || (prev.is_uppercase()
                            && c.is_uppercase()
                            && next.is_some_and(char::is_lowercase))
                }
            };
            if boundary {
                words.push(std::mem::take(&mut current));
                ordinal_end = None;
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Length of the ordinal suffix after `digit`, if `rest` starts with one.
///
/// `1st`, `2nd`, `3rd` and `<d>th` for any other last digit, all lowercase
/// or all uppercase. A lowercase suffix must be followed by a break or an
/// uppercase letter, an uppercase one by a break or a lowercase letter.
fn ordinal_suffix(digit: char, rest: &[char]) -> Option<usize> {
    let suffix = match digit {
        '1' => "st",
        '2' => "nd",
        '3' => "rd",
        d if d.is_ascii_digit() => "th",
        _ => return None,
    };
    let candidate: String = rest.iter().take(2).collect();
    let upper = if candidate == suffix {
        false
    } else if candidate == suffix.to_ascii_uppercase() {
        true
    } else {
        return None;
    };

    let follows = match rest.get(2).copied() {
        None | Some('_') => true,
        Some(c) if upper => c.is_ascii_lowercase() || !is_word_char(c),
        Some(c) => c.is_ascii_uppercase() || !is_word_char(c),
    };
    follows.then_some(2)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Replace Latin-1 and Latin Extended-A letters with their basic Latin
/// letters and drop combining diacritical marks: `Café` -> `Cafe`
pub fn deburr(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\u{0300}'..='\u{036f}' | '\u{fe20}'..='\u{fe2f}' | '\u{20d0}'..='\u{20ff}' => {}
            '\u{0100}'..='\u{017f}' => out.push_str(LATIN_EXTENDED_A[c as usize - 0x100]),
            _ => match latin1_base(c) {
                Some(base) => out.push_str(base),
                None => out.push(c),
            },
        }
    }
    out
}

fn latin1_base(c: char) -> Option<&'static str> {
    let base = match c {
        '\u{c0}'..='\u{c5}' => "A",
        '\u{c6}' => "Ae",
        '\u{c7}' => "C",
        '\u{c8}'..='\u{cb}' => "E",
        '\u{cc}'..='\u{cf}' => "I",
        '\u{d0}' => "D",
        '\u{d1}' => "N",
        '\u{d2}'..='\u{d6}' | '\u{d8}' => "O",
        '\u{d9}'..='\u{dc}' => "U",
        '\u{dd}' => "Y",
        '\u{de}' => "Th",
        '\u{df}' => "ss",
        '\u{e0}'..='\u{e5}' => "a",
        '\u{e6}' => "ae",
        '\u{e7}' => "c",
        '\u{e8}'..='\u{eb}' => "e",
        '\u{ec}'..='\u{ef}' => "i",
        '\u{f0}' => "d",
        '\u{f1}' => "n",
        '\u{f2}'..='\u{f6}' | '\u{f8}' => "o",
        '\u{f9}'..='\u{fc}' => "u",
        '\u{fd}' | '\u{ff}' => "y",
        '\u{fe}' => "th",
        _ => return None,
    };
    Some(base)
}

/// Basic Latin replacement for U+0100..=U+017F
#[rustfmt::skip]
const LATIN_EXTENDED_A: [&str; 128] = [
    "A", "a", "A", "a", "A", "a",
    "C", "c", "C", "c", "C", "c", "C", "c",
    "D", "d", "D", "d",
    "E", "e", "E", "e", "E", "e", "E", "e", "E", "e",
    "G", "g", "G", "g", "G", "g", "G", "g",
    "H", "h", "H", "h",
    "I", "i", "I", "i", "I", "i", "I", "i", "I", "i",
    "IJ", "ij",
    "J", "j",
    "K", "k", "k",
    "L", "l", "L", "l", "L", "l", "L", "l", "L", "l",
    "N", "n", "N", "n", "N", "n", "'n", "N", "n",
    "O", "o", "O", "o", "O", "o",
    "Oe", "oe",
    "R", "r", "R", "r", "R", "r",
    "S", "s", "S", "s", "S", "s", "S", "s",
    "T", "t", "T", "t", "T", "t",
    "U", "u", "U", "u", "U", "u", "U", "u", "U", "u", "U", "u",
    "W", "w",
    "Y", "y", "Y",
    "Z", "z", "Z", "z", "Z", "z",
    "s",
];

/// `Sum Numbers (From 1 to 5)` -> `sumNumbersFrom1To5`
pub fn camel_case(input: &str) -> String {
    words(input)
        .iter()
        .enumerate()
        .map(|(i, word)| {
            if i == 0 {
                word.to_lowercase()
            } else {
                capitalize(word)
            }
        })
        .collect()
}

/// `sumNumbersInput` -> `SumNumbersInput`
pub fn pascal_case(input: &str) -> String {
    upper_first(&camel_case(input))
}

/// First character upper, rest lower
fn capitalize(word: &str) -> String {
    upper_first(&word.to_lowercase())
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

// =============================================================================
// Safe Type Names
// =============================================================================

pub(crate) fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

pub(crate) fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

/// Identifier for a schema title: `Program_item_steps` -> `ProgramItemSteps`
pub fn safe_type_name(title: &str) -> String {
    let chars: Vec<char> = title.chars().collect();

    // Leading whitespace plus a non-identifier-start character collapse into
    // one break; every other non-identifier character becomes a break.
    let leading_ws = chars.iter().take_while(|c| c.is_whitespace()).count();
    let mut spaced: Vec<char> = Vec::with_capacity(chars.len());
    let start = match chars.get(leading_ws) {
        Some(&c) if !is_ident_start(c) => {
            spaced.push(' ');
            leading_ws + 1
        }
        _ if leading_ws > 0 => {
            spaced.push(' ');
            leading_ws
        }
        _ => 0,
    };
    spaced.extend(chars[start..].iter().map(|&c| if is_ident_char(c) { c } else { ' ' }));

    // `_x` -> `X`, except a leading underscore which is kept
    let mut joined: Vec<char> = Vec::with_capacity(spaced.len());
    let mut i = 0;
    while i < spaced.len() {
        let c = spaced[i];
        let next = spaced.get(i + 1).copied();
        if c == '_' && next.is_some_and(|n| n.is_ascii_lowercase()) {
            if i == 0 {
                joined.push('_');
            }
            joined.push(next.unwrap_or_default().to_ascii_uppercase());
            i += 2;
            continue;
        }
        joined.push(c);
        i += 1;
    }

    // Letters following digits or `$`, and letters following a break, start
    // a new word.
    let mut out = String::with_capacity(joined.len());
    let mut prev: Option<char> = None;
    for &c in &joined {
        if c.is_whitespace() {
            prev = Some(c);
            continue;
        }
        let starts_word = prev.is_some_and(|p| p.is_whitespace() || p.is_ascii_digit() || p == '$');
        if starts_word && c.is_ascii_alphabetic() {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        prev = Some(c);
    }

    upper_first(&out)
}
