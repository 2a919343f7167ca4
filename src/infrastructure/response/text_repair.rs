//! Best-effort repair of UTF-8 text that was decoded as Latin-1/Windows-1252
//! somewhere between the model and us. Only the sequences listed below are
//! fixed; anything else passes through untouched.

/// Mis-decoded sequence and the character it stands for.
/// Longer or more specific sequences come first.
const MOJIBAKE_TABLE: &[(&str, &str)] = &[
    ("ï»¿", ""),
    ("â€œ", "“"),
    ("â€\u{9d}", "”"),
    ("â€™", "’"),
    ("â€˜", "‘"),
    ("â€“", "–"),
    ("â€”", "—"),
    ("Ã¡", "á"),
    ("Ã©", "é"),
    ("Ã\u{ad}", "í"),
    ("Ã³", "ó"),
    ("Ãº", "ú"),
    ("Ã±", "ñ"),
    ("Ã¼", "ü"),
    ("Ã‰", "É"),
    ("Ã“", "Ó"),
    ("Ãš", "Ú"),
    ("Ã‘", "Ñ"),
    ("Ãœ", "Ü"),
    ("Ã\u{81}", "Á"),
    ("Ã\u{89}", "É"),
    ("Ã\u{8d}", "Í"),
    ("Ã\u{93}", "Ó"),
    ("Ã\u{9a}", "Ú"),
    ("Ã\u{91}", "Ñ"),
    ("Â¿", "¿"),
    ("Â¡", "¡"),
    ("Â°", "°"),
];

/// Replace known mojibake sequences, then drop stray lead bytes,
/// non-breaking spaces and control characters.
pub fn repair_text(input: &str) -> String {
    let mut repaired = MOJIBAKE_TABLE
        .iter()
        .fold(input.to_string(), |text, (broken, fixed)| {
            if text.contains(broken) {
                text.replace(broken, fixed)
            } else {
                text
            }
        });

    repaired = repaired.replace('Â', "");

    repaired
        .chars()
        .filter_map(|c| match c {
            '\u{a0}' => Some(' '),
            '\u{feff}' => None,
            '\n' | '\r' | '\t' => Some(c),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}
