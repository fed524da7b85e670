//! Lecturer-name canonicalization.
//!
//! Timetable workbooks carry lecturer names with inline comments, irregular
//! spacing and academic titles in every imaginable casing. Before names are
//! compared or stored in the ledger they are reduced to a single canonical
//! display form. The function is total: malformed input degrades to a
//! best-effort form, it never fails.

/// Abbreviated academic titles and their canonical forms. Keys are lowercase
/// with trailing dots stripped; matching is whole-token.
const TITLE_MAP: &[(&str, &str)] = &[
    ("s.sit", "S.Si.T."),
    ("s.si.t", "S.Si.T."),
    ("s.kom", "S.Kom."),
    ("m.kom", "M.Kom."),
    ("m.t", "M.T."),
    ("mt", "M.T."),
    ("m.stat", "M.Stat."),
    ("m.mat", "M.Mat."),
    ("ph.d", "Ph.D."),
    ("drs", "Drs."),
    ("dr", "Dr."),
    ("st", "S.T."),
    ("s.t", "S.T."),
    ("sp", "Sp."),
    ("mm", "M.M."),
    ("m.m", "M.M."),
];

const COMMENT_MARKER: &str = "//";

/// Canonicalizes a raw lecturer name.
///
/// Steps: cut at the first `//` marker, collapse whitespace, normalize
/// comma/period spacing, map known academic titles to their canonical
/// capitalization, uppercase remaining dot-terminated tokens (initials),
/// title-case everything else.
///
/// Idempotent: `normalize_lecturer(&normalize_lecturer(x)) == normalize_lecturer(x)`.
pub fn normalize_lecturer(raw: &str) -> String {
    let base = raw.split(COMMENT_MARKER).next().unwrap_or("").trim();

    // One space after each comma, none before commas or periods.
    let mut spaced = String::with_capacity(base.len() + 4);
    for part in base.split_whitespace() {
        if !spaced.is_empty() && !part.starts_with(',') && !part.starts_with('.') {
            spaced.push(' ');
        }
        spaced.push_str(part);
    }
    let spaced = spaced.replace(',', ", ");

    spaced
        .split_whitespace()
        .map(normalize_token)
        .collect::<Vec<String>>()
        .join(" ")
}

fn normalize_token(token: &str) -> String {
    let (core, comma) = match token.strip_suffix(',') {
        Some(core) => (core, ","),
        None => (token, ""),
    };

    let key = core.to_lowercase();
    let key = key.trim_end_matches('.');
    if let Some((_, canonical)) = TITLE_MAP.iter().find(|(k, _)| *k == key) {
        return format!("{canonical}{comma}");
    }

    let shaped = if core.ends_with('.') {
        core.to_uppercase()
    } else {
        title_case(core)
    };
    format!("{shaped}{comma}")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
