use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// The fixed verdict taxonomy every label is mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    True,
    False,
    MostlyTrue,
    HalfTrue,
    BarelyTrue,
    PantsFire,
    Unknown,
}

impl Verdict {
    pub const ALL: [Verdict; 7] = [
        Verdict::True,
        Verdict::False,
        Verdict::MostlyTrue,
        Verdict::HalfTrue,
        Verdict::BarelyTrue,
        Verdict::PantsFire,
        Verdict::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::True => "TRUE",
            Verdict::False => "FALSE",
            Verdict::MostlyTrue => "mostly-true",
            Verdict::HalfTrue => "half-true",
            Verdict::BarelyTrue => "barely-true",
            Verdict::PantsFire => "pants-fire",
            Verdict::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a rule tests the normalized label.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// Whole label equals one of these.
    Exact(&'static [&'static str]),
    /// Label contains every one of these.
    AllOf(&'static [&'static str]),
    /// Label contains at least one of these.
    AnyOf(&'static [&'static str]),
}

impl Matcher {
    fn matches(&self, label: &str) -> bool {
        match self {
            Matcher::Exact(words) => words.contains(&label),
            Matcher::AllOf(words) => words.iter().all(|w| label.contains(w)),
            Matcher::AnyOf(words) => words.iter().any(|w| label.contains(w)),
        }
    }
}

/// Rules in priority order; the first match wins. Exact matches come first so a
/// bare "true" never swallows the "*-true" variants.
pub const LABEL_RULES: &[(Matcher, Verdict)] = &[
    (Matcher::Exact(&["true", "tru", "t"]), Verdict::True),
    (Matcher::Exact(&["false", "fals", "f"]), Verdict::False),
    (Matcher::AllOf(&["mostly", "true"]), Verdict::MostlyTrue),
    (Matcher::AllOf(&["barely", "true"]), Verdict::BarelyTrue),
    (Matcher::AllOf(&["half", "true"]), Verdict::HalfTrue),
    (Matcher::AnyOf(&["pants", "fire"]), Verdict::PantsFire),
];

static NON_LABEL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z\-\s]").expect("valid label regex"));

/// Map any verdict string onto the taxonomy. Total: unrecognised input is `Unknown`.
pub fn standardize_label(raw: Option<&str>) -> Verdict {
    let Some(raw) = raw else {
        return Verdict::Unknown;
    };
    let lowered = raw.trim().to_lowercase();
    let label = NON_LABEL_CHARS.replace_all(&lowered, "");
    let label = label.trim();
    if label.is_empty() {
        return Verdict::Unknown;
    }

    LABEL_RULES
        .iter()
        .find(|(matcher, _)| matcher.matches(label))
        .map(|(_, verdict)| *verdict)
        .unwrap_or(Verdict::Unknown)
}
