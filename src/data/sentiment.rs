//! Text polarity primitive used by the sentiment aggregator

/// Lexicon-based sentiment keywords (simple approach)
const POSITIVE_WORDS: &[&str] = &[
    "beat", "beats", "bull", "bullish", "gain", "gains", "growth", "jump", "jumps", "outperform",
    "positive", "profit", "rally", "record", "rise", "rises", "soar", "soars", "strong", "surge",
    "surges", "upgrade", "upgraded", "win", "wins",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bear", "bearish", "concern", "concerns", "crash", "cut", "cuts", "decline", "declines",
    "downgrade", "downgraded", "drop", "drops", "fall", "falls", "fraud", "lawsuit", "loss",
    "losses", "miss", "misses", "negative", "plunge", "plunges", "slump", "weak",
];

const NEGATIONS: &[&str] = &["not", "no", "never", "without", "isn't", "wasn't", "didn't", "doesn't"];

/// Polarity of one text fragment, in [-1, 1].
///
/// Implementations must be pure: the same text always gives the same value.
/// `None` means the fragment could not be scored and should be skipped.
pub trait Polarity: Send + Sync {
    fn polarity(&self, text: &str) -> Option<f64>;
}

/// Keyword lexicon with one-word negation lookbehind
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconPolarity;

impl Polarity for LexiconPolarity {
    fn polarity(&self, text: &str) -> Option<f64> {
        let mut positive_count = 0i32;
        let mut negative_count = 0i32;
        let mut negate_next = false;

        for raw in text.split_whitespace() {
            let word = raw
                .trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .to_lowercase();
            if word.is_empty() {
                continue;
            }

            if NEGATIONS.contains(&word.as_str()) {
                negate_next = true;
                continue;
            }

            let sign = if POSITIVE_WORDS.contains(&word.as_str()) {
                1
            } else if NEGATIVE_WORDS.contains(&word.as_str()) {
                -1
            } else {
                0
            };
            let sign = if negate_next { -sign } else { sign };
            negate_next = false;

            match sign {
                1 => positive_count += 1,
                -1 => negative_count += 1,
                _ => {}
            }
        }

        let total = positive_count + negative_count;
        if total == 0 {
            return Some(0.0); // Neutral
        }

        let score = f64::from(positive_count - negative_count) / f64::from(total);
        Some(score.clamp(-1.0, 1.0))
    }
}
