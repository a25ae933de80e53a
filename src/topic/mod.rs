//! Keyword-gated topic boundary.
//!
//! Decides whether a message is clearly outside the malunggay domain before
//! any model call is made. Deliberately asymmetric: a message is only
//! blocked when it positively matches an off-topic pattern, so unusually
//! phrased domain questions still get through.

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    OnTopic,
    OffTopic,
}

/// Short utterances are assumed to be follow-ups inside an ongoing
/// conversation and are never blocked.
const SHORT_MESSAGE_MAX_TOKENS: usize = 5;

/// Greetings, thanks, farewells and acknowledgments. Never blocked.
const CONVERSATIONAL: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "kumusta",
    "kamusta",
    "good morning",
    "good afternoon",
    "good evening",
    "magandang",
    "thank",
    "salamat",
    "bye",
    "goodbye",
    "paalam",
    "ok",
    "okay",
    "sure",
    "nice",
    "great",
    "wow",
    "cool",
    "ayos",
    "sige",
    "oo",
    "yes",
    "no",
    "yep",
    "nope",
    "got it",
    "i see",
    "understood",
    "tell me more",
    "continue",
    "go on",
    "next",
    "what else",
    "ano pa",
];

/// Domain vocabulary in English and Tagalog: plant names and misspellings,
/// plant parts, farming actions, nutrition, market and recipe terms.
const DOMAIN_KEYWORDS: &[&str] = &[
    "malunggay",
    "moringa",
    "moringga",
    "kamunggay",
    "dahon",
    "leaves",
    "leaf",
    "tanim",
    "plant",
    "grow",
    "harvest",
    "ani",
    "seedling",
    "cutting",
    "supling",
    "dilig",
    "water",
    "pataba",
    "fertilizer",
    "compost",
    "kulisap",
    "pest",
    "insect",
    "aphid",
    "disease",
    "sakit",
    "yellow",
    "dilaw",
    "nutrition",
    "vitamin",
    "benefit",
    "benepisyo",
    "presyo",
    "price",
    "sell",
    "bentahan",
    "recipe",
    "cook",
    "luto",
    "tinola",
    "seed",
    "buto",
    "pods",
    "powder",
    "capsule",
    "supplement",
    "tea",
    "soil",
    "lupa",
    "prune",
    "mulch",
    "organic",
    "negosyo",
    "palengke",
    "kalusugan",
    "anemia",
    "superfood",
    "pandesal",
    "smoothie",
];

/// Patterns that positively identify unrelated domains. A message is
/// off-topic only when one of these matches and nothing above allowed it.
const OFF_TOPIC_PATTERNS: &[&str] = &[
    r"\bpresident\b",
    r"\bpolitics\b",
    r"\belection\b",
    r"\bgovernment\b",
    r"\bcelebrity\b",
    r"\bactor\b",
    r"\bsinger\b",
    r"\bnews\b",
    r"\bcapital city\b",
    r"\bcountry\b",
    r"what is (the )?(philippines|usa|japan)",
    r"\bworld war\b",
    r"\bhistory of\b",
    r"\bphone\b",
    r"\blaptop\b",
    r"\bcomputer\b",
    r"\bgame\b",
    r"\bmovie\b",
    r"\bmusic\b",
    r"\bsocial media\b",
    r"\bfacebook\b",
    r"\btiktok\b",
    r"\bmath\b",
    r"\bequation\b",
    r"\bcalculate\b",
    r"\bformula\b",
    r"who (am|are|is) (i|you|we|they)\b",
    r"what (am|are|is) (i|you|we|they)\b",
];

static OFF_TOPIC_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    OFF_TOPIC_PATTERNS.iter()
        .map(|pattern| Regex::new(pattern).expect("off-topic pattern must compile"))
        .collect()
});

/// Classify a message against the topic boundary. Pure and deterministic.
pub fn classify(message: &str) -> Topic {
    let lower = message.to_lowercase();

    if CONVERSATIONAL.iter().any(|token| lower.contains(token)) {
        return Topic::OnTopic;
    }

    if lower.split_whitespace().count() <= SHORT_MESSAGE_MAX_TOKENS {
        return Topic::OnTopic;
    }

    if DOMAIN_KEYWORDS.iter().any(|keyword| lower.contains(keyword)) {
        return Topic::OnTopic;
    }

    if OFF_TOPIC_RES.iter().any(|re| re.is_match(&lower)) {
        return Topic::OffTopic;
    }

    Topic::OnTopic
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_off_topic_patterns_compile() {
        assert_eq!(OFF_TOPIC_RES.len(), OFF_TOPIC_PATTERNS.len());
    }

    #[test]
    fn conversational_tokens_are_never_blocked() {
        assert_eq!(classify("hi"), Topic::OnTopic);
        assert_eq!(classify("salamat po!"), Topic::OnTopic);
        // Even alongside otherwise blockable content.
        assert_eq!(
            classify("thank you, but tell me which president won the last election in this country"),
            Topic::OnTopic
        );
    }

    #[test]
    fn short_messages_are_allowed_as_follow_ups() {
        assert_eq!(classify("paano iyon ginagawa?"), Topic::OnTopic);
        assert_eq!(classify("how often?"), Topic::OnTopic);
    }

    #[test]
    fn domain_keywords_are_on_topic() {
        assert_eq!(
            classify("what fertilizer schedule works best for young trees planted in sandy ground"),
            Topic::OnTopic
        );
        assert_eq!(
            classify("my moringa seedlings turned completely limp after last week's storm"),
            Topic::OnTopic
        );
    }

    #[test]
    fn unrelated_domains_are_blocked() {
        assert_eq!(
            classify("who is the president of the country"),
            Topic::OffTopic
        );
        assert_eq!(
            classify("please recommend a laptop for video editing under 50k pesos budget"),
            Topic::OffTopic
        );
    }

    #[test]
    fn unmatched_long_messages_default_to_on_topic() {
        // No conversational token, more than five words, no domain keyword,
        // no off-topic pattern: permissive default applies.
        assert_eq!(
            classify("please explain how these processes actually work from start to end"),
            Topic::OnTopic
        );
    }
}
