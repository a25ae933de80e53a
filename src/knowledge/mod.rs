//! Static grounding facts keyed on message keywords.
//!
//! A fixed table stands in for retrieval infrastructure: every entry whose
//! trigger set intersects the message contributes its fact line, so the
//! model answers from curated data instead of hallucinating figures.

pub struct KnowledgeEntry {
    pub triggers: &'static [&'static str],
    pub fact: &'static str,
}

pub const KNOWLEDGE_TABLE: &[KnowledgeEntry] = &[
    KnowledgeEntry {
        triggers: &["plant", "grow", "tanim", "itanim", "seedling", "cutting"],
        fact: "PLANTING: Cut 12-18 inch branch, plant at 45° angle, 6 inches deep. Water daily first week. Roots in 7-14 days.",
    },
    KnowledgeEntry {
        triggers: &["harvest", "ani", "pag-aani", "pick", "putas"],
        fact: "HARVEST: Early morning 6-8 AM. When 1.5-2m tall. Every 2-4 weeks. Max 30% at once.",
    },
    KnowledgeEntry {
        triggers: &["disease", "yellow", "sakit", "dilaw", "sick", "problem"],
        fact: "YELLOW LEAVES: Usually overwatering or nitrogen deficiency. Check soil moisture first.",
    },
    KnowledgeEntry {
        triggers: &["price", "presyo", "sell", "bentahan", "cost", "magkano"],
        fact: "PRICES: Fresh leaves ₱50-80/bundle, Powder ₱120-200/100g, Capsules ₱250-400.",
    },
    KnowledgeEntry {
        triggers: &["nutrition", "vitamin", "benefit", "benepisyo", "healthy", "good for"],
        fact: "NUTRITION per 100g: Vit A 6,780μg, Vit C 51.7mg, Iron 4mg, Protein 9.4g. Boosts immunity, prevents anemia.",
    },
    KnowledgeEntry {
        triggers: &["water", "tubig", "dilig", "irrigat"],
        fact: "WATERING: Young plants every 2-3 days. Mature plants 1-2x per week. Drought tolerant. Better to underwater.",
    },
    KnowledgeEntry {
        triggers: &["fertilizer", "pataba", "compost", "manure", "abono"],
        fact: "FERTILIZER: Organic compost every 4-6 weeks (2-3kg/tree). Chicken manure every 2-3 months. 14-14-14 every 2 months (50-100g).",
    },
    KnowledgeEntry {
        triggers: &["pest", "insect", "kulisap", "bug", "aphid", "caterpillar"],
        fact: "PESTS: Aphids - spray neem oil. Caterpillars - hand pick or Bt pesticide. Inspect weekly.",
    },
    KnowledgeEntry {
        triggers: &["recipe", "cook", "luto", "lutuin", "eat", "food", "tinola"],
        fact: "RECIPES: Add leaves last 2 min in tinola. Sauté with eggs and garlic. Blend in smoothies. Mix powder in pandesal.",
    },
];

const FALLBACK: &str =
    "General malunggay (moringa) cultivation and usage information for the Philippines.";

/// Collect the fact lines for every table entry triggered by the message,
/// in table order. Pure and deterministic.
pub fn relevant_knowledge(message: &str) -> String {
    let lower = message.to_lowercase();

    let facts: Vec<&str> = KNOWLEDGE_TABLE.iter()
        .filter(|entry| entry.triggers.iter().any(|trigger| lower.contains(trigger)))
        .map(|entry| entry.fact)
        .collect();

    if facts.is_empty() {
        FALLBACK.to_string()
    } else {
        facts.join("\n")
    }
}
