//! Offline roast generator backed by a fixed template table.

use async_trait::async_trait;
use rand::Rng;

use super::error::RoastResult;
use super::generator::RoastGenerator;
use super::types::{RoastCategory, RoastRequest};

const MILD: [&str; 3] = [
    "Your selfie has more filters than a Brita water pitcher. Your future's probably as carefully edited as your Instagram feed.",
    "Your hobbies say 'interesting person', but your selfie says 'I take 50 versions before posting'. Let's hope your personality has more depth than your photo editing skills.",
    "If your jokes were as polished as your profile picture, maybe people would actually laugh at them intentionally.",
];

const SPICY: [&str; 3] = [
    "Wow, with those interests, you're about as unique as a pumpkin spice latte in October. Your personality seems as filtered as that selfie.",
    "I've seen more authentic poses from mannequins. At least they don't pretend to be interesting by listing 'travel' as a personality trait.",
    "Your hairstyle screams 'I watched one TikTok tutorial' while your interests whisper 'I googled what cool people like in 2018.'",
];

const SAVAGE: [&str; 3] = [
    "That selfie angle is trying so hard to hide your insecurities that it developed its own anxiety disorder. Maybe next time, try photographing your personality... oh wait.",
    "You list your interests as if someone would actually be interested. The most fascinating thing about this picture is wondering why you thought it was worth sharing.",
    "You're trying so hard to look unique that you've become a perfect clone of every other 'different' person. Congratulations on being aggressively average while thinking you're special.",
];

/// The fixed templates for a category.
#[must_use]
pub const fn templates(category: RoastCategory) -> &'static [&'static str; 3] {
    match category {
        RoastCategory::Mild => &MILD,
        RoastCategory::Spicy => &SPICY,
        RoastCategory::Savage => &SAVAGE,
    }
}

/// Pick a random template for `category` and personalise it.
///
/// Total: returns a non-empty string for every input.
#[must_use]
pub fn generate(category: RoastCategory, name: &str, interests: &str) -> String {
    let table = templates(category);
    let idx = rand::thread_rng().gen_range(0..table.len());
    personalize(table[idx], name, interests)
}

/// Wrap a template with whichever of `name` and `interests` are present.
#[must_use]
pub fn personalize(base: &str, name: &str, interests: &str) -> String {
    let name = name.trim();
    let interests = interests.trim();

    match (name.is_empty(), interests.is_empty()) {
        (false, false) => format!(
            "Oh, {name}... {base} And seriously, {interests}? That's what you're going with?"
        ),
        (false, true) => format!("Oh, {name}... {base}"),
        (true, false) => format!("{base} And with interests like {interests}, I'm not surprised."),
        (true, true) => base.to_string(),
    }
}

/// [`RoastGenerator`] that never touches the network.
#[derive(Clone, Copy, Debug, Default)]
pub struct FallbackGenerator;

#[async_trait]
impl RoastGenerator for FallbackGenerator {
    async fn generate(&self, request: &RoastRequest) -> RoastResult<String> {
        Ok(generate(request.category, &request.name, &request.interests))
    }

    fn backend(&self) -> &'static str {
        "fallback"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_total() {
        for category in RoastCategory::ALL {
            for (name, interests) in [("", ""), ("Sam", ""), ("", "chess"), ("Sam", "chess")] {
                let roast = generate(category, name, interests);
                assert!(!roast.is_empty());
            }
        }
    }

    #[test]
    fn test_unpersonalised_is_verbatim_template() {
        for _ in 0..20 {
            let roast = generate(RoastCategory::Mild, "", "");
            assert!(MILD.contains(&roast.as_str()));
        }
    }

    #[test]
    fn test_personalize_rules() {
        let base = "Base.";
        assert_eq!(
            personalize(base, "Sam", "chess"),
            "Oh, Sam... Base. And seriously, chess? That's what you're going with?"
        );
        assert_eq!(personalize(base, "Sam", ""), "Oh, Sam... Base.");
        assert_eq!(
            personalize(base, "", "chess"),
            "Base. And with interests like chess, I'm not surprised."
        );
        assert_eq!(personalize(base, "  ", " "), "Base.");
    }

    #[test]
    fn test_generated_roast_uses_category_table() {
        let roast = generate(RoastCategory::Savage, "Sam", "");
        assert!(SAVAGE.iter().any(|t| roast.contains(t)));
    }

    #[tokio::test]
    async fn test_fallback_generator() {
        let request = RoastRequest::new(RoastCategory::Spicy, "Sam", "chess");
        let roast = FallbackGenerator.generate(&request).await.unwrap_or_default();
        assert!(roast.starts_with("Oh, Sam... "));
        assert_eq!(FallbackGenerator.backend(), "fallback");
    }
}
