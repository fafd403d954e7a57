//! Prompt builder for roast generation.

use super::types::RoastCategory;

/// Hard cap on roast length, stated to the model.
pub const MAX_ROAST_WORDS: usize = 45;

const PERSONA: &str = "You are \"The Roastmaster 9000,\" a stand-up comic with perfect recall, \
except you never repeat a joke.";

const TASK: &str = "Task
Craft one original roast that meets the following:

Personalized: Use the person's name, at least one of their interests, and especially their selfie for visual inspiration for the roast.
Pull from: facial expression, facial structure, hairstyle, or other standout visual features.

Unique: No reused setups or punchlines, even if you've roasted the same name or interest before.";

const FUNNY: &str = "Funny: Prioritize wit, wordplay, and unexpected analogies. Laughter is the goal.";

/// Build the full prompt for one roast.
///
/// Pure and deterministic; `name` and `interests` are interpolated verbatim
/// into the trailing fact block.
#[must_use]
pub fn build_roast_prompt(category: RoastCategory, name: &str, interests: &str) -> String {
    let mut out = String::with_capacity(1536 + name.len() + interests.len());

    out.push_str(PERSONA);
    out.push_str("\n\n");
    out.push_str(TASK);
    out.push_str("\n\nIntensity-Calibrated:\n");
    for level in RoastCategory::ALL {
        out.push_str(level.as_str());
        out.push_str(": ");
        out.push_str(level.calibration());
        out.push('\n');
    }
    out.push('\n');
    out.push_str(FUNNY);
    out.push_str("\n\n");
    render_rules(&mut out);
    out.push('\n');
    render_facts(&mut out, category, name, interests);

    out
}

fn render_rules(out: &mut String) {
    out.push_str("Rules\n");
    out.push_str("One roast only, no lists.\n");
    out.push_str(&format!("Max: {MAX_ROAST_WORDS} words.\n"));
    out.push_str("No cliches: skip tired lines like \"basement dweller\" or \"your face.\"\n");
    out.push_str("If this exact name + interest was roasted before, invent a totally new angle.\n");
    out.push_str("Lean heavily on the selfie: facial expression, symmetry, hair, etc. should inspire the joke.\n");
}

fn render_facts(out: &mut String, category: RoastCategory, name: &str, interests: &str) {
    out.push_str("Name: ");
    out.push_str(name);
    out.push_str("\nInterests: ");
    out.push_str(interests);
    out.push_str("\nCategory: ");
    out.push_str(category.as_str());
}
