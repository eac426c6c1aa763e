//! Static starter recommendations for the welcome message.
//!
//! Keyed on the assessment's main concern; the five known categories get a
//! curated product block, anything else falls back to a generic template
//! parameterized by skin type.

const ACNE: &str = "### Quick Recommendations for Acne Concerns

1. **Cleanser:** Neutrogena Oil-Free Acne Wash (contains salicylic acid to clear pores)
2. **Treatment:** Clean & Clear Advantage Spot Treatment (for targeted application)
3. **Moisturizer:** Simple Oil-Free Moisturizer (won't clog pores)
4. **Habit:** Change pillowcases 2-3 times weekly to reduce bacteria contact";

const AGING: &str = "### Quick Recommendations for Aging Concerns

1. **Cleanser:** L'Oreal Men Expert Anti-Aging Face Wash
2. **Treatment:** Pond's Age Miracle Day Cream (contains retinol alternatives)
3. **Protection:** Neutrogena Ultra Sheer Dry-Touch Sunscreen SPF 50+
4. **Habit:** Apply moisturizer immediately after washing while skin is still slightly damp";

const SENSITIVITY: &str = "### Quick Recommendations for Sensitive Skin

1. **Cleanser:** Cetaphil Gentle Skin Cleanser (fragrance-free, non-irritating)
2. **Moisturizer:** QV Face Sensitive Moisturizer (hypoallergenic)
3. **Shaving:** Gillette SkinGuard Sensitive Razor with Nivea Sensitive Shaving Gel
4. **Habit:** Patch test new products on your inner arm for 24 hours before facial application";

const UNEVEN_TONE: &str = "### Quick Recommendations for Uneven Skin Tone

1. **Cleanser:** Garnier Men PowerWhite Anti-Pollution Double Action Face Wash
2. **Treatment:** Fair & Lovely Men (contains niacinamide for brightening)
3. **Protection:** Vaseline Healthy Bright Sun + Pollution Protection SPF 30
4. **Habit:** Exfoliate gently twice weekly to remove dead skin cells";

const OILINESS: &str = "### Quick Recommendations for Oily Skin

1. **Cleanser:** Himalaya Purifying Neem Face Wash (controls excess oil)
2. **Treatment:** Clean & Clear Oil Control Film (for midday oil absorption)
3. **Moisturizer:** Neutrogena Hydro Boost Water Gel (oil-free hydration)
4. **Habit:** Use clay masks weekly to deep clean and reduce sebum production";

/// Select the starter recommendation block for a main concern.
///
/// Unknown or absent concerns fall back to a generic block parameterized
/// by the reported skin type.
pub fn starter_recommendations(main_concern: Option<&str>, skin_type: Option<&str>) -> String {
    match main_concern {
        Some("Acne") => ACNE.to_string(),
        Some("Aging") => AGING.to_string(),
        Some("Sensitivity") => SENSITIVITY.to_string(),
        Some("Uneven Tone") => UNEVEN_TONE.to_string(),
        Some("Oiliness") => OILINESS.to_string(),
        _ => format!(
            "### Quick Recommendations Based on Your Profile

1. **Cleanser:** A gentle face wash suited for your {}
2. **Protection:** Daily sunscreen with at least SPF 30
3. **Hydration:** Lightweight moisturizer appropriate for Pakistani climate
4. **Habit:** Drink at least 8 glasses of water daily for skin hydration from within",
            skin_type.unwrap_or("skin type")
        ),
    }
}
