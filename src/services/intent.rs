use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    HomeAssistant,
    RecipeAssistant,
    ShoppingCategorizer,
    General,
}

pub const HOME_ASSISTANT_KEYWORDS: &[&str] =
    &["lamp", "light", "turn on", "turn off", "door", "fan", "air", "status"];

pub const RECIPE_ASSISTANT_KEYWORDS: &[&str] =
    &["recipe", "cook", "how to make", "ingredients", "dish", "meal"];

pub const SHOPPING_CATEGORIZER_KEYWORDS: &[&str] =
    &["shopping", "buy", "need", "list", "grocery", "groceries"];

/// Keyword sets in priority order. The first set with a match wins; anything
/// left over is `Intent::General`.
pub const INTENT_PRIORITY: &[(Intent, &[&str])] = &[
    (Intent::HomeAssistant, HOME_ASSISTANT_KEYWORDS),
    (Intent::RecipeAssistant, RECIPE_ASSISTANT_KEYWORDS),
    (Intent::ShoppingCategorizer, SHOPPING_CATEGORIZER_KEYWORDS),
];

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Intent::HomeAssistant => "home_assistant",
            Intent::RecipeAssistant => "recipe_assistant",
            Intent::ShoppingCategorizer => "shopping_categorizer",
            Intent::General => "general",
        };
        f.write_str(name)
    }
}

/// Substring match, not whole words: "chair" contains "air".
pub fn detect_intent(msg: &str) -> Intent {
    let msg_lower = msg.to_lowercase();

    INTENT_PRIORITY
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| msg_lower.contains(*kw)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::General)
}
