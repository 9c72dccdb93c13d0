use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Produce,
    Dairy,
    Bakery,
    MeatSeafood,
    Pantry,
    Beverages,
    Household,
    Other,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Produce => "Produce",
            Section::Dairy => "Dairy",
            Section::Bakery => "Bakery",
            Section::MeatSeafood => "Meat & Seafood",
            Section::Pantry => "Pantry",
            Section::Beverages => "Beverages",
            Section::Household => "Household",
            Section::Other => "Other",
        };
        f.write_str(name)
    }
}

/// Sections in report order; `Other` always comes last.
const SECTIONS: &[(Section, &[&str])] = &[
    (
        Section::Produce,
        &[
            "apple", "banana", "orange", "lemon", "lime", "grape", "berr", "strawberr", "blueberr", "raspberr", "tomato", "potato",
            "onion", "garlic", "carrot", "lettuce", "spinach", "pepper", "cucumber", "avocado",
            "mushroom", "broccoli", "eggplant", "fruit", "vegetable", "herb",
        ],
    ),
    (Section::Dairy, &["milk", "cheese", "yogurt", "yoghurt", "butter", "cream", "egg"]),
    (Section::Bakery, &["bread", "bagel", "croissant", "bun", "muffin", "tortilla", "cake"]),
    (
        Section::MeatSeafood,
        &[
            "chicken", "beef", "steak", "pork", "bacon", "ham", "sausage", "turkey", "fish", "salmon",
            "tuna", "shrimp", "lamb",
        ],
    ),
    (
        Section::Pantry,
        &[
            "rice", "pasta", "flour", "sugar", "salt", "oil", "vinegar", "cereal", "oat", "bean",
            "sauce", "spice", "honey", "jam", "coffee", "tea", "cookie", "chip", "noodle",
        ],
    ),
    (Section::Beverages, &["juice", "water", "soda", "wine", "beer", "cola", "lemonade"]),
    (
        Section::Household,
        &[
            "soap", "detergent", "paper", "tissue", "shampoo", "toothpaste", "sponge", "bag", "batter",
            "bulb",
        ],
    ),
];

const FILLER_PREFIXES: &[&str] = &[
    "i need to buy", "i need", "i want to buy", "i want", "we need", "please buy", "please get",
    "buy", "get", "add", "some", "a few", "a", "an", "more",
];

const NOISE_WORDS: &[&str] = &["shopping list", "grocery list", "groceries", "grocery", "shopping", "list", "please"];

/// Pull item names out of a free-text shopping message.
pub fn extract_items(message: &str) -> Vec<String> {
    let lowered = message.to_lowercase();
    let body = match lowered.split_once(':') {
        Some((_, rest)) => rest.to_string(),
        None => lowered,
    };

    body.replace(" and ", ",")
        .split([',', ';', '\n'])
        .map(clean_item)
        .filter(|item| !item.is_empty())
        .collect()
}

fn clean_item(raw: &str) -> String {
    let mut item = raw.trim().trim_end_matches(['.', '!', '?']).trim().to_string();

    for noise in NOISE_WORDS {
        item = item.replace(noise, " ");
    }
    item = item.split_whitespace().collect::<Vec<_>>().join(" ");

    // Strip leading filler repeatedly ("i need some milk" -> "milk").
    loop {
        let stripped = FILLER_PREFIXES.iter().find_map(|prefix| {
            item.strip_prefix(prefix)
                .filter(|rest| rest.is_empty() || rest.starts_with(' '))
                .map(|rest| rest.trim().to_string())
        });
        match stripped {
            Some(rest) => item = rest,
            None => break,
        }
    }
    // Cut trailing context like "milk for breakfast".
    if let Some((head, _)) = item.split_once(" for ") {
        item = head.trim().to_string();
    }
    item
}

/// A keyword matches when some word of the item starts with it ("berr" -> "berries").
pub fn section_for(item: &str) -> Section {
    let lowered = item.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect();

    SECTIONS
        .iter()
        .find(|(_, keywords)| {
            keywords
                .iter()
                .any(|kw| words.iter().any(|word| word.starts_with(*kw)))
        })
        .map(|(section, _)| *section)
        .unwrap_or(Section::Other)
}

/// Group items by section, keeping section order fixed and item order stable.
pub fn categorize(items: &[String]) -> Vec<(Section, Vec<String>)> {
    let mut groups: Vec<(Section, Vec<String>)> = SECTIONS
        .iter()
        .map(|(section, _)| (*section, Vec::new()))
        .chain(std::iter::once((Section::Other, Vec::new())))
        .collect();

    for item in items {
        let section = section_for(item);
        if let Some((_, bucket)) = groups.iter_mut().find(|(s, _)| *s == section) {
            bucket.push(item.clone());
        }
    }

    groups.retain(|(_, bucket)| !bucket.is_empty());
    groups
}

pub fn render(groups: &[(Section, Vec<String>)]) -> String {
    if groups.is_empty() {
        return "I couldn't find any items. Try something like: \"shopping list: milk, apples, bread\".".to_string();
    }
    groups
        .iter()
        .map(|(section, items)| format!("{}: {}", section, items.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn categorize_message(message: &str) -> String {
    render(&categorize(&extract_items(message)))
}
