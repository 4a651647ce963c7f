//! Noun pairs shown in the picture books

use serde::{Deserialize, Serialize};

/// A noun with its plural label.
///
/// The singular form is also the image stem (`<singular>.png`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Noun {
    pub singular: String,
    pub plural: String,
}

impl Noun {
    pub fn new(singular: &str, plural: &str) -> Self {
        Self {
            singular: singular.into(),
            plural: plural.into(),
        }
    }
}

/// Two nouns contrasted in one trial
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub nouns: [Noun; 2],
}

impl Item {
    pub fn new(a: Noun, b: Noun) -> Self {
        Self { nouns: [a, b] }
    }
}

/// (singular, plural) pairs, two per item
const BUILTIN_ITEMS: &[[(&str, &str); 2]] = &[
    [("apple", "apples"), ("pear", "pears")],
    [("banana", "bananas"), ("orange", "oranges")],
    [("carrot", "carrots"), ("strawberry", "strawberries")],
    [("cake", "cakes"), ("donut", "donuts")],
    [("cookie", "cookies"), ("pretzel", "pretzels")],
    [("cupcake", "cupcakes"), ("popsicle", "popsicles")],
    [("dog", "dogs"), ("cat", "cats")],
    [("horse", "horses"), ("cow", "cows")],
    [("tiger", "tigers"), ("lion", "lions")],
    [("frog", "frogs"), ("turtle", "turtles")],
    [("pig", "pigs"), ("goat", "goats")],
    [("butterfly", "butterflies"), ("bee", "bees")],
    [("chicken", "chickens"), ("duck", "ducks")],
    [("penguin", "penguins"), ("fish", "fish")],
    [("giraffe", "giraffes"), ("elephant", "elephants")],
    [("bear", "bears"), ("sheep", "sheep")],
    [("bird", "birds"), ("monkey", "monkeys")],
    [("hat", "hats"), ("mitten", "mittens")],
    [("shorts", "shorts"), ("shirt", "shirts")],
    [("sock", "socks"), ("shoe", "shoes")],
    [("pencil", "pencils"), ("crayon", "crayons")],
    [("drum", "drums"), ("guitar", "guitars")],
    [("car", "cars"), ("bus", "buses")],
    [("plane", "planes"), ("boat", "boats")],
    [("train", "trains"), ("firetruck", "firetrucks")],
    [("plate", "plates"), ("fork", "forks")],
    [("cup", "cups"), ("spoon", "spoons")],
    [("table", "tables"), ("chair", "chairs")],
    [("house", "houses"), ("barn", "barns")],
    [("tree", "trees"), ("flower", "flowers")],
    [("comb", "combs"), ("toothbrush", "toothbrushes")],
    [("clock", "clocks"), ("lamp", "lamps")],
    [("scissors", "scissors"), ("paintbrush", "paintbrushes")],
    [("present", "presents"), ("party_hat", "party hats")],
    [("purse", "purses"), ("watch", "watches")],
    [("necklace", "necklaces"), ("dress", "dresses")],
];

/// The lab's standard 36 item pairs, unshuffled
pub fn builtin_items() -> Vec<Item> {
    BUILTIN_ITEMS
        .iter()
        .map(|[(s1, p1), (s2, p2)]| Item::new(Noun::new(s1, p1), Noun::new(s2, p2)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_items_cover_a_session() {
        let items = builtin_items();
        assert_eq!(items.len(), 36);
    }

    #[test]
    fn test_builtin_nouns_unique() {
        let items = builtin_items();
        let stems: HashSet<&str> = items
            .iter()
            .flat_map(|i| i.nouns.iter().map(|n| n.singular.as_str()))
            .collect();
        assert_eq!(stems.len(), 72);
    }

    #[test]
    fn test_irregular_plurals_kept() {
        let items = builtin_items();
        let fish = items
            .iter()
            .flat_map(|i| i.nouns.iter())
            .find(|n| n.singular == "fish")
            .unwrap();
        assert_eq!(fish.plural, "fish");
        let hat = items
            .iter()
            .flat_map(|i| i.nouns.iter())
            .find(|n| n.singular == "party_hat")
            .unwrap();
        assert_eq!(hat.plural, "party hats");
    }
}
