//! Static recipe, ingredient and equipment data.

use super::state::{Equipment, Ingredient, Recipe};

/// (id, name, swatch colour). Tomato has no artwork, only the swatch.
const INGREDIENTS: &[(&str, &str, &str)] = &[
    ("rice", "Rice", "#EFEFEF"),
    ("egg", "Egg", "#FFF6C2"),
    ("bacon", "Bacon", "#FF9B87"),
    ("ham", "Ham", "#FF7A7A"),
    ("garlic", "Garlic", "#F5F5DC"),
    ("oil", "Oil", "#FFFACD"),
    ("pepper", "Pepper", "#444444"),
    ("tomato", "Tomato", "#FF6347"),
];

/// All pantry ingredients in shelf order.
pub fn ingredients() -> Vec<Ingredient> {
    INGREDIENTS
        .iter()
        .map(|&(id, name, color)| Ingredient {
            id: id.into(),
            name: name.into(),
            image: if id == "tomato" {
                String::new()
            } else {
                format!("/images/ingredients/{id}.png")
            },
            color: Some(color.into()),
            position: None,
        })
        .collect()
}

/// Catalog entry for `id`, if it exists.
pub fn ingredient(id: &str) -> Option<Ingredient> {
    ingredients().into_iter().find(|i| i.id == id)
}

/// Catalog entry for `id`, or a bare entry named after the id.
pub fn ingredient_or_placeholder(id: &str) -> Ingredient {
    ingredient(id).unwrap_or_else(|| {
        let mut chars = id.chars();
        let name = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        Ingredient {
            id: id.into(),
            name,
            image: format!("/images/ingredients/{id}.png"),
            color: None,
            position: None,
        }
    })
}

fn recipe(
    id: &str,
    name: &str,
    image: &str,
    unlocked: bool,
    ingredients: &[&str],
    steps: &[&str],
    price: u64,
) -> Recipe {
    Recipe {
        id: id.into(),
        name: name.into(),
        image: format!("/images/recipes/{image}.png"),
        description: None,
        unlocked,
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        steps: steps.iter().map(|s| s.to_string()).collect(),
        cooking_time: 10,
        price,
    }
}

/// The recipe book. Order decides which locked recipe unlocks next.
pub fn recipes() -> Vec<Recipe> {
    vec![
        recipe(
            "yangChow",
            "Yang Chow",
            "yangchow",
            true,
            &["rice", "egg", "garlic", "ham"],
            &[
                "Heat oil in the pan",
                "Add garlic and stir until golden brown",
                "Add rice and mix well",
                "Add the ham and mix",
                "Add the beaten egg and mix well",
                "Serve hot",
            ],
            50,
        ),
        recipe(
            "baconSilog",
            "Bacon Silog",
            "baconsilog",
            true,
            &["rice", "egg", "bacon"],
            &[
                "Cook rice in the pan",
                "Fry bacon until crispy",
                "Fry egg sunny side up",
                "Serve together on a plate",
            ],
            45,
        ),
        recipe(
            "hamSilog",
            "Ham Silog",
            "hamsilog",
            false,
            &["rice", "egg", "ham", "garlic"],
            &[
                "Cook rice in the pan",
                "Fry ham until slightly crispy",
                "Add minced garlic for flavor",
                "Fry egg sunny side up",
                "Serve together on a plate",
            ],
            40,
        ),
        recipe(
            "burgerSilog",
            "Burger Silog",
            "burgersilog",
            false,
            &["rice", "egg", "bacon", "pepper"],
            &[
                "Cook rice in the pan",
                "Shape bacon into a patty",
                "Season with pepper",
                "Fry the patty until well-done",
                "Fry egg sunny side up",
                "Serve together on a plate",
            ],
            55,
        ),
    ]
}

/// Stove upgrades, cheapest first.
pub fn equipment() -> Vec<Equipment> {
    [
        ("basicStove", "Basic Stove", "basic_stove", 1, 0, true, 0),
        ("betterStove", "Better Stove", "better_stove", 2, 10, false, 300),
        ("advancedStove", "Advanced Stove", "advanced_stove", 3, 25, false, 800),
        ("proStove", "Professional Stove", "pro_stove", 4, 50, false, 2000),
    ]
    .into_iter()
    .map(|(id, name, image, level, speed_boost, unlocked, price)| Equipment {
        id: id.into(),
        name: name.into(),
        image: format!("/images/equipment/{image}.png"),
        level,
        speed_boost,
        unlocked,
        price,
    })
    .collect()
}
