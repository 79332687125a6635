/// Persona sent as the system message for every generation.
pub const GOURMET_CHEF_PERSONA: &str = include_str!("prompts/gourmet-chef.md");

/// Turn the ingredient list into the user prompt for the model.
pub fn ingredients_prompt(ingredients: &[String]) -> String {
    format!("I have these ingredients: {}", ingredients.join(", "))
}
