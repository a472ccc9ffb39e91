//! Screen model for the client.
//!
//! Instruction text comes from the upstream provider and is markup. It is
//! never rendered raw: [`sanitize_instructions`] keeps a small set of
//! formatting tags, strips every attribute, drops `script`/`style` content,
//! and escapes all text.

use html_escape::encode_text;
use scraper::{ElementRef, Html};
use std::fmt;

use super::view::View;
use super::ClientState;
use crate::model::Recipe;

pub const APP_TITLE: &str = "Cook Today!";
pub const OPTIONS_TITLE: &str = "What Are We Cooking Today?";
pub const LOADING_MESSAGE: &str = "Loading recipe...";
pub const EMPTY_MESSAGE: &str = "No recipe could be loaded.";
pub const NO_INGREDIENTS: &str = "No ingredients listed.";
pub const DEFAULT_IMAGE: &str = "/images/default-recipe.jpg";
pub const ATTRIBUTION: &str = "Data obtained from Spoonacular API.";

const ALLOWED_TAGS: &[&str] = &["p", "br", "ol", "ul", "li", "b", "i", "strong", "em"];
const DROPPED_TAGS: &[&str] = &["script", "style", "iframe", "object", "template"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Landing,
    Options,
    Loading,
    Error(String),
    Empty,
    Recipe(RecipeCard),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeCard {
    pub title: String,
    pub image: String,
    pub image_alt: String,
    pub ingredients: Vec<String>,
    /// Sanitized markup, safe to insert into a page
    pub instructions_html: String,
}

impl RecipeCard {
    fn from_recipe(recipe: &Recipe) -> Self {
        let (image, image_alt) = match recipe.image.as_deref().filter(|url| !url.is_empty()) {
            Some(url) => (url.to_string(), recipe.name.clone()),
            None => (DEFAULT_IMAGE.to_string(), "Default recipe image".to_string()),
        };

        let ingredients = if recipe.ingredients.is_empty() {
            vec![NO_INGREDIENTS.to_string()]
        } else {
            recipe.ingredients.clone()
        };

        RecipeCard {
            title: recipe.name.clone(),
            image,
            image_alt,
            ingredients,
            instructions_html: sanitize_instructions(&recipe.instructions),
        }
    }
}

/// Decide what to show for `view` given the fetch state
pub fn render(view: View, state: &ClientState) -> Screen {
    match view {
        View::Landing => Screen::Landing,
        View::Options => Screen::Options,
        View::DisplayRecipe => {
            if state.loading {
                Screen::Loading
            } else if let Some(error) = &state.error {
                Screen::Error(error.clone())
            } else if let Some(recipe) = &state.recipe {
                Screen::Recipe(RecipeCard::from_recipe(recipe))
            } else {
                Screen::Empty
            }
        }
    }
}

/// Rebuild `html` keeping only allow-listed tags, without attributes
pub fn sanitize_instructions(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut out = String::with_capacity(html.len());
    write_sanitized(fragment.root_element(), &mut out);
    out
}

fn write_sanitized(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(&encode_text(&**text));
            continue;
        }

        let Some(child) = ElementRef::wrap(child) else {
            continue;
        };
        let name = child.value().name();

        if DROPPED_TAGS.contains(&name) {
            continue;
        }
        if name == "br" {
            out.push_str("<br>");
        } else if ALLOWED_TAGS.contains(&name) {
            out.push_str(&format!("<{}>", name));
            write_sanitized(child, out);
            out.push_str(&format!("</{}>", name));
        } else {
            write_sanitized(child, out);
        }
    }
}

/// Plain text of the instructions, one block per line, for terminals
pub fn instructions_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut lines = Vec::new();
    collect_text(fragment.root_element(), &mut lines);
    lines
        .iter()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_text(element: ElementRef<'_>, lines: &mut Vec<String>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            match lines.last_mut() {
                Some(line) => line.push_str(text),
                None => lines.push(String::from(&**text)),
            }
            continue;
        }
        let Some(child) = ElementRef::wrap(child) else {
            continue;
        };
        let name = child.value().name();
        if DROPPED_TAGS.contains(&name) {
            continue;
        }
        let block = matches!(name, "p" | "li" | "br" | "ol" | "ul" | "div");
        if block {
            lines.push(String::new());
        }
        collect_text(child, lines);
        if block {
            lines.push(String::new());
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Landing => writeln!(f, "{}", APP_TITLE),
            Screen::Options => writeln!(f, "{}", OPTIONS_TITLE),
            Screen::Loading => writeln!(f, "{}", LOADING_MESSAGE),
            Screen::Error(message) => writeln!(f, "Error: {}", message),
            Screen::Empty => writeln!(f, "{}", EMPTY_MESSAGE),
            Screen::Recipe(card) => {
                writeln!(f, "{}", card.title)?;
                writeln!(f, "Image: {}", card.image)?;
                writeln!(f)?;
                writeln!(f, "Ingredients:")?;
                for ingredient in &card.ingredients {
                    writeln!(f, "  - {}", ingredient)?;
                }
                writeln!(f)?;
                writeln!(f, "Instructions:")?;
                writeln!(f, "{}", instructions_text(&card.instructions_html))?;
                writeln!(f)?;
                writeln!(f, "{}", ATTRIBUTION)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RecipeId, DEFAULT_INSTRUCTIONS};

    fn recipe() -> Recipe {
        Recipe {
            id: RecipeId::Number(1),
            name: "Tomato Soup".to_string(),
            image: Some("https://example.com/soup.jpg".to_string()),
            instructions: "<ol><li>Chop.</li><li>Simmer.</li></ol>".to_string(),
            ingredients: vec!["4 tomatoes".to_string()],
        }
    }

    fn state(recipe: Option<Recipe>, loading: bool, error: Option<&str>) -> ClientState {
        ClientState {
            recipe,
            loading,
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn test_loading_wins_over_everything() {
        let screen = render(
            View::DisplayRecipe,
            &state(Some(recipe()), true, Some("boom")),
        );
        assert_eq!(screen, Screen::Loading);
    }

    #[test]
    fn test_error_before_recipe() {
        let screen = render(View::DisplayRecipe, &state(Some(recipe()), false, Some("boom")));
        assert_eq!(screen, Screen::Error("boom".to_string()));
        assert_eq!(screen.to_string(), "Error: boom\n");
    }

    #[test]
    fn test_empty_state() {
        let screen = render(View::DisplayRecipe, &state(None, false, None));
        assert_eq!(screen, Screen::Empty);
    }

    #[test]
    fn test_other_views_ignore_fetch_state() {
        let busy = state(None, true, None);
        assert_eq!(render(View::Landing, &busy), Screen::Landing);
        assert_eq!(render(View::Options, &busy), Screen::Options);
    }

    #[test]
    fn test_recipe_card() {
        let Screen::Recipe(card) = render(View::DisplayRecipe, &state(Some(recipe()), false, None))
        else {
            panic!("Expected recipe screen");
        };
        assert_eq!(card.title, "Tomato Soup");
        assert_eq!(card.image, "https://example.com/soup.jpg");
        assert_eq!(card.image_alt, "Tomato Soup");
        assert_eq!(card.ingredients, vec!["4 tomatoes"]);
        assert_eq!(
            card.instructions_html,
            "<ol><li>Chop.</li><li>Simmer.</li></ol>"
        );
    }

    #[test]
    fn test_recipe_card_fallbacks() {
        let bare = Recipe {
            image: None,
            ingredients: vec![],
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            ..recipe()
        };
        let Screen::Recipe(card) = render(View::DisplayRecipe, &state(Some(bare), false, None))
        else {
            panic!("Expected recipe screen");
        };
        assert_eq!(card.image, DEFAULT_IMAGE);
        assert_eq!(card.ingredients, vec![NO_INGREDIENTS]);
        assert_eq!(card.instructions_html, DEFAULT_INSTRUCTIONS);
    }

    #[test]
    fn test_sanitizer_removes_scripts_and_attributes() {
        let html = r#"<p onclick="steal()">Mix <b class="x">well</b>.</p><script>alert(1)</script><img src=x onerror="alert(2)">"#;
        assert_eq!(sanitize_instructions(html), "<p>Mix <b>well</b>.</p>");
    }

    #[test]
    fn test_sanitizer_unwraps_unknown_tags_and_escapes_text() {
        let html = r#"<div><a href="javascript:x()">Heat</a> to 180 &lt;C&gt;</div>"#;
        assert_eq!(sanitize_instructions(html), "Heat to 180 &lt;C&gt;");
    }

    #[test]
    fn test_sanitizer_keeps_plain_text() {
        assert_eq!(
            sanitize_instructions("Stir & serve"),
            "Stir &amp; serve"
        );
    }

    #[test]
    fn test_instructions_text_splits_blocks() {
        let text = instructions_text("<ol><li>Chop.</li><li>Simmer   gently.</li></ol>");
        assert_eq!(text, "Chop.\nSimmer gently.");
    }

    #[test]
    fn test_recipe_screen_display() {
        let screen = render(View::DisplayRecipe, &state(Some(recipe()), false, None));
        let text = screen.to_string();
        assert!(text.starts_with("Tomato Soup\n"));
        assert!(text.contains("  - 4 tomatoes"));
        assert!(text.contains("Chop.\nSimmer."));
        assert!(text.ends_with("Data obtained from Spoonacular API.\n"));
    }
}
