use leptos::prelude::*;

/// Round avatar; falls back to initials when there is no image URL.
#[component]
pub fn Avatar(
    /// Image URL, if the person has one
    #[prop(into)]
    src: Option<String>,
    /// Used for the alt text and the initials
    #[prop(into)]
    name: String,
    #[prop(default = "w-9 h-9")]
    size: &'static str,
) -> impl IntoView {
    match src.filter(|s| !s.trim().is_empty()) {
        Some(src) => view! {
            <img src=src alt=name class=format!("{size} rounded-full object-cover") />
        }
        .into_any(),
        None => view! {
            <span class=format!(
                "{size} rounded-full bg-indigo-100 text-indigo-700 flex items-center justify-center text-xs font-semibold"
            )>
                {initials(&name)}
            </span>
        }
        .into_any(),
    }
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::initials;

    #[test]
    fn test_initials() {
        assert_eq!(initials("Jay Student"), "JS");
        assert_eq!(initials("  ada  "), "A");
        assert_eq!(initials(""), "");
    }
}
