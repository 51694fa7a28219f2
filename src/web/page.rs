//! HTML rendering for the counter form.

use serde::Serialize;
use tera::{Context, Tera};

/// Word shown in the form on first load.
pub const DEFAULT_WORD: &str = "Strawberry";

/// Letter shown in the form on first load.
pub const DEFAULT_LETTER: &str = "r";

const TEMPLATE_NAME: &str = "index.html";
const TEMPLATE: &str = include_str!("templates/index.html");

/// Feedback shown above the form after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success(String),
    Warning(String),
    Error(String),
}

impl Banner {
    fn class(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::Warning(_) => "warning",
            Self::Error(_) => "error",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Success(m) | Self::Warning(m) | Self::Error(m) => m,
        }
    }
}

#[derive(Serialize)]
struct BannerView<'a> {
    class: &'static str,
    message: &'a str,
}

/// Render the whole page with the given field values.
///
/// The template is registered under an `.html` name, so tera escapes every
/// value it interpolates.
pub fn render(word: &str, letter: &str, banner: Option<&Banner>) -> tera::Result<String> {
    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)?;

    let mut ctx = Context::new();
    ctx.insert("word", word);
    ctx.insert("letter", letter);
    ctx.insert(
        "banner",
        &banner.map(|b| BannerView {
            class: b.class(),
            message: b.message(),
        }),
    );

    tera.render(TEMPLATE_NAME, &ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_defaults() {
        let html = render(DEFAULT_WORD, DEFAULT_LETTER, None).unwrap();
        assert!(html.contains(r#"name="word" value="Strawberry""#));
        assert!(html.contains(r#"name="letter" value="r""#));
        assert!(!html.contains("class=\"banner"));
    }

    #[test]
    fn test_render_field_values_are_escaped() {
        let html = render(r#""><b a="1">Tom & Jerry"#, "<", None).unwrap();
        assert!(html.contains("&quot;&gt;&lt;b a=&quot;1&quot;&gt;Tom &amp; Jerry"));
        assert!(html.contains(r#"name="letter" value="&lt;""#));
        assert!(!html.contains("<b a="));
    }

    #[test]
    fn test_render_banner_is_escaped() {
        let banner = Banner::Error("<script>".to_string());
        let html = render("x", "y", Some(&banner)).unwrap();
        assert!(html.contains(r#"class="banner error""#));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
