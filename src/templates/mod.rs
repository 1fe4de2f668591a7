//! Built-in index page templates using the Tera template engine
//!
//! Templates are embedded in the binary; no theme directory is needed.

use anyhow::Result;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::helpers;

/// Template renderer with the embedded templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a renderer whose `url_for` filter resolves paths under `root`
    pub fn new(root: &str) -> Result<Self> {
        let mut tera = Tera::default();

        // Paths and the redirect script are emitted verbatim; text fields
        // are escaped in the templates
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("lumen/layout.html")),
            ("index.html", include_str!("lumen/index.html")),
            (
                "partials/sidebar.html",
                include_str!("lumen/partials/sidebar.html"),
            ),
            ("partials/feed.html", include_str!("lumen/partials/feed.html")),
            (
                "partials/pagination.html",
                include_str!("lumen/partials/pagination.html"),
            ),
        ])?;

        let root = root.to_string();
        tera.register_filter(
            "url_for",
            move |value: &tera::Value, _args: &HashMap<String, tera::Value>| {
                let path = tera::try_get_value!("url_for", "value", String, value);
                Ok(tera::Value::String(helpers::url_for(&root, &path)))
            },
        );
        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: reformat an RFC 3339 date with a Moment.js-style format
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "YYYY-MM-DD".to_string(),
    };

    match chrono::DateTime::parse_from_rfc3339(&s) {
        Ok(date) => Ok(tera::Value::String(helpers::format_date(&date, &format))),
        // Not a date; leave it as-is
        Err(_) => Ok(tera::Value::String(s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_format_filter() {
        let mut args = HashMap::new();
        args.insert(
            "format".to_string(),
            tera::Value::String("MMMM YYYY".to_string()),
        );
        let value = tera::Value::String("2024-01-15T10:30:00+09:00".to_string());
        assert_eq!(
            date_format_filter(&value, &args).unwrap(),
            tera::Value::String("January 2024".to_string())
        );

        let value = tera::Value::String("yesterday".to_string());
        assert_eq!(
            date_format_filter(&value, &args).unwrap(),
            tera::Value::String("yesterday".to_string())
        );
    }

    #[test]
    fn test_url_for_filter_uses_root() {
        let renderer = TemplateRenderer::new("/blog/").unwrap();
        let mut tera = renderer.tera;
        tera.add_raw_template("t.html", "{{ path | url_for }}").unwrap();

        let mut context = Context::new();
        context.insert("path", "/page/2");
        assert_eq!(tera.render("t.html", &context).unwrap(), "/blog/page/2");
    }
}
