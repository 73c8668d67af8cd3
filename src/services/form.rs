//! Minimal HTML form handling for the login flow
//!
//! Finds the first `<form>` on a page, collects the fields a browser would
//! submit, and sends it through a cookie-carrying client.

use std::sync::LazyLock;

use reqwest::blocking::{Client, Response};
use reqwest::{Method, Url};
use scraper::{ElementRef, Html, Selector};

use crate::types::{Result, WeightbotError};

static FORM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("form").expect("valid selector"));
static FIELDS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("input, button, select, textarea").expect("valid selector")
});
static OPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("option").expect("valid selector"));

/// A form ready to submit
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlForm {
    pub action: Url,
    pub method: Method,
    pub fields: Vec<(String, String)>,
}

impl HtmlForm {
    /// Parse the first form of `html`, resolving its action against `page_url`
    pub fn first_in(html: &str, page_url: &Url) -> Result<Self> {
        let document = Html::parse_document(html);
        let form = document
            .select(&FORM)
            .next()
            .ok_or_else(|| WeightbotError::Form(format!("no form found on {}", page_url)))?;

        let action = match form.value().attr("action").map(str::trim) {
            Some(action) if !action.is_empty() => page_url.join(action).map_err(|e| {
                WeightbotError::Form(format!("invalid form action {:?}: {}", action, e))
            })?,
            _ => page_url.clone(),
        };

        let method = match form.value().attr("method") {
            Some(m) if m.eq_ignore_ascii_case("post") => Method::POST,
            _ => Method::GET,
        };

        Ok(Self {
            action,
            method,
            fields: collect_fields(form),
        })
    }

    /// Set a field, replacing an existing value or appending a new one
    pub fn set(&mut self, name: &str, value: &str) {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.fields.push((name.to_string(), value.to_string())),
        }
    }

    pub fn submit(&self, client: &Client) -> Result<Response> {
        let request = if self.method == Method::POST {
            client.post(self.action.clone()).form(&self.fields)
        } else {
            client.get(self.action.clone()).query(&self.fields)
        };
        Ok(request.send()?)
    }
}

/// Collect successful controls in document order.
/// Only the first submit control counts as clicked; it is sent if it has a name.
fn collect_fields(form: ElementRef<'_>) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    let mut clicked = false;

    for el in form.select(&FIELDS) {
        let attrs = el.value();
        if attrs.attr("disabled").is_some() {
            continue;
        }

        let kind = match attrs.name() {
            "input" => attrs.attr("type").unwrap_or("text").to_ascii_lowercase(),
            "button" => attrs.attr("type").unwrap_or("submit").to_ascii_lowercase(),
            other => other.to_string(),
        };
        let is_submit = matches!(
            (attrs.name(), kind.as_str()),
            ("input", "submit" | "image") | ("button", "submit")
        );
        if is_submit && clicked {
            continue;
        }
        clicked |= is_submit;

        let Some(name) = attrs.attr("name").filter(|n| !n.is_empty()) else {
            continue;
        };
        let value = attrs.attr("value").unwrap_or_default();

        if is_submit {
            fields.push((name.to_string(), value.to_string()));
            continue;
        }

        match (attrs.name(), kind.as_str()) {
            ("button", _) | ("input", "button" | "reset" | "file") => {}
            ("input", "checkbox" | "radio") => {
                if attrs.attr("checked").is_some() {
                    let value = attrs.attr("value").unwrap_or("on");
                    fields.push((name.to_string(), value.to_string()));
                }
            }
            ("input", _) => fields.push((name.to_string(), value.to_string())),
            ("textarea", _) => fields.push((name.to_string(), el.text().collect())),
            ("select", _) => {
                let selected = el
                    .select(&OPTION)
                    .find(|o| o.value().attr("selected").is_some())
                    .or_else(|| el.select(&OPTION).next());
                if let Some(option) = selected {
                    let value = option
                        .value()
                        .attr("value")
                        .map(str::to_string)
                        .unwrap_or_else(|| option.text().collect::<String>().trim().to_string());
                    fields.push((name.to_string(), value));
                }
            }
            _ => {}
        }
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("https://weightbot.com/account/login").unwrap()
    }

    fn field<'a>(form: &'a HtmlForm, name: &str) -> Option<&'a str> {
        form.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    // ========== Form discovery ==========

    #[test]
    fn test_no_form() {
        let err = HtmlForm::first_in("<html><body>nothing</body></html>", &page()).unwrap_err();
        assert!(matches!(err, WeightbotError::Form(_)));
    }

    #[test]
    fn test_first_form_wins() {
        let html = r#"
            <form action="/first" method="post"><input name="a" value="1"></form>
            <form action="/second" method="post"><input name="b" value="2"></form>
        "#;
        let form = HtmlForm::first_in(html, &page()).unwrap();
        assert_eq!(form.action.as_str(), "https://weightbot.com/first");
        assert_eq!(field(&form, "a"), Some("1"));
        assert_eq!(field(&form, "b"), None);
    }

    #[test]
    fn test_relative_action_resolved() {
        let html = r#"<form action="session" method="POST"></form>"#;
        let form = HtmlForm::first_in(html, &page()).unwrap();
        assert_eq!(form.action.as_str(), "https://weightbot.com/account/session");
        assert_eq!(form.method, Method::POST);
    }

    #[test]
    fn test_missing_action_uses_page_url() {
        let form = HtmlForm::first_in("<form></form>", &page()).unwrap();
        assert_eq!(form.action, page());
        assert_eq!(form.method, Method::GET);
    }

    // ========== Field collection ==========

    #[test]
    fn test_hidden_and_text_fields() {
        let html = r#"
            <form action="/account/login" method="post">
              <input type="hidden" name="authenticity_token" value="tok123">
              <input type="text" name="email">
              <input type="password" name="password">
              <input type="submit" name="commit" value="Log in">
              <input type="submit" name="other" value="Nope">
            </form>
        "#;
        let form = HtmlForm::first_in(html, &page()).unwrap();
        assert_eq!(
            form.fields,
            vec![
                ("authenticity_token".to_string(), "tok123".to_string()),
                ("email".to_string(), String::new()),
                ("password".to_string(), String::new()),
                ("commit".to_string(), "Log in".to_string()),
            ]
        );
    }

    #[test]
    fn test_checkbox_select_textarea() {
        let html = r#"
            <form>
              <input type="checkbox" name="remember" checked>
              <input type="checkbox" name="newsletter" value="yes">
              <select name="format">
                <option value="html">HTML</option>
                <option value="csv" selected>CSV</option>
              </select>
              <select name="units"><option>kg</option><option>lb</option></select>
              <textarea name="note">hello</textarea>
              <input name="skipped" disabled value="x">
            </form>
        "#;
        let form = HtmlForm::first_in(html, &page()).unwrap();
        assert_eq!(field(&form, "remember"), Some("on"));
        assert_eq!(field(&form, "newsletter"), None);
        assert_eq!(field(&form, "format"), Some("csv"));
        assert_eq!(field(&form, "units"), Some("kg"));
        assert_eq!(field(&form, "note"), Some("hello"));
        assert_eq!(field(&form, "skipped"), None);
    }

    #[test]
    fn test_unnamed_first_submit_blocks_later_buttons() {
        let html = r#"
            <form method="post" action="/export">
              <input type="submit" value="Export">
              <input type="submit" name="cancel" value="Cancel">
              <button type="submit" name="later" value="x">Later</button>
            </form>
        "#;
        let form = HtmlForm::first_in(html, &page()).unwrap();
        assert!(form.fields.is_empty());
    }

    #[test]
    fn test_named_button_submit_is_clicked() {
        let html = r#"
            <form>
              <input type="hidden" name="format" value="csv">
              <button name="go" value="export">Export</button>
              <button type="button" name="help" value="1">Help</button>
            </form>
        "#;
        let form = HtmlForm::first_in(html, &page()).unwrap();
        assert_eq!(
            form.fields,
            vec![
                ("format".to_string(), "csv".to_string()),
                ("go".to_string(), "export".to_string()),
            ]
        );
    }

    #[test]
    fn test_set_replaces_and_appends() {
        let html = r#"<form><input name="email" value="old"></form>"#;
        let mut form = HtmlForm::first_in(html, &page()).unwrap();
        form.set("email", "me@example.com");
        form.set("password", "secret");
        assert_eq!(
            form.fields,
            vec![
                ("email".to_string(), "me@example.com".to_string()),
                ("password".to_string(), "secret".to_string()),
            ]
        );
    }
}
