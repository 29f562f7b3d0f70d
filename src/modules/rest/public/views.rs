// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::LazyLock;

use handlebars::{Handlebars, TemplateError};
use serde::Serialize;
use serde_json::json;

use crate::modules::error::{code::ErrorCode, ContactMailerResult};
use crate::raise_error;

const LAYOUT: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{title}} - Email Submission Form</title>
</head>
<body>
<nav><a href="/">Contact</a> | <a href="/privacy">Privacy</a></nav>
<main>
{{{content}}}
</main>
</body>
</html>
"#;

const FORM: &str = r#"<h1>Contact us</h1>
{{#if failure}}
<div class="alert" role="alert">Sorry, your message could not be sent. Please try again later.</div>
{{/if}}
{{#if errors}}
<ul class="errors">
{{#each errors}}
<li>{{this}}</li>
{{/each}}
</ul>
{{/if}}
<form method="post" action="/" enctype="multipart/form-data">
<label for="name">Name</label>
<input id="name" name="name" type="text" minlength="3" maxlength="128" required value="{{name}}">
<label for="email">Email</label>
<input id="email" name="email" type="email" minlength="3" maxlength="256" required value="{{email}}">
<label for="message">Message</label>
<textarea id="message" name="message" minlength="3" maxlength="2048" required>{{message}}</textarea>
<label for="attachments">Images (GIF or JPEG)</label>
<input id="attachments" name="attachments" type="file" accept=".gif,.jpg,.jpeg,image/gif,image/jpeg" multiple>
<button type="submit">Send</button>
</form>
"#;

const SUCCESS: &str = r#"<h1>Thank you</h1>
<p>Your message has been sent. We will get back to you soon.</p>
<p><a href="/">Send another message</a></p>
"#;

const PRIVACY: &str = r#"<h1>Privacy</h1>
<p>The details you enter in the contact form, and any images you attach, are
forwarded by email to the site owner and used only to answer your message.</p>
<p>Uploaded images are held on the server only while the email is being sent
and are deleted immediately afterwards.</p>
"#;

static VIEWS: LazyLock<Result<Handlebars<'static>, TemplateError>> = LazyLock::new(|| {
    let mut handlebars = Handlebars::new();
    handlebars.register_template_string("layout", LAYOUT)?;
    handlebars.register_template_string("form", FORM)?;
    handlebars.register_template_string("success", SUCCESS)?;
    handlebars.register_template_string("privacy", PRIVACY)?;
    Ok(handlebars)
});

/// Contents of the contact form, echoed back when it has to be shown again.
#[derive(Debug, Default, Clone, Serialize)]
pub struct FormView {
    pub name: String,
    pub email: String,
    pub message: String,
    pub errors: Vec<String>,
    pub failure: bool,
}

/// Renders `template` inside the shared layout. Values are HTML escaped.
pub fn render_page<T: Serialize>(title: &str, template: &str, data: &T) -> ContactMailerResult<String> {
    let views = VIEWS.as_ref().map_err(|e| {
        raise_error!(
            format!("Failed to load page templates: {}", e),
            ErrorCode::InternalError
        )
    })?;
    let render_error = |e: handlebars::RenderError| {
        raise_error!(
            format!("Failed to render '{}': {}", template, e),
            ErrorCode::InternalError
        )
    };
    let content = views.render(template, data).map_err(render_error)?;
    views
        .render("layout", &json!({ "title": title, "content": content }))
        .map_err(render_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_pages_render() {
        let success = render_page("Thank you", "success", &json!({})).unwrap();
        assert!(success.contains("<title>Thank you - Email Submission Form</title>"));
        assert!(success.contains("Your message has been sent."));

        let privacy = render_page("Privacy", "privacy", &json!({})).unwrap();
        assert!(privacy.contains("<h1>Privacy</h1>"));
    }

    #[test]
    fn test_form_escapes_submitted_values() {
        let view = FormView {
            name: "<script>alert(1)</script>".into(),
            email: "a\"b@example.com".into(),
            message: "x & y".into(),
            errors: vec!["The name field is required.".into()],
            failure: true,
        };
        let page = render_page("Contact", "form", &view).unwrap();
        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;"));
        assert!(page.contains("x &amp; y"));
        assert!(page.contains("<li>The name field is required.</li>"));
        assert!(page.contains("could not be sent"));
    }

    #[test]
    fn test_empty_form() {
        let page = render_page("Contact", "form", &FormView::default()).unwrap();
        assert!(page.contains("enctype=\"multipart/form-data\""));
        assert!(!page.contains("class=\"alert\""));
        assert!(!page.contains("class=\"errors\""));
    }
}
