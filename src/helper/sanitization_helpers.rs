use crate::models::ContactSubmission;
use ammonia::Builder;
use pulldown_cmark::{html, Options, Parser};
use std::collections::HashSet;

/// Renders an article body to HTML, keeping a safe subset of tags and
/// dropping anything scriptable.
pub fn render_markdown(markdown_input: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown_input, options);
    let mut unsafe_html = String::new();
    html::push_html(&mut unsafe_html, parser);

    let safe_tags: HashSet<&str> = [
        "h1", "h2", "h3", "h4", "h5", "h6", "b", "strong", "i", "em", "p", "br",
        "a", "ul", "ol", "li", "blockquote", "code", "pre", "hr", "img", "table",
        "thead", "tbody", "tr", "th", "td", "s", "del", "sup", "input", "div",
    ]
    .into_iter()
    .collect();
    let generic_attributes: HashSet<&str> = [
        "src", "href", "alt", "title", "class", "width", "height", "align", "id",
        "type", "checked", "disabled",
    ]
    .into_iter()
    .collect();

    Builder::new()
        .tags(safe_tags)
        .generic_attributes(generic_attributes)
        .link_rel(Some("noopener noreferrer"))
        .clean(&unsafe_html)
        .to_string()
}

/// Strips every HTML tag from input, including tags smuggled in as entities.
/// The result is escaped text, safe to embed in HTML.
pub fn strip_all_html(input: &str) -> String {
    let decoded = html_escape::decode_html_entities(input);
    Builder::new()
        .tags(HashSet::new())
        .clean(&decoded)
        .to_string()
}

/// Copy of a contact submission with all markup removed, safe to hand to a mailer.
pub fn sanitize_contact(submission: &ContactSubmission) -> ContactSubmission {
    ContactSubmission {
        name: strip_all_html(&submission.name),
        email: submission.email.clone(),
        subject: strip_all_html(&submission.subject),
        reason: submission.reason,
        message: strip_all_html(&submission.message),
        honeypot: submission.honeypot.clone(),
        token: submission.token.clone(),
        user_agent: submission.user_agent.as_deref().map(strip_all_html),
    }
}
