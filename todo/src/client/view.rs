//! Rendering sinks for the client controller.

use crate::client::controller::RowPhase;
use crate::types::{TodoId, TodoItem};
use std::fmt::Write as _;

/// Where the controller draws the list.
///
/// Every redraw replaces the whole list; views keep no item state of their
/// own beyond what they last rendered.
pub trait TodoView {
    /// Draw one row per item, in order
    fn render_items(&mut self, items: &[TodoItem]);

    /// Draw the empty-state placeholder
    fn render_empty(&mut self);

    /// Reset the new-item input field
    fn clear_input(&mut self);

    /// A row moved to another phase of its request cycle
    fn mark_row(&mut self, _id: TodoId, _phase: RowPhase) {}
}

/// Escapes text for use in HTML content and attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// HTML markup for the list and the input field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlView {
    list: String,
    input: String,
}

impl HtmlView {
    /// Creates a view with nothing rendered yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup of the last render
    #[must_use]
    pub fn list_html(&self) -> &str {
        &self.list
    }

    /// Current value of the input field
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Sets the value of the input field
    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    /// Read-only HTML document around the last render
    #[must_use]
    pub fn page(&self, title: &str) -> String {
        let title = escape_html(title);
        format!(
            "<!DOCTYPE html>\n\
             <html lang=\"en\">\n\
             <head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
             <body>\n\
             <h1>{title}</h1>\n\
             {list}\n\
             </body>\n\
             </html>\n",
            list = self.list,
        )
    }
}

impl TodoView for HtmlView {
    fn render_items(&mut self, items: &[TodoItem]) {
        let mut html = String::from("<ul id=\"todolist\">");
        for item in items {
            let class = if item.done { " class=\"done\"" } else { "" };
            // Writing into a String cannot fail
            let _ = write!(
                html,
                "<li data-id=\"{id}\"{class}><span class=\"label\">{label}</span>\
                 <button class=\"delete\" data-id=\"{id}\">Delete</button></li>",
                id = item.id,
                label = escape_html(&item.label),
            );
        }
        html.push_str("</ul>");
        self.list = html;
    }

    fn render_empty(&mut self) {
        self.list = "<p class=\"empty\">No tasks</p>".to_string();
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }
}

/// Plain-text rendering for terminals, one `[x] <id> <label>` line per item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerminalView {
    lines: Vec<String>,
}

impl TerminalView {
    /// Creates a view with nothing rendered yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines of the last render
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Last render as a single newline-separated string
    #[must_use]
    pub fn output(&self) -> String {
        self.lines.join("\n")
    }
}

impl TodoView for TerminalView {
    fn render_items(&mut self, items: &[TodoItem]) {
        self.lines = items
            .iter()
            .map(|item| {
                let mark = if item.done { 'x' } else { ' ' };
                format!("[{mark}] {} {}", item.id, item.label)
            })
            .collect();
    }

    fn render_empty(&mut self) {
        self.lines = vec!["No tasks".to_string()];
    }

    fn clear_input(&mut self) {}
}
