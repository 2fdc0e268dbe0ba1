//! Server-rendered home page.

use std::fmt::Write;

use crate::model::Todo;

/// Escapes text for inclusion in HTML element content and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_item(out: &mut String, todo: &Todo) {
    let class = if todo.completed { "todo done" } else { "todo" };
    let _ = write!(
        out,
        r#"      <li class="{class}" id="todo-{id}">
        <span class="text">{text}</span>
        <span class="created">{created}</span>
"#,
        class = class,
        id = todo.id,
        text = escape_html(&todo.text),
        created = escape_html(&todo.created_at),
    );
    if !todo.completed {
        let _ = writeln!(
            out,
            r#"        <a href="/complete/{id}">Complete</a>"#,
            id = todo.id
        );
    }
    let _ = write!(
        out,
        r#"        <a href="/delete/{id}">Delete</a>
      </li>
"#,
        id = todo.id
    );
}

pub fn render_index(todos: &[Todo]) -> String {
    let remaining = todos.iter().filter(|t| !t.completed).count();

    let mut items = String::new();
    if todos.is_empty() {
        items.push_str("      <li class=\"empty\">No todos yet.</li>\n");
    }
    for todo in todos {
        render_item(&mut items, todo);
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>DevOps Todo App</title>
    <style>
      body {{ font-family: sans-serif; max-width: 40rem; margin: 2rem auto; }}
      .done .text {{ text-decoration: line-through; color: #888; }}
      .created {{ font-size: 0.8em; color: #666; margin: 0 0.5rem; }}
    </style>
  </head>
  <body>
    <h1>DevOps Todo App</h1>
    <form action="/add" method="post">
      <input type="text" name="todo" placeholder="What needs doing?" required>
      <button type="submit">Add</button>
    </form>
    <p class="summary">{remaining} of {total} remaining</p>
    <ul>
{items}    </ul>
  </body>
</html>
"#,
        remaining = remaining,
        total = todos.len(),
        items = items,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: i64, text: &str, completed: bool) -> Todo {
        Todo {
            id,
            text: text.to_string(),
            completed,
            created_at: "2024-05-01 09:30:00".to_string(),
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;/b&gt;"
        );
    }

    #[test]
    fn empty_page_says_so() {
        let html = render_index(&[]);
        assert!(html.contains("No todos yet."));
        assert!(html.contains("0 of 0 remaining"));
        assert!(html.contains(r#"action="/add""#));
    }

    #[test]
    fn completed_items_have_no_complete_link() {
        let html = render_index(&[todo(1, "open", false), todo(2, "closed", true)]);
        assert!(html.contains(r#"href="/complete/1""#));
        assert!(!html.contains(r#"href="/complete/2""#));
        assert!(html.contains(r#"href="/delete/2""#));
        assert!(html.contains(r#"class="todo done" id="todo-2""#));
        assert!(html.contains("1 of 2 remaining"));
    }

    #[test]
    fn user_text_is_escaped() {
        let html = render_index(&[todo(1, "<script>alert(1)</script>", false)]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
