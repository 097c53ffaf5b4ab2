use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use include_dir::{Dir, include_dir};

use super::super::AppState;
use crate::core::connectors::ConnectorDescriptor;
use crate::core::error::AppError;

static TEMPLATES: Dir = include_dir!("$CARGO_MANIFEST_DIR/templates");

fn template(name: &str) -> &'static str {
    TEMPLATES
        .get_file(name)
        .and_then(|f| f.contents_utf8())
        .unwrap_or_default()
}

pub(crate) fn page(title: &str, body: &str) -> Html<String> {
    Html(
        template("layout.html")
            .replace("{{title}}", &escape_html(title))
            .replace("{{body}}", body),
    )
}

pub(crate) fn home_page() -> Html<String> {
    page("Chat with your mind", template("index.html"))
}

/// HTML counterpart of the JSON error records, for the form routes.
pub(crate) fn error_page(err: &AppError) -> Response {
    let body = template("error.html").replace("{{message}}", &escape_html(&err.user_message()));
    (err.status(), page("Something went wrong", &body)).into_response()
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// One labelled input per field, in declared order.
pub(crate) fn render_connector_form(connector: &ConnectorDescriptor) -> String {
    let fields: String = connector
        .fields
        .iter()
        .map(|field| {
            let key = escape_html(&field.key);
            format!(
                "  <label for=\"{key}\">{label}</label>\n  <input id=\"{key}\" name=\"{key}\" type=\"{ty}\"{required}{autocomplete}>\n  <small>{help}</small>\n",
                key = key,
                label = escape_html(&field.label),
                ty = field.field_type.input_type(),
                required = if field.required { " required" } else { "" },
                autocomplete = if field.secret { " autocomplete=\"off\"" } else { "" },
                help = escape_html(&field.description),
            )
        })
        .collect();

    template("database.html")
        .replace("{{database_name}}", &escape_html(&connector.name))
        .replace("{{fields}}", &fields)
}

pub async fn index() -> Html<String> {
    home_page()
}

pub async fn llm() -> Html<String> {
    page("Chat with a model", template("llm.html"))
}

pub async fn databases(State(state): State<AppState>) -> Html<String> {
    let items: String = state
        .connectors
        .names()
        .map(|name| {
            let name = escape_html(name);
            format!("  <li><a href=\"/database/{0}\">{0}</a></li>\n", name)
        })
        .collect();
    page(
        "Connect a database",
        &template("databases.html").replace("{{connectors}}", &items),
    )
}

pub async fn database(Path(name): Path<String>, State(state): State<AppState>) -> Response {
    match state.connectors.describe(&name) {
        Ok(connector) => page(&connector.name, &render_connector_form(connector)).into_response(),
        Err(e) => error_page(&e),
    }
}

pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, page("Not found", "<p>Nothing here.</p>")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::connectors::ConnectorRegistry;

    #[test]
    fn every_template_is_embedded() {
        for name in [
            "layout.html",
            "index.html",
            "llm.html",
            "databases.html",
            "database.html",
            "error.html",
        ] {
            assert!(!template(name).is_empty(), "missing template {}", name);
        }
    }

    #[test]
    fn connector_form_lists_fields_in_declared_order() {
        let registry = ConnectorRegistry::load().unwrap();
        let html = render_connector_form(registry.describe("postgresql").unwrap());

        let positions: Vec<usize> = ["user", "password", "database", "host", "port"]
            .iter()
            .map(|key| html.find(&format!("name=\"{}\"", key)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(html.contains("name=\"database_name\" value=\"postgresql\""));
        assert!(html.contains("type=\"password\""));
        assert!(html.contains("type=\"number\""));
    }

    #[test]
    fn html_is_escaped() {
        assert_eq!(
            escape_html("<b>\"a\" & 'b'</b>"),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
    }
}
