//! Script and stylesheet templates.
//!
//! Generated output is opaque text for the page; nothing here interprets it.
//! Values go through `tojson`, so they land in the script as double-quoted
//! string literals with `<`, `>` and `&` escaped. Property names are emitted
//! verbatim.

use minijinja::{context, AutoEscape, Environment};
use once_cell::sync::Lazy;

use super::error::StyleError;
use super::rules::{ButtonStyle, StyleRules};
use super::target::Target;

/// Element expression used in label mode.
pub(crate) const LABEL_ELEMENT: &str = "elements[i]";

/// Element expression used in index mode.
pub(crate) const INDEX_ELEMENT: &str = "elements[buttons[i]]";

/// Selector the global stylesheet targets: every primary button.
pub(crate) const GLOBAL_SELECTOR: &str = "div.stButton > button:first-child";

const MUTATION: &str = r#"
{%- for name, value in style %}
{{ el }}.style.{{ name }} = {{ value|tojson }};
{%- endfor %}
{{ el }}.onmouseleave = function() {
{%- for name, value in style %}
    this.style.{{ name }} = {{ value|tojson }};
{%- endfor %}
};
{%- if hover %}
{{ el }}.onmouseenter = function() {
{%- for name, value in hover %}
    this.style.{{ name }} = {{ value|tojson }};
{%- endfor %}
};
{%- endif %}
{%- if click %}
{{ el }}.onclick = function() {
{%- for name, value in click %}
    this.style.{{ name }} = {{ value|tojson }};
{%- endfor %}
};
{%- endif %}"#;

const LABEL_SCAN: &str = r#"<script>
    var elements = window.parent.document.querySelectorAll('button');
    for (var i = 0; i < elements.length; ++i) {
        if (elements[i].innerText == {{ label|tojson }}) {
            {{ mutation|indent(12) }}
            break;
        }
    }
</script>"#;

const INDEX_SCAN: &str = r#"<script>
    var elements = window.parent.document.querySelectorAll('button');
    const buttons = {{ targets|tojson }};
    for (var i = 0; i < buttons.length; ++i) {
        {{ mutation|indent(8) }}
    }
</script>"#;

const GLOBAL_STYLE: &str = r#"<style>
{{ selector }} {
{%- for name, value in style %}
    {{ name }}: {{ value }};
{%- endfor %}
}
{%- if hover %}
{{ selector }}:hover {
{%- for name, value in hover %}
    {{ name }}: {{ value }};
{%- endfor %}
}
{%- endif %}
{%- if click %}
{{ selector }}:active {
{%- for name, value in click %}
    {{ name }}: {{ value }};
{%- endfor %}
}
{%- endif %}
</style>"#;

/// Shared environment. Output is script and CSS, so auto-escaping is off
/// and quoting is done explicitly with `tojson`.
static ENV: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env
});

fn pairs(rules: &StyleRules) -> Vec<(&str, &str)> {
    rules.iter().collect()
}

fn optional_pairs(rules: Option<&StyleRules>) -> Vec<(&str, &str)> {
    rules.map(pairs).unwrap_or_default()
}

/// Renders the statements that style `element` and wire its handlers.
pub(crate) fn mutation_block(style: &ButtonStyle, element: &str) -> Result<String, StyleError> {
    let rendered = ENV.render_str(
        MUTATION,
        context! {
            el => element,
            style => pairs(style.base()),
            hover => optional_pairs(style.hover_rules()),
            click => optional_pairs(style.click_rules()),
        },
    )?;
    Ok(rendered.trim_start().to_string())
}

/// Renders a script that styles the first button whose text equals `label`.
pub(crate) fn label_script(label: &str, mutation: &str) -> Result<String, StyleError> {
    Ok(ENV.render_str(
        LABEL_SCAN,
        context! { label => label, mutation => mutation },
    )?)
}

/// Renders a script that styles the buttons at the given positions.
pub(crate) fn index_script(targets: &[Target], mutation: &str) -> Result<String, StyleError> {
    Ok(ENV.render_str(
        INDEX_SCAN,
        context! { targets => targets, mutation => mutation },
    )?)
}

/// Renders a `<style>` block for every primary button on the page.
pub(crate) fn global_stylesheet(style: &ButtonStyle) -> Result<String, StyleError> {
    Ok(ENV.render_str(
        GLOBAL_STYLE,
        context! {
            selector => GLOBAL_SELECTOR,
            style => pairs(style.base()),
            hover => optional_pairs(style.hover_rules()),
            click => optional_pairs(style.click_rules()),
        },
    )?)
}
