//! Rendering interpolation data into a selected text.
//!
//! [`Interpolator`] is the seam; [`TemplateInterpolator`] is the bundled
//! implementation for `{{.Field}}` placeholders, [`HtmlInterpolator`] the
//! escaping variant for HTML output.

use crate::options::Data;
use serde_json::Value;

/// Renders a template against interpolation data.
///
/// Implementations must not fail on missing fields: a placeholder with no
/// value renders as empty text.
pub trait Interpolator: Send + Sync {
    fn interpolate(&self, template: &str, data: &Data) -> String;
}

/// `{{.Field}}` interpolation.
///
/// - `{{.Name}}` and `{{ .Name }}` take the `Name` field of the data.
/// - `{{.User.Name}}` walks nested objects.
/// - Strings render verbatim, other scalars in their JSON form, `null` and
///   missing fields as empty text.
/// - Any other `{{...}}` sequence, and an unclosed `{{`, is kept as is.
///
/// Values are inserted raw; use [`HtmlInterpolator`] when the result is
/// embedded in HTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateInterpolator;

impl TemplateInterpolator {
    pub fn new() -> Self {
        TemplateInterpolator
    }
}

impl Interpolator for TemplateInterpolator {
    fn interpolate(&self, template: &str, data: &Data) -> String {
        substitute(template, data, |text, out| out.push_str(text))
    }
}

/// [`TemplateInterpolator`] for HTML output: substituted values are
/// escaped (`&`, `<`, `>`, `"`, `'`), the template text itself is not.
///
/// ```
/// use variant_i18n::{Data, HtmlInterpolator, Interpolator};
///
/// let data = Data::new().with("Name", "<b>Ada</b>");
/// assert_eq!(
///     HtmlInterpolator::new().interpolate("<p>{{.Name}}</p>", &data),
///     "<p>&lt;b&gt;Ada&lt;/b&gt;</p>"
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlInterpolator;

impl HtmlInterpolator {
    pub fn new() -> Self {
        HtmlInterpolator
    }
}

impl Interpolator for HtmlInterpolator {
    fn interpolate(&self, template: &str, data: &Data) -> String {
        substitute(template, data, escape_html)
    }
}

fn substitute(template: &str, data: &Data, write_value: impl Fn(&str, &mut String)) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        result.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            // Unclosed action: emit the remainder untouched
            result.push_str(&rest[open..]);
            return result;
        };

        let action = &after_open[..close];
        match field_path(action) {
            Some(path) => write_value(&render(lookup(data, &path)), &mut result),
            None => {
                result.push_str("{{");
                result.push_str(action);
                result.push_str("}}");
            }
        }
        rest = &after_open[close + 2..];
    }

    result.push_str(rest);
    result
}

fn escape_html(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

/// `".User.Name"` -> `["User", "Name"]`; `None` for anything that is not a
/// plain field reference.
fn field_path(action: &str) -> Option<Vec<&str>> {
    let path = action.trim().strip_prefix('.')?;
    let segments: Vec<&str> = path.split('.').collect();
    let valid = segments.iter().all(|segment| {
        !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_')
    });
    if valid { Some(segments) } else { None }
}

fn lookup<'a>(data: &'a Data, path: &[&str]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    rest.iter()
        .try_fold(data.get(first)?, |value, segment| value.get(segment))
}

fn render(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
