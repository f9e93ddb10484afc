//! Dashboard module - coin dashboard web interface
//!
//! Provides the single-page shell. Catalog cards and the replacement dialog
//! body are rendered server-side (see `render`); this shell only hosts them.
//!
//! # Architecture
//! - `html.rs`: Page structure, navigation, dialog and toast containers
//! - `css.rs`: Styling with CSS custom properties
//! - `js.rs`: Forwards UI events to the API and patches the DOM

mod css;
mod html;
mod js;

/// Generate the complete dashboard HTML page
pub fn dashboard_html() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Crypto Coins</title>
    <style>
{css}
    </style>
</head>
<body>
{html}
    <script>
{js}
    </script>
</body>
</html>"#,
        css = css::STYLES,
        html = html::TEMPLATE,
        js = js::SCRIPT
    )
}
