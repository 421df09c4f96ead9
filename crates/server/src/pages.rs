//! Static HTML views and the page script.
//!
//! Templates are compiled into the binary. Only the entry form has dynamic
//! content: one input row per analyte in the reference catalog.

use panel_data::{ReferenceCatalog, ReferenceRanges, TestDefinition};

pub const INDEX_HTML: &str = include_str!("../templates/index.html");
pub const RESULTS_HTML: &str = include_str!("../templates/results.html");
pub const APP_JS: &str = include_str!("../templates/app.js");

const ENTER_REPORT_HTML: &str = include_str!("../templates/enter_report.html");
const ROWS_PLACEHOLDER: &str = "{{TEST_ROWS}}";

/// The entry form with a row for every catalogued analyte.
pub fn render_enter_report(catalog: &ReferenceCatalog) -> String {
    let rows: String = catalog.tests().map(test_row).collect();
    ENTER_REPORT_HTML.replace(ROWS_PLACEHOLDER, &rows)
}

fn test_row(test: &TestDefinition) -> String {
    let code = escape_html(test.code);
    // Gendered rows carry both ranges; the script swaps them on gender change.
    let range_cell = match test.ranges {
        ReferenceRanges::Default(bounds) => {
            format!(r#"<td class="normal-range">{}</td>"#, bounds)
        }
        ReferenceRanges::ByGender { male, female } => format!(
            r#"<td class="normal-range" data-male-range="{male}" data-female-range="{female}">{male}</td>"#
        ),
    };

    format!(
        r#"<tr><td><label for="test-{code}">{name}</label></td><td><input type="number" step="any" min="0" id="test-{code}" name="{code}"></td><td>{units}</td>{range_cell}</tr>
"#,
        name = escape_html(test.name),
        units = escape_html(test.units),
    )
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("x10^3/µL"), "x10^3/µL");
        assert_eq!(escape_html("<a & \"b\">"), "&lt;a &amp; &quot;b&quot;&gt;");
    }

    #[test]
    fn test_enter_report_has_row_per_test() {
        let catalog = ReferenceCatalog::standard();
        let html = render_enter_report(catalog);

        assert!(!html.contains(ROWS_PLACEHOLDER));
        assert_eq!(html.matches("<tr><td><label").count(), catalog.counts().0);
        assert!(html.contains(r#"name="NEU%""#));
    }

    #[test]
    fn test_one_row_per_line() {
        let catalog = ReferenceCatalog::standard();
        let html = render_enter_report(catalog);
        let rows: Vec<_> = html.lines().filter(|l| l.starts_with("<tr><td><label")).collect();
        assert_eq!(rows.len(), catalog.counts().0);
        assert!(rows.iter().all(|l| l.ends_with("</tr>")));
        assert!(rows[8].contains(r#"<td class="normal-range">4.0-11.0</td>"#));
    }

    #[test]
    fn test_gendered_rows_carry_both_ranges() {
        let html = render_enter_report(ReferenceCatalog::standard());
        assert!(html.contains(r#"data-male-range="13.5-17.5""#));
        assert!(html.contains(r#"data-female-range="12.0-15.5""#));
    }
}
