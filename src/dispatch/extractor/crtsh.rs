use scraper::{ElementRef, Html};
use serde::Serialize;

use super::{element_text, selector, to_field, Fields};

const MAX_CERTIFICATES: usize = 10;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Certificate {
    id: String,
    logged_at: String,
    not_before: String,
    common_name: String,
}

pub fn extract(doc: &Html) -> Fields {
    let mut out = Fields::new();
    out.insert("certificates".into(), to_field(&certificates(doc)));
    out
}

fn certificates(doc: &Html) -> Vec<Certificate> {
    let (Some(row), Some(cell)) = (selector("table tr"), selector("td")) else { return Vec::new() };
    doc.select(&row)
        // first row is the column header
        .skip(1)
        .filter_map(|tr| {
            let cols: Vec<ElementRef<'_>> = tr.select(&cell).collect();
            if cols.is_empty() { return None; }
            let col = |i: usize| cols.get(i).map(|c| element_text(*c)).unwrap_or_default();
            // column 3 is "Not After"
            Some(Certificate { id: col(0), logged_at: col(1), not_before: col(2), common_name: col(4) })
        })
        .take(MAX_CERTIFICATES)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: usize) -> String {
        let mut html = String::from(
            "<html><body><table><tr><th>crt.sh ID</th><th>Logged At</th><th>Not Before</th><th>Not After</th><th>Common Name</th></tr>",
        );
        for i in 0..rows {
            html.push_str(&format!(
                "<tr><td> {i} </td><td>2024-01-0{d}</td><td>2024-01-0{d}</td><td>2025-01-01</td><td>host{i}.example.com</td></tr>",
                d = i % 9 + 1
            ));
        }
        html.push_str("</table></body></html>");
        html
    }

    #[test]
    fn caps_at_ten_and_skips_header() {
        let doc = Html::parse_document(&table(15));
        let certs = certificates(&doc);
        assert_eq!(certs.len(), 10);
        assert_eq!(certs[0].id, "0");
        assert_eq!(certs[0].common_name, "host0.example.com");
        assert!(certs.iter().all(|c| c.id != "crt.sh ID" && c.common_name != "Common Name"));

        let fields = extract(&doc);
        let list = fields["certificates"].as_array().unwrap();
        assert_eq!(list.len(), 10);
        assert_eq!(list[3]["loggedAt"], "2024-01-04");
        assert!(!fields["certificates"].to_string().contains("Logged At"));
    }

    #[test]
    fn short_rows_fill_missing_columns_with_empty() {
        let html = "<table><tr><th>h</th></tr><tr><td>7</td><td>2024-02-02</td></tr></table>";
        let certs = certificates(&Html::parse_document(html));
        assert_eq!(certs.len(), 1);
        assert_eq!(certs[0].id, "7");
        assert_eq!(certs[0].not_before, "");
        assert_eq!(certs[0].common_name, "");
    }
}
