/// Export formats for the current link list.
///
/// Every renderer is a pure function of `(links, date)`; the date is passed in
/// so the same input always produces the same bytes.

use std::fmt::Write;

use serde::Serialize;

use crate::link_data::Link;

pub const FILENAME_PREFIX: &str = "links";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Csv,
    Json,
    Markdown,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Text,
        ExportFormat::Csv,
        ExportFormat::Json,
        ExportFormat::Markdown,
    ];

    /// Map a UI selector to a format; unknown selectors are a no-op for the caller
    pub fn from_selector(selector: &str) -> Option<ExportFormat> {
        match selector {
            "txt" => Some(ExportFormat::Text),
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            "md" => Some(ExportFormat::Markdown),
            _ => None,
        }
    }

    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Markdown => "md",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Text => "text/plain",
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
            ExportFormat::Markdown => "text/markdown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Text => "TXT",
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
            ExportFormat::Markdown => "Markdown",
        }
    }
}

/// `links-<date>.<ext>`
pub fn export_filename(format: ExportFormat, date: &str) -> String {
    format!("{}-{}.{}", FILENAME_PREFIX, date, format.ext())
}

pub fn render(format: ExportFormat, links: &[Link], date: &str) -> String {
    match format {
        ExportFormat::Text => render_text(links, date),
        ExportFormat::Csv => render_csv(links),
        ExportFormat::Json => render_json(links, date),
        ExportFormat::Markdown => render_markdown(links, date),
    }
}

fn render_text(links: &[Link], date: &str) -> String {
    let mut out = format!("Links extracted on {}\n\n", date);

    for (index, link) in links.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", index + 1, link.text);
        let _ = writeln!(out, "   URL: {}", link.href);
        let _ = writeln!(out, "   Type: {}\n", link.kind());
    }

    out
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_csv_row(out: &mut String, row: &[&str]) {
    let mut first = true;
    for cell in row {
        if !first {
            out.push(',');
        } else {
            first = false;
        }
        if needs_quotes(cell) {
            let _ = write!(out, "\"{}\"", cell.replace('"', "\"\""));
        } else {
            out.push_str(cell);
        }
    }
    out.push('\n');
}

fn render_csv(links: &[Link]) -> String {
    let mut out = String::new();
    write_csv_row(&mut out, &["text", "href", "type"]);
    for link in links {
        let kind = if link.is_backlink { "backlink" } else { "regular" };
        write_csv_row(&mut out, &[link.text.as_str(), link.href.as_str(), kind]);
    }
    out
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonExport<'a> {
    extracted_on: &'a str,
    count: usize,
    links: &'a [Link],
}

fn render_json(links: &[Link], date: &str) -> String {
    let doc = JsonExport {
        extracted_on: date,
        count: links.len(),
        links,
    };

    match serde_json::to_string_pretty(&doc) {
        Ok(json) => json,
        Err(e) => {
            log::error!("Failed to serialize export: {}", e);
            String::new()
        }
    }
}

fn escape_markdown_label(label: &str) -> String {
    label
        .replace('\\', "\\\\")
        .replace('[', "\\[")
        .replace(']', "\\]")
}

fn escape_markdown_target(href: &str) -> String {
    href.replace(' ', "%20").replace('(', "%28").replace(')', "%29")
}

fn render_markdown(links: &[Link], date: &str) -> String {
    let mut out = format!("# Links extracted on {}\n\n", date);

    for link in links {
        let _ = write!(
            out,
            "- [{}]({})",
            escape_markdown_label(link.label()),
            escape_markdown_target(&link.href)
        );
        if link.is_backlink {
            out.push_str(" _(backlink)_");
        }
        out.push('\n');
    }

    out
}

/// Today's date as `YYYY-MM-DD`, from the browser clock
pub fn today_iso() -> String {
    let iso: String = js_sys::Date::new_0().to_iso_string().into();
    iso.split('T').next().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATE: &str = "2024-10-28";

    fn sample_links() -> Vec<Link> {
        vec![
            Link::new("https://a.com".to_string(), "Home".to_string(), true),
            Link::new("https://b.com/x?a=1,2".to_string(), "Say \"hi\"".to_string(), false),
            Link::new("https://c.com/(draft)".to_string(), String::new(), false),
        ]
    }

    #[test]
    fn test_from_selector() {
        assert_eq!(ExportFormat::from_selector("txt"), Some(ExportFormat::Text));
        assert_eq!(ExportFormat::from_selector("csv"), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::from_selector("json"), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::from_selector("md"), Some(ExportFormat::Markdown));
        assert_eq!(ExportFormat::from_selector("pdf"), None);
        assert_eq!(ExportFormat::from_selector("TXT"), None);
    }

    #[test]
    fn test_selector_matches_extension() {
        for format in ExportFormat::ALL {
            assert_eq!(ExportFormat::from_selector(format.ext()), Some(format));
        }
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename(ExportFormat::Text, DATE), "links-2024-10-28.txt");
        assert_eq!(export_filename(ExportFormat::Markdown, DATE), "links-2024-10-28.md");
    }

    #[test]
    fn test_render_text() {
        let text = render(ExportFormat::Text, &sample_links()[..1], DATE);
        assert_eq!(
            text,
            "Links extracted on 2024-10-28\n\n1. Home\n   URL: https://a.com\n   Type: Backlink\n\n"
        );
    }

    #[test]
    fn test_render_text_numbers_entries() {
        let text = render(ExportFormat::Text, &sample_links(), DATE);
        assert!(text.contains("2. Say \"hi\"\n"));
        assert!(text.contains("3. \n   URL: https://c.com/(draft)\n   Type: Regular link\n"));
    }

    #[test]
    fn test_render_csv_quotes_fields() {
        let csv = render(ExportFormat::Csv, &sample_links(), DATE);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "text,href,type");
        assert_eq!(lines[1], "Home,https://a.com,backlink");
        assert_eq!(lines[2], "\"Say \"\"hi\"\"\",\"https://b.com/x?a=1,2\",regular");
        assert_eq!(lines[3], ",https://c.com/(draft),regular");
    }

    #[test]
    fn test_render_json() {
        let json = render(ExportFormat::Json, &sample_links(), DATE);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["extractedOn"], DATE);
        assert_eq!(value["count"], 3);
        assert_eq!(value["links"][0]["href"], "https://a.com");
        assert_eq!(value["links"][0]["isBacklink"], true);
        assert_eq!(value["links"][2]["text"], "");
    }

    #[test]
    fn test_render_markdown() {
        let md = render(ExportFormat::Markdown, &sample_links(), DATE);

        assert!(md.starts_with("# Links extracted on 2024-10-28\n\n"));
        assert!(md.contains("- [Home](https://a.com) _(backlink)_\n"));
        assert!(md.contains("- [https://c.com/(draft)](https://c.com/%28draft%29)\n"));
    }

    #[test]
    fn test_markdown_escapes_brackets() {
        let links = vec![Link::new("https://a.com".to_string(), "[1] ref".to_string(), false)];
        let md = render(ExportFormat::Markdown, &links, DATE);
        assert!(md.contains("- [\\[1\\] ref](https://a.com)"));
    }

    #[test]
    fn test_renderers_are_deterministic() {
        let links = sample_links();
        for format in ExportFormat::ALL {
            assert_eq!(render(format, &links, DATE), render(format, &links, DATE));
        }
    }

    #[test]
    fn test_only_the_date_changes_between_days() {
        let links = sample_links();
        let first = render(ExportFormat::Text, &links, "2024-10-28");
        let second = render(ExportFormat::Text, &links, "2024-10-29");
        assert_eq!(first.replace("2024-10-28", "DATE"), second.replace("2024-10-29", "DATE"));
    }

    #[test]
    fn test_render_empty_list() {
        assert_eq!(render(ExportFormat::Csv, &[], DATE), "text,href,type\n");
        assert_eq!(render(ExportFormat::Text, &[], DATE), "Links extracted on 2024-10-28\n\n");
    }
}
