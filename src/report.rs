use anyhow::Result;

use crate::models::{KeywordOutcome, RankReport};

pub fn render_text(report: &RankReport) -> String {
    let mut out = format!(
        "Title: {}\nID: {}\n\n",
        report.product.title, report.product.id
    );

    if report.keywords.is_empty() {
        out.push_str("No usable keywords in the title, nothing to check.\n");
        return out;
    }

    out.push_str(&format!("Keywords: {}\n\n", report.keywords.join(", ")));
    for line in &report.outcomes {
        out.push_str(&render_line(line, report.page_limit));
        out.push('\n');
    }
    if report.truncated {
        let skipped = &report.keywords[report.outcomes.len()..];
        out.push_str(&format!("Time limit reached, not checked: {}\n", skipped.join(", ")));
    }
    out
}

pub fn render_line(line: &KeywordOutcome, page_limit: u32) -> String {
    let o = &line.outcome;
    match (o.page, o.position) {
        (Some(page), Some(position)) if o.found => format!(
            "«{}»: page {}, position {} (checked: {})",
            line.keyword, page, position, o.items_checked
        ),
        _ => format!(
            "«{}»: not found in first {} pages (checked: {})",
            line.keyword, page_limit, o.items_checked
        ),
    }
}

pub fn render_json(report: &RankReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProductInfo, ScanOutcome};

    fn report(keywords: &[&str], outcomes: Vec<KeywordOutcome>, truncated: bool) -> RankReport {
        RankReport {
            product: ProductInfo {
                id: "12345".to_string(),
                title: "Смартфон черный".to_string(),
            },
            page_limit: 3,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            outcomes,
            truncated,
            checked_at: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    fn outcome(keyword: &str, outcome: ScanOutcome) -> KeywordOutcome {
        KeywordOutcome {
            keyword: keyword.to_string(),
            outcome,
        }
    }

    #[test]
    fn found_and_missing_lines() {
        let found = outcome("смартфон", ScanOutcome::found(2, 7, 47));
        let missing = outcome("черный", ScanOutcome::not_found(300));
        assert_eq!(render_line(&found, 3), "«смартфон»: page 2, position 7 (checked: 47)");
        assert_eq!(render_line(&missing, 3), "«черный»: not found in first 3 pages (checked: 300)");
    }

    #[test]
    fn text_report_lists_every_outcome() {
        let r = report(
            &["смартфон", "черный"],
            vec![
                outcome("смартфон", ScanOutcome::found(1, 3, 3)),
                outcome("черный", ScanOutcome::not_found(30)),
            ],
            false,
        );
        assert_eq!(
            render_text(&r),
            "Title: Смартфон черный\nID: 12345\n\n\
             Keywords: смартфон, черный\n\n\
             «смартфон»: page 1, position 3 (checked: 3)\n\
             «черный»: not found in first 3 pages (checked: 30)\n"
        );
    }

    #[test]
    fn empty_keywords_is_reported_not_failed() {
        let text = render_text(&report(&[], Vec::new(), false));
        assert_eq!(
            text,
            "Title: Смартфон черный\nID: 12345\n\nNo usable keywords in the title, nothing to check.\n"
        );
    }

    #[test]
    fn truncated_report_names_skipped_keywords() {
        let r = report(
            &["смартфон", "черный", "чехол"],
            vec![outcome("смартфон", ScanOutcome::not_found(3))],
            true,
        );
        assert!(render_text(&r).contains("not checked: черный, чехол"));
    }

    #[test]
    fn json_flattens_outcome_fields() {
        let r = report(&["чехол"], vec![outcome("чехол", ScanOutcome::found(1, 2, 2))], false);
        let value: serde_json::Value = serde_json::from_str(&render_json(&r).unwrap()).unwrap();
        let line = &value["outcomes"][0];
        assert_eq!(line["keyword"], "чехол");
        assert_eq!(line["found"], true);
        assert_eq!(line["page"], 1);
        assert_eq!(line["position"], 2);
        assert_eq!(line["items_checked"], 2);
        assert_eq!(value["product"]["id"], "12345");
    }
}
