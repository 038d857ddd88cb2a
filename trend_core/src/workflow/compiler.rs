use crate::ai::summarizer::dto::Summary;

pub const EMPTY_REPORT: &str = "No summaries found. Try a different topic.";

pub fn compile_report(summaries: &[Summary]) -> String {
    if summaries.is_empty() {
        return EMPTY_REPORT.to_string();
    }

    summaries
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let n = i + 1;
            let heading = if s.url.is_empty() {
                format!("{}. {}", n, s.title)
            } else {
                format!("{}. [{}]({})", n, s.title, s.url)
            };
            format!("{}\n\n{}\n", heading, s.summary)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
