use async_trait::async_trait;
use log::{debug, warn};
use quick_xml::Reader;
use quick_xml::events::Event;
use reqwest::Client;
use reqwest::header::ACCEPT;
use std::time::Duration;

use super::dto::{NO_SUMMARY, NO_TITLE, Paper};
use crate::error::{TrendError, TrendResult};

/// Anything that can turn a topic into an ordered list of papers.
#[async_trait]
pub trait PaperSource: Send + Sync {
    async fn fetch(&self, topic: &str, max_results: usize) -> TrendResult<Vec<Paper>>;
}

#[derive(Clone)]
pub struct ArxivClient {
    http: Client,
    base: String,
}

impl ArxivClient {
    pub fn new(base: impl Into<String>, timeout: Duration) -> TrendResult<Self> {
        let http = Client::builder()
            .user_agent("trend-server/0.1")
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base: base.into(),
        })
    }
}

#[async_trait]
impl PaperSource for ArxivClient {
    /// Newest submissions first, capped at `max_results`.
    async fn fetch(&self, topic: &str, max_results: usize) -> TrendResult<Vec<Paper>> {
        let search_query = build_search_query(topic);
        debug!("Querying arXiv with '{}'", search_query);

        let resp = self
            .http
            .get(&self.base)
            .query(&[("search_query", search_query.as_str())])
            .query(&[("start", 0), ("max_results", max_results)])
            .query(&[("sortBy", "submittedDate"), ("sortOrder", "descending")])
            .header(
                ACCEPT,
                "application/atom+xml, application/xml;q=0.9, text/xml;q=0.8",
            )
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TrendError::Upstream {
                service: "arXiv",
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        let mut papers = match parse_atom_feed(&body) {
            Ok(papers) => papers,
            Err(e) => {
                warn!("Malformed arXiv feed for topic '{}': {}", topic, e);
                Vec::new()
            }
        };
        papers.truncate(max_results);

        Ok(papers)
    }
}

pub fn build_search_query(topic: &str) -> String {
    format!("all:{}", topic)
}

#[derive(Clone, Copy)]
enum EntryField {
    Id,
    Title,
    Summary,
}

#[derive(Default)]
struct EntryBuilder {
    id: Option<String>,
    title: Option<String>,
    summary: Option<String>,
}

impl EntryBuilder {
    fn slot(&mut self, field: EntryField) -> &mut Option<String> {
        match field {
            EntryField::Id => &mut self.id,
            EntryField::Title => &mut self.title,
            EntryField::Summary => &mut self.summary,
        }
    }

    fn build(self) -> Paper {
        Paper {
            title: self
                .title
                .map(|t| t.trim().to_string())
                .unwrap_or_else(|| NO_TITLE.to_string()),
            abstract_text: self
                .summary
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| NO_SUMMARY.to_string()),
            url: self.id.map(|i| i.trim().to_string()).unwrap_or_default(),
        }
    }
}

/// Parses an Atom feed into papers, one per `<entry>`, in document order.
pub fn parse_atom_feed(xml: &str) -> Result<Vec<Paper>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut out = Vec::new();

    let mut entry: Option<EntryBuilder> = None;
    let mut target: Option<EntryField> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let name = e.local_name();
                if name.as_ref() == b"entry" {
                    entry = Some(EntryBuilder::default());
                    target = None;
                } else if let Some(current) = entry.as_mut() {
                    target = match name.as_ref() {
                        b"id" => Some(EntryField::Id),
                        b"title" => Some(EntryField::Title),
                        b"summary" => Some(EntryField::Summary),
                        _ => None,
                    };
                    if let Some(field) = target {
                        current.slot(field).get_or_insert_with(String::new);
                    }
                }
            }
            Event::Text(t) => {
                if let (Some(current), Some(field)) = (entry.as_mut(), target) {
                    let text = t.unescape()?;
                    append_text(current.slot(field), &text);
                }
            }
            Event::CData(c) => {
                if let (Some(current), Some(field)) = (entry.as_mut(), target) {
                    let raw = c.into_inner();
                    append_text(current.slot(field), &String::from_utf8_lossy(&raw));
                }
            }
            Event::End(e) => {
                if e.local_name().as_ref() == b"entry" {
                    if let Some(done) = entry.take() {
                        out.push(done.build());
                    }
                }
                target = None;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(out)
}

fn append_text(slot: &mut Option<String>, text: &str) {
    let value = slot.get_or_insert_with(String::new);
    if !value.is_empty() {
        value.push(' ');
    }
    value.push_str(text);
}
