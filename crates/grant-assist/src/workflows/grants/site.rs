use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::{GrantData, GrantListing};

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("unable to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Anything that can produce fresh program information.
#[async_trait]
pub trait GrantSource: Send + Sync {
    async fn fetch(&self, now: DateTime<Utc>) -> Result<GrantData, ScrapeError>;
}

/// Fetches the Community Conservation Partnerships Program page.
#[derive(Debug, Clone)]
pub struct DcnrSiteScraper {
    client: reqwest::Client,
    url: String,
}

impl DcnrSiteScraper {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ScrapeError::Client)?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl GrantSource for DcnrSiteScraper {
    async fn fetch(&self, now: DateTime<Utc>) -> Result<GrantData, ScrapeError> {
        let http_error = |source: reqwest::Error| ScrapeError::Http {
            url: self.url.clone(),
            source,
        };

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(http_error)?;
        debug!(url = %self.url, bytes = body.len(), "fetched grant program page");
        Ok(parse_grant_page(&body, now))
    }
}

/// Pulls program text and grant sections out of the program page markup.
pub fn parse_grant_page(html: &str, now: DateTime<Utc>) -> GrantData {
    let document = Html::parse_document(html);
    let mut data = GrantData::new(now);

    let root = first_match(&document, "main").or_else(|| first_match(&document, "div.content"));
    if let (Some(root), Ok(blocks)) = (root, Selector::parse("p, ul, ol, h2, h3")) {
        for elem in root.select(&blocks) {
            data.general_info.push_str(&text_content(elem));
            data.general_info.push('\n');
        }
    }

    let Ok(sections) = Selector::parse("section.grant, section.program, div.grant, div.program")
    else {
        return data;
    };
    let (Ok(headings), Ok(paragraphs)) = (Selector::parse("h2, h3"), Selector::parse("p")) else {
        return data;
    };

    for section in document.select(&sections) {
        let title = section
            .select(&headings)
            .next()
            .map(text_content)
            .unwrap_or_default();
        if title.is_empty() {
            continue;
        }

        let mut listing = GrantListing {
            title,
            ..GrantListing::default()
        };
        for paragraph in section.select(&paragraphs) {
            let text = text_content(paragraph);
            let lowered = text.to_lowercase();
            if lowered.contains("eligib") {
                append_sentence(&mut listing.eligibility, &text);
            } else if lowered.contains("deadline") || lowered.contains("due") {
                listing.deadline = text;
            } else {
                append_sentence(&mut listing.description, &text);
            }
        }
        data.grants.push(listing);
    }

    data
}

fn first_match<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    Selector::parse(selector)
        .ok()
        .and_then(|sel| document.select(&sel).next())
}

fn text_content(elem: ElementRef<'_>) -> String {
    elem.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn append_sentence(target: &mut String, text: &str) {
    if text.is_empty() {
        return;
    }
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const PAGE: &str = r#"
        <html><body>
          <nav><p>Skip to content</p></nav>
          <main>
            <h2>Community Conservation Partnerships Program</h2>
            <p>Grants support   parks, trails and conservation.</p>
            <ul><li>Municipalities</li><li>Nonprofits</li></ul>
            <section class="grant">
              <h3>Community Recreation</h3>
              <p>Funds park rehabilitation.</p>
              <p>Eligible applicants include municipalities.</p>
              <p>Applications due April 2nd.</p>
            </section>
            <div class="program"><p>No heading here.</p></div>
          </main>
        </body></html>
    "#;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn collects_main_text_one_block_per_line() {
        let data = parse_grant_page(PAGE, now());

        let lines: Vec<&str> = data.general_info.lines().collect();
        assert_eq!(lines[0], "Community Conservation Partnerships Program");
        assert_eq!(lines[1], "Grants support parks, trails and conservation.");
        assert_eq!(lines[2], "Municipalities Nonprofits");
        assert!(!data.general_info.contains("Skip to content"));
        assert_eq!(data.last_updated, now());
    }

    #[test]
    fn classifies_grant_section_paragraphs() {
        let data = parse_grant_page(PAGE, now());

        assert_eq!(data.grants.len(), 1);
        let grant = &data.grants[0];
        assert_eq!(grant.title, "Community Recreation");
        assert_eq!(grant.description, "Funds park rehabilitation.");
        assert_eq!(grant.eligibility, "Eligible applicants include municipalities.");
        assert_eq!(grant.deadline, "Applications due April 2nd.");
    }

    #[test]
    fn falls_back_to_content_div() {
        let html = r#"<div class="content"><p>Deadline April 2nd</p></div>"#;
        let data = parse_grant_page(html, now());
        assert_eq!(data.general_info, "Deadline April 2nd\n");
    }

    #[test]
    fn pages_without_content_keep_the_transcript() {
        let data = parse_grant_page("<html><body></body></html>", now());
        assert!(data.general_info.is_empty());
        assert!(!data.planning_session_transcript.is_empty());
    }
}
