//! Outbound link verification.
//!
//! Walks every record link across all sections and probes each URL once:
//! HEAD first, falling back to GET when the server answers 405. No
//! retries. A section whose records fail to parse is skipped and named
//! in the report; the remaining sections are still checked.

use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cv::models::SectionKind;
use crate::cv::source::{CvSource, SourceError};

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    Doi,
    Orcid,
    Generic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LinkStatus {
    Ok,
    Broken { status: u16 },
    Unreachable { reason: String },
}

/// Outcome of probing one record's link.
#[derive(Debug, Clone, Serialize)]
pub struct LinkCheck {
    pub section: String,
    pub organization: String,
    pub url: String,
    pub kind: LinkKind,
    pub status: LinkStatus,
}

/// Aggregate over one full verification pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LinkReport {
    pub checked: usize,
    pub ok: usize,
    pub broken: usize,
    pub unreachable: usize,
    pub skipped_sections: Vec<String>,
    pub results: Vec<LinkCheck>,
}

// ────────────────────────────────────────────────────────────────────────────
// Core functions
// ────────────────────────────────────────────────────────────────────────────

/// Probes every link in the source once and returns the aggregate report.
/// Malformed sections are skipped (and named in `skipped_sections`); an
/// unreadable or unparseable source file fails the whole pass.
pub async fn check_links(
    source: &dyn CvSource,
    client: &reqwest::Client,
) -> Result<LinkReport, SourceError> {
    let mut report = LinkReport::default();

    for kind in SectionKind::ALL {
        let records = match source.load_section(kind).await {
            Ok(records) => records,
            Err(e @ SourceError::Section { .. }) => {
                warn!("link check: skipping section '{kind}': {e}");
                report.skipped_sections.push(kind.to_string());
                continue;
            }
            Err(e) => return Err(e),
        };

        for record in records {
            let Some(url) = record.link_href() else {
                continue;
            };
            debug!("link check: probing {url}");
            let status = probe(client, &url).await;

            report.checked += 1;
            match status {
                LinkStatus::Ok => report.ok += 1,
                LinkStatus::Broken { .. } => report.broken += 1,
                LinkStatus::Unreachable { .. } => report.unreachable += 1,
            }
            report.results.push(LinkCheck {
                section: kind.to_string(),
                organization: record.organization,
                url,
                kind: classify_link_kind(&record.link.unwrap_or_default()),
                status,
            });
        }
    }

    Ok(report)
}

/// Classifies a raw link value as stored in the source document. Bare
/// DOI suffixes ("10.xxxx/...") count as DOI links even before they are
/// resolved to a full URL.
pub fn classify_link_kind(raw: &str) -> LinkKind {
    let raw = raw.trim();
    if raw.contains("doi.org/") || raw.starts_with("10.") {
        LinkKind::Doi
    } else if raw.contains("orcid.org/") {
        LinkKind::Orcid
    } else {
        LinkKind::Generic
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

async fn probe(client: &reqwest::Client, url: &str) -> LinkStatus {
    match client.head(url).send().await {
        Ok(response) if response.status() == StatusCode::METHOD_NOT_ALLOWED => {
            // Some hosts reject HEAD outright; one GET settles it.
            match client.get(url).send().await {
                Ok(response) => classify_status(response.status()),
                Err(e) => probe_failed(e),
            }
        }
        Ok(response) => classify_status(response.status()),
        Err(e) => probe_failed(e),
    }
}

fn classify_status(status: StatusCode) -> LinkStatus {
    if status.is_success() || status.is_redirection() {
        LinkStatus::Ok
    } else {
        LinkStatus::Broken {
            status: status.as_u16(),
        }
    }
}

fn probe_failed(e: reqwest::Error) -> LinkStatus {
    LinkStatus::Unreachable {
        reason: e.to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::cv::models::{ExperienceRecord, Profile};

    #[test]
    fn test_classify_doi_url() {
        assert_eq!(
            classify_link_kind("https://doi.org/10.1000/xyz123"),
            LinkKind::Doi
        );
    }

    #[test]
    fn test_classify_bare_doi() {
        assert_eq!(classify_link_kind("10.1000/xyz123"), LinkKind::Doi);
        assert_eq!(classify_link_kind("  10.5555/abc  "), LinkKind::Doi);
    }

    #[test]
    fn test_classify_orcid() {
        assert_eq!(
            classify_link_kind("https://orcid.org/0000-0002-1825-0097"),
            LinkKind::Orcid
        );
    }

    #[test]
    fn test_classify_generic() {
        assert_eq!(classify_link_kind("https://example.com/team"), LinkKind::Generic);
        assert_eq!(classify_link_kind("https://example.com/10.html"), LinkKind::Generic);
    }

    #[test]
    fn test_classify_status_success_and_redirect_are_ok() {
        assert_eq!(classify_status(StatusCode::OK), LinkStatus::Ok);
        assert_eq!(classify_status(StatusCode::NO_CONTENT), LinkStatus::Ok);
        assert_eq!(classify_status(StatusCode::MOVED_PERMANENTLY), LinkStatus::Ok);
    }

    #[test]
    fn test_classify_status_client_and_server_errors_are_broken() {
        assert_eq!(
            classify_status(StatusCode::NOT_FOUND),
            LinkStatus::Broken { status: 404 }
        );
        assert_eq!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR),
            LinkStatus::Broken { status: 500 }
        );
    }

    struct LinklessSource {
        failing: SectionKind,
    }

    #[async_trait]
    impl CvSource for LinklessSource {
        async fn load_section(
            &self,
            kind: SectionKind,
        ) -> Result<Vec<ExperienceRecord>, SourceError> {
            if kind == self.failing {
                return Err(SourceError::Section {
                    section: kind.to_string(),
                    source: serde_json::from_str::<u8>("broken").unwrap_err(),
                });
            }
            Ok(vec![ExperienceRecord {
                organization: "Org".into(),
                role: "Role".into(),
                period: "2020".into(),
                topic: None,
                discipline: None,
                place: None,
                link: None,
                logo: "logo.svg".into(),
                current: false,
            }])
        }

        async fn load_profile(&self) -> Result<Option<Profile>, SourceError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_malformed_section_is_skipped_not_fatal() {
        let source = LinklessSource {
            failing: SectionKind::TechTransfer,
        };
        let client = reqwest::Client::new();
        let report = check_links(&source, &client)
            .await
            .expect("section errors must not fail the pass");

        assert_eq!(report.skipped_sections, vec!["tech-transfer".to_string()]);
        assert_eq!(report.checked, 0, "records without links are not probed");
        assert!(report.results.is_empty());
    }
}
