use crate::error::{CrawlError, Result};
use crate::transport::Transport;
use std::fmt;
use texting_robots::Robot;
use tracing::{debug, info};
use url::Url;

/// robots.txt rules as they apply to one user agent.
///
/// Built once per crawl and never changed afterwards.
pub struct AccessPolicy {
    agent: String,
    rules: Rules,
}

enum Rules {
    Robots(Robot),
    AllowAll,
    DisallowAll,
}

impl AccessPolicy {
    /// Parses a robots.txt body and keeps the group that best matches `agent`.
    pub fn from_robots(agent: &str, robots_txt: &[u8]) -> Result<Self> {
        let robot = Robot::new(agent, robots_txt)
            .map_err(|e| CrawlError::Robots(format!("parsing robots.txt: {e}")))?;
        Ok(Self {
            agent: agent.to_string(),
            rules: Rules::Robots(robot),
        })
    }

    pub fn allow_all(agent: &str) -> Self {
        Self {
            agent: agent.to_string(),
            rules: Rules::AllowAll,
        }
    }

    pub fn disallow_all(agent: &str) -> Self {
        Self {
            agent: agent.to_string(),
            rules: Rules::DisallowAll,
        }
    }

    /// True if `path` (path plus optional query) may be crawled.
    pub fn test(&self, path: &str) -> bool {
        match &self.rules {
            Rules::Robots(robot) => robot.allowed(path),
            Rules::AllowAll => true,
            Rules::DisallowAll => false,
        }
    }

    /// `Sitemap:` lines, verbatim.
    pub fn sitemaps(&self) -> &[String] {
        match &self.rules {
            Rules::Robots(robot) => &robot.sitemaps,
            Rules::AllowAll | Rules::DisallowAll => &[],
        }
    }

    pub fn agent(&self) -> &str {
        &self.agent
    }
}

impl fmt::Debug for AccessPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules = match self.rules {
            Rules::Robots(_) => "robots.txt",
            Rules::AllowAll => "allow-all",
            Rules::DisallowAll => "disallow-all",
        };
        f.debug_struct("AccessPolicy")
            .field("agent", &self.agent)
            .field("rules", &rules)
            .field("sitemaps", &self.sitemaps())
            .finish()
    }
}

/// Retrieves `/robots.txt` for the domain of `base` and derives the policy.
///
/// A missing file (4xx) means no restrictions, a server error (5xx) means
/// nothing may be crawled. Failing to get any answer is an error.
pub async fn fetch_policy<T: Transport>(transport: &T, base: &Url, agent: &str) -> Result<AccessPolicy> {
    let robots_url = base.join("/robots.txt")?;

    let fetched = transport
        .fetch(&robots_url)
        .await
        .map_err(|e| CrawlError::Robots(format!("retrieving {robots_url}: {e}")))?;

    debug!("robots.txt at {} answered {}", robots_url, fetched.status);

    let policy = match fetched.status {
        200..=299 => AccessPolicy::from_robots(agent, fetched.body.as_bytes())?,
        400..=499 => AccessPolicy::allow_all(agent),
        500..=599 => AccessPolicy::disallow_all(agent),
        other => {
            return Err(CrawlError::Robots(format!(
                "unexpected status {other} for {robots_url}"
            )));
        }
    };

    info!(
        "robots.txt for {}: {} sitemap(s) declared",
        base.host_str().unwrap_or_default(),
        policy.sitemaps().len()
    );
    Ok(policy)
}
