use crate::error::{PageviewsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Access-method filter (`all-access`, `desktop`, `mobile-app`, `mobile-web`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Access {
    #[default]
    AllAccess,
    Desktop,
    MobileApp,
    MobileWeb,
}

impl Access {
    pub fn as_str(&self) -> &'static str {
        match self {
            Access::AllAccess => "all-access",
            Access::Desktop => "desktop",
            Access::MobileApp => "mobile-app",
            Access::MobileWeb => "mobile-web",
        }
    }
}

/// Agent-type filter (`user`, `automated`, `spider`, `all-agents`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Agent {
    #[default]
    User,
    Automated,
    Spider,
    AllAgents,
}

impl Agent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Agent::User => "user",
            Agent::Automated => "automated",
            Agent::Spider => "spider",
            Agent::AllAgents => "all-agents",
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Access {
    type Err = PageviewsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all-access" => Ok(Access::AllAccess),
            "desktop" => Ok(Access::Desktop),
            "mobile-app" => Ok(Access::MobileApp),
            "mobile-web" => Ok(Access::MobileWeb),
            other => Err(PageviewsError::Config(format!(
                "unknown access filter '{other}' (expected all-access, desktop, mobile-app or mobile-web)"
            ))),
        }
    }
}

impl FromStr for Agent {
    type Err = PageviewsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Agent::User),
            "automated" => Ok(Agent::Automated),
            "spider" => Ok(Agent::Spider),
            "all-agents" => Ok(Agent::AllAgents),
            other => Err(PageviewsError::Config(format!(
                "unknown agent filter '{other}' (expected user, automated, spider or all-agents)"
            ))),
        }
    }
}

/// Static client configuration.
///
/// There is no default `user_agent`. Wikimedia asks every client to identify
/// itself with a contact address and throttles generic agents. Build one with
/// [`ClientConfig::new`] and adjust the rest:
///
/// ```
/// use wikimedia_pageviews::{Access, ClientConfig};
///
/// let cfg = ClientConfig::new("my-tool/0.1 (me@example.org)")?
///     .project("de.wikipedia.org")
///     .access(Access::Desktop);
/// assert_eq!(cfg.base_url(), "https://wikimedia.org/api/rest_v1/metrics");
/// # Ok::<(), wikimedia_pageviews::PageviewsError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub user_agent: String,
    /// `https` unless pointed at a local test server.
    #[serde(default = "default_scheme")]
    pub scheme: String,
    #[serde(default = "default_host")]
    pub api_host: String,
    #[serde(default = "default_version")]
    pub api_version: String,
    #[serde(default = "default_project")]
    pub project: String,
    #[serde(default)]
    pub access: Access,
    #[serde(default)]
    pub agent: Agent,
}

fn default_scheme() -> String {
    "https".into()
}

fn default_host() -> String {
    "wikimedia.org".into()
}

fn default_version() -> String {
    "rest_v1".into()
}

fn default_project() -> String {
    "en.wikipedia.org".into()
}

impl ClientConfig {
    /// Start from the defaults (`wikimedia.org`, `rest_v1`, `en.wikipedia.org`,
    /// `all-access`, `user`). Fails if `user_agent` is blank.
    pub fn new(user_agent: impl Into<String>) -> Result<Self> {
        let cfg = Self {
            user_agent: user_agent.into(),
            scheme: default_scheme(),
            api_host: default_host(),
            api_version: default_version(),
            project: default_project(),
            access: Access::default(),
            agent: Agent::default(),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// `http` or `https`.
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Host, optionally with a port (`127.0.0.1:8080`).
    pub fn api_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = host.into();
        self
    }

    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    pub fn access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    pub fn agent(mut self, agent: Agent) -> Self {
        self.agent = agent;
        self
    }

    /// Checks the invariants a deserialized or hand-built config must hold.
    pub fn validate(&self) -> Result<()> {
        if self.user_agent.trim().is_empty() {
            return Err(PageviewsError::Config(
                "a user agent with contact information is required".into(),
            ));
        }
        if !matches!(self.scheme.as_str(), "http" | "https") {
            return Err(PageviewsError::Config(format!(
                "unsupported scheme '{}' (expected http or https)",
                self.scheme
            )));
        }
        for (name, value) in [
            ("api_host", &self.api_host),
            ("api_version", &self.api_version),
            ("project", &self.project),
        ] {
            if value.trim().is_empty() {
                return Err(PageviewsError::Config(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }

    /// `{scheme}://{host}/api/{version}/metrics`
    pub fn base_url(&self) -> String {
        format!(
            "{}://{}/api/{}/metrics",
            self.scheme, self.api_host, self.api_version
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_user_agent_is_rejected() {
        assert!(matches!(
            ClientConfig::new("   "),
            Err(PageviewsError::Config(_))
        ));
    }

    #[test]
    fn scheme_override_reaches_base_url() {
        let cfg = ClientConfig::new("t (t@example.org)")
            .unwrap()
            .scheme("http")
            .api_host("127.0.0.1:8080");
        cfg.validate().unwrap();
        assert_eq!(cfg.base_url(), "http://127.0.0.1:8080/api/rest_v1/metrics");
        assert!(matches!(
            cfg.scheme("ftp").validate(),
            Err(PageviewsError::Config(_))
        ));
    }

    #[test]
    fn filters_round_trip_through_strings() {
        for a in [
            Access::AllAccess,
            Access::Desktop,
            Access::MobileApp,
            Access::MobileWeb,
        ] {
            assert_eq!(a.to_string().parse::<Access>().unwrap(), a);
        }
        for a in [Agent::User, Agent::Automated, Agent::Spider, Agent::AllAgents] {
            assert_eq!(a.to_string().parse::<Agent>().unwrap(), a);
        }
        assert!("bots".parse::<Agent>().is_err());
    }

    #[test]
    fn deserialize_fills_defaults() {
        let cfg: ClientConfig =
            serde_json::from_str(r#"{"user_agent":"t (t@example.org)","access":"mobile-web"}"#)
                .unwrap();
        assert_eq!(cfg.scheme, "https");
        assert_eq!(cfg.api_host, "wikimedia.org");
        assert_eq!(cfg.project, "en.wikipedia.org");
        assert_eq!(cfg.access, Access::MobileWeb);
        assert_eq!(cfg.agent, Agent::User);
        cfg.validate().unwrap();
    }
}
