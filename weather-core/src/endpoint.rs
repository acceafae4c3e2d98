use std::{convert::TryFrom, fmt};

/// Logical operations offered by the upstream provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Current,
    Forecast,
    Search,
    History,
    Alerts,
    Marine,
    Future,
    TimeZone,
    Sports,
    Astronomy,
    IpLookup,
}

impl Endpoint {
    /// Short name used on the command line and in server routes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Current => "current",
            Endpoint::Forecast => "forecast",
            Endpoint::Search => "search",
            Endpoint::History => "history",
            Endpoint::Alerts => "alerts",
            Endpoint::Marine => "marine",
            Endpoint::Future => "future",
            Endpoint::TimeZone => "timezone",
            Endpoint::Sports => "sports",
            Endpoint::Astronomy => "astronomy",
            Endpoint::IpLookup => "ip",
        }
    }

    /// Path appended to the provider base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Current => "/current.json",
            Endpoint::Forecast => "/forecast.json",
            Endpoint::Search => "/search.json",
            Endpoint::History => "/history.json",
            Endpoint::Alerts => "/alerts.json",
            Endpoint::Marine => "/marine.json",
            Endpoint::Future => "/future.json",
            Endpoint::TimeZone => "/timezone.json",
            Endpoint::Sports => "/sports.json",
            Endpoint::Astronomy => "/astronomy.json",
            Endpoint::IpLookup => "/ip.json",
        }
    }

    pub const fn all() -> &'static [Endpoint] {
        &[
            Endpoint::Current,
            Endpoint::Forecast,
            Endpoint::Search,
            Endpoint::History,
            Endpoint::Alerts,
            Endpoint::Marine,
            Endpoint::Future,
            Endpoint::TimeZone,
            Endpoint::Sports,
            Endpoint::Astronomy,
            Endpoint::IpLookup,
        ]
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Endpoint {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        Endpoint::all()
            .iter()
            .copied()
            .find(|e| e.as_str() == lower)
            .ok_or_else(|| {
                let names: Vec<&str> = Endpoint::all().iter().map(Endpoint::as_str).collect();
                anyhow::anyhow!(
                    "Unknown operation '{value}'. Supported operations: {}.",
                    names.join(", ")
                )
            })
    }
}
