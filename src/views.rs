//! Top-level panels selected by the navigation bar

use std::fmt;
use std::str::FromStr;

/// The three mutually exclusive panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewPanel {
    #[default]
    Currencies,
    Reports,
    About,
}

impl ViewPanel {
    pub const ALL: [ViewPanel; 3] = [ViewPanel::Currencies, ViewPanel::Reports, ViewPanel::About];

    pub fn title(self) -> &'static str {
        match self {
            ViewPanel::Currencies => "Currencies",
            ViewPanel::Reports => "Reports",
            ViewPanel::About => "About",
        }
    }

    /// Panel heading plus static body; the currencies grid is filled
    /// separately from the catalog
    pub fn header_html(self) -> &'static str {
        match self {
            ViewPanel::Currencies => "<h1>Currencies</h1>",
            ViewPanel::Reports => REPORTS_HTML,
            ViewPanel::About => ABOUT_HTML,
        }
    }
}

impl fmt::Display for ViewPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewPanel::Currencies => write!(f, "currencies"),
            ViewPanel::Reports => write!(f, "reports"),
            ViewPanel::About => write!(f, "about"),
        }
    }
}

impl FromStr for ViewPanel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "currencies" => Ok(ViewPanel::Currencies),
            "reports" => Ok(ViewPanel::Reports),
            "about" => Ok(ViewPanel::About),
            other => Err(format!("Unknown panel: {other}")),
        }
    }
}

const REPORTS_HTML: &str = r#"<h1>Reports</h1>
<div class="placeholder">
    <p>🚧 Live reports for your followed coins are under construction.</p>
</div>"#;

const ABOUT_HTML: &str = r#"<h1>About</h1>
<div class="card about">
    <p>Browse the coin list, search by name or symbol, and switch on up to five coins to follow.
    Your followed coins are remembered between visits.</p>
    <p>"More Info" shows the current price in US dollars, euros and shekels.
    Prices come from the CoinGecko public API and are reused for two minutes.</p>
</div>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for panel in ViewPanel::ALL {
            assert_eq!(panel.to_string().parse::<ViewPanel>(), Ok(panel));
        }
        assert_eq!("".parse::<ViewPanel>(), Ok(ViewPanel::Currencies));
        assert_eq!(" About ".parse::<ViewPanel>(), Ok(ViewPanel::About));
        assert!("settings".parse::<ViewPanel>().is_err());
    }

    #[test]
    fn test_headers() {
        for panel in ViewPanel::ALL {
            assert!(panel.header_html().contains(panel.title()));
        }
    }
}
