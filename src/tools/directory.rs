//! Built-in scripmaster download directory

/// One downloadable instrument master file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScripLink {
    pub title: &'static str,
    pub url: &'static str,
    pub last_updated: &'static str,
    /// File format label, e.g. CSV
    pub format: &'static str,
}

/// A broker and the scripmaster files it publishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Broker {
    pub name: &'static str,
    pub category: &'static str,
    pub links: &'static [ScripLink],
}

const fn link(title: &'static str, format: &'static str) -> ScripLink {
    ScripLink {
        title,
        url: "#",
        last_updated: "2024-12-08",
        format,
    }
}

pub const BROKERS: &[Broker] = &[
    Broker {
        name: "Zerodha",
        category: "Full Service Broker",
        links: &[
            link("Equity Scriptmaster", "CSV"),
            link("F&O Scriptmaster", "CSV"),
        ],
    },
    Broker {
        name: "Angel One",
        category: "Full Service Broker",
        links: &[
            link("NSE Cash Scriptmaster", "XLS"),
            link("NSE F&O Scriptmaster", "XLS"),
        ],
    },
    Broker {
        name: "ICICI Direct",
        category: "Bank Broker",
        links: &[link("Complete Scriptmaster", "CSV")],
    },
    Broker {
        name: "Upstox",
        category: "Discount Broker",
        links: &[
            link("NSE Scriptmaster", "CSV"),
            link("BSE Scriptmaster", "CSV"),
        ],
    },
];

/// Brokers whose name or category contains `query` (case-insensitive)
///
/// An empty query matches everything.
pub fn search_brokers(query: &str) -> Vec<&'static Broker> {
    let needle = query.trim().to_lowercase();
    BROKERS
        .iter()
        .filter(|b| {
            needle.is_empty()
                || b.name.to_lowercase().contains(&needle)
                || b.category.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_lists_every_broker() {
        assert_eq!(search_brokers("").len(), BROKERS.len());
        assert_eq!(search_brokers("   ").len(), BROKERS.len());
    }

    #[test]
    fn matches_name_or_category_ignoring_case() {
        let names: Vec<_> = search_brokers("ZERO").iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["Zerodha"]);

        let names: Vec<_> = search_brokers("full service").iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["Zerodha", "Angel One"]);
    }

    #[test]
    fn link_titles_are_not_searched() {
        assert!(search_brokers("Equity").is_empty());
    }
}
