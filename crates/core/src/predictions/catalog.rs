//! The static algorithm catalog.

use super::model::{Algorithm, SignalType};

/// Everything the service needs to run one algorithm: the descriptor, the
/// symbols it scans and the signal messages it attaches.
pub(crate) struct AlgorithmEntry {
    pub(crate) id: &'static str,
    pub(crate) name: &'static str,
    pub(crate) description: &'static str,
    pub(crate) signals: &'static [SignalType],
    pub(crate) accuracy: f64,
    pub(crate) symbols: &'static [&'static str],
    pub(crate) messages: &'static [&'static str],
}

pub(crate) const CATALOG: &[AlgorithmEntry] = &[
    AlgorithmEntry {
        id: "web_search_trending",
        name: "Web Search Trending",
        description: "Analyzes trending search queries related to stocks and companies to identify rising interest",
        signals: &[SignalType::WebSearch, SignalType::NewsSentiment],
        accuracy: 0.72,
        symbols: &["NVDA", "TSLA", "META", "GOOGL", "AMZN", "AAPL", "AMD", "PLTR", "COIN", "SQ"],
        messages: &[
            "Search volume up 150% this week",
            "Trending in tech-related queries",
            "Product launch generating buzz",
            "Earnings anticipation searches rising",
            "Company news driving search interest",
        ],
    },
    AlgorithmEntry {
        id: "twitter_buzz",
        name: "Twitter/X Buzz",
        description: "Monitors Twitter/X for mentions, sentiment, and viral discussions about stocks",
        signals: &[SignalType::TwitterTrends, SignalType::NewsSentiment],
        accuracy: 0.68,
        symbols: &["TSLA", "GME", "AMC", "PLTR", "NVDA", "META", "AAPL", "RIVN", "LCID", "SOFI"],
        messages: &[
            "Viral tweet from CEO",
            "High engagement on product announcement",
            "Trending hashtag momentum",
            "Positive sentiment surge",
            "Influencer mentions increasing",
        ],
    },
    AlgorithmEntry {
        id: "momentum_breakout",
        name: "Momentum Breakout",
        description: "Identifies stocks with strong price momentum and potential breakout patterns",
        signals: &[SignalType::StockPerformance, SignalType::VolumeAnalysis],
        accuracy: 0.75,
        symbols: &["NVDA", "AVGO", "LLY", "COST", "META", "MSFT", "AAPL", "AMZN", "CRM", "NOW"],
        messages: &[
            "Breaking above 50-day moving average",
            "Strong relative strength vs sector",
            "Consecutive higher highs pattern",
            "Bullish MACD crossover",
            "Price breakout from consolidation",
        ],
    },
    AlgorithmEntry {
        id: "volume_surge",
        name: "Volume Surge",
        description: "Detects unusual volume spikes that may indicate upcoming price movements",
        signals: &[SignalType::VolumeAnalysis, SignalType::StockPerformance],
        accuracy: 0.70,
        symbols: &["AAPL", "TSLA", "NVDA", "AMD", "INTC", "F", "BAC", "T", "PFE", "AAL"],
        messages: &[
            "Volume 3x above average",
            "Unusual institutional activity",
            "Options volume spike detected",
            "Accumulation pattern forming",
            "Block trade activity increasing",
        ],
    },
    AlgorithmEntry {
        id: "combined_signals",
        name: "Multi-Signal Analysis",
        description: "Combines multiple signals (social, search, performance) for comprehensive predictions",
        signals: &[
            SignalType::WebSearch,
            SignalType::TwitterTrends,
            SignalType::StockPerformance,
            SignalType::NewsSentiment,
        ],
        accuracy: 0.78,
        symbols: &["NVDA", "META", "TSLA", "AAPL", "GOOGL", "MSFT", "AMZN", "AMD", "AVGO", "CRM"],
        messages: &[
            "Multiple bullish indicators aligned",
            "Social + technical signals converging",
            "Cross-platform buzz with momentum",
            "Strong fundamentals + rising interest",
            "Multi-factor buy signal triggered",
        ],
    },
];

impl AlgorithmEntry {
    pub(crate) fn to_algorithm(&self) -> Algorithm {
        Algorithm {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            signals: self.signals.to_vec(),
            accuracy: Some(self.accuracy),
        }
    }
}

pub(crate) fn find(algorithm_id: &str) -> Option<&'static AlgorithmEntry> {
    CATALOG.iter().find(|entry| entry.id == algorithm_id)
}

/// The algorithm descriptors, catalog order.
pub fn algorithms() -> Vec<Algorithm> {
    CATALOG.iter().map(AlgorithmEntry::to_algorithm).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_five_algorithms_with_distinct_ids() {
        let algorithms = algorithms();
        assert_eq!(algorithms.len(), 5);

        let mut ids: Vec<&str> = algorithms.iter().map(|a| a.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn every_entry_has_symbols_and_messages() {
        for entry in CATALOG {
            assert!(!entry.symbols.is_empty(), "{} has no symbols", entry.id);
            assert!(!entry.messages.is_empty(), "{} has no messages", entry.id);
            assert!(entry.accuracy > 0.0 && entry.accuracy < 1.0);
        }
    }

    #[test]
    fn find_resolves_known_ids_only() {
        assert!(find("momentum_breakout").is_some());
        assert!(find("nope").is_none());
    }
}
