//! The fixed analysis prompt template.

/// Build the analysis prompt for a symbol.
///
/// The prompt pins the reply to three labeled sections (`SUMMARY:`,
/// `SENTIMENT:`, `KEY_POINTS:`) that [`parse_analysis`](crate::parse_analysis)
/// scrapes back out. Keep the labels in sync with the parser.
pub fn build_analysis_prompt(symbol: &str, company_name: &str) -> String {
    format!(
        "Analyze the stock {symbol} ({company_name}). Please provide a structured analysis with the following:\n\
         \n\
         1. **Summary**: A brief 2-3 sentence overview of the company and its current market position.\n\
         \n\
         2. **Sentiment**: Based on general market conditions and the company's fundamentals, classify the outlook as BULLISH, BEARISH, or NEUTRAL.\n\
         \n\
         3. **Key Points**: List 3-5 important investment considerations as bullet points.\n\
         \n\
         Please format your response as follows:\n\
         SUMMARY: [Your summary here]\n\
         SENTIMENT: [BULLISH/BEARISH/NEUTRAL]\n\
         KEY_POINTS:\n\
         - [Point 1]\n\
         - [Point 2]\n\
         - [Point 3]"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_mentions_symbol_and_labels() {
        let prompt = build_analysis_prompt("AAPL", "Apple Inc");
        assert!(prompt.contains("AAPL (Apple Inc)"));
        assert!(prompt.contains("SUMMARY:"));
        assert!(prompt.contains("SENTIMENT:"));
        assert!(prompt.contains("KEY_POINTS:"));
    }
}
