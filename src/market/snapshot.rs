//! Hardcoded India-market snapshot shown on the home page. There is no live
//! feed; the widget rotates through this fixed set of quotes.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexQuote {
    pub symbol: &'static str,
    pub price: f64,
    pub change_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowLeader {
    pub name: &'static str,
    pub sector: &'static str,
    pub flow: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketEvent {
    pub title: &'static str,
    pub time: &'static str,
}

pub static TICKER_QUOTES: [IndexQuote; 5] = [
    IndexQuote { symbol: "NIFTY 50", price: 22542.65, change_pct: 0.42 },
    IndexQuote { symbol: "BANK NIFTY", price: 48420.3, change_pct: -0.18 },
    IndexQuote { symbol: "SENSEX", price: 74210.1, change_pct: 0.28 },
    IndexQuote { symbol: "RELIANCE", price: 2874.9, change_pct: 0.61 },
    IndexQuote { symbol: "INFY", price: 1536.15, change_pct: -0.34 },
];

pub static FLOW_LEADERS: [FlowLeader; 4] = [
    FlowLeader { name: "RELIANCE", sector: "Oil & Gas", flow: "+₹1,280 Cr" },
    FlowLeader { name: "HDFCBANK", sector: "Banking", flow: "+₹960 Cr" },
    FlowLeader { name: "TCS", sector: "IT Services", flow: "-₹420 Cr" },
    FlowLeader { name: "ADANIPORTS", sector: "Infra", flow: "+₹310 Cr" },
];

pub static MARKET_EVENTS: [MarketEvent; 3] = [
    MarketEvent { title: "RBI Policy Presser", time: "07 Dec • 10:00 IST" },
    MarketEvent { title: "INFY Buyback Vote", time: "08 Dec • 13:30 IST" },
    MarketEvent { title: "Weekly F&O Expiry", time: "12 Dec • All Day" },
];

const TICKER_WINDOW: usize = 3;

/// Rotating three-quote window over [`TICKER_QUOTES`], advancing one position
/// per tick and wrapping around the list.
#[derive(Debug, Default)]
pub struct TickerTape {
    index: usize,
}

impl TickerTape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_window(&mut self) -> Vec<&'static IndexQuote> {
        let window = (0..TICKER_WINDOW)
            .map(|offset| &TICKER_QUOTES[(self.index + offset) % TICKER_QUOTES.len()])
            .collect();
        self.index = (self.index + 1) % TICKER_QUOTES.len();
        window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(window: &[&IndexQuote]) -> Vec<&'static str> {
        window.iter().map(|q| q.symbol).collect()
    }

    #[test]
    fn test_first_window() {
        let mut tape = TickerTape::new();
        assert_eq!(
            symbols(&tape.next_window()),
            vec!["NIFTY 50", "BANK NIFTY", "SENSEX"]
        );
    }

    #[test]
    fn test_window_wraps_around() {
        let mut tape = TickerTape::new();
        for _ in 0..3 {
            tape.next_window();
        }
        // Fourth window starts at RELIANCE and wraps to the front
        assert_eq!(
            symbols(&tape.next_window()),
            vec!["RELIANCE", "INFY", "NIFTY 50"]
        );
    }

    #[test]
    fn test_rotation_returns_to_start() {
        let mut tape = TickerTape::new();
        let first = symbols(&tape.next_window());
        for _ in 0..TICKER_QUOTES.len() - 1 {
            tape.next_window();
        }
        assert_eq!(symbols(&tape.next_window()), first);
    }
}
