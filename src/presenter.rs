//! Pure view-model builders for the UI layer: no DOM, no I/O. Each function
//! maps repository or snapshot state to display-ready strings so rendering
//! can be tested headlessly.

use crate::market::snapshot::{FLOW_LEADERS, FlowLeader, IndexQuote};
use crate::market::{format_numeric_price, format_price_for_market};
use crate::models::{Market, Trade, TradeInput};

pub const EMPTY_JOURNAL_MESSAGE: &str = "No trades yet. Add your first scalp idea.";

/// The trade form defaults to NSE on every reset.
pub const DEFAULT_FORM_MARKET: Market = Market::Nse;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeRowView {
    pub id: String,
    pub asset: String,
    pub market_key: &'static str,
    pub market_label: &'static str,
    pub bias: String,
    pub entry_display: String,
    pub target_display: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalTableView {
    Empty { message: &'static str },
    Rows(Vec<TradeRowView>),
}

/// Render the journal table. Prices are formatted per each record's market;
/// non-numeric legacy values pass through unchanged.
pub fn render_trade_table(trades: &[Trade]) -> JournalTableView {
    if trades.is_empty() {
        return JournalTableView::Empty {
            message: EMPTY_JOURNAL_MESSAGE,
        };
    }

    JournalTableView::Rows(
        trades
            .iter()
            .map(|trade| TradeRowView {
                id: trade.id.clone(),
                asset: trade.asset.clone(),
                market_key: trade.market.as_key(),
                market_label: trade.market.meta().label,
                bias: trade.bias.clone(),
                entry_display: format_price_for_market(Some(&trade.entry), trade.market),
                target_display: format_price_for_market(Some(&trade.target), trade.market),
            })
            .collect(),
    )
}

/// Input hints that follow the selected market.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormHints {
    pub asset_placeholder: &'static str,
    pub currency_symbol: &'static str,
}

pub fn form_hints(market: Market) -> FormHints {
    let meta = market.meta();
    FormHints {
        asset_placeholder: meta.placeholder,
        currency_symbol: meta.symbol,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceDirection {
    Gain,
    Loss,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickerRowView {
    pub symbol: &'static str,
    pub price_display: String,
    pub change_display: String,
    pub direction: PriceDirection,
}

/// Render a ticker window. Quotes are NSE-denominated; gains keep an
/// explicit leading plus.
pub fn render_ticker_rows(quotes: &[&IndexQuote]) -> Vec<TickerRowView> {
    quotes
        .iter()
        .map(|quote| TickerRowView {
            symbol: quote.symbol,
            price_display: format_numeric_price(quote.price, Market::Nse),
            change_display: format!(
                "{}{:.2}%",
                if quote.change_pct >= 0.0 { "+" } else { "" },
                quote.change_pct
            ),
            direction: if quote.change_pct >= 0.0 {
                PriceDirection::Gain
            } else {
                PriceDirection::Loss
            },
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderRowView {
    pub name: &'static str,
    pub sector: &'static str,
    pub flow: &'static str,
    pub direction: PriceDirection,
}

pub fn render_flow_leaders() -> Vec<LeaderRowView> {
    FLOW_LEADERS.iter().map(leader_row).collect()
}

fn leader_row(leader: &FlowLeader) -> LeaderRowView {
    LeaderRowView {
        name: leader.name,
        sector: leader.sector,
        flow: leader.flow,
        direction: if leader.flow.starts_with('-') {
            PriceDirection::Loss
        } else {
            PriceDirection::Gain
        },
    }
}

/// First 150 characters of an analysis for the history card.
pub fn history_preview(analysis: &str) -> String {
    let mut preview: String = analysis.chars().take(150).collect();
    preview.push_str("...");
    preview
}

/// Open/closed state for the FAQ page. Items toggle independently; any
/// number can be open at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaqAccordion {
    open: Vec<bool>,
}

impl FaqAccordion {
    pub fn new(item_count: usize) -> Self {
        Self {
            open: vec![false; item_count],
        }
    }

    /// Flip one item. Out-of-range indexes are ignored.
    pub fn toggle(&mut self, index: usize) {
        if let Some(open) = self.open.get_mut(index) {
            *open = !*open;
        }
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open.get(index).copied().unwrap_or(false)
    }
}

/// Trade-form state with the edited id held explicitly, so "create vs
/// update" is decided by state rather than by a hidden form field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalForm {
    editing_id: Option<String>,
    pub asset: String,
    pub market: Market,
    pub bias: String,
    pub entry: String,
    pub target: String,
}

impl JournalForm {
    pub fn new() -> Self {
        Self {
            market: DEFAULT_FORM_MARKET,
            ..Self::default()
        }
    }

    /// Hydrate the form from an existing record; the next submit replaces it.
    pub fn begin_edit(&mut self, trade: &Trade) {
        self.editing_id = Some(trade.id.clone());
        self.asset = trade.asset.clone();
        self.market = trade.market;
        self.bias = trade.bias.clone();
        self.entry = trade.entry.clone();
        self.target = trade.target.clone();
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.editing_id.is_some() {
            "Update Position"
        } else {
            "Add Position"
        }
    }

    pub fn hints(&self) -> FormHints {
        form_hints(self.market)
    }

    /// Snapshot the form as a repository submission.
    pub fn to_input(&self) -> TradeInput {
        TradeInput {
            id: self.editing_id.clone(),
            asset: self.asset.clone(),
            market: self.market,
            bias: self.bias.clone(),
            entry: self.entry.clone(),
            target: self.target.clone(),
        }
    }

    /// Back to a blank "add" form with the default market.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
