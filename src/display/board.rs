//! Per-symbol ticker cards, owned by the display layer and updated only
//! through `TickerBoard::apply`.

use std::collections::HashMap;

use chrono::{DateTime, Local, Utc};

use crate::core::scheduler::PollEvent;
use crate::models::quote::Quote;

/// How the displayed price moved with the latest update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceMove {
    New,
    Up,
    Down,
    Unchanged,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickerCard {
    pub symbol: String,
    pub price: Option<f64>,
    pub change: f64,
    pub change_percent: f64,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

impl TickerCard {
    fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            price: None,
            change: 0.0,
            change_percent: 0.0,
            updated_at: None,
            last_error: None,
        }
    }

    fn sign(&self) -> char {
        if self.change >= 0.0 {
            '+'
        } else {
            '-'
        }
    }

    pub fn price_text(&self) -> String {
        match self.price {
            Some(price) => format!("{:.2}", price),
            None => "--".to_string(),
        }
    }

    pub fn change_text(&self) -> String {
        match self.price {
            Some(_) => format!("Change: {}{:.2}", self.sign(), self.change.abs()),
            None => "--".to_string(),
        }
    }

    pub fn percent_text(&self) -> String {
        match self.price {
            Some(_) => format!("{}{:.2}%", self.sign(), self.change_percent.abs()),
            None => "--".to_string(),
        }
    }

    pub fn updated_text(&self) -> String {
        match self.updated_at {
            Some(at) => format!("Updated: {}", at.with_timezone(&Local).format("%H:%M:%S")),
            None => "Updated: --".to_string(),
        }
    }

    pub fn render(&self) -> String {
        let mut line = format!(
            "{:<12} {:>10}  {:<16} {:>8}  {}",
            self.symbol,
            self.price_text(),
            self.change_text(),
            self.percent_text(),
            self.updated_text()
        );
        if let Some(error) = &self.last_error {
            line.push_str(&format!("  [stale: {}]", error));
        }
        line
    }
}

/// Cards keyed by symbol, kept in watchlist order for rendering.
#[derive(Debug, Clone, Default)]
pub struct TickerBoard {
    order: Vec<String>,
    cards: HashMap<String, TickerCard>,
}

impl TickerBoard {
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut board = Self::default();
        for symbol in symbols {
            let symbol = symbol.as_ref();
            if board.cards.contains_key(symbol) {
                continue;
            }
            board.order.push(symbol.to_string());
            board.cards.insert(symbol.to_string(), TickerCard::new(symbol));
        }
        board
    }

    pub fn card(&self, symbol: &str) -> Option<&TickerCard> {
        self.cards.get(symbol)
    }

    pub fn cards(&self) -> impl Iterator<Item = &TickerCard> {
        self.order.iter().filter_map(|s| self.cards.get(s))
    }

    /// Update the card for `quote.symbol`. Symbols not on the board are
    /// ignored and return `None`.
    pub fn apply(&mut self, quote: &Quote) -> Option<PriceMove> {
        let card = self.cards.get_mut(&quote.symbol)?;

        let movement = match card.price {
            None => PriceMove::New,
            Some(prev) if quote.price > prev => PriceMove::Up,
            Some(prev) if quote.price < prev => PriceMove::Down,
            Some(_) => PriceMove::Unchanged,
        };

        card.price = Some(quote.price);
        card.change = quote.change;
        card.change_percent = quote.change_percent;
        card.updated_at = Some(quote.updated_at);
        card.last_error = None;

        Some(movement)
    }

    /// Record a failed fetch. The last known price stays on the card.
    pub fn mark_failed(&mut self, symbol: &str, error: &str) -> bool {
        match self.cards.get_mut(symbol) {
            Some(card) => {
                card.last_error = Some(error.to_string());
                true
            }
            None => false,
        }
    }

    pub fn apply_event(&mut self, event: &PollEvent) -> Option<PriceMove> {
        match event {
            PollEvent::Quote(quote) => self.apply(quote),
            PollEvent::Failed { symbol, error } => {
                self.mark_failed(symbol, error);
                None
            }
        }
    }

    pub fn render(&self) -> String {
        self.cards()
            .map(TickerCard::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
