//! Page-level extraction: table rows first, card blocks only when the table yields nothing.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};

use crate::assemble::{assemble, Candidate};
use crate::constants::{TABLE_CELL_SELECTOR, TABLE_ROW_SELECTOR};
use crate::date::find_date;
use crate::strategy::StrategyChain;
use crate::text::{block_text, cell_text};
use crate::types::ListingKind;

pub mod fixtures;
pub mod results;

pub type RowStrategies<C> = StrategyChain<[String], C>;
pub type CardStrategies<C> = StrategyChain<str, C>;

/// Which tier produced the records of an extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    TableRows,
    CardBlocks,
    /// Neither tier produced a valid record.
    Empty,
}

#[derive(Debug)]
pub struct Extraction<R> {
    pub records: Vec<R>,
    pub tier: Tier,
    /// Rows and cards that were seen but did not become records.
    pub skipped: usize,
}

pub struct Extractor<C> {
    kind: ListingKind,
    rows: RowStrategies<C>,
    cards: CardStrategies<C>,
    row_selector: Selector,
    cell_selector: Selector,
    card_selector: Selector,
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("hard-coded selector is valid")
}

impl<C: Candidate> Extractor<C> {
    pub fn new(
        kind: ListingKind,
        card_selector: &str,
        rows: RowStrategies<C>,
        cards: CardStrategies<C>,
    ) -> Self {
        Self {
            kind,
            rows,
            cards,
            row_selector: selector(TABLE_ROW_SELECTOR),
            cell_selector: selector(TABLE_CELL_SELECTOR),
            card_selector: selector(card_selector),
        }
    }

    pub fn kind(&self) -> ListingKind {
        self.kind
    }

    pub fn extract(&self, html: &str) -> Extraction<C::Record> {
        let document = Html::parse_document(html);

        let (candidates, declined) = self.table_rows(&document);
        let assembly = assemble(candidates);
        let mut skipped = declined + assembly.skipped;
        if !assembly.records.is_empty() {
            info!(kind = %self.kind, records = assembly.records.len(), skipped, "Extracted from table rows");
            return Extraction {
                records: assembly.records,
                tier: Tier::TableRows,
                skipped,
            };
        }

        debug!(kind = %self.kind, strategies = ?self.cards.names(), "No valid table rows; falling back to card blocks");
        let (candidates, declined) = self.card_blocks(&document);
        let assembly = assemble(candidates);
        skipped += declined + assembly.skipped;
        if !assembly.records.is_empty() {
            info!(kind = %self.kind, records = assembly.records.len(), skipped, "Extracted from card blocks");
            return Extraction {
                records: assembly.records,
                tier: Tier::CardBlocks,
                skipped,
            };
        }

        warn!(kind = %self.kind, skipped, "No records found - the page structure may have changed");
        Extraction {
            records: Vec::new(),
            tier: Tier::Empty,
            skipped,
        }
    }

    fn table_rows(&self, document: &Html) -> (Vec<C>, usize) {
        let mut candidates = Vec::new();
        let mut declined = 0;
        for row in document.select(&self.row_selector) {
            let cells: Vec<String> = row
                .select(&self.cell_selector)
                .map(|cell| cell_text(&cell))
                .collect();
            // header rows carry only <th>
            if cells.is_empty() {
                continue;
            }
            match self.rows.first_match(&cells[..]) {
                Some(candidate) => candidates.push(candidate),
                None => {
                    debug!(kind = %self.kind, cells = cells.len(), "Skipping unrecognized table row");
                    declined += 1;
                }
            }
        }
        (candidates, declined)
    }

    fn card_blocks(&self, document: &Html) -> (Vec<C>, usize) {
        let mut candidates = Vec::new();
        let declined: usize = document
            .select(&self.card_selector)
            .filter(|block| self.is_outermost_card(block, None))
            .map(|block| self.card_block(block, &mut candidates))
            .sum();
        (candidates, declined)
    }

    /// Reads one card block, returning how many blocks were declined.
    ///
    /// A block holding two or more dated cards is a list and only its cards are read.
    /// Otherwise the block's own text is tried first and its inner cards only when that fails.
    fn card_block(&self, block: ElementRef, candidates: &mut Vec<C>) -> usize {
        let inner: Vec<ElementRef> = block
            .select(&self.card_selector)
            .filter(|card| self.is_outermost_card(card, Some(&block)))
            .collect();

        let dated = inner
            .iter()
            .filter(|card| find_date(&block_text(card)).is_some())
            .count();
        if dated >= 2 {
            debug!(kind = %self.kind, cards = inner.len(), "Reading cards of a card list");
            return inner
                .into_iter()
                .map(|card| self.card_block(card, candidates))
                .sum();
        }

        let text = block_text(&block);
        if let Some(candidate) = self.cards.first_match(text.as_str()) {
            candidates.push(candidate);
            return 0;
        }

        let mut nested = Vec::new();
        let declined: usize = inner
            .into_iter()
            .map(|card| self.card_block(card, &mut nested))
            .sum();
        if nested.is_empty() {
            debug!(kind = %self.kind, text = %text, "Skipping unrecognized card block");
            1
        } else {
            candidates.append(&mut nested);
            declined
        }
    }

    /// True when no card-selector match lies between `card` and `scope` (or the document root).
    fn is_outermost_card(&self, card: &ElementRef, scope: Option<&ElementRef>) -> bool {
        for ancestor in card.ancestors() {
            if scope.is_some_and(|scope| scope.id() == ancestor.id()) {
                return true;
            }
            if ElementRef::wrap(ancestor).is_some_and(|el| self.card_selector.matches(&el)) {
                return false;
            }
        }
        true
    }
}
