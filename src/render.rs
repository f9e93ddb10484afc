//! Server-side markup for the coin grid and the replacement dialog
//!
//! Pure functions of (coins, selection). Element ids and data attributes
//! are the contract with the dashboard script:
//! - `switch-{id}` / `.coin-switch[data-coin-id]` - selection toggle
//! - `.more-info-btn[data-coin-id]` - detail toggle
//! - `collapse-{id}` - detail panel, starts collapsed and empty
//! - `price-{usd,eur,ils}-{id}` - price slots
//! - `.modal-coin-switch[data-coin-id]` - keep switch in the dialog

use htmlescape::{encode_attribute, encode_minimal};

use crate::catalog::{Coin, SearchResult};
use crate::replacement::{Mark, PendingReplacement};
use crate::selection::SelectionSet;

/// Shown instead of an empty grid when a search matches nothing
pub const NO_MATCHES_HTML: &str = r#"<h2 class="no-matches">No coins found</h2>"#;

/// Render the grid for a search result
pub fn render_search(result: &SearchResult<'_>, selection: &SelectionSet) -> String {
    match result {
        SearchResult::Matches(coins) => render_grid(coins, selection),
        SearchResult::NoMatches => NO_MATCHES_HTML.to_string(),
    }
}

/// One card per coin, switches pre-set from the selection
pub fn render_grid(coins: &[&Coin], selection: &SelectionSet) -> String {
    coins
        .iter()
        .map(|coin| render_card(coin, selection.contains(&coin.id)))
        .collect()
}

fn render_card(coin: &Coin, checked: bool) -> String {
    let id = encode_attribute(&coin.id);
    let image = encode_attribute(&coin.image);
    let name = encode_minimal(&coin.name);
    let symbol = encode_minimal(&coin.symbol);
    let checked = if checked { " checked" } else { "" };

    format!(
        r#"
        <div class="coin-card" id="card-{id}">
            <label class="switch">
                <input type="checkbox" class="coin-switch" id="switch-{id}" data-coin-id="{id}"{checked}>
                <span class="slider"></span>
            </label>
            <img src="{image}" alt="{name}" class="coin-image" loading="lazy">
            <h5 class="coin-name">{name}</h5>
            <p class="coin-symbol">Symbol: {symbol}</p>
            <button class="btn btn-primary more-info-btn" data-coin-id="{id}">More Info</button>
            <div class="collapse" id="collapse-{id}">
                <div class="price-row"><span class="currency">$</span> <span id="price-usd-{id}"></span></div>
                <div class="price-row"><span class="currency">€</span> <span id="price-eur-{id}"></span></div>
                <div class="price-row"><span class="currency">₪</span> <span id="price-ils-{id}"></span></div>
            </div>
        </div>"#
    )
}

/// Dialog body: the pinned coins, each with a keep switch
pub fn render_replacement(pending: &PendingReplacement) -> String {
    let candidate = encode_minimal(&pending.candidate.name);
    let cards: String = pending
        .choices
        .iter()
        .map(|choice| {
            let id = encode_attribute(&choice.coin.id);
            let image = encode_attribute(&choice.coin.image);
            let name = encode_minimal(&choice.coin.name);
            let symbol = encode_minimal(&choice.coin.symbol);
            let checked = if choice.mark == Mark::Keep { " checked" } else { "" };
            format!(
                r#"
            <div class="coin-card">
                <label class="switch">
                    <input type="checkbox" class="modal-coin-switch" data-coin-id="{id}"{checked}>
                    <span class="slider"></span>
                </label>
                <img src="{image}" alt="{name}" class="coin-image">
                <h5 class="coin-name">{name}</h5>
                <p class="coin-symbol">Symbol: {symbol}</p>
            </div>"#
            )
        })
        .collect();

    format!(
        r#"
        <p class="modal-hint">You can follow up to 5 coins. Switch off one coin to make room for <strong>{candidate}</strong>.</p>
        <div class="modal-grid">{cards}
        </div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::replacement::ReplacementWorkflow;
    use crate::testing::{coin, six_coins};

    #[test]
    fn test_card_reflects_selection() {
        let coins = six_coins();
        let mut selection = SelectionSet::new();
        selection.toggle(&coins[1], true);

        let refs: Vec<&Coin> = coins.iter().take(2).collect();
        let html = render_grid(&refs, &selection);

        assert_eq!(html.matches("class=\"coin-card\"").count(), 2);
        assert!(html.contains(r#"id="switch-bitcoin" data-coin-id="bitcoin">"#));
        assert!(html.contains(r#"id="switch-ethereum" data-coin-id="ethereum" checked>"#));
        assert!(html.contains(r#"id="collapse-bitcoin""#));
        assert!(html.contains(r#"id="price-ils-ethereum""#));
    }

    #[test]
    fn test_grid_keeps_order() {
        let coins = six_coins();
        let refs: Vec<&Coin> = coins.iter().collect();
        let html = render_grid(&refs, &SelectionSet::new());

        let btc = html.find("card-bitcoin").unwrap();
        let ltc = html.find("card-litecoin").unwrap();
        assert!(btc < ltc);
    }

    #[test]
    fn test_no_matches_state() {
        let catalog = Catalog::new(six_coins());
        let html = render_search(&catalog.search("xyz"), &SelectionSet::new());
        assert_eq!(html, NO_MATCHES_HTML);
        assert!(!html.contains("coin-card"));
    }

    #[test]
    fn test_text_is_escaped() {
        let evil = coin("x\"><script>", "<b>", "Evil & Co");
        let html = render_grid(&[&evil], &SelectionSet::new());

        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("Evil &amp; Co"));
    }

    #[test]
    fn test_dialog_lists_selection() {
        let coins = six_coins();
        let mut selection = SelectionSet::new();
        for c in &coins[..5] {
            selection.toggle(c, true);
        }
        let mut workflow = ReplacementWorkflow::new();
        workflow.open(&coins[5], &selection);

        let html = render_replacement(workflow.pending().unwrap());
        assert_eq!(html.matches("modal-coin-switch").count(), 5);
        assert_eq!(html.matches(" checked>").count(), 5);
        assert!(html.contains("<strong>Litecoin</strong>"));
    }
}
