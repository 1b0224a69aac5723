//! Mount/unmount lifecycle of the whole backdrop.

use std::time::Duration;
use ticker_common::grid::TOTAL;
use ticker_common::symbols::SYMBOL_COUNT;
use ticker_common::{FixedRandom, SeededRandom, Symbol};
use ticker_engine::Backdrop;
use ticker_engine::model::quote::Direction;

#[test]
fn unmount_stops_every_cell() {
    let mut backdrop = Backdrop::mount(SeededRandom::from_seed(77));
    // land mid-flight so scramble sub-ticks and pop timers are pending
    let mut now = Duration::ZERO;
    while now < Duration::from_secs(3) || !backdrop.cell_states().iter().any(|s| s.scrambling) {
        now += Duration::from_millis(10);
        backdrop.advance_to(now);
    }
    assert!(backdrop.pending_timers() > TOTAL);

    let cancelled = backdrop.unmount();
    assert!(cancelled > TOTAL);
    assert_eq!(backdrop.pending_timers(), 0);
    assert!(!backdrop.is_mounted());

    let frozen = backdrop.cell_states();
    assert!(frozen.iter().all(|state| state.is_idle()));
    assert_eq!(backdrop.advance_to(now + Duration::from_secs(60)), 0);
    assert_eq!(backdrop.cell_states(), frozen);
    assert_eq!(backdrop.now(), now);
}

#[test]
fn fixed_draws_give_known_dataset() {
    let backdrop = Backdrop::mount(FixedRandom(0.5));
    for (index, quote) in backdrop.dataset().iter().enumerate() {
        assert_eq!(quote.symbol, Symbol::at((index * 7 + 16) % SYMBOL_COUNT));
        assert_eq!(quote.price, "2001.00");
        assert_eq!(quote.change, "+2.00%");
        assert_eq!(quote.direction, Direction::Up);
    }
}

#[test]
fn layout_is_stable_while_mounted() {
    let mut backdrop = Backdrop::mount(SeededRandom::from_seed(12));
    let before = backdrop.layouts().to_vec();
    let first = backdrop.frame();
    backdrop.advance_to(Duration::from_secs(5));
    assert_eq!(backdrop.layouts(), &before[..]);
    let later = backdrop.frame();
    for (a, b) in first.cells.iter().zip(later.cells.iter()) {
        assert_eq!((a.left_pct, a.top_pct), (b.left_pct, b.top_pct));
        assert_eq!(a.blur_class, b.blur_class);
    }
}

#[test]
fn frame_serializes_to_json() {
    let mut backdrop = Backdrop::mount(FixedRandom(0.5));
    backdrop.advance_to(Duration::from_millis(1_250));
    let json = serde_json::to_value(backdrop.frame()).unwrap();
    assert_eq!(json["elapsed_ms"], 1_250);
    assert_eq!(json["grid"]["cols"], 24);
    assert_eq!(json["grid"]["rows"], 20);
    let cells = json["cells"].as_array().unwrap();
    assert_eq!(cells.len(), TOTAL);
    assert_eq!(cells[0]["text"]["direction"], "up");
    assert_eq!(cells[0]["text"]["price"], "$2,001");
    assert!(cells[0]["pose"]["opacity"].is_number());
}
