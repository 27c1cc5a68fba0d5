//! A cart written on one page load and read back on the next.

use bijou_cache::{KeyValueStore, MemoryStore};
use bijou_commerce::prelude::*;

fn shipping() -> Money {
    Money::parse_lenient("4.90", Currency::EUR)
}

#[test]
fn merged_add_matches_the_storefront_example() {
    let mut store = CartStore::new(MemoryStore::new(), DEFAULT_CART_KEY, Currency::EUR);
    store.add("Ring A", 49.99, "7", 2, "/shop/ring-a").unwrap();
    store.add("Ring A", 49.99, "7", 1, "/shop/ring-a").unwrap();

    let cart = store.cart();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.items()[0].quantity, 3);
    assert_eq!(
        cart.items()[0].line_total().unwrap().display_trailing(),
        "149.97\u{20ac}"
    );
}

#[test]
fn reload_reproduces_contents_and_totals() {
    let storage = MemoryStore::new();

    let mut first_visit = CartStore::new(storage.clone(), DEFAULT_CART_KEY, Currency::EUR);
    first_visit.add("Eternity Band", 349.0, "6", 1, "/shop/eternity").unwrap();
    first_visit.add("Ring A", 49.99, "7", 2, "/shop/ring-a").unwrap();
    first_visit.add("Ring A", 49.99, "8", 1, "/shop/ring-a").unwrap();
    first_visit.remove(0).unwrap();
    let before = first_visit.cart().totals(shipping()).unwrap();

    let mut second_visit = CartStore::new(storage, DEFAULT_CART_KEY, Currency::EUR);
    assert_eq!(second_visit.load().unwrap(), 2);
    let after = second_visit.cart().totals(shipping()).unwrap();

    assert_eq!(second_visit.cart(), first_visit.cart());
    assert_eq!(after, before);
    assert_eq!(after.item_total.display_amount(), "149.97");
    assert_eq!(after.grand_total.display_amount(), "154.87");
    assert_eq!(after.item_count, 3);
}

#[test]
fn carts_written_by_the_old_page_script_still_load() {
    let storage = MemoryStore::new();
    storage
        .set_raw(
            DEFAULT_CART_KEY,
            r#"[{"name":"Ring A","price":49.99,"ringSize":7,"quantity":3,"link":"https://shop.example/ring-a"}]"#,
        )
        .unwrap();

    let mut store = CartStore::new(storage, DEFAULT_CART_KEY, Currency::EUR);
    store.load().unwrap();
    store.add("Ring A", 49.99, "7", 1, "").unwrap();

    assert_eq!(store.cart().len(), 1);
    assert_eq!(store.cart().items()[0].quantity, 4);
}

#[test]
fn clear_leaves_nothing_behind() {
    let storage = MemoryStore::new();
    let mut store = CartStore::new(storage.clone(), DEFAULT_CART_KEY, Currency::EUR);
    store.add("Ring A", 49.99, "7", 1, "").unwrap();
    store.clear().unwrap();

    let mut reloaded = CartStore::new(storage, DEFAULT_CART_KEY, Currency::EUR);
    assert_eq!(reloaded.load().unwrap(), 0);
    assert!(reloaded.cart().is_empty());
}
