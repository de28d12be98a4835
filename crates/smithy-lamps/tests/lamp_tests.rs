use smithy_lamps::{FuelCatalog, Lamp, LampConfig};

const FUELS: &str = r#"
[fuels]
olive_oil = 8000
tallow = { burn_rate = 1800 }
lava = 1
"#;

const CONFIG: LampConfig = LampConfig::new(250);

fn catalog() -> FuelCatalog {
    FuelCatalog::from_toml_str(FUELS).expect("catalog")
}

#[test]
fn catalog_assigns_ids_by_sorted_key() {
    let cat = catalog();
    let keys: Vec<&str> = cat.fuels.iter().map(|f| f.key.as_str()).collect();
    assert_eq!(keys, vec!["lava", "olive_oil", "tallow"]);
    let oil = cat.get_id("olive_oil").unwrap();
    assert_eq!(cat.burn_rate(oil), Some(8000));
}

#[test]
fn zero_burn_rate_is_an_error() {
    let err = FuelCatalog::from_toml_str("[fuels]\nwater = 0\n").unwrap_err();
    assert!(err.to_string().contains("burn_rate"));
}

#[test]
fn fill_clamps_at_capacity() {
    let cat = catalog();
    let oil = cat.get_id("olive_oil").unwrap();
    let mut lamp = Lamp::new();
    assert_eq!(lamp.fill(oil, 100, CONFIG), 100);
    assert_eq!(lamp.fill(oil, 1000, CONFIG), 150);
    assert_eq!(lamp.fuel(), Some((oil, 250)));
    assert_eq!(lamp.fill(oil, 1, CONFIG), 0);
}

#[test]
fn fill_rejects_mixed_fluids_and_lit_lamps() {
    let cat = catalog();
    let oil = cat.get_id("olive_oil").unwrap();
    let tallow = cat.get_id("tallow").unwrap();
    let mut lamp = Lamp::new();
    lamp.fill(oil, 50, CONFIG);
    assert_eq!(lamp.fill(tallow, 50, CONFIG), 0);
    assert!(lamp.light(0));
    assert_eq!(lamp.fill(oil, 50, CONFIG), 0);
    assert_eq!(lamp.fuel(), Some((oil, 50)));
}

#[test]
fn empty_lamp_cannot_be_lit() {
    let mut lamp = Lamp::new();
    assert!(!lamp.light(0));
    assert!(!lamp.is_lit());
}

#[test]
fn unlit_lamp_never_consumes() {
    let cat = catalog();
    let oil = cat.get_id("olive_oil").unwrap();
    let mut lamp = Lamp::new();
    lamp.fill(oil, 100, CONFIG);
    assert_eq!(lamp.fuel_after(&cat, 1_000_000), 100);
    assert!(!lamp.check_run_out(&cat, 1_000_000));
    assert_eq!(lamp.fuel(), Some((oil, 100)));
}

#[test]
fn burn_down_is_integer_exact() {
    let cat = catalog();
    let oil = cat.get_id("olive_oil").unwrap();
    let mut lamp = Lamp::new();
    lamp.fill(oil, 100, CONFIG);
    lamp.light(0);
    // 8000 ticks per mB: 7999 ticks burn nothing.
    assert_eq!(lamp.fuel_after(&cat, 7_999), 100);
    assert_eq!(lamp.fuel_after(&cat, 8_000), 99);
    assert_eq!(lamp.fuel_after(&cat, 80_000), 90);
}

#[test]
fn settling_carries_partial_burn() {
    let cat = catalog();
    let oil = cat.get_id("olive_oil").unwrap();
    let mut lamp = Lamp::new();
    lamp.fill(oil, 100, CONFIG);
    lamp.light(0);
    // Settle mid-mB: 12000 ticks is 1 mB consumed plus 4000 ticks toward
    // the next. The counter must not forget those 4000 ticks.
    assert!(!lamp.check_run_out(&cat, 12_000));
    assert_eq!(lamp.fuel(), Some((oil, 99)));
    assert_eq!(lamp.fuel_after(&cat, 16_000), 98);
}

#[test]
fn running_dry_extinguishes() {
    let cat = catalog();
    let lava = cat.get_id("lava").unwrap();
    let mut lamp = Lamp::new();
    lamp.fill(lava, 10, CONFIG);
    lamp.light(100);
    assert!(!lamp.check_run_out(&cat, 105));
    assert!(lamp.is_lit());
    assert!(lamp.check_run_out(&cat, 200));
    assert!(!lamp.is_lit());
    assert_eq!(lamp.fuel(), None);
}

#[test]
fn quench_keeps_remaining_fuel() {
    let cat = catalog();
    let oil = cat.get_id("olive_oil").unwrap();
    let mut lamp = Lamp::new();
    lamp.fill(oil, 100, CONFIG);
    lamp.light(0);
    lamp.quench(&cat, 16_000);
    assert!(!lamp.is_lit());
    assert_eq!(lamp.fuel(), Some((oil, 98)));
    // Relighting starts a fresh counter.
    assert!(lamp.light(20_000));
    assert_eq!(lamp.fuel_after(&cat, 27_999), 98);
}
