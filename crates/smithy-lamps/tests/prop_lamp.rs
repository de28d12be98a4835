use proptest::prelude::*;
use smithy_lamps::{FuelCatalog, Lamp, LampConfig};

const FUELS: &str = r#"
[fuels]
olive_oil = 8000
tallow = 1800
lava = 7
"#;

const CONFIG: LampConfig = LampConfig::new(250);

fn catalog() -> FuelCatalog {
    FuelCatalog::from_toml_str(FUELS).expect("catalog")
}

proptest! {
    // Settling the counter at arbitrary intermediate ticks never changes
    // what a single observation at the end would have reported.
    #[test]
    fn settling_is_transparent(
        fuel_idx in 0usize..3,
        amount in 1u32..=250,
        mut times in prop::collection::vec(0u64..200_000, 1..8),
    ) {
        times.sort_unstable();
        let cat = catalog();
        let id = cat.fuels[fuel_idx].id;
        let end = *times.last().expect("nonempty");

        let mut settled = Lamp::new();
        settled.fill(id, amount, CONFIG);
        settled.light(0);
        let mut observed = settled;

        for &t in &times {
            settled.check_run_out(&cat, t);
        }
        prop_assert_eq!(settled.fuel_after(&cat, end), observed.fuel_after(&cat, end));
        // Running dry is also observation-order independent.
        let dry_direct = observed.check_run_out(&cat, end);
        let dry_settled = settled.fuel().is_none();
        prop_assert_eq!(dry_settled, dry_direct);
    }

    // Fuel remaining never increases as time advances.
    #[test]
    fn burn_is_monotonic(
        fuel_idx in 0usize..3,
        amount in 1u32..=250,
        t1 in 0u64..1_000_000,
        dt in 0u64..1_000_000,
    ) {
        let cat = catalog();
        let id = cat.fuels[fuel_idx].id;
        let mut lamp = Lamp::new();
        lamp.fill(id, amount, CONFIG);
        lamp.light(0);
        prop_assert!(lamp.fuel_after(&cat, t1 + dt) <= lamp.fuel_after(&cat, t1));
    }
}
