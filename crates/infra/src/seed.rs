//! Demonstration stock loaded into a fresh yard.

/// (warehouse name, [(specification key, volume in 方)]).
pub type SeedWarehouse = (&'static str, &'static [(&'static str, f64)]);

pub const DEMO_STOCK: &[SeedWarehouse] = &[
    (
        "仓位 A",
        &[("1.220×2.440×0.018", 3.216), ("1.830×0.915×0.009", 1.235)],
    ),
    ("仓位 B", &[("1.220×2.440×0.015", 5.781)]),
    (
        "仓位 C",
        &[("1.220×2.440×0.025", 2.120), ("1.830×0.915×0.012", 0.938)],
    ),
    (
        "仓位 D",
        &[("1.220×2.440×0.030", 4.520), ("1.830×0.915×0.018", 1.562)],
    ),
    (
        "仓位 E",
        &[("1.220×2.440×0.020", 2.890), ("1.830×0.915×0.025", 2.305)],
    ),
];
