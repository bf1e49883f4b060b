//! Font fallback chain configuration.
//!
//! Defines the priority order of system fonts tried when no font is
//! configured. The compiler targets complex scripts first, so families with
//! Lao and Thai coverage lead the list.

/// Fallback font families in priority order.
pub const FALLBACK_FAMILIES: &[&str] = &[
    // Lao
    "Noto Sans Lao",
    "Noto Sans Lao UI",
    "Noto Serif Lao",
    "Phetsarath OT",
    "Saysettha OT",
    "Lao Sangam MN",
    "DokChampa",
    // Thai (shares much of the mark-stacking behaviour)
    "Noto Sans Thai",
    "Thonburi",
    "Leelawadee UI",
    // General Unicode coverage
    "Noto Sans",
    "DejaVu Sans",
    "Arial Unicode MS",
];
