// SPDX-License-Identifier: MIT
//
// mb-color — Color math for the moodbloom engine.
//
// Three pieces, bottom-up:
//
//   color  — Rgb / Hsl / Oklab / Oklch and the conversions between them,
//            hue arithmetic, legacy WCAG luminance.
//   token  — the "H S% L%" string form themes are authored in.
//   apca   — APCA lightness contrast (Lc), the metric every text search
//            in mb-engine scores against.
//
// Nothing here allocates beyond token formatting and nothing here can
// fail: malformed tokens parse to black, NaN collapses to 0, and
// out-of-gamut colors clamp on their way to 8-bit sRGB.

pub mod apca;
pub mod color;
pub mod token;

pub use apca::{Apca, ContrastMetric, apca_lc};
pub use color::{Hsl, Oklab, Oklch, Rgb};
pub use token::{hsl_token, hsl_token_to_oklch, oklch_to_hsl_token, parse_hsl_token, try_parse_hsl_token};
