// SPDX-License-Identifier: MIT
//
// HSL tokens — the `"H S% L%"` strings theme files and CSS custom
// properties carry (e.g. `--mood-calm: 200 78% 52%`).
//
// Parsing is deliberately lenient: the three numbers are pulled out with a
// regex wherever they appear, so `hsl(200 78% 52%)` and `200  78%   52%`
// both work. A string that has no such triple parses to black.

use std::sync::LazyLock;

use regex::Regex;

use crate::color::{Hsl, Oklch, normalize_hue};

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(-?\d+(?:\.\d+)?)\s+(-?\d+(?:\.\d+)?)%\s+(-?\d+(?:\.\d+)?)%")
        .unwrap_or_else(|e| unreachable!("token pattern is a literal: {e}"))
});

/// Extract an [`Hsl`] from a token, or `None` if the string holds no
/// `"H S% L%"` triple.
///
/// Values are returned as written; nothing is clamped or wrapped.
#[must_use]
pub fn try_parse_hsl_token(token: &str) -> Option<Hsl> {
    let caps = TOKEN_RE.captures(token)?;
    let num = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<f64>().ok());
    Some(Hsl::new(num(1)?, num(2)?, num(3)?))
}

/// Parse a token, falling back to black (`0 0% 0%`) when it is malformed.
///
/// ```
/// use mb_color::color::Hsl;
/// use mb_color::token::parse_hsl_token;
///
/// assert_eq!(parse_hsl_token("210 40% 98%"), Hsl::new(210.0, 40.0, 98.0));
/// assert_eq!(parse_hsl_token("not a color"), Hsl::BLACK);
/// ```
#[must_use]
pub fn parse_hsl_token(token: &str) -> Hsl {
    try_parse_hsl_token(token).unwrap_or(Hsl::BLACK)
}

/// Format an [`Hsl`] as a token.
///
/// Hue is rounded to a whole degree, saturation and lightness to one
/// decimal place: `"12 33.3% 50.5%"`.
#[must_use]
pub fn hsl_token(hsl: Hsl) -> String {
    // `+ 0.0` turns a rounded -0 into 0 so it never prints as "-0".
    let h = normalize_hue(hsl.h.round()) + 0.0;
    let round1 = |v: f64| (v * 10.0).round() / 10.0 + 0.0;
    format!("{h} {}% {}%", round1(hsl.s), round1(hsl.l))
}

/// Parse a token straight into OKLCH (through 8-bit sRGB).
#[must_use]
pub fn hsl_token_to_oklch(token: &str) -> Oklch {
    parse_hsl_token(token).to_oklch()
}

/// Format an OKLCH color as a token (through clamped 8-bit sRGB).
#[must_use]
pub fn oklch_to_hsl_token(oklch: Oklch) -> String {
    hsl_token(oklch.to_rgb().to_hsl())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use pretty_assertions::assert_eq;

    // ── Parsing ──────────────────────────────────────────────────────────

    #[test]
    fn parses_plain_token() {
        assert_eq!(parse_hsl_token("200 78% 52%"), Hsl::new(200.0, 78.0, 52.0));
    }

    #[test]
    fn parses_decimals_and_negatives() {
        assert_eq!(
            parse_hsl_token("-12.5 33.3% 50.25%"),
            Hsl::new(-12.5, 33.3, 50.25)
        );
    }

    #[test]
    fn tolerates_padding_and_wrappers() {
        assert_eq!(parse_hsl_token("  200   78%\t52%  "), Hsl::new(200.0, 78.0, 52.0));
        assert_eq!(parse_hsl_token("hsl(200 78% 52%)"), Hsl::new(200.0, 78.0, 52.0));
    }

    #[test]
    fn malformed_falls_back_to_black() {
        for bad in ["", "red", "200 78 52", "200, 78%, 52%", "#ff0000"] {
            assert_eq!(parse_hsl_token(bad), Hsl::BLACK, "{bad:?}");
            assert!(try_parse_hsl_token(bad).is_none(), "{bad:?}");
        }
        assert_eq!(parse_hsl_token("garbage").to_rgb(), Rgb::BLACK);
    }

    // ── Formatting ───────────────────────────────────────────────────────

    #[test]
    fn formats_integers_without_decimals() {
        assert_eq!(hsl_token(Hsl::new(210.0, 40.0, 98.0)), "210 40% 98%");
    }

    #[test]
    fn formats_with_rounding() {
        assert_eq!(hsl_token(Hsl::new(12.4, 33.333, 50.46)), "12 33.3% 50.5%");
        assert_eq!(hsl_token(Hsl::new(359.7, 0.0, 0.0)), "0 0% 0%");
        assert_eq!(hsl_token(Hsl::new(-0.2, -0.01, 0.0)), "0 0% 0%");
    }

    #[test]
    fn token_roundtrip() {
        let hsl = Hsl::new(165.0, 68.0, 48.0);
        assert_eq!(parse_hsl_token(&hsl_token(hsl)), hsl);
    }

    // ── OKLCH Convenience ────────────────────────────────────────────────

    #[test]
    fn token_to_oklch_and_back() {
        let oklch = hsl_token_to_oklch("0 0% 100%");
        assert!((oklch.l - 1.0).abs() < 1e-3);
        assert_eq!(oklch_to_hsl_token(oklch), "0 0% 100%");
    }

    #[test]
    fn oklch_token_stays_close() {
        let back = parse_hsl_token(&oklch_to_hsl_token(hsl_token_to_oklch("200 78% 52%")));
        assert!((back.h - 200.0).abs() <= 1.0, "{back:?}");
        assert!((back.s - 78.0).abs() <= 1.0, "{back:?}");
        assert!((back.l - 52.0).abs() <= 1.0, "{back:?}");
    }
}
