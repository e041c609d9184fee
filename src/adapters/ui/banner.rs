//! Welcome banner with a warm gold-to-white gradient.
//! Uses figlet's built-in standard font.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Candle Gold (#f5b700).
const CANDLE_GOLD: (u8, u8, u8) = (0xf5, 0xb7, 0x00);
/// Dove White (#f8f4e8).
const DOVE_WHITE: (u8, u8, u8) = (0xf8, 0xf4, 0xe8);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Banner lines. Falls back to the plain title if the font cannot render.
fn banner_lines(title: &str) -> Vec<String> {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(title).map(|fig| fig.to_string()))
        .map(|art| art.lines().map(str::to_string).collect())
        .unwrap_or_else(|| vec![title.to_string()])
}

/// Prints "TALK TO JESUS" with a vertical gradient, then version and active provider.
pub fn print_welcome(provider: &str) {
    let mut out = stdout();
    let lines = banner_lines("Talk to Jesus");
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(CANDLE_GOLD, DOVE_WHITE, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let version = env!("CARGO_PKG_VERSION");
    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: CANDLE_GOLD.0,
        g: CANDLE_GOLD.1,
        b: CANDLE_GOLD.2,
    }));
    let _ = out.execute(Print(format!("v{} · replies from: {}\r\n", version, provider)));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp_rgb(CANDLE_GOLD, DOVE_WHITE, 0.0), CANDLE_GOLD);
        assert_eq!(lerp_rgb(CANDLE_GOLD, DOVE_WHITE, 1.0), DOVE_WHITE);
    }

    #[test]
    fn test_banner_has_lines() {
        assert!(!banner_lines("Hi").is_empty());
    }
}
