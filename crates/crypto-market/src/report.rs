//! Chat report rendering
//!
//! Output is Telegram HTML: every piece of provider or model text is escaped
//! before it is spliced in.

use std::fmt::Write as _;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::model::MarketSnapshot;

pub const NOT_FOUND_MESSAGE: &str =
    "❌ Sorry, I couldn't find that crypto symbol. Try common ones like BTC, ETH, SOL, etc.";

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━";

/// Magnitude suffixes, largest first
const SCALES: [(Decimal, &str); 3] = [
    (dec!(1000000000), "B"),
    (dec!(1000000), "M"),
    (dec!(1000), "K"),
];

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `$1.50B`, `$2.50M`, `$12.00K`, `$999.00`
pub fn format_large_number(value: Decimal) -> String {
    SCALES
        .iter()
        .find(|(threshold, _)| value >= *threshold)
        .map_or_else(
            || format!("${:.2}", round2(value)),
            |(threshold, suffix)| format!("${:.2}{suffix}", round2(value / *threshold)),
        )
}

/// Two-decimal currency with thousands separators: `$97,500.00`
pub fn format_price(value: Decimal) -> String {
    let fixed = format!("{:.2}", round2(value));
    let (sign, digits) = fixed
        .strip_prefix('-')
        .map_or(("", fixed.as_str()), |rest| ("-", rest));
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}.{frac_part}")
}

/// Direction of the 24h move
pub fn change_arrow(change_24h: Decimal) -> &'static str {
    if change_24h > Decimal::ZERO {
        "↑"
    } else if change_24h < Decimal::ZERO {
        "↓"
    } else {
        "→"
    }
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render a snapshot, or the not-found message when there is none
pub fn render_report(snapshot: Option<&MarketSnapshot>) -> String {
    let Some(s) = snapshot else {
        return NOT_FOUND_MESSAGE.to_string();
    };

    let rank = s
        .market_cap_rank
        .map_or_else(|| "N/A".to_string(), |r| r.to_string());

    let mut out = String::new();
    let _ = writeln!(out, "📊 <b>{} ({})</b>", escape_html(&s.name), escape_html(&s.symbol));
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "💰 <b>Current Price:</b> {}", format_price(s.current_price));
    let _ = writeln!(
        out,
        "📈 <b>24h Change:</b> {} {:.2}%",
        change_arrow(s.change_24h),
        round2(s.change_24h)
    );
    let _ = writeln!(
        out,
        "📊 <b>24h High/Low:</b> {} / {}",
        format_price(s.high_24h),
        format_price(s.low_24h)
    );
    let _ = writeln!(
        out,
        "💎 <b>Market Cap:</b> {} (Rank #{rank})",
        format_large_number(s.market_cap)
    );
    let _ = writeln!(out, "📦 <b>24h Volume:</b> {}", format_large_number(s.total_volume));
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "🎯 <b>Sentiment:</b> {}", s.sentiment);

    if let Some(analysis) = &s.analysis {
        let _ = write!(out, "\n🧠 <i>QuillCheck Analysis:</i>\n{}\n", escape_html(analysis));
    }

    out.push_str("\n💡 <i>Powered by Sentient Bot with real-time data</i>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sentiment;

    fn btc() -> MarketSnapshot {
        let mut s = MarketSnapshot::new("Bitcoin", "btc", dec!(97500)).with_change(dec!(3.2));
        s.market_cap = dec!(1930000000000);
        s.total_volume = dec!(25400000000);
        s.high_24h = dec!(98123.456);
        s.low_24h = dec!(94001);
        s.market_cap_rank = Some(1);
        s
    }

    #[test]
    fn test_format_large_number() {
        assert_eq!(format_large_number(dec!(1500000000)), "$1.50B");
        assert_eq!(format_large_number(dec!(2500000)), "$2.50M");
        assert_eq!(format_large_number(dec!(12000)), "$12.00K");
        assert_eq!(format_large_number(dec!(1000)), "$1.00K");
        assert_eq!(format_large_number(dec!(999)), "$999.00");
        assert_eq!(format_large_number(dec!(0)), "$0.00");
        assert_eq!(format_large_number(dec!(1930000000000)), "$1930.00B");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(dec!(97500)), "$97,500.00");
        assert_eq!(format_price(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_price(dec!(0.38)), "$0.38");
        assert_eq!(format_price(dec!(0)), "$0.00");
        assert_eq!(format_price(dec!(999.995)), "$1,000.00");
        assert_eq!(format_price(dec!(-1500)), "-$1,500.00");
    }

    #[test]
    fn test_change_arrow() {
        assert_eq!(change_arrow(dec!(3.2)), "↑");
        assert_eq!(change_arrow(dec!(-1.0)), "↓");
        assert_eq!(change_arrow(dec!(0)), "→");
    }

    #[test]
    fn test_not_found() {
        assert_eq!(render_report(None), NOT_FOUND_MESSAGE);
    }

    #[test]
    fn test_report_lines() {
        let report = render_report(Some(&btc()));

        assert!(report.starts_with("📊 <b>Bitcoin (BTC)</b>\n"));
        assert!(report.contains("💰 <b>Current Price:</b> $97,500.00\n"));
        assert!(report.contains("📈 <b>24h Change:</b> ↑ 3.20%\n"));
        assert!(report.contains("📊 <b>24h High/Low:</b> $98,123.46 / $94,001.00\n"));
        assert!(report.contains("💎 <b>Market Cap:</b> $1930.00B (Rank #1)\n"));
        assert!(report.contains("📦 <b>24h Volume:</b> $25.40B\n"));
        assert!(report.contains("🎯 <b>Sentiment:</b> 📈 Bullish\n"));
        assert!(!report.contains("QuillCheck"));
        assert!(report.ends_with("Powered by Sentient Bot with real-time data</i>"));
    }

    #[test]
    fn test_report_with_analysis_is_escaped() {
        let snapshot = btc().with_analysis("Support <90k> & rising");
        let report = render_report(Some(&snapshot));
        assert!(report.contains("🧠 <i>QuillCheck Analysis:</i>\nSupport &lt;90k&gt; &amp; rising\n"));
    }

    #[test]
    fn test_report_flat_and_unranked() {
        let mut snapshot = MarketSnapshot::new("Tiny", "tny", dec!(0.0001));
        snapshot.market_cap_rank = None;
        let report = render_report(Some(&snapshot));

        assert_eq!(snapshot.sentiment, Sentiment::SlightlyBearish);
        assert!(report.contains("→ 0.00%"));
        assert!(report.contains("(Rank #N/A)"));
    }
}
