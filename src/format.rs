//! Display formatting for market data.
//!
//! Pure string builders. Missing numeric fields render as omitted lines, never
//! as errors, so a sparse provider response still produces a usable reply.

use crate::market::models::{MarketEntry, PriceSnapshot, SearchHit};

/// Quote currency for price rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    Usd,
    Try,
}

impl Currency {
    fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Try => "₺",
        }
    }
}

/// Insert thousands separators into the integer part of an already formatted
/// decimal string.
fn group_thousands(value: &str) -> String {
    let (int_part, frac_part) = match value.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (value, None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Two decimals with separators at unit scale and above, six decimals below
/// one unit so sub-unit assets keep their precision.
pub fn format_price(price: f64, currency: Currency) -> String {
    let symbol = currency.symbol();
    if price >= 1.0 {
        format!("{symbol}{}", group_thousands(&format!("{price:.2}")))
    } else {
        format!("{symbol}{price:.6}")
    }
}

/// Percentage change with a trend marker: explicit `+` when rising, the bare
/// negative sign when falling, a flat marker at exactly zero.
pub fn format_percentage(change: f64) -> String {
    if change > 0.0 {
        format!("📈 +%{change:.2}")
    } else if change < 0.0 {
        format!("📉 %{change:.2}")
    } else {
        format!("➡️ %{change:.2}")
    }
}

/// Scale to the largest applicable unit; below one million an unscaled
/// integer with separators.
pub fn format_market_cap(value: f64) -> String {
    if value >= 1_000_000_000_000.0 {
        format!("${:.2}T", value / 1_000_000_000_000.0)
    } else if value >= 1_000_000_000.0 {
        format!("${:.2}B", value / 1_000_000_000.0)
    } else if value >= 1_000_000.0 {
        format!("${:.2}M", value / 1_000_000.0)
    } else {
        format!("${}", group_thousands(&format!("{value:.0}")))
    }
}

pub fn format_volume(value: f64) -> String {
    format_market_cap(value)
}

/// Multi-line price reply for one asset. `query` is the user's token, shown
/// uppercased as the title.
pub fn snapshot_message(snapshot: &PriceSnapshot, query: &str) -> String {
    let mut message = format!("💰 **{} Fiyat Bilgileri**\n\n", query.to_uppercase());

    message.push_str(&format!(
        "💵 **Fiyat:** {}\n",
        format_price(snapshot.usd.unwrap_or(0.0), Currency::Usd)
    ));

    if let Some(try_price) = snapshot.try_price.filter(|price| *price != 0.0) {
        message.push_str(&format!(
            "🇹🇷 **TL:** {}\n",
            format_price(try_price, Currency::Try)
        ));
    }

    message.push_str(&format!(
        "📊 **24s Değişim:** {}\n",
        format_percentage(snapshot.change_24h.unwrap_or(0.0))
    ));

    if let Some(market_cap) = snapshot.market_cap.filter(|cap| *cap != 0.0) {
        message.push_str(&format!(
            "🏪 **Piyasa Değeri:** {}\n",
            format_market_cap(market_cap)
        ));
    }

    if let Some(volume) = snapshot.volume_24h.filter(|volume| *volume != 0.0) {
        message.push_str(&format!("📈 **24s Hacim:** {}\n", format_volume(volume)));
    }

    message.push_str("\n🕐 _Güncelleme: Şimdi_");
    message
}

/// Numbered top-by-market-cap listing.
pub fn ranked_message(entries: &[MarketEntry]) -> String {
    let mut message = String::from("🏆 **Top 10 Kripto Para**\n\n");

    for (idx, entry) in entries.iter().enumerate() {
        let change = entry.change_24h();
        let icon = if change > 0.0 {
            "📈"
        } else if change < 0.0 {
            "📉"
        } else {
            "➡️"
        };

        message.push_str(&format!(
            "{}. **{} ({})**\n",
            idx + 1,
            entry.name,
            entry.symbol.to_uppercase()
        ));
        message.push_str(&format!(
            "   💰 {} {icon} %{change:.2}\n\n",
            format_price(entry.price(), Currency::Usd)
        ));
    }

    message.push_str("🕐 _Güncelleme: Şimdi_");
    message
}

/// Numbered 1-hour gainers listing.
pub fn gainers_message(entries: &[MarketEntry]) -> String {
    let mut message = String::from("🚀 **Son 1 Saatte En Çok Yükselen 5 Coin:**\n\n");

    for (idx, entry) in entries.iter().enumerate() {
        message.push_str(&format!(
            "{}. **{}**: +%{:.2} | ${:.4}\n",
            idx + 1,
            entry.symbol.to_uppercase(),
            entry.change_1h(),
            entry.price()
        ));
    }

    message.push_str("\n🕐 _Güncelleme: Şimdi_");
    message
}

/// Bulleted search results with a usage hint.
pub fn search_message(hits: &[SearchHit]) -> String {
    let mut message = String::from("🔍 **Arama Sonuçları:**\n\n");

    for hit in hits {
        message.push_str(&format!("• **{} ({})**\n", hit.name, hit.symbol.to_uppercase()));
    }

    message.push_str("\n💡 Fiyat öğrenmek için: `/fiyat <coin ismi>`");
    message
}
