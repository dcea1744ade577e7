//! User-facing message templates.
//!
//! All strings the bot sends that are not built from market data live here,
//! in the Markdown flavor the chat transport renders.

pub const WELCOME: &str = "\
🔍 **Kripto Radar Botu'na hoş geldin!** 🚀

Bu bot ile kripto para fiyatlarını takip edebilirsin:

📊 **Komutlar:**
• `/fiyat <coin>` - Belirli bir kripto paranın fiyatını öğren
• `/btc` - Bitcoin fiyatı
• `/eth` - Ethereum fiyatı
• `/top10` - En popüler 10 kripto para
• `/ara <isim>` - Kripto para ara
• `/yukselenler` - Son 1 saatin yükselenleri
• `/help` - Yardım menüsü

**Örnek:** `/fiyat bitcoin` veya `/fiyat btc`

💡 **İpucu:** Sadece kripto para ismini yazarak da fiyat öğrenebilirsin!";

pub const HELP: &str = "\
🆘 **Yardım Menüsü**

**Kullanılabilir Komutlar:**

🏠 `/start` - Botu yeniden başlat
📊 `/fiyat <coin>` - Kripto para fiyatını öğren
₿ `/btc` - Bitcoin fiyatı ve bilgileri
⟠ `/eth` - Ethereum fiyatı ve bilgileri
🔟 `/top10` - Top 10 kripto para listesi
🔍 `/ara <isim>` - Kripto para ara
🚀 `/yukselenler` - Son 1 saatte en çok yükselenler

**Desteklenen Kripto Paralar:**
Bitcoin (BTC), Ethereum (ETH), Binance Coin (BNB),
XRP, Cardano (ADA), Solana (SOL), Dogecoin (DOGE),
Polkadot (DOT), Avalanche (AVAX), Litecoin (LTC)

**Örnek Kullanım:**
• `bitcoin` veya `btc`
• `/fiyat ethereum`
• `/ara cardano`";

pub const ERR_API: &str =
    "⚠️ Şu anda kripto para verilerine ulaşılamıyor. Lütfen daha sonra tekrar deneyin.";

pub const ERR_NOT_FOUND: &str =
    "❌ Bu kripto para bulunamadı. Lütfen geçerli bir kripto para ismi girin.";

pub const ERR_GENERIC: &str = "⚠️ Bir hata oluştu. Lütfen daha sonra tekrar deneyin.";

pub const BUSY: &str = "⏳ Zaten bir işlem devam ediyor, lütfen bekleyin...";

pub const PROCESSING: &str = "⏳ Veriler getiriliyor, lütfen bekleyin...";

pub const PROCESSING_TEXT: &str = "🔍 Fiyat bilgisi getiriliyor...";

pub const PRICE_USAGE: &str = "\
❓ Hangi kripto paranın fiyatını öğrenmek istiyorsunuz?
**Örnek:** `/fiyat bitcoin` veya `/fiyat btc`";

pub const SEARCH_USAGE: &str = "\
❓ Hangi kripto parayı aramak istiyorsunuz?
**Örnek:** `/ara cardano`";

/// Not-found reply for the implicit free-text path.
pub fn not_found_hint(query: &str) -> String {
    format!(
        "❌ '{query}' bulunamadı.\nDesteklenen kripto paralar için /help komutunu kullanın."
    )
}

/// Empty search result reply.
pub fn search_empty(query: &str) -> String {
    format!("❌ '{query}' için sonuç bulunamadı.\nFarklı bir arama terimi deneyin.")
}

/// Nudge for single-word text the classifier rejected.
pub fn unrecognized_hint(text: &str) -> String {
    format!(
        "🤔 '{text}' tanınamadı.\nKripto para fiyatı için `/fiyat {text}` komutunu deneyin.\nVeya /help ile desteklenen paraları görün."
    )
}
