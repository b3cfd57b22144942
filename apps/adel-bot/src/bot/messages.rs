use crate::models::{Balance, PurchaseOutcome};

pub const WELCOME: &str = "سلام 👋 به فروشگاه Adel UC خوش آمدی!\nیک گزینه انتخاب کن:";
pub const CATEGORIES_HEADER: &str = "📋 لیست دسته\u{200c}بندی\u{200c}ها:";
pub const PRODUCTS_HEADER: &str = "🎮 لیست محصولات:";
pub const PACKAGES_HEADER: &str = "📦 لیست پکیج\u{200c}ها:";

pub const BUTTON_CATEGORIES: &str = "📂 دسته\u{200c}بندی\u{200c}ها";
pub const BUTTON_PACKAGES: &str = "📦 لیست پکیج\u{200c}ها";
pub const BUTTON_BALANCE: &str = "💰 موجودی حساب";
pub const BUTTON_HELP: &str = "ℹ️ راهنما";
pub const BUTTON_CANCEL: &str = "✖️ لغو خرید";

pub const NO_CATEGORIES: &str = "⚠️ هیچ دسته\u{200c}ای یافت نشد.";
pub const NO_PRODUCTS: &str = "⚠️ هیچ محصولی در این دسته یافت نشد.";
pub const NO_PACKAGES: &str = "⚠️ هیچ پکیجی یافت نشد.";
pub const CATEGORIES_FAILED: &str = "⚠️ خطا در دریافت دسته\u{200c}ها.";
pub const PRODUCTS_FAILED: &str = "⚠️ خطا در دریافت محصولات.";
pub const BALANCE_FAILED: &str = "⚠️ خطا در دریافت موجودی.";

pub const ASK_PLAYER_ID: &str = "🔢 لطفاً PUBG ID خود را ارسال کنید:";
pub const EMPTY_PLAYER_ID: &str = "✏️ PUBG ID نمی\u{200c}تواند خالی باشد. لطفاً PUBG ID خود را ارسال کنید:";
pub const PURCHASE_REJECTED: &str = "⚠️ خرید ناموفق بود، لطفاً بعداً دوباره تلاش کنید.";
pub const PURCHASE_FAILED: &str = "❌ خطا در انجام خرید.";

pub const CANCELLED: &str = "✖️ خرید لغو شد.";
pub const NOTHING_TO_CANCEL: &str = "خریدی برای لغو وجود ندارد.";

pub const HELP: &str = "📘 راهنما:\n\
1️⃣ روی \"📂 دسته\u{200c}بندی\u{200c}ها\" بزن.\n\
2️⃣ یک دسته را انتخاب کن.\n\
3️⃣ محصول دلخواه را بخر.\n\
4️⃣ PUBG ID خود را بفرست تا سفارش ثبت شود.\n\n\
برای لغو خرید قبل از ارسال ID، /cancel را بفرست.";

pub fn balance(balance: &Balance) -> String {
    format!("💰 موجودی شما: {} {}", balance.amount, balance.currency)
}

pub fn purchase_accepted(outcome: &PurchaseOutcome) -> String {
    let status = outcome.status_message.as_deref().unwrap_or("در حال پردازش");
    let mut text = String::from("✅ سفارش شما ثبت شد!\n");
    if let Some(order_id) = &outcome.order_id {
        text.push_str(&format!("🆔 شماره سفارش: {}\n", order_id));
    }
    text.push_str(&format!("🧾 وضعیت: {}", status));
    text
}
