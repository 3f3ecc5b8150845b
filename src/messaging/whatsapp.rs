//! Outbound WhatsApp composition. Nothing here performs I/O: the router
//! hands the composed text and normalized recipient to the browser, which is
//! the actual launcher.

use crate::domain::estimate::CostEstimate;
use crate::domain::money::format_ars;
use crate::domain::repair::RepairJob;

pub const SHOP_NAME: &str = "Roncoroni Performance";

/// Argentine country + mobile prefix expected by wa.me.
const COUNTRY_MOBILE_PREFIX: &str = "549";

/// Strip every non-digit and make sure the number carries the country +
/// mobile prefix. Purely textual and idempotent; digit count and local
/// structure are not validated.
pub fn normalize_recipient(raw_phone: &str) -> String {
    let digits: String = raw_phone.chars().filter(char::is_ascii_digit).collect();
    if digits.starts_with(COUNTRY_MOBILE_PREFIX) {
        digits
    } else {
        format!("{COUNTRY_MOBILE_PREFIX}{digits}")
    }
}

/// The estimate message sent when staff triggers the send. Pure
/// interpolation; the caller has already validated that the work description
/// and labor cost are present. The total is recomputed from labor + parts at
/// send time, not read from the stored snapshot.
pub fn estimate_message(job: &RepairJob, estimate: &CostEstimate) -> String {
    format!(
        "🏍️ *{SHOP_NAME}*\n\
         \n\
         👤 Cliente: {first} {last}\n\
         🏍️ Moto: {make} {displacement}\n\
         \n\
         📋 *Trabajos a realizar:*\n\
         {work}\n\
         \n\
         ━━━━━━━━━━━━━━━━━\n\
         💰 *COSTO TOTAL: {total}*\n\
         ━━━━━━━━━━━━━━━━━\n\
         \n\
         ¡Gracias por confiar en nosotros! 🔧",
        first = job.first_name,
        last = job.last_name,
        make = job.make,
        displacement = job.displacement,
        work = estimate.work_description,
        total = format_ars(estimate.computed_total()),
    )
}

/// The pickup-ready notice. No numeric fields.
pub fn ready_notice(job: &RepairJob) -> String {
    format!(
        "🏍️ *{SHOP_NAME}*\n\
         \n\
         ¡Hola {first}! 👋\n\
         \n\
         Tu moto {make} {displacement} ya está lista para retirar. 🎉\n\
         \n\
         Te esperamos en el taller. ¡Gracias por confiar en nosotros! 🔧",
        first = job.first_name,
        make = job.make,
        displacement = job.displacement,
    )
}

/// wa.me link carrying the message; the recipient only ever travels in the
/// path, never inside the message body.
pub fn send_url(recipient: &str, message: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("text", message)
        .finish();
    format!("https://wa.me/{recipient}?{query}")
}

/// Touch-primary devices get a direct navigation so the installed app picks
/// the link up; everything else opens a new tab.
pub fn is_touch_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_lowercase();
    ["iphone", "ipad", "ipod", "android"]
        .iter()
        .any(|marker| ua.contains(marker))
}
