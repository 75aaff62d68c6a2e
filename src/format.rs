//! Display helpers for the shop front: prices in Portuguese euro notation,
//! French dates and labels, URL slugs.

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::models::ProductStatus;

pub const PRICE_ON_REQUEST: &str = "Prix sur demande";

const MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

const WEEKDAYS: [&str; 7] = [
    "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
];

/// `1 200,00 €`; missing or zero prices read as "on request".
pub fn format_price(price: Option<f64>) -> String {
    let Some(price) = price.filter(|p| p.is_finite() && *p != 0.0) else {
        return PRICE_ON_REQUEST.to_string();
    };

    let cents = (price.abs() * 100.0).round() as u64;
    let units = (cents / 100).to_string();
    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    let sign = if price < 0.0 { "-" } else { "" };
    format!("{sign}{grouped},{:02} €", cents % 100)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    Short,
    Medium,
    Long,
    Full,
    DateTime,
}

pub fn format_date(date: &DateTime<Utc>, style: DateStyle) -> String {
    let day = date.day();
    let month = MONTHS[date.month0() as usize];
    let year = date.year();
    match style {
        DateStyle::Short => format!("{day:02}/{:02}/{year}", date.month()),
        DateStyle::Medium => {
            let short: String = month.chars().take(3).collect();
            format!("{day:02} {short} {year}")
        }
        DateStyle::Long => format!("{day:02} {month} {year}"),
        DateStyle::Full => {
            let weekday = WEEKDAYS[date.weekday().num_days_from_monday() as usize];
            format!("{weekday} {day:02} {month} {year}")
        }
        DateStyle::DateTime => format!(
            "{day:02}/{:02}/{year} {:02}:{:02}",
            date.month(),
            date.hour(),
            date.minute()
        ),
    }
}

pub fn status_label(status: ProductStatus) -> &'static str {
    match status {
        ProductStatus::Published => "Disponible",
        ProductStatus::Draft => "Brouillon",
        ProductStatus::OutOfStock => "Rupture de stock",
        ProductStatus::Unknown => "Inconnu",
    }
}

pub fn results_label(count: usize) -> String {
    match count {
        0 => "Aucun produit trouvé".to_string(),
        1 => "1 produit trouvé".to_string(),
        n => format!("{n} produits trouvés"),
    }
}

/// Replaces accented Latin letters by their base letter. Input is expected
/// to be lower case already.
pub fn fold_accents(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => folded.push('a'),
            'è' | 'é' | 'ê' | 'ë' => folded.push('e'),
            'ì' | 'í' | 'î' | 'ï' => folded.push('i'),
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' => folded.push('o'),
            'ù' | 'ú' | 'û' | 'ü' => folded.push('u'),
            'ý' | 'ÿ' => folded.push('y'),
            'ç' => folded.push('c'),
            'ñ' => folded.push('n'),
            'æ' => folded.push_str("ae"),
            'œ' => folded.push_str("oe"),
            'ß' => folded.push_str("ss"),
            other => folded.push(other),
        }
    }
    folded
}

/// URL slug: lower-case ASCII letters and digits joined by single dashes.
pub fn slugify(text: &str, max_len: usize) -> String {
    let folded = fold_accents(&text.to_lowercase());
    let mut slug = String::with_capacity(folded.len());
    let mut pending_dash = false;
    for c in folded.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' {
            pending_dash = true;
        }
    }

    if slug.len() > max_len {
        slug.truncate(max_len);
        while slug.ends_with('-') {
            slug.pop();
        }
    }
    slug
}
