use crate::grid::ViewedMonth;

pub const MONTH_NAMES: [&str; 12] = [
    "Gennaio",
    "Febbraio",
    "Marzo",
    "Aprile",
    "Maggio",
    "Giugno",
    "Luglio",
    "Agosto",
    "Settembre",
    "Ottobre",
    "Novembre",
    "Dicembre",
];

/// Monday first, matching grid column order.
pub const WEEKDAY_LABELS: [&str; 7] = ["Lun", "Mar", "Mer", "Gio", "Ven", "Sab", "Dom"];

pub const PREVIOUS_MONTH_LABEL: &str = "<";
pub const NEXT_MONTH_LABEL: &str = ">";

pub fn month_header(month: ViewedMonth) -> String {
    format!("{} {}", MONTH_NAMES[month.month0() as usize], month.year())
}
