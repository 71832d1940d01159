//! Утилиты форматирования и построения URL

/// Форматирует число с разделителем тысяч (пробел) и указанным количеством знаков после запятой
///
/// # Примеры
///
/// ```
/// use rozetka_feed_admin::shared::utils::format_number_with_decimals;
/// assert_eq!(format_number_with_decimals(1234.567, 2), "1 234.57");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);

    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };
    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    // Пробел каждые 3 цифры с конца целой части
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    match decimal_part {
        Some(d) => format!("{}{}.{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Целое число с разделителем тысяч
pub fn format_count(value: i64) -> String {
    format_number_with_decimals(value as f64, 0)
}

/// Размер файла: "512 Б", "1.5 КБ", "2.25 МБ"
pub fn format_file_size(bytes: i64) -> String {
    const UNITS: [&str; 4] = ["КБ", "МБ", "ГБ", "ТБ"];
    if bytes < 1024 {
        return format!("{} Б", bytes.max(0));
    }
    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    let text = format!("{:.2}", size);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", text, UNITS[unit])
}

/// Длительность в секундах: "0.42 с", "1 мин 5 с"
pub fn format_seconds(seconds: f64) -> String {
    if seconds < 60.0 {
        return format!("{:.2} с", seconds.max(0.0));
    }
    let total = seconds.round() as i64;
    format!("{} мин {} с", total / 60, total % 60)
}

/// Экранировать текст для вставки в HTML
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Символ в нижнем регистре, если он остаётся одним символом
fn fold_char(c: char) -> Option<char> {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => Some(l),
        _ => None,
    }
}

/// Экранированный HTML с подсветкой совпадений (без учёта регистра)
pub fn highlight_html(text: &str, term: &str) -> String {
    let term = term.trim();
    if term.is_empty() {
        return escape_html(text);
    }

    // Сравнение идёт по символам; границы совпадений берутся из исходной строки
    let folded_term: Option<Vec<char>> = term.chars().map(fold_char).collect();
    let folded_text: Option<Vec<char>> = text.chars().map(fold_char).collect();
    let (Some(needle), Some(haystack)) = (folded_term, folded_text) else {
        return escape_html(text);
    };

    let mut bounds: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    bounds.push(text.len());

    let mut out = String::new();
    let mut last = 0;
    let mut i = 0;
    while i + needle.len() <= haystack.len() {
        if haystack[i..i + needle.len()] == needle[..] {
            let (start, end) = (bounds[i], bounds[i + needle.len()]);
            out.push_str(&escape_html(&text[last..start]));
            out.push_str("<mark>");
            out.push_str(&escape_html(&text[start..end]));
            out.push_str("</mark>");
            last = end;
            i += needle.len();
        } else {
            i += 1;
        }
    }
    out.push_str(&escape_html(&text[last..]));
    out
}

/// Обрезать строку до `max_chars` символов с многоточием
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

/// Добавить параметры запроса к URL с процентным кодированием
pub fn build_url(base: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return base.to_string();
    }
    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{}{}{}", base, separator, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1 235");
        assert_eq!(format_number_with_decimals(1234.567, 2), "1 234.57");
        assert_eq!(format_number_with_decimals(-1234567.0, 0), "-1 234 567");
        assert_eq!(format_number_with_decimals(0.0, 2), "0.00");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(100000), "100 000");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512 Б");
        assert_eq!(format_file_size(1536), "1.5 КБ");
        assert_eq!(format_file_size(10 * 1024 * 1024), "10 МБ");
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0.4213), "0.42 с");
        assert_eq!(format_seconds(65.0), "1 мин 5 с");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_highlight_html() {
        assert_eq!(
            highlight_html("Смартфоны <new>", "смарт"),
            "<mark>Смарт</mark>фоны &lt;new&gt;"
        );
        assert_eq!(highlight_html("a&b", ""), "a&amp;b");
        assert_eq!(highlight_html("abcab", "ab"), "<mark>ab</mark>c<mark>ab</mark>");
    }

    #[test]
    fn test_highlight_html_with_case_changing_byte_width() {
        // Знак кельвина (3 байта) в нижнем регистре становится `k` (1 байт)
        assert_eq!(
            highlight_html("\u{212A}elvin k", "k"),
            "<mark>\u{212A}</mark>elvin <mark>k</mark>"
        );
        // `İ` в нижнем регистре раскладывается на два символа: без подсветки
        assert_eq!(
            highlight_html("\u{212A}\u{0130}\u{0130}", "i"),
            "\u{212A}\u{0130}\u{0130}"
        );
        assert_eq!(highlight_html("Кабель <USB>", "usb"), "Кабель &lt;<mark>USB</mark>&gt;");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Телефоны", 20), "Телефоны");
        assert_eq!(truncate("Мобильные телефоны", 10), "Мобильные…");
    }

    #[test]
    fn test_build_url() {
        assert_eq!(
            build_url("index.php", &[("route", "extension/feed/rozetka.generate"), ("q", "a b")]),
            "index.php?route=extension%2Ffeed%2Frozetka.generate&q=a%20b"
        );
        assert_eq!(build_url("index.php?x=1", &[("y", "2")]), "index.php?x=1&y=2");
        assert_eq!(build_url("index.php", &[]), "index.php");
    }
}
