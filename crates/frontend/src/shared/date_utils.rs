//! Даты от сервера приходят как "2024-03-15 14:02:26" (MySQL) или ISO
//! "2024-03-15T14:02:26Z"; в таблицах показываем "15.03.2024 14:02".

/// "2024-03-15 14:02:26" -> "15.03.2024 14:02"
pub fn format_datetime(datetime_str: &str) -> String {
    let trimmed = datetime_str.trim();
    let Some((date_part, time_part)) = trimmed.split_once(['T', ' ']) else {
        return format_date(trimmed);
    };
    let date = format_date(date_part);
    if date == date_part {
        return trimmed.to_string();
    }
    let hhmm: String = time_part.chars().take(5).collect();
    if hhmm.len() == 5 && hhmm.as_bytes()[2] == b':' {
        format!("{} {}", date, hhmm)
    } else {
        date
    }
}

/// "2024-03-15" -> "15.03.2024"; строки другого вида возвращаются как есть
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split(['T', ' ']).next().unwrap_or(date_str);
    let mut parts = date_part.splitn(3, '-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(y), Some(m), Some(d)) if y.len() == 4 && m.len() == 2 && d.len() == 2 => {
            format!("{}.{}.{}", d, m, y)
        }
        _ => date_str.to_string(),
    }
}

/// Дата для имени файла экспорта
pub fn today_stamp() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime("2024-03-15 14:02:26"), "15.03.2024 14:02");
        assert_eq!(format_datetime("2024-12-31T23:59:59Z"), "31.12.2024 23:59");
        assert_eq!(format_datetime("2024-03-15"), "15.03.2024");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("вчера"), "вчера");
        assert_eq!(format_datetime("never mind"), "never mind");
        assert_eq!(format_date("15/03/2024"), "15/03/2024");
    }

    #[test]
    fn test_today_stamp_shape() {
        let stamp = today_stamp();
        assert_eq!(stamp.len(), 10);
        assert_eq!(format_date(&stamp).len(), 10);
    }
}
