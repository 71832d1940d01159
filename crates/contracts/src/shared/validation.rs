//! Клиентская валидация перед отправкой на сервер.
//!
//! Любая ошибка отсюда прерывает действие до сетевого запроса.

use std::collections::BTreeMap;
use thiserror::Error;

/// Максимальный размер загружаемого файла категорий
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Допустимый диапазон размеров изображения, пикселей
pub const IMAGE_DIMENSION_MIN: i64 = 100;
pub const IMAGE_DIMENSION_MAX: i64 = 2000;

/// Ошибки полей формы: имя поля → текст для пользователя
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Значение должно быть числом")]
    NotANumber { field: String },

    #[error("Значение не может быть отрицательным")]
    Negative { field: String },

    #[error("Минимальная цена должна быть меньше максимальной")]
    PriceRange { min: f64, max: f64 },

    #[error("Размер должен быть от {min} до {max} пикселей", min = IMAGE_DIMENSION_MIN, max = IMAGE_DIMENSION_MAX)]
    ImageDimension { field: String, value: i64 },

    #[error("Файл слишком большой: {size} байт, допускается не более {max}")]
    FileTooLarge { size: u64, max: u64 },

    #[error("Допускаются только файлы JSON")]
    FileType { name: String },

    #[error("Файл пуст")]
    EmptyFile,
}

/// Разобрать необязательное числовое поле; пустая строка означает «не задано»
pub fn parse_optional_number(field: &str, raw: &str) -> Result<Option<f64>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let value = raw
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| ValidationError::NotANumber {
            field: field.to_string(),
        })?;
    if !value.is_finite() {
        return Err(ValidationError::NotANumber {
            field: field.to_string(),
        });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(Some(value))
}

/// Диапазон цен. Ноль или пусто в любой границе снимают ограничение.
pub fn validate_price_range(min_raw: &str, max_raw: &str) -> Result<(), ValidationError> {
    let min = parse_optional_number("min_price", min_raw)?.unwrap_or(0.0);
    let max = parse_optional_number("max_price", max_raw)?.unwrap_or(0.0);

    if min > 0.0 && max > 0.0 && min >= max {
        return Err(ValidationError::PriceRange { min, max });
    }
    Ok(())
}

/// Ширина или высота изображения; 0 и пусто означают «исходный размер»
pub fn validate_image_dimension(field: &str, raw: &str) -> Result<(), ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(());
    }
    let value = raw.parse::<i64>().map_err(|_| ValidationError::NotANumber {
        field: field.to_string(),
    })?;
    if value == 0 {
        return Ok(());
    }
    if !(IMAGE_DIMENSION_MIN..=IMAGE_DIMENSION_MAX).contains(&value) {
        return Err(ValidationError::ImageDimension {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

/// Метаданные выбранного пользователем файла
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub size: u64,
    pub mime: String,
}

/// Проверить файл перед загрузкой: JSON, не пустой, не больше 10 МБ
pub fn validate_json_upload(file: &UploadFile) -> Result<(), ValidationError> {
    let by_extension = file.name.to_lowercase().ends_with(".json");
    let by_mime = file.mime.eq_ignore_ascii_case("application/json");
    if !by_extension && !by_mime {
        return Err(ValidationError::FileType {
            name: file.name.clone(),
        });
    }
    if file.size == 0 {
        return Err(ValidationError::EmptyFile);
    }
    if file.size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::FileTooLarge {
            size: file.size,
            max: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_range() {
        assert_eq!(
            validate_price_range("500", "100"),
            Err(ValidationError::PriceRange { min: 500.0, max: 100.0 })
        );
        assert!(validate_price_range("100", "100").is_err());
        assert!(validate_price_range("100", "500").is_ok());
        assert!(validate_price_range("0", "100").is_ok());
        assert!(validate_price_range("500", "0").is_ok());
        assert!(validate_price_range("", "").is_ok());
        assert!(validate_price_range("99,5", "100").is_ok());
    }

    #[test]
    fn test_price_must_be_number() {
        assert_eq!(
            validate_price_range("abc", ""),
            Err(ValidationError::NotANumber {
                field: "min_price".to_string()
            })
        );
        assert!(matches!(
            validate_price_range("", "-5"),
            Err(ValidationError::Negative { .. })
        ));
    }

    #[test]
    fn test_image_dimension_bounds() {
        assert!(validate_image_dimension("w", "0").is_ok());
        assert!(validate_image_dimension("w", "").is_ok());
        assert!(validate_image_dimension("w", "100").is_ok());
        assert!(validate_image_dimension("w", "2000").is_ok());
        assert!(validate_image_dimension("w", "99").is_err());
        assert!(validate_image_dimension("w", "2001").is_err());
        assert!(validate_image_dimension("w", "-10").is_err());
        assert!(matches!(
            validate_image_dimension("w", "12.5"),
            Err(ValidationError::NotANumber { .. })
        ));
    }

    #[test]
    fn test_json_upload() {
        let file = |name: &str, size: u64, mime: &str| UploadFile {
            name: name.to_string(),
            size,
            mime: mime.to_string(),
        };

        assert!(validate_json_upload(&file("categories.json", 1024, "")).is_ok());
        assert!(validate_json_upload(&file("export", 1024, "application/json")).is_ok());
        assert!(matches!(
            validate_json_upload(&file("categories.csv", 1024, "text/csv")),
            Err(ValidationError::FileType { .. })
        ));
        assert_eq!(
            validate_json_upload(&file("c.json", 0, "application/json")),
            Err(ValidationError::EmptyFile)
        );
        assert!(validate_json_upload(&file("c.json", MAX_UPLOAD_BYTES, "")).is_ok());
        assert!(matches!(
            validate_json_upload(&file("c.json", MAX_UPLOAD_BYTES + 1, "")),
            Err(ValidationError::FileTooLarge { .. })
        ));
    }
}
