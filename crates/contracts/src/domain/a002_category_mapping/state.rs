//! Состояние вкладки сопоставления категорий.
//!
//! Набор связей хранится в порядке добавления: индексы строк таблицы
//! совпадают с позициями в `mappings`, удаление идёт по позиции.
//! Выбор категории магазина, уже имеющей связь, отклоняется; сама
//! фиксация связи (`create_mapping`) всегда работает как upsert по
//! `shop_category_id`, поэтому инвариант «одна связь на категорию»
//! держится при любом пути добавления.

use super::aggregate::CategoryMapping;
use crate::domain::a001_rozetka_category::{Category, CategoryNamespace};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Категория «{name}» уже сопоставлена. Удалите существующую связь, чтобы изменить её.")]
    AlreadyMapped { name: String },

    #[error("Сначала выберите категорию магазина")]
    NoShopSelected,

    #[error("Выберите категорию магазина и категорию Rozetka")]
    Incomplete,
}

/// Итог выбора категории
#[derive(Debug, Clone, PartialEq)]
pub enum SelectOutcome {
    /// Категория магазина выбрана, ждём категорию Rozetka
    ShopSelected,
    /// Выбрана категория Rozetka, связь создана
    Committed(CategoryMapping, UpsertOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Replaced,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MappingState {
    mappings: Vec<CategoryMapping>,
    selected_shop: Option<Category>,
    selected_rozetka: Option<Category>,
    dirty: bool,
}

impl MappingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Набор, загруженный с сервера. Повторы по `shop_category_id`
    /// схлопываются, последняя запись побеждает.
    pub fn from_mappings(mappings: Vec<CategoryMapping>) -> Self {
        let mut state = Self::new();
        for mapping in mappings {
            state.upsert(mapping);
        }
        state.dirty = false;
        state
    }

    /// Заменить набор данными сервера, сбросив выбор и признак изменений
    pub fn replace_all(&mut self, mappings: Vec<CategoryMapping>) {
        *self = Self::from_mappings(mappings);
    }

    pub fn mappings(&self) -> &[CategoryMapping] {
        &self.mappings
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Есть несохранённые изменения
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn selected_shop(&self) -> Option<&Category> {
        self.selected_shop.as_ref()
    }

    pub fn selected_rozetka(&self) -> Option<&Category> {
        self.selected_rozetka.as_ref()
    }

    pub fn is_mapped(&self, shop_category_id: &str) -> bool {
        self.position(shop_category_id).is_some()
    }

    pub fn mapping_for(&self, shop_category_id: &str) -> Option<&CategoryMapping> {
        self.position(shop_category_id).map(|i| &self.mappings[i])
    }

    /// Строки таблицы с исходными индексами; фильтр не меняет позиции
    pub fn rows<'a>(&'a self, filter: &'a str) -> impl Iterator<Item = (usize, &'a CategoryMapping)> + 'a {
        self.mappings
            .iter()
            .enumerate()
            .filter(move |(_, m)| m.matches_filter(filter))
    }

    /// Выбор категории в одном из пространств.
    ///
    /// Категория Rozetka при выбранной категории магазина сразу фиксирует
    /// связь и сбрасывает оба выбора.
    pub fn select(
        &mut self,
        namespace: CategoryNamespace,
        item: Category,
    ) -> Result<SelectOutcome, SelectionError> {
        match namespace {
            CategoryNamespace::Shop => {
                if self.is_mapped(&item.id) {
                    return Err(SelectionError::AlreadyMapped {
                        name: item.display_name().to_string(),
                    });
                }
                self.selected_shop = Some(item);
                Ok(SelectOutcome::ShopSelected)
            }
            CategoryNamespace::Rozetka => {
                if self.selected_shop.is_none() {
                    return Err(SelectionError::NoShopSelected);
                }
                self.selected_rozetka = Some(item);
                let (mapping, outcome) = self.create_mapping()?;
                Ok(SelectOutcome::Committed(mapping, outcome))
            }
        }
    }

    /// Зафиксировать связь из текущего выбора
    pub fn create_mapping(&mut self) -> Result<(CategoryMapping, UpsertOutcome), SelectionError> {
        let (Some(shop), Some(rozetka)) = (&self.selected_shop, &self.selected_rozetka) else {
            return Err(SelectionError::Incomplete);
        };
        let mapping = CategoryMapping::new(shop, rozetka);
        let outcome = self.upsert(mapping.clone());
        self.clear_selection();
        Ok((mapping, outcome))
    }

    /// Вставить связь или заменить существующую на том же месте
    pub fn upsert(&mut self, mapping: CategoryMapping) -> UpsertOutcome {
        self.dirty = true;
        match self.position(&mapping.shop_category_id) {
            Some(index) => {
                self.mappings[index] = mapping;
                UpsertOutcome::Replaced
            }
            None => {
                self.mappings.push(mapping);
                UpsertOutcome::Inserted
            }
        }
    }

    /// Добавить предложения автосопоставления.
    ///
    /// Берутся только связи для категорий, которых ещё нет в наборе;
    /// существующие записи не трогаются. Возвращает число добавленных.
    pub fn merge_auto(&mut self, proposed: Vec<CategoryMapping>) -> usize {
        let mut added = 0;
        for mapping in proposed {
            if mapping.shop_category_id.is_empty() || self.is_mapped(&mapping.shop_category_id) {
                continue;
            }
            self.mappings.push(mapping);
            added += 1;
        }
        if added > 0 {
            self.dirty = true;
        }
        added
    }

    /// Удалить связь по позиции
    pub fn remove(&mut self, index: usize) -> Option<CategoryMapping> {
        if index >= self.mappings.len() {
            return None;
        }
        self.dirty = true;
        Some(self.mappings.remove(index))
    }

    pub fn clear_selection(&mut self) {
        self.selected_shop = None;
        self.selected_rozetka = None;
    }

    /// Набор успешно сохранён на сервере
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    fn position(&self, shop_category_id: &str) -> Option<usize> {
        self.mappings
            .iter()
            .position(|m| m.shop_category_id == shop_category_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            full_name: String::new(),
            level: 1,
            parent_id: None,
        }
    }

    fn mapping(shop: &str, rozetka: &str) -> CategoryMapping {
        CategoryMapping::new(&category(shop, "shop"), &category(rozetka, "rozetka"))
    }

    #[test]
    fn test_select_shop_then_rozetka_commits() {
        let mut state = MappingState::new();
        assert_eq!(
            state.select(CategoryNamespace::Shop, category("1", "Телефоны")),
            Ok(SelectOutcome::ShopSelected)
        );
        assert_eq!(state.selected_shop().map(|c| c.id.as_str()), Some("1"));

        let outcome = state
            .select(CategoryNamespace::Rozetka, category("80003", "Смартфоны"))
            .unwrap();
        match outcome {
            SelectOutcome::Committed(m, UpsertOutcome::Inserted) => {
                assert_eq!(m.shop_category_id, "1");
                assert_eq!(m.rozetka_category_id, "80003");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(state.selected_shop().is_none());
        assert!(state.selected_rozetka().is_none());
        assert!(state.is_mapped("1"));
        assert!(state.is_dirty());
    }

    #[test]
    fn test_rozetka_without_shop_is_rejected() {
        let mut state = MappingState::new();
        assert_eq!(
            state.select(CategoryNamespace::Rozetka, category("80003", "Смартфоны")),
            Err(SelectionError::NoShopSelected)
        );
        assert!(state.selected_rozetka().is_none());
        assert!(state.is_empty());
    }

    #[test]
    fn test_selecting_mapped_shop_category_is_rejected() {
        let mut state = MappingState::from_mappings(vec![mapping("1", "10")]);
        let err = state
            .select(CategoryNamespace::Shop, category("1", "Телефоны"))
            .unwrap_err();
        assert!(matches!(err, SelectionError::AlreadyMapped { .. }));
        assert!(state.selected_shop().is_none());
        assert_eq!(state.mapping_for("1").unwrap().rozetka_category_id, "10");
    }

    #[test]
    fn test_create_mapping_requires_both_selections() {
        let mut state = MappingState::new();
        assert_eq!(state.create_mapping(), Err(SelectionError::Incomplete));
        state.select(CategoryNamespace::Shop, category("1", "A")).unwrap();
        assert_eq!(state.create_mapping(), Err(SelectionError::Incomplete));
    }

    #[test]
    fn test_upsert_keeps_one_entry_per_shop_category() {
        let mut state = MappingState::new();
        state.upsert(mapping("1", "10"));
        state.upsert(mapping("2", "20"));
        assert_eq!(state.upsert(mapping("1", "11")), UpsertOutcome::Replaced);

        let ids: Vec<_> = state.mappings().iter().map(|m| m.shop_category_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(state.mapping_for("1").unwrap().rozetka_category_id, "11");
    }

    #[test]
    fn test_from_mappings_collapses_duplicates() {
        let state = MappingState::from_mappings(vec![mapping("1", "10"), mapping("1", "12")]);
        assert_eq!(state.len(), 1);
        assert_eq!(state.mapping_for("1").unwrap().rozetka_category_id, "12");
        assert!(!state.is_dirty());
    }

    #[test]
    fn test_merge_auto_never_touches_existing() {
        let mut state = MappingState::from_mappings(vec![mapping("1", "10")]);
        let added = state.merge_auto(vec![
            mapping("1", "99"),
            mapping("2", "20"),
            mapping("2", "21"),
            mapping("", "30"),
        ]);
        assert_eq!(added, 1);
        assert_eq!(state.len(), 2);
        assert_eq!(state.mapping_for("1").unwrap().rozetka_category_id, "10");
        assert_eq!(state.mapping_for("2").unwrap().rozetka_category_id, "20");
        assert!(state.is_dirty());
    }

    #[test]
    fn test_merge_auto_with_nothing_new_stays_clean() {
        let mut state = MappingState::from_mappings(vec![mapping("1", "10")]);
        assert_eq!(state.merge_auto(vec![mapping("1", "11")]), 0);
        assert!(!state.is_dirty());
    }

    #[test]
    fn test_remove_by_position_and_filtered_rows() {
        let mut state = MappingState::from_mappings(vec![
            mapping("1", "10"),
            mapping("2", "20"),
            mapping("3", "30"),
        ]);
        let rows: Vec<usize> = state.rows("30").map(|(i, _)| i).collect();
        assert_eq!(rows, vec![2]);

        let removed = state.remove(rows[0]).unwrap();
        assert_eq!(removed.shop_category_id, "3");
        assert_eq!(state.remove(5), None);
        assert_eq!(state.len(), 2);
        assert!(state.is_dirty());

        state.mark_saved();
        assert!(!state.is_dirty());
    }
}
