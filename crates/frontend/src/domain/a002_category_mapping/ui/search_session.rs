//! Состояние одной панели поиска без таймеров и сети.
//!
//! `SearchPanel` ждёт `TimeoutFuture` и ходит в API, а решения о том,
//! отправлять ли запрос и показывать ли ответ, принимает `SearchSession`.

use contracts::domain::a001_rozetka_category::{Category, SearchQuery, SearchResults};

use crate::shared::debounce::{Debouncer, RequestSequence};

#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    term: String,
    results: SearchResults,
    debouncer: Debouncer<String>,
    sequence: RequestSequence,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn results(&self) -> &SearchResults {
        &self.results
    }

    /// Ввод в поле. Возвращает билет, по которому после паузы
    /// нужно вызвать `on_fire`; `None`, если запрос не нужен.
    pub fn on_input(&mut self, raw: &str) -> Option<u64> {
        self.term = raw.to_string();
        match SearchQuery::classify(raw) {
            SearchQuery::Ignore => {
                self.debouncer.cancel();
                None
            }
            SearchQuery::Clear => {
                self.reset();
                None
            }
            SearchQuery::Lookup(term) => Some(self.debouncer.push(term)),
        }
    }

    /// Пауза после ввода истекла. Если билет ещё актуален, выдаёт номер
    /// запроса и строку поиска и переводит список в `Loading`.
    pub fn on_fire(&mut self, ticket: u64) -> Option<(u64, String)> {
        let term = self.debouncer.take(ticket)?;
        let seq = self.sequence.issue();
        self.results = SearchResults::Loading;
        Some((seq, term))
    }

    /// Ответ сервера. `false`, если ответ устарел и отброшен.
    pub fn on_response(&mut self, seq: u64, response: Result<Vec<Category>, String>) -> bool {
        if !self.sequence.is_latest(seq) {
            return false;
        }
        self.results = match response {
            Ok(items) => SearchResults::from_items(items),
            Err(message) => SearchResults::Failed(message),
        };
        true
    }

    /// Очистить поле и подсказку; ожидающий ввод и запросы в полёте
    /// больше ничего не покажут
    pub fn reset(&mut self) {
        self.term.clear();
        self.debouncer.cancel();
        self.sequence.invalidate();
        self.results = SearchResults::Prompt;
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

    #[test]
    fn test_single_char_sends_nothing_and_cancels_pending() {
        let mut session = SearchSession::new();
        let ticket = session.on_input("те").expect("two chars start a lookup");

        assert_eq!(session.on_input("т"), None);
        assert_eq!(session.term(), "т");
        assert_eq!(session.on_fire(ticket), None);
        assert_eq!(session.results(), &SearchResults::Prompt);
    }

    #[test]
    fn test_rapid_typing_fires_last_term_only() {
        let mut session = SearchSession::new();
        let first = session.on_input("те").unwrap();
        let second = session.on_input("тел").unwrap();

        assert_eq!(session.on_fire(first), None);
        let (_, term) = session.on_fire(second).unwrap();
        assert_eq!(term, "тел");
        assert_eq!(session.results(), &SearchResults::Loading);
    }

    #[test]
    fn test_stale_response_dropped() {
        let mut session = SearchSession::new();
        let slow = session.on_input("те").unwrap();
        let (slow_seq, _) = session.on_fire(slow).unwrap();
        let fast = session.on_input("тел").unwrap();
        let (fast_seq, _) = session.on_fire(fast).unwrap();

        assert!(session.on_response(fast_seq, Ok(vec![category("1", "Телефоны")])));
        // Медленный ответ на «те» пришёл последним
        assert!(!session.on_response(slow_seq, Ok(vec![category("2", "Тетради")])));
        assert_eq!(session.results().items()[0].id, "1");
    }

    #[test]
    fn test_latest_response_renders_each_outcome() {
        let mut session = SearchSession::new();

        let ticket = session.on_input("тел").unwrap();
        let (seq, _) = session.on_fire(ticket).unwrap();
        assert!(session.on_response(seq, Ok(vec![category("1", "Телефоны")])));
        assert!(matches!(session.results(), SearchResults::Found(items) if items.len() == 1));

        let ticket = session.on_input("xyz").unwrap();
        let (seq, _) = session.on_fire(ticket).unwrap();
        assert!(session.on_response(seq, Ok(Vec::new())));
        assert_eq!(session.results(), &SearchResults::NotFound);

        let ticket = session.on_input("тел").unwrap();
        let (seq, _) = session.on_fire(ticket).unwrap();
        assert!(session.on_response(seq, Err("Превышено время ожидания".into())));
        assert_eq!(
            session.results(),
            &SearchResults::Failed("Превышено время ожидания".into())
        );
    }

    #[test]
    fn test_clearing_field_drops_in_flight_response() {
        let mut session = SearchSession::new();
        let ticket = session.on_input("тел").unwrap();
        let (seq, _) = session.on_fire(ticket).unwrap();

        assert_eq!(session.on_input(""), None);
        assert_eq!(session.results(), &SearchResults::Prompt);
        assert!(!session.on_response(seq, Ok(vec![category("1", "Телефоны")])));
        assert_eq!(session.results(), &SearchResults::Prompt);
    }

    #[test]
    fn test_reset_after_catalog_change_drops_pending_and_in_flight() {
        let mut session = SearchSession::new();
        let ticket = session.on_input("тел").unwrap();
        let (seq, _) = session.on_fire(ticket).unwrap();
        let pending = session.on_input("теле").unwrap();

        session.reset();

        assert_eq!(session.term(), "");
        assert_eq!(session.results(), &SearchResults::Prompt);
        assert_eq!(session.on_fire(pending), None);
        assert!(!session.on_response(seq, Ok(vec![category("1", "Телефоны")])));
        assert_eq!(session.results(), &SearchResults::Prompt);
    }
}
